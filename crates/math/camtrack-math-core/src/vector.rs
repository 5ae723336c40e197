//! Fixed-dimension `f64` vectors.
//!
//! All three types share one macro-generated implementation; division is
//! only offered in checked form so a zero divisor surfaces as
//! [`MathError::DivisionByZero`] instead of producing `inf`/`NaN`.

use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::MathError;

macro_rules! vector {
    ($(#[$meta:meta])* $name:ident, $dim:literal, $($field:ident => $idx:literal),+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
        pub struct $name {
            $(pub $field: f64,)+
        }

        impl $name {
            #[inline]
            pub const fn new($($field: f64),+) -> Self {
                Self { $($field),+ }
            }

            #[inline]
            pub const fn zero() -> Self {
                Self { $($field: 0.0),+ }
            }

            #[inline]
            pub const fn splat(value: f64) -> Self {
                Self { $($field: value),+ }
            }

            #[inline]
            pub fn dot(&self, other: &Self) -> f64 {
                0.0 $(+ self.$field * other.$field)+
            }

            #[inline]
            pub fn length2(&self) -> f64 {
                self.dot(self)
            }

            #[inline]
            pub fn length(&self) -> f64 {
                self.length2().sqrt()
            }

            /// Unit vector in the same direction; fails on a zero-length vector.
            pub fn normalize(&self) -> Result<Self, MathError> {
                let len = self.length();
                if len == 0.0 {
                    return Err(MathError::division_by_zero(concat!(
                        stringify!($name),
                        " normalize of zero-length vector"
                    )));
                }
                Ok(Self { $($field: self.$field / len),+ })
            }

            /// Divide every component by `rhs`.
            pub fn try_div_scalar(&self, rhs: f64) -> Result<Self, MathError> {
                if rhs == 0.0 {
                    return Err(MathError::division_by_zero(concat!(
                        stringify!($name),
                        " divided by scalar zero"
                    )));
                }
                Ok(Self { $($field: self.$field / rhs),+ })
            }

            /// Component-wise division; fails if any component of `rhs` is zero.
            pub fn try_div(&self, rhs: &Self) -> Result<Self, MathError> {
                if rhs.to_array().iter().any(|c| *c == 0.0) {
                    return Err(MathError::division_by_zero(concat!(
                        stringify!($name),
                        " divided by vector with zero component"
                    )));
                }
                Ok(Self { $($field: self.$field / rhs.$field),+ })
            }

            #[inline]
            pub fn to_array(self) -> [f64; $dim] {
                [$(self.$field),+]
            }
        }

        impl From<[f64; $dim]> for $name {
            #[inline]
            fn from(a: [f64; $dim]) -> Self {
                Self { $($field: a[$idx]),+ }
            }
        }

        impl From<$name> for [f64; $dim] {
            #[inline]
            fn from(v: $name) -> Self {
                v.to_array()
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Add<f64> for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: f64) -> Self {
                Self { $($field: self.$field + rhs),+ }
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Sub<f64> for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: f64) -> Self {
                Self { $($field: self.$field - rhs),+ }
            }
        }

        /// Component-wise product.
        impl Mul for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self { $($field: self.$field * rhs.$field),+ }
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f64) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Mul<$name> for f64 {
            type Output = $name;
            #[inline]
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl Index<usize> for $name {
            type Output = f64;
            fn index(&self, index: usize) -> &f64 {
                match index {
                    $($idx => &self.$field,)+
                    _ => panic!(concat!(stringify!($name), " index out of range: {}"), index),
                }
            }
        }

        impl IndexMut<usize> for $name {
            fn index_mut(&mut self, index: usize) -> &mut f64 {
                match index {
                    $($idx => &mut self.$field,)+
                    _ => panic!(concat!(stringify!($name), " index out of range: {}"), index),
                }
            }
        }

        impl AbsDiffEq for $name {
            type Epsilon = f64;

            fn default_epsilon() -> f64 {
                f64::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                true $(&& self.$field.abs_diff_eq(&other.$field, epsilon))+
            }
        }
    };
}

vector!(
    /// 2D vector
    Vec2, 2, x => 0, y => 1
);
vector!(
    /// 3D vector
    Vec3, 3, x => 0, y => 1, z => 2
);
vector!(
    /// 4D vector (homogeneous coordinates)
    Vec4, 4, x => 0, y => 1, z => 2, w => 3
);

impl Vec3 {
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn one() -> Self {
        Self::splat(1.0)
    }

    #[inline]
    pub fn extend(self, w: f64) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

impl Vec4 {
    /// Drop the `w` component.
    #[inline]
    pub fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}
