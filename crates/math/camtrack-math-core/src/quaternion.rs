//! Hamilton quaternions and their conversions to rotation matrices and
//! Euler angles.

use std::ops::{Add, Mul, Neg, Sub};

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::matrix::Mat3;
use crate::order::{Axis, RotationOrder};
use crate::vector::Vec3;
use crate::MathError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    #[inline]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Rotation of `radians` about `axis`. The axis is used as given.
    pub fn from_axis_angle(axis: Vec3, radians: f64) -> Self {
        let (s, c) = (radians / 2.0).sin_cos();
        Self::new(c, axis.x * s, axis.y * s, axis.z * s)
    }

    /// Pure quaternion with zero real part.
    #[inline]
    pub fn from_vector(v: Vec3) -> Self {
        Self::new(0.0, v.x, v.y, v.z)
    }

    /// Quaternion for Euler angles in degrees, one closed form per order.
    pub fn from_euler(rx: f64, ry: f64, rz: f64, order: RotationOrder) -> Self {
        let half = |deg: f64| (deg.to_radians() / 2.0).sin_cos();
        let angle = |axis: Axis| match axis {
            Axis::X => rx,
            Axis::Y => ry,
            Axis::Z => rz,
        };
        // 1 is the last applied axis, 3 the first.
        let [first, second, third] = order.axes();
        let (s1, c1) = half(angle(third));
        let (s2, c2) = half(angle(second));
        let (s3, c3) = half(angle(first));

        match order {
            RotationOrder::Xyz => Self::new(
                s1 * s2 * s3 + c1 * c2 * c3,
                -s1 * s2 * c3 + s3 * c1 * c2,
                s1 * s3 * c2 + s2 * c1 * c3,
                s1 * c2 * c3 - s2 * s3 * c1,
            ),
            RotationOrder::Xzy => Self::new(
                -s1 * s2 * s3 + c1 * c2 * c3,
                s1 * s2 * c3 + s3 * c1 * c2,
                s1 * c2 * c3 + s2 * s3 * c1,
                -s1 * s3 * c2 + s2 * c1 * c3,
            ),
            RotationOrder::Yxz => Self::new(
                -s1 * s2 * s3 + c1 * c2 * c3,
                -s1 * s3 * c2 + s2 * c1 * c3,
                s1 * s2 * c3 + s3 * c1 * c2,
                s1 * c2 * c3 + s2 * s3 * c1,
            ),
            RotationOrder::Yzx => Self::new(
                s1 * s2 * s3 + c1 * c2 * c3,
                s1 * c2 * c3 - s2 * s3 * c1,
                -s1 * s2 * c3 + s3 * c1 * c2,
                s1 * s3 * c2 + s2 * c1 * c3,
            ),
            RotationOrder::Zxy => Self::new(
                s1 * s2 * s3 + c1 * c2 * c3,
                s1 * s3 * c2 + s2 * c1 * c3,
                s1 * c2 * c3 - s2 * s3 * c1,
                -s1 * s2 * c3 + s3 * c1 * c2,
            ),
            RotationOrder::Zyx => Self::new(
                -s1 * s2 * s3 + c1 * c2 * c3,
                s1 * c2 * c3 + s2 * s3 * c1,
                -s1 * s3 * c2 + s2 * c1 * c3,
                s1 * s2 * c3 + s3 * c1 * c2,
            ),
        }
    }

    /// Trace-based extraction from a rotation matrix. Fails when the
    /// recovered real part is zero (rotations of 180 degrees).
    pub fn from_matrix(m: &Mat3) -> Result<Self, MathError> {
        let w = (1.0 + m[0][0] + m[1][1] + m[2][2]).max(0.0).sqrt() * 0.5;
        if w == 0.0 {
            return Err(MathError::division_by_zero(
                "quaternion from matrix with zero real part",
            ));
        }
        let d = 4.0 * w;
        Ok(Self::new(
            w,
            (m[2][1] - m[1][2]) / d,
            (m[0][2] - m[2][0]) / d,
            (m[1][0] - m[0][1]) / d,
        ))
    }

    #[inline]
    pub fn real(&self) -> f64 {
        self.w
    }

    #[inline]
    pub fn imaginary(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn length2(&self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length2().sqrt()
    }

    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn try_div(&self, rhs: f64) -> Result<Self, MathError> {
        if rhs == 0.0 {
            return Err(MathError::division_by_zero("quaternion divided by zero"));
        }
        Ok(Self::new(self.w / rhs, self.x / rhs, self.y / rhs, self.z / rhs))
    }

    pub fn normalize(&self) -> Result<Self, MathError> {
        self.try_div(self.length())
    }

    pub fn inverse(&self) -> Result<Self, MathError> {
        self.conjugate().try_div(self.length2())
    }

    /// Unit rotation axis. Undefined for the identity rotation.
    pub fn axis(&self) -> Result<Vec3, MathError> {
        let denominator = (1.0 - self.w * self.w).sqrt();
        if denominator == 0.0 || denominator.is_nan() {
            return Err(MathError::division_by_zero(
                "quaternion axis of identity rotation",
            ));
        }
        self.imaginary().try_div_scalar(denominator)?.normalize()
    }

    /// Rotation angle in radians.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.w.clamp(-1.0, 1.0).acos() * 2.0
    }

    /// Rotate `v` by computing `q * v * q⁻¹`.
    pub fn rotate(&self, v: Vec3) -> Result<Vec3, MathError> {
        let p = Self::from_vector(v);
        Ok((*self * p * self.inverse()?).imaginary())
    }

    pub fn to_matrix(&self) -> Mat3 {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);
        Mat3::new(
            w * w + x * x - y * y - z * z,
            2.0 * (x * y - w * z),
            2.0 * (w * y + x * z),
            2.0 * (x * y + w * z),
            w * w - x * x + y * y - z * z,
            2.0 * (y * z - w * x),
            2.0 * (x * z - w * y),
            2.0 * (w * x + y * z),
            w * w - x * x - y * y + z * z,
        )
    }

    /// Euler angles in degrees as `(rx, ry, rz)`.
    pub fn to_euler(&self, order: RotationOrder) -> Vec3 {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);
        let asin = |v: f64| v.clamp(-1.0, 1.0).asin();
        // Angles for the axes of `order`, in application order.
        let (a1, a2, a3) = match order {
            RotationOrder::Xyz => (
                (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y)),
                asin(2.0 * (w * y - z * x)),
                (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z)),
            ),
            RotationOrder::Xzy => (
                -(2.0 * (y * z - w * x)).atan2(1.0 - 2.0 * (x * x + z * z)),
                asin(2.0 * (x * y + w * z)),
                -(2.0 * (x * z - w * y)).atan2(1.0 - 2.0 * (y * y + z * z)),
            ),
            RotationOrder::Yzx => (
                (2.0 * (w * y + x * z)).atan2(1.0 - 2.0 * (y * y + z * z)),
                -asin(2.0 * (x * y - w * z)),
                (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + z * z)),
            ),
            RotationOrder::Yxz => (
                -(2.0 * (x * z - w * y)).atan2(1.0 - 2.0 * (x * x + y * y)),
                asin(2.0 * (w * x + y * z)),
                -(2.0 * (x * y - w * z)).atan2(1.0 - 2.0 * (x * x + z * z)),
            ),
            RotationOrder::Zxy => (
                (2.0 * (x * y + w * z)).atan2(1.0 - 2.0 * (x * x + z * z)),
                -asin(2.0 * (y * z - w * x)),
                (2.0 * (w * y + x * z)).atan2(1.0 - 2.0 * (x * x + y * y)),
            ),
            RotationOrder::Zyx => (
                -(2.0 * (x * y - w * z)).atan2(1.0 - 2.0 * (y * y + z * z)),
                asin(2.0 * (w * y + x * z)),
                -(2.0 * (y * z - w * x)).atan2(1.0 - 2.0 * (x * x + y * y)),
            ),
        };
        let mut out = Vec3::zero();
        for (axis, angle) in order.axes().into_iter().zip([a1, a2, a3]) {
            let slot = match axis {
                Axis::X => 0,
                Axis::Y => 1,
                Axis::Z => 2,
            };
            out[slot] = angle.to_degrees();
        }
        out
    }
}

impl Add for Quaternion {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.w + rhs.w, self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Quaternion {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.w - rhs.w, self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Hamilton product.
impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self.imaginary(), rhs.imaginary());
        let real = self.w * rhs.w - a.dot(&b);
        let imag = b * self.w + a * rhs.w + a.cross(&b);
        Self::new(real, imag.x, imag.y, imag.z)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.w * rhs, self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Quaternion {
    type Output = Self;
    fn neg(self) -> Self {
        self * -1.0
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl Mat3 {
    #[inline]
    pub fn from_quaternion(q: &Quaternion) -> Self {
        q.to_matrix()
    }

    #[inline]
    pub fn to_quaternion(&self) -> Result<Quaternion, MathError> {
        Quaternion::from_matrix(self)
    }
}
