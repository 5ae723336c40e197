//! Row-major 2x2, 3x3 and 4x4 `f64` matrices.
//!
//! Determinants use cofactor expansion along the first row (3x3 via 2x2
//! minors, 4x4 via 3x3 minors). Inversion reports
//! [`MathError::SingularMatrix`] when the determinant is exactly zero.

use std::array;
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::vector::{Vec2, Vec3, Vec4};
use crate::MathError;

macro_rules! matrix {
    ($(#[$meta:meta])* $name:ident, $vec:ident, $dim:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            rows: [[f64; $dim]; $dim],
        }

        impl $name {
            pub const DIM: usize = $dim;

            #[inline]
            pub const fn from_rows(rows: [[f64; $dim]; $dim]) -> Self {
                Self { rows }
            }

            #[inline]
            pub const fn zero() -> Self {
                Self { rows: [[0.0; $dim]; $dim] }
            }

            pub fn identity() -> Self {
                Self::from_rows(array::from_fn(|r| array::from_fn(|c| if r == c { 1.0 } else { 0.0 })))
            }

            pub fn from_diagonal(diagonal: $vec) -> Self {
                let d = diagonal.to_array();
                Self::from_rows(array::from_fn(|r| array::from_fn(|c| if r == c { d[r] } else { 0.0 })))
            }

            #[inline]
            pub fn to_rows(&self) -> [[f64; $dim]; $dim] {
                self.rows
            }

            #[inline]
            pub fn row(&self, index: usize) -> $vec {
                $vec::from(self.rows[index])
            }

            #[inline]
            pub fn col(&self, index: usize) -> $vec {
                $vec::from(array::from_fn::<f64, $dim, _>(|r| self.rows[r][index]))
            }

            pub fn transpose(&self) -> Self {
                Self::from_rows(array::from_fn(|r| array::from_fn(|c| self.rows[c][r])))
            }

            /// Zero every cell in place.
            pub fn clear(&mut self) {
                self.rows = [[0.0; $dim]; $dim];
            }

            fn map(&self, f: impl Fn(f64) -> f64) -> Self {
                Self::from_rows(self.rows.map(|row| row.map(&f)))
            }

            fn zip(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
                Self::from_rows(array::from_fn(|r| {
                    array::from_fn(|c| f(self.rows[r][c], other.rows[r][c]))
                }))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::identity()
            }
        }

        impl Index<usize> for $name {
            type Output = [f64; $dim];
            #[inline]
            fn index(&self, row: usize) -> &[f64; $dim] {
                &self.rows[row]
            }
        }

        impl IndexMut<usize> for $name {
            #[inline]
            fn index_mut(&mut self, row: usize) -> &mut [f64; $dim] {
                &mut self.rows[row]
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                self.zip(&rhs, |a, b| a + b)
            }
        }

        impl Add<f64> for $name {
            type Output = Self;
            fn add(self, rhs: f64) -> Self {
                self.map(|a| a + rhs)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                self.zip(&rhs, |a, b| a - b)
            }
        }

        impl Sub<f64> for $name {
            type Output = Self;
            fn sub(self, rhs: f64) -> Self {
                self.map(|a| a - rhs)
            }
        }

        impl Neg for $name {
            type Output = Self;
            fn neg(self) -> Self {
                self.map(|a| -a)
            }
        }

        impl Mul for $name {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self {
                Self::from_rows(array::from_fn(|r| {
                    array::from_fn(|c| self.row(r).dot(&rhs.col(c)))
                }))
            }
        }

        impl Mul<$vec> for $name {
            type Output = $vec;
            fn mul(self, rhs: $vec) -> $vec {
                $vec::from(array::from_fn::<f64, $dim, _>(|r| self.row(r).dot(&rhs)))
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                self.map(|a| a * rhs)
            }
        }

        impl Mul<$name> for f64 {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl AbsDiffEq for $name {
            type Epsilon = f64;

            fn default_epsilon() -> f64 {
                f64::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                self.rows
                    .iter()
                    .flatten()
                    .zip(other.rows.iter().flatten())
                    .all(|(a, b)| a.abs_diff_eq(b, epsilon))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for row in &self.rows {
                    let cells: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
                    writeln!(f, "{}", cells.join("\t"))?;
                }
                Ok(())
            }
        }
    };
}

matrix!(
    /// 2x2 matrix
    Mat2, Vec2, 2
);
matrix!(
    /// 3x3 matrix; rotation blocks and Euler conversions live here.
    Mat3, Vec3, 3
);
matrix!(
    /// 4x4 homogeneous transform
    Mat4, Vec4, 4
);

impl Mat2 {
    #[rustfmt::skip]
    pub const fn new(a00: f64, a01: f64,
                     a10: f64, a11: f64) -> Self {
        Self::from_rows([[a00, a01], [a10, a11]])
    }

    #[inline]
    pub fn det(&self) -> f64 {
        self.rows[0][0] * self.rows[1][1] - self.rows[0][1] * self.rows[1][0]
    }

    pub fn inverse(&self) -> Result<Self, MathError> {
        let det = self.det();
        if det == 0.0 {
            return Err(MathError::SingularMatrix { dimension: 2 });
        }
        let m = &self.rows;
        Ok(Self::new(
            m[1][1] / det,
            -m[0][1] / det,
            -m[1][0] / det,
            m[0][0] / det,
        ))
    }
}

impl Mat3 {
    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(a00: f64, a01: f64, a02: f64,
                     a10: f64, a11: f64, a12: f64,
                     a20: f64, a21: f64, a22: f64) -> Self {
        Self::from_rows([[a00, a01, a02], [a10, a11, a12], [a20, a21, a22]])
    }

    /// The 2x2 matrix left after deleting `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> Mat2 {
        let keep = |skip: usize| -> [usize; 2] {
            let mut out = [0; 2];
            let mut n = 0;
            for i in 0..3 {
                if i != skip {
                    out[n] = i;
                    n += 1;
                }
            }
            out
        };
        let (rs, cs) = (keep(row), keep(col));
        Mat2::from_rows(array::from_fn(|r| array::from_fn(|c| self.rows[rs[r]][cs[c]])))
    }

    #[inline]
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(row, col).det()
    }

    pub fn det(&self) -> f64 {
        (0..3).map(|c| self.rows[0][c] * self.cofactor(0, c)).sum()
    }

    pub fn inverse(&self) -> Result<Self, MathError> {
        let det = self.det();
        if det == 0.0 {
            return Err(MathError::SingularMatrix { dimension: 3 });
        }
        // adjugate = transposed cofactor matrix
        Ok(Self::from_rows(array::from_fn(|r| {
            array::from_fn(|c| self.cofactor(c, r) / det)
        })))
    }
}

impl Mat4 {
    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(a00: f64, a01: f64, a02: f64, a03: f64,
                     a10: f64, a11: f64, a12: f64, a13: f64,
                     a20: f64, a21: f64, a22: f64, a23: f64,
                     a30: f64, a31: f64, a32: f64, a33: f64) -> Self {
        Self::from_rows([
            [a00, a01, a02, a03],
            [a10, a11, a12, a13],
            [a20, a21, a22, a23],
            [a30, a31, a32, a33],
        ])
    }

    /// The 3x3 matrix left after deleting `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> Mat3 {
        let keep = |skip: usize| -> [usize; 3] {
            let mut out = [0; 3];
            let mut n = 0;
            for i in 0..4 {
                if i != skip {
                    out[n] = i;
                    n += 1;
                }
            }
            out
        };
        let (rs, cs) = (keep(row), keep(col));
        Mat3::from_rows(array::from_fn(|r| array::from_fn(|c| self.rows[rs[r]][cs[c]])))
    }

    #[inline]
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(row, col).det()
    }

    pub fn det(&self) -> f64 {
        (0..4).map(|c| self.rows[0][c] * self.cofactor(0, c)).sum()
    }

    pub fn inverse(&self) -> Result<Self, MathError> {
        let det = self.det();
        if det == 0.0 {
            return Err(MathError::SingularMatrix { dimension: 4 });
        }
        Ok(Self::from_rows(array::from_fn(|r| {
            array::from_fn(|c| self.cofactor(c, r) / det)
        })))
    }

    #[inline]
    pub fn diagonal(&self) -> Vec4 {
        Vec4::new(
            self.rows[0][0],
            self.rows[1][1],
            self.rows[2][2],
            self.rows[3][3],
        )
    }
}

impl From<Mat3> for Mat2 {
    fn from(m: Mat3) -> Self {
        Mat2::from_rows(array::from_fn(|r| array::from_fn(|c| m.rows[r][c])))
    }
}

impl From<Mat4> for Mat2 {
    fn from(m: Mat4) -> Self {
        Mat2::from_rows(array::from_fn(|r| array::from_fn(|c| m.rows[r][c])))
    }
}

impl From<Mat4> for Mat3 {
    fn from(m: Mat4) -> Self {
        Mat3::from_rows(array::from_fn(|r| array::from_fn(|c| m.rows[r][c])))
    }
}

impl From<Mat2> for Mat3 {
    fn from(m: Mat2) -> Self {
        let mut out = Mat3::identity();
        for r in 0..2 {
            for c in 0..2 {
                out.rows[r][c] = m.rows[r][c];
            }
        }
        out
    }
}

impl From<Mat2> for Mat4 {
    fn from(m: Mat2) -> Self {
        Mat4::from(Mat3::from(m))
    }
}

impl From<Mat3> for Mat4 {
    fn from(m: Mat3) -> Self {
        let mut out = Mat4::identity();
        for r in 0..3 {
            for c in 0..3 {
                out.rows[r][c] = m.rows[r][c];
            }
        }
        out
    }
}
