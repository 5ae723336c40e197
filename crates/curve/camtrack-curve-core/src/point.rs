//! 2-D sample used for keyframe positions and tangent handles.

use std::ops::{Add, Mul, Neg, Sub};

use camtrack_math_core::Vec2;
use serde::{Deserialize, Serialize};

use crate::CurveError;

/// Two values closer than this compare equal (rounding to 7 decimals).
pub const POINT_TOLERANCE: f64 = 0.5e-7;

#[inline]
pub(crate) fn near_zero(value: f64) -> bool {
    value.abs() < POINT_TOLERANCE
}

/// `x` is time (or curve parameter), `y` is value.
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        Vec2::from(*self).dot(&Vec2::from(*other))
    }

    #[inline]
    pub fn length(&self) -> f64 {
        Vec2::from(*self).length()
    }

    pub fn normalize(&self) -> Result<Self, CurveError> {
        Ok(Vec2::from(*self).normalize()?.into())
    }

    pub fn try_div_scalar(&self, rhs: f64) -> Result<Self, CurveError> {
        Ok(Vec2::from(*self).try_div_scalar(rhs)?.into())
    }

    pub fn try_div(&self, rhs: &Self) -> Result<Self, CurveError> {
        Ok(Vec2::from(*self).try_div(&Vec2::from(*rhs))?.into())
    }

    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        near_zero(self.x - other.x) && near_zero(self.y - other.y)
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(p: Point) -> Self {
        p.to_array()
    }
}

impl From<Vec2> for Point {
    #[inline]
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for Vec2 {
    #[inline]
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<f64> for Point {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        Self::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<f64> for Point {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self {
        Self::new(self.x - rhs, self.y - rhs)
    }
}

/// Component-wise product.
impl Mul for Point {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerant_equality() {
        assert_eq!(Point::new(1.0, 2.0), Point::new(1.00000001, 1.99999999));
        assert_ne!(Point::new(1.0, 2.0), Point::new(1.0000002, 2.0));
        assert_ne!(Point::new(0.0, 0.0), Point::new(0.0, 1.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(a - b, Point::new(-2.0, 3.0));
        assert_eq!(a * b, Point::new(3.0, -2.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(a + 1.0, Point::new(2.0, 3.0));
        assert_eq!(-a, Point::new(-1.0, -2.0));
        assert_eq!(a.dot(&b), 1.0);
    }

    #[test]
    fn test_division_and_normalize() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.length(), 5.0);
        assert_eq!(p.normalize().unwrap(), Point::new(0.6, 0.8));
        assert_eq!(p.try_div_scalar(2.0).unwrap(), Point::new(1.5, 2.0));
        assert!(p.try_div_scalar(0.0).is_err());
        assert!(p.try_div(&Point::new(1.0, 0.0)).is_err());
        let err = Point::default().normalize().unwrap_err();
        assert_eq!(err.category(), "arithmetic");
    }

    #[test]
    fn test_serde_as_pair() {
        let json = serde_json::to_string(&Point::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
        let back: Point = serde_json::from_str("[0, 3]").unwrap();
        assert_eq!(back, Point::new(0.0, 3.0));
    }
}
