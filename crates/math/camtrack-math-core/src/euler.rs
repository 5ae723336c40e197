//! Euler angle conversions for 3x3 rotation matrices.
//!
//! Angles are in degrees and always reported as `(rx, ry, rz)` regardless
//! of the order they are applied in. A rotation order `abc` builds
//! `R[c] * R[b] * R[a]`, so the first axis acts on a column vector first.

use crate::matrix::Mat3;
use crate::order::{Axis, RotationOrder};
use crate::vector::Vec3;

/// Clamped `asin` in radians; guards round-off just outside [-1, 1].
#[inline]
fn asin_clamped(value: f64) -> f64 {
    value.clamp(-1.0, 1.0).asin()
}

impl Mat3 {
    /// Rotation by `degrees` about a single axis.
    pub fn from_axis_rotation(axis: Axis, degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        match axis {
            Axis::X => Self::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c),
            Axis::Y => Self::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c),
            Axis::Z => Self::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0),
        }
    }

    /// Rotation matrix for Euler angles in degrees.
    pub fn from_euler(rx: f64, ry: f64, rz: f64, order: RotationOrder) -> Self {
        let angle = |axis: Axis| match axis {
            Axis::X => rx,
            Axis::Y => ry,
            Axis::Z => rz,
        };
        let [first, second, third] = order.axes();
        Self::from_axis_rotation(third, angle(third))
            * Self::from_axis_rotation(second, angle(second))
            * Self::from_axis_rotation(first, angle(first))
    }

    /// Euler angles in degrees for a pure rotation matrix.
    ///
    /// At gimbal lock the split between the first and last axis is not
    /// unique; the returned angles still rebuild the same matrix.
    pub fn to_euler(&self, order: RotationOrder) -> Vec3 {
        let m = &self.to_rows();
        let (rx, ry, rz) = match order {
            RotationOrder::Xyz => (
                m[2][1].atan2(m[2][2]),
                -asin_clamped(m[2][0]),
                m[1][0].atan2(m[0][0]),
            ),
            RotationOrder::Xzy => (
                (-m[1][2]).atan2(m[1][1]),
                (-m[2][0]).atan2(m[0][0]),
                asin_clamped(m[1][0]),
            ),
            RotationOrder::Yxz => (
                asin_clamped(m[2][1]),
                (-m[2][0]).atan2(m[2][2]),
                (-m[0][1]).atan2(m[1][1]),
            ),
            RotationOrder::Yzx => (
                m[2][1].atan2(m[1][1]),
                m[0][2].atan2(m[0][0]),
                -asin_clamped(m[0][1]),
            ),
            RotationOrder::Zxy => (
                -asin_clamped(m[1][2]),
                m[0][2].atan2(m[2][2]),
                m[1][0].atan2(m[1][1]),
            ),
            RotationOrder::Zyx => (
                (-m[1][2]).atan2(m[2][2]),
                asin_clamped(m[0][2]),
                (-m[0][1]).atan2(m[0][0]),
            ),
        };
        Vec3::new(rx.to_degrees(), ry.to_degrees(), rz.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_axis() {
        let m = Mat3::from_axis_rotation(Axis::Z, 90.0);
        let v = m * Vec3::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(v, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_euler_round_trip_all_orders() {
        let angles = Vec3::new(10.0, 20.0, 30.0);
        for order in RotationOrder::ALL {
            let m = Mat3::from_euler(angles.x, angles.y, angles.z, order);
            assert_abs_diff_eq!(m.det(), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(m.to_euler(order), angles, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_orders_differ() {
        let a = Mat3::from_euler(10.0, 20.0, 30.0, RotationOrder::Xyz);
        let b = Mat3::from_euler(10.0, 20.0, 30.0, RotationOrder::Zyx);
        assert!(!approx::abs_diff_eq!(a, b, epsilon = 1e-6));
    }

    #[test]
    fn test_gimbal_lock_rebuilds_matrix() {
        let m = Mat3::from_euler(15.0, 90.0, 40.0, RotationOrder::Xyz);
        let e = m.to_euler(RotationOrder::Xyz);
        let rebuilt = Mat3::from_euler(e.x, e.y, e.z, RotationOrder::Xyz);
        assert_abs_diff_eq!(rebuilt, m, epsilon = 1e-9);
    }
}
