use crate::interp::Interpolation;
use crate::keyframe::Keyframe;

/// Interior evaluator between two bracketing keyframes.
///
/// Callers guarantee `prev.x() <= x < next.x()` and `prev.x() < next.x()`.
pub trait Interpolator: Send + Sync {
    /// Get the name of this interpolation function
    fn name(&self) -> &'static str;

    /// Get the interpolation type
    fn interpolation_type(&self) -> Interpolation;

    fn interpolate(&self, prev: &Keyframe, next: &Keyframe, x: f64) -> f64;
}

/// Zero-order hold on the previous keyframe.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInterpolation;

impl Interpolator for StepInterpolation {
    fn name(&self) -> &'static str {
        "step"
    }

    fn interpolation_type(&self) -> Interpolation {
        Interpolation::Step
    }

    fn interpolate(&self, prev: &Keyframe, _next: &Keyframe, _x: f64) -> f64 {
        prev.y()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LinearInterpolation;

impl Interpolator for LinearInterpolation {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn interpolation_type(&self) -> Interpolation {
        Interpolation::Linear
    }

    fn interpolate(&self, prev: &Keyframe, next: &Keyframe, x: f64) -> f64 {
        let t = (x - prev.x()) / (next.x() - prev.x());
        (1.0 - t) * prev.y() + t * next.y()
    }
}

/// Cubic Hermite segment using `prev.right_tangent` and
/// `next.left_tangent` as end slopes.
///
/// The cubic is expressed in time units from the previous key,
/// `p0 + p1*s + p2*s^2 + p3*s^3` with `s = x - prev.x`, and evaluated by
/// Horner's rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct HermiteInterpolation;

impl Interpolator for HermiteInterpolation {
    fn name(&self) -> &'static str {
        "hermite"
    }

    fn interpolation_type(&self) -> Interpolation {
        Interpolation::Hermite
    }

    fn interpolate(&self, prev: &Keyframe, next: &Keyframe, x: f64) -> f64 {
        let delta_x = next.x() - prev.x();
        let delta_y = next.y() - prev.y();
        let m1 = next.left_tangent();

        let p0 = prev.y();
        let p1 = prev.right_tangent();
        let p2 = (3.0 * delta_y - (2.0 * p1 + m1) * delta_x) / (delta_x * delta_x);
        let p3 = ((m1 + p1) * delta_x - 2.0 * delta_y) / (delta_x * delta_x * delta_x);

        let s = x - prev.x();
        ((p3 * s + p2) * s + p1) * s + p0
    }
}

/// Newton divided-difference cubic over the doubled knots
/// `z0 = z1 = prev.x`, `z2 = z3 = next.x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalCubicInterpolation;

impl Interpolator for NaturalCubicInterpolation {
    fn name(&self) -> &'static str {
        "natural_cubic"
    }

    fn interpolation_type(&self) -> Interpolation {
        Interpolation::NaturalCubic
    }

    fn interpolate(&self, prev: &Keyframe, next: &Keyframe, x: f64) -> f64 {
        let (prev_x, prev_y) = (prev.x(), prev.y());
        let (next_x, next_y) = (next.x(), next.y());
        let delta_x = next_x - prev_x;

        let f_z0 = prev_y;
        let f_z0z1 = prev.right_tangent();
        let f_z1z2 = (next_y - prev_y) / delta_x;
        let f_z2z3 = next.left_tangent();
        let f_z0z1z2 = (f_z1z2 - f_z0z1) / delta_x;
        let f_z1z2z3 = (f_z2z3 - f_z1z2) / delta_x;
        let f_z0z1z2z3 = (f_z1z2z3 - f_z0z1z2) / delta_x;

        let t0 = x - prev_x;
        f_z0 + f_z0z1 * t0 + f_z0z1z2 * t0 * t0 + f_z0z1z2z3 * (x - next_x) * t0 * t0
    }
}
