//! Curve evaluation.
//!
//! Outside the keyframe range every method extrapolates linearly along the
//! outer tangent: `first.y - first.left_tangent * (first.x - x)` before the
//! first key and `last.y + last.right_tangent * (x - last.x)` after the last.
//! Inside the range the bracketing pair is found by binary search and
//! handed to the selected [`Interpolator`].

pub mod functions;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::keyframe::Keyframe;
use crate::CurveError;

pub use functions::{
    HermiteInterpolation, Interpolator, LinearInterpolation, NaturalCubicInterpolation,
    StepInterpolation,
};

/// Interior interpolation method of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Step,
    Linear,
    #[default]
    Hermite,
    NaturalCubic,
}

impl Interpolation {
    pub const ALL: [Interpolation; 4] = [
        Self::Step,
        Self::Linear,
        Self::Hermite,
        Self::NaturalCubic,
    ];

    /// Get the name of this interpolation method
    #[inline]
    pub fn name(&self) -> &'static str {
        self.interpolator().name()
    }

    /// The stateless evaluator for this method.
    pub fn interpolator(&self) -> &'static dyn Interpolator {
        match self {
            Self::Step => &StepInterpolation,
            Self::Linear => &LinearInterpolation,
            Self::Hermite => &HermiteInterpolation,
            Self::NaturalCubic => &NaturalCubicInterpolation,
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CurveError::UnknownInterpolation {
                name: s.to_string(),
            })
    }
}

/// Index of the first keyframe strictly after `x` (bisect right).
#[inline]
pub(crate) fn upper_bound(keyframes: &[Keyframe], x: f64) -> usize {
    keyframes.partition_point(|k| k.x() <= x)
}

/// Evaluate sorted `keyframes` at `x`. `None` when there are no keys or
/// `x` is NaN.
pub fn evaluate(keyframes: &[Keyframe], x: f64, method: Interpolation) -> Option<f64> {
    if x.is_nan() {
        return None;
    }
    let first = keyframes.first()?;
    let last = keyframes.last()?;

    if x <= first.x() {
        return Some(first.y() - first.left_tangent() * (first.x() - x));
    }
    if x >= last.x() {
        return Some(last.y() + last.right_tangent() * (x - last.x()));
    }

    let index = upper_bound(keyframes, x);
    let prev = &keyframes[index - 1];
    let next = &keyframes[index];
    Some(method.interpolator().interpolate(prev, next, x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use approx::assert_abs_diff_eq;

    fn keys() -> Vec<Keyframe> {
        vec![
            Keyframe::with_handles(
                Point::new(0.0, 0.0),
                Point::new(-1.0, -2.0),
                Point::new(1.0, 1.0),
            ),
            Keyframe::with_handles(
                Point::new(2.0, 4.0),
                Point::new(-1.0, 0.0),
                Point::new(1.0, 0.0),
            ),
            Keyframe::with_handles(
                Point::new(5.0, 1.0),
                Point::new(-1.0, 1.0),
                Point::new(2.0, 3.0),
            ),
        ]
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "natural_cubic".parse::<Interpolation>().unwrap(),
            Interpolation::NaturalCubic
        );
        assert_eq!("Step".parse::<Interpolation>().unwrap(), Interpolation::Step);
        assert!(matches!(
            "bezier".parse::<Interpolation>(),
            Err(CurveError::UnknownInterpolation { .. })
        ));
        for m in Interpolation::ALL {
            assert_eq!(m.to_string().parse::<Interpolation>().unwrap(), m);
        }
    }

    #[test]
    fn test_empty_is_none() {
        for m in Interpolation::ALL {
            assert_eq!(evaluate(&[], 1.0, m), None);
        }
    }

    #[test]
    fn test_extrapolation_every_method() {
        let keys = keys();
        for m in Interpolation::ALL {
            // first: y=0, left tangent = 2
            assert_abs_diff_eq!(evaluate(&keys, -3.0, m).unwrap(), -6.0, epsilon = 1e-12);
            // last: y=1, right tangent = 1.5
            assert_abs_diff_eq!(evaluate(&keys, 7.0, m).unwrap(), 4.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_interior_knots_pass_through() {
        let keys = keys();
        for m in Interpolation::ALL {
            assert_abs_diff_eq!(evaluate(&keys, 2.0, m).unwrap(), 4.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_single_keyframe() {
        let keys = [Keyframe::with_handles(
            Point::new(1.0, 3.0),
            Point::new(-1.0, -1.0),
            Point::new(1.0, 2.0),
        )];
        assert_eq!(evaluate(&keys, 1.0, Interpolation::Linear), Some(3.0));
        assert_eq!(evaluate(&keys, 2.0, Interpolation::Linear), Some(5.0));
        assert_eq!(evaluate(&keys, 0.0, Interpolation::Linear), Some(2.0));
    }
}
