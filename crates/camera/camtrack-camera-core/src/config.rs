//! Camera evaluation options.

use serde::{Deserialize, Serialize};

use crate::keyframe::EvalOptions;
use crate::CameraError;

/// Supported length units, smallest first. Neighbours differ by a factor of ten.
pub const DEFAULT_UNITS: [&str; 4] = ["mm", "cm", "dm", "m"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Unit names, each ten times the previous one.
    pub units: Vec<String>,
    /// Evaluate the pose from the matrix cells instead of the SRT channels.
    pub use_matrix: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            units: DEFAULT_UNITS.iter().map(|u| u.to_string()).collect(),
            use_matrix: false,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), CameraError> {
        if self.units.is_empty() {
            return Err(CameraError::InvalidConfig {
                reason: "units must not be empty".to_string(),
            });
        }
        for (i, unit) in self.units.iter().enumerate() {
            if self.units[..i].contains(unit) {
                return Err(CameraError::InvalidConfig {
                    reason: format!("unit {unit:?} is listed twice"),
                });
            }
        }
        Ok(())
    }

    /// Position of `unit` in the unit list.
    pub fn unit_index(&self, unit: &str) -> Result<usize, CameraError> {
        self.units
            .iter()
            .position(|u| u == unit)
            .ok_or_else(|| CameraError::UnknownUnit {
                unit: unit.to_string(),
            })
    }

    /// Multiplier converting a length in `from` units to `to` units.
    pub fn unit_factor(&self, from: &str, to: &str) -> Result<f64, CameraError> {
        let exponent = self.unit_index(from)? as i32 - self.unit_index(to)? as i32;
        Ok(10f64.powi(exponent))
    }

    /// Options carrying this configuration's evaluation mode.
    pub fn eval_options(&self) -> EvalOptions<'static> {
        EvalOptions {
            use_matrix: self.use_matrix,
            ..EvalOptions::default()
        }
    }
}
