//! Error types for the transform algebra.

use serde::{Deserialize, Serialize};

/// Errors raised by vector, matrix and quaternion operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MathError {
    /// Inversion of a matrix whose determinant is exactly zero
    #[error("Singular matrix: {dimension}x{dimension} determinant is zero")]
    SingularMatrix { dimension: usize },

    /// Division by a zero scalar, a vector with a zero component, or a zero-length value
    #[error("Division by zero: {context}")]
    DivisionByZero { context: String },

    /// Rotation order string is not one of the six axis permutations
    #[error("Unknown rotation order: {order}")]
    UnknownRotationOrder { order: String },

    /// Transform order string is not one of the six s/r/t permutations
    #[error("Unknown transform order: {order}")]
    UnknownTransformOrder { order: String },
}

impl MathError {
    pub(crate) fn division_by_zero(context: impl Into<String>) -> Self {
        Self::DivisionByZero {
            context: context.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::SingularMatrix { .. } | Self::DivisionByZero { .. } => "arithmetic",
            Self::UnknownRotationOrder { .. } | Self::UnknownTransformOrder { .. } => {
                "validation"
            }
        }
    }
}
