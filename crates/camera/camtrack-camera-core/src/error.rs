//! Error types for cameras

use camtrack_curve_core::CurveError;
use camtrack_math_core::MathError;
use serde::{Deserialize, Serialize};

/// Errors raised while evaluating, reading or writing a camera.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CameraError {
    /// A channel curve or its codec failed
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Composing or decomposing the pose failed
    #[error(transparent)]
    Math(#[from] MathError),

    /// Unit missing from the configured unit list
    #[error("Unknown unit: {unit:?}")]
    UnknownUnit { unit: String },

    /// Evaluation time that is not a number
    #[error("Invalid evaluation time: {time}")]
    InvalidTime { time: f64 },

    /// Name that is neither a channel nor a matrix cell
    #[error("Unknown channel: {name:?}")]
    UnknownChannel { name: String },

    /// Path suffix other than `.cam`
    #[error("Unsupported file extension: {path}")]
    UnsupportedExtension { path: String },

    /// Well-formed JSON whose content is not a camera
    #[error("Invalid camera document: {reason}")]
    InvalidDocument { reason: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// IO error
    #[error("IO error: {reason}")]
    IoError { reason: String },
}

impl CameraError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Curve(inner) => inner.category(),
            Self::Math(inner) => inner.category(),
            Self::UnknownUnit { .. }
            | Self::InvalidTime { .. }
            | Self::UnknownChannel { .. }
            | Self::UnsupportedExtension { .. }
            | Self::InvalidConfig { .. } => "validation",
            Self::InvalidDocument { .. } => "format",
            Self::SerializationError { .. } => "serialization",
            Self::IoError { .. } => "io",
        }
    }
}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CameraError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            return Self::InvalidDocument {
                reason: err.to_string(),
            };
        }
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            CameraError::UnknownUnit { unit: "ft".into() }.category(),
            "validation"
        );
        assert_eq!(
            CameraError::from(CurveError::EmptyCurve).category(),
            "domain"
        );
        assert_eq!(
            CameraError::from(MathError::SingularMatrix { dimension: 4 }).category(),
            "arithmetic"
        );
    }

    #[test]
    fn test_json_data_error_is_invalid_document() {
        let err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        assert!(matches!(
            CameraError::from(err),
            CameraError::InvalidDocument { .. }
        ));
        let err = serde_json::from_str::<u32>("{").unwrap_err();
        assert_eq!(CameraError::from(err).category(), "serialization");
    }

    #[test]
    fn test_display() {
        let err = CameraError::UnknownChannel { name: "tx".into() };
        assert_eq!(err.to_string(), "Unknown channel: \"tx\"");
    }
}
