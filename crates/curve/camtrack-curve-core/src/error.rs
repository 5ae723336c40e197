//! Error types for curves and their codecs

use camtrack_math_core::MathError;
use serde::{Deserialize, Serialize};

/// Errors raised while editing, evaluating, reading or writing a curve.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CurveError {
    /// Point arithmetic failed
    #[error(transparent)]
    Math(#[from] MathError),

    /// Binary stream does not start with `curv`
    #[error("Bad magic: expected \"curv\", found {found:?}")]
    BadMagic { found: String },

    /// Binary major version this reader does not understand
    #[error("Unsupported binary version {major}.{minor}")]
    UnsupportedVersion { major: i16, minor: i16 },

    /// Atom tag other than `glob` or `keyf`
    #[error("Unknown atom: {tag:?}")]
    UnknownAtom { tag: String },

    /// Global value type code outside {0x01, 0x02, 0x04, 0x08}
    #[error("Unknown global value type code: {code:#04x} for key {key:?}")]
    UnknownValueType { key: String, code: u8 },

    /// Atom declares more bytes than the reader accepts
    #[error("Atom {tag:?} declares {size} bytes, limit is {limit}")]
    AtomTooLarge { tag: String, size: u64, limit: u64 },

    /// Stream ended or an atom overran its declared size
    #[error("Truncated data: {context}")]
    Truncated { context: String },

    /// Well-formed input whose content is not a curve
    #[error("Invalid curve document: {reason}")]
    InvalidDocument { reason: String },

    /// Metadata key that cannot be written as a NUL-terminated string
    #[error("Invalid metadata key: {key:?}")]
    InvalidMetadataKey { key: String },

    /// Metadata value that cannot be written in the binary form
    #[error("Invalid metadata value for {key:?}: {reason}")]
    InvalidMetadataValue { key: String, reason: String },

    /// Path suffix is neither `.curve` nor `.bcurve`
    #[error("Unsupported file extension: {path}")]
    UnsupportedExtension { path: String },

    /// Interpolation method name not recognised
    #[error("Unknown interpolation method: {name}")]
    UnknownInterpolation { name: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Keyframe index past the end of the curve
    #[error("Index {index} out of range for curve of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// `remove` found no keyframe equal to the argument
    #[error("Keyframe not found at x = {x}")]
    KeyframeNotFound { x: f64 },

    /// Operation needs at least one keyframe
    #[error("Curve has no keyframes")]
    EmptyCurve,

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// IO error
    #[error("IO error: {reason}")]
    IoError { reason: String },
}

impl CurveError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Math(inner) => inner.category(),
            Self::BadMagic { .. }
            | Self::UnsupportedVersion { .. }
            | Self::UnknownAtom { .. }
            | Self::UnknownValueType { .. }
            | Self::AtomTooLarge { .. }
            | Self::Truncated { .. }
            | Self::InvalidDocument { .. } => "format",
            Self::InvalidMetadataKey { .. }
            | Self::InvalidMetadataValue { .. }
            | Self::UnsupportedExtension { .. }
            | Self::UnknownInterpolation { .. }
            | Self::InvalidConfig { .. } => "validation",
            Self::IndexOutOfRange { .. } | Self::KeyframeNotFound { .. } | Self::EmptyCurve => {
                "domain"
            }
            Self::SerializationError { .. } => "serialization",
            Self::IoError { .. } => "io",
        }
    }
}

impl From<std::io::Error> for CurveError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            return Self::Truncated {
                context: err.to_string(),
            };
        }
        Self::IoError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CurveError {
    fn from(err: serde_json::Error) -> Self {
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
            CurveError::BadMagic {
                found: "abcd".into()
            }
            .category(),
            "format"
        );
        assert_eq!(CurveError::EmptyCurve.category(), "domain");
        assert_eq!(
            CurveError::from(MathError::SingularMatrix { dimension: 2 }).category(),
            "arithmetic"
        );
    }

    #[test]
    fn test_eof_maps_to_truncated() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(CurveError::from(io), CurveError::Truncated { .. }));
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(CurveError::from(io).category(), "io");
    }

    #[test]
    fn test_serialization() {
        let error = CurveError::UnknownAtom { tag: "xyzw".into() };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: CurveError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
