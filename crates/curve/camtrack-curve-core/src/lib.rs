//! Camtrack Curve Core
//!
//! Time-sorted keyframe curves with step, linear, Hermite and natural
//! cubic evaluation, and the two on-disk forms: the big-endian atom
//! format (`.bcurve`) and the JSON document (`.curve`).

pub mod codec;
pub mod config;
pub mod curve;
pub mod error;
pub mod file;
pub mod interp;
pub mod keyframe;
pub mod metadata;
pub mod point;

// Re-exports for consumers
pub use codec::{BinaryCodec, CurveCodec, CurveDocument, CurveFormat, TextCodec};
pub use config::CurveConfig;
pub use curve::Curve;
pub use error::CurveError;
pub use interp::{evaluate, Interpolation, Interpolator};
pub use keyframe::{Keyframe, TANGENT_SENTINEL};
pub use metadata::{MetaValue, Metadata, ValueType};
pub use point::Point;

pub type Result<T> = core::result::Result<T, CurveError>;
