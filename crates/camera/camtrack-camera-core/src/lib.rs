//! Camtrack Camera Core
//!
//! A camera made of camtrack curves: eighteen named channels and a 4x4
//! grid of matrix-cell curves. [`Camera::eval`] samples them at one time
//! and returns a [`CameraKeyFrame`] pose; [`Camera::load`] and
//! [`Camera::save`] handle `.cam` documents.

pub mod camera;
pub mod channel;
pub mod config;
pub mod error;
pub mod file;
pub mod keyframe;

// Re-exports for consumers
pub use camera::{Camera, ExtraData};
pub use channel::{cell_name, parse_cell, Channel, Slot};
pub use config::{CameraConfig, DEFAULT_UNITS};
pub use error::CameraError;
pub use file::{CameraDocument, CameraGlobal, RESERVED_KEYS};
pub use keyframe::{CameraKeyFrame, EvalOptions};

pub type Result<T> = core::result::Result<T, CameraError>;
