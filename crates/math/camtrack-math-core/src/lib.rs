//! Camtrack Math Core
//!
//! Fixed-size vectors, row-major matrices and quaternions plus the Euler
//! and compose/decompose conversions used to turn camera channel samples
//! into a pose matrix and back.

pub mod error;
pub mod euler;
pub mod matrix;
pub mod order;
pub mod quaternion;
pub mod transform;
pub mod vector;

pub use error::MathError;
pub use matrix::{Mat2, Mat3, Mat4};
pub use order::{Axis, Component, RotationOrder, TransformOrder};
pub use quaternion::Quaternion;
pub use transform::{Srt, SrtMatrices};
pub use vector::{Vec2, Vec3, Vec4};

pub type Result<T> = core::result::Result<T, MathError>;
