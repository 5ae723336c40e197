//! Camera pose snapshots.

use std::fmt;

use camtrack_curve_core::Interpolation;
use camtrack_math_core::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// How [`crate::Camera::eval`] samples its curves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EvalOptions<'a> {
    /// Override every curve's own interpolation method.
    pub method: Option<Interpolation>,
    /// Report translation in this unit instead of the camera's.
    pub unit: Option<&'a str>,
    /// Build the pose from the matrix cells and decompose it.
    pub use_matrix: bool,
}

impl<'a> EvalOptions<'a> {
    pub fn with_method(mut self, method: Interpolation) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_unit(mut self, unit: &'a str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_matrix(mut self) -> Self {
        self.use_matrix = true;
        self
    }
}

/// The camera at one time. Rotation is in degrees in the camera's
/// rotation order; translation is in the requested unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraKeyFrame {
    pub time: f64,
    pub translate: Vec3,
    pub rotate: Vec3,
    pub scale: Vec3,
    pub matrix: Mat4,
    pub focal: f64,
    pub focus: f64,
    pub fstop: f64,
    pub near: f64,
    pub far: f64,
    pub pan: Vec2,
    pub zoom: Vec2,
}

impl fmt::Display for CameraKeyFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v3 = |v: &Vec3| format!("({}, {}, {})", v.x, v.y, v.z);
        let v2 = |v: &Vec2| format!("({}, {})", v.x, v.y);
        writeln!(f, "time      = {}", self.time)?;
        writeln!(f, "translate = {}", v3(&self.translate))?;
        writeln!(f, "rotate    = {}", v3(&self.rotate))?;
        writeln!(f, "scale     = {}", v3(&self.scale))?;
        writeln!(f, "focal     = {}", self.focal)?;
        writeln!(f, "focus     = {}", self.focus)?;
        writeln!(f, "fstop     = {}", self.fstop)?;
        writeln!(f, "near      = {}", self.near)?;
        writeln!(f, "far       = {}", self.far)?;
        writeln!(f, "pan       = {}", v2(&self.pan))?;
        writeln!(f, "zoom      = {}", v2(&self.zoom))?;
        write!(f, "matrix    =\n{}", self.matrix)
    }
}
