//! Composition and decomposition of homogeneous 4x4 transforms.

use serde::{Deserialize, Serialize};

use crate::matrix::{Mat3, Mat4};
use crate::order::{Component, RotationOrder, TransformOrder};
use crate::vector::Vec3;
use crate::MathError;

/// Translate, Euler rotation (degrees) and scale of one transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Srt {
    pub translate: Vec3,
    pub rotate: Vec3,
    pub scale: Vec3,
}

impl Default for Srt {
    fn default() -> Self {
        Self {
            translate: Vec3::zero(),
            rotate: Vec3::zero(),
            scale: Vec3::one(),
        }
    }
}

/// The three factors of a transform, each as its own 4x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SrtMatrices {
    pub translate: Mat4,
    pub rotate: Mat4,
    pub scale: Mat4,
}

impl SrtMatrices {
    /// Multiply the factors back together in `order`.
    pub fn compose(&self, order: TransformOrder) -> Mat4 {
        let pick = |c: Component| match c {
            Component::Scale => self.scale,
            Component::Rotate => self.rotate,
            Component::Translate => self.translate,
        };
        let [first, second, third] = order.components();
        pick(third) * pick(second) * pick(first)
    }
}

impl Mat4 {
    pub fn from_translation(t: Vec3) -> Self {
        let mut m = Self::identity();
        m[0][3] = t.x;
        m[1][3] = t.y;
        m[2][3] = t.z;
        m
    }

    pub fn from_scale(s: Vec3) -> Self {
        Self::from_diagonal(s.extend(1.0))
    }

    /// Embed a 3x3 rotation.
    #[inline]
    pub fn from_rotation(r: Mat3) -> Self {
        Self::from(r)
    }

    /// The last column without its homogeneous cell.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.col(3).truncate()
    }

    /// Build a transform from translate, Euler rotation (degrees) and scale.
    /// The first letter of `transform_order` is applied first.
    pub fn compose(
        translate: Vec3,
        rotate: Vec3,
        scale: Vec3,
        transform_order: TransformOrder,
        rotation_order: RotationOrder,
    ) -> Self {
        SrtMatrices {
            translate: Self::from_translation(translate),
            rotate: Self::from_rotation(Mat3::from_euler(
                rotate.x,
                rotate.y,
                rotate.z,
                rotation_order,
            )),
            scale: Self::from_scale(scale),
        }
        .compose(transform_order)
    }

    /// Recover translate, rotation (degrees in `rotation_order`) and scale
    /// for a matrix built with `transform_order`.
    pub fn decompose(
        &self,
        transform_order: TransformOrder,
        rotation_order: RotationOrder,
    ) -> Result<Srt, MathError> {
        let (translate, rotation, scale) = self.split(transform_order)?;
        Ok(Srt {
            translate,
            rotate: rotation.to_euler(rotation_order),
            scale,
        })
    }

    /// Like [`Mat4::decompose`] but keeps every factor as a matrix.
    pub fn decompose_matrices(
        &self,
        transform_order: TransformOrder,
    ) -> Result<SrtMatrices, MathError> {
        let (translate, rotation, scale) = self.split(transform_order)?;
        Ok(SrtMatrices {
            translate: Self::from_translation(translate),
            rotate: Self::from_rotation(rotation),
            scale: Self::from_scale(scale),
        })
    }

    fn split(&self, order: TransformOrder) -> Result<(Vec3, Mat3, Vec3), MathError> {
        let block = Mat3::from(*self);
        let scales_columns = order.scales_columns();

        let axes: [Vec3; 3] = if scales_columns {
            [block.col(0), block.col(1), block.col(2)]
        } else {
            [block.row(0), block.row(1), block.row(2)]
        };
        let scale = Vec3::new(axes[0].length(), axes[1].length(), axes[2].length());
        if scale.to_array().iter().any(|s| *s == 0.0) {
            return Err(MathError::division_by_zero(format!(
                "decompose {order}: zero scale axis"
            )));
        }
        let unit = [
            axes[0].try_div_scalar(scale.x)?,
            axes[1].try_div_scalar(scale.y)?,
            axes[2].try_div_scalar(scale.z)?,
        ];
        let stacked = Mat3::from_rows(unit.map(Vec3::to_array));
        let rotation = if scales_columns {
            stacked.transpose()
        } else {
            stacked
        };

        let inv_rotate = || Mat4::from_rotation(rotation).inverse();
        let inv_scale = || Vec3::one().try_div(&scale).map(Mat4::from_scale);
        let residual = match order {
            TransformOrder::Srt | TransformOrder::Rst => *self,
            TransformOrder::Str => inv_rotate()? * *self,
            TransformOrder::Tsr => inv_scale()? * inv_rotate()? * *self,
            TransformOrder::Rts => inv_scale()? * *self,
            TransformOrder::Trs => inv_rotate()? * inv_scale()? * *self,
        };
        Ok((residual.translation(), rotation, scale))
    }
}
