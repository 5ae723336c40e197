//! The animated camera and its pose evaluation.

use camtrack_curve_core::{Curve, Interpolation};
use camtrack_math_core::{Mat4, RotationOrder, TransformOrder, Vec2, Vec3};
use indexmap::IndexMap;

use crate::channel::{Channel, Slot};
use crate::config::CameraConfig;
use crate::keyframe::{CameraKeyFrame, EvalOptions};
use crate::CameraError;

/// Free-form `global` entries beyond the fixed camera fields.
pub type ExtraData = IndexMap<String, serde_json::Value>;

/// A camera whose attributes are all curves over frame time.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub name: String,
    pub camera_type: String,
    pub app: String,
    /// Length unit of the translation channels.
    pub unit: String,
    pub fps: f64,
    /// Shutter angle in degrees.
    pub shutter: f64,
    pub distort: String,
    pub undistort: String,
    /// Sensor size in millimetres.
    pub ccd: [f64; 2],
    pub resolution: [u32; 2],
    pub plate: String,
    pub start: i64,
    pub end: i64,
    pub transform_order: TransformOrder,
    pub rotation_order: RotationOrder,
    pub(crate) channels: [Curve; Channel::COUNT],
    pub(crate) matrix: [[Curve; 4]; 4],
    pub extra: ExtraData,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            name: "main".to_string(),
            camera_type: "generic".to_string(),
            app: String::new(),
            unit: "cm".to_string(),
            fps: 24.0,
            shutter: 180.0,
            distort: String::new(),
            undistort: String::new(),
            ccd: [23.76, 12.84],
            resolution: [1920, 1080],
            plate: String::new(),
            start: 1001,
            end: 1100,
            transform_order: TransformOrder::Srt,
            rotation_order: RotationOrder::Xyz,
            channels: Default::default(),
            matrix: Default::default(),
            extra: ExtraData::new(),
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame range length, `end - start`.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    #[inline]
    pub fn curve(&self, channel: Channel) -> &Curve {
        &self.channels[channel.index()]
    }

    #[inline]
    pub fn curve_mut(&mut self, channel: Channel) -> &mut Curve {
        &mut self.channels[channel.index()]
    }

    /// Curve of matrix cell `(row, col)`; `None` outside 4x4.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Curve> {
        self.matrix.get(row)?.get(col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Curve> {
        self.matrix.get_mut(row)?.get_mut(col)
    }

    /// Look up a channel (`"focal"`) or matrix cell (`"a03"`) by file name.
    pub fn channel(&self, name: &str) -> Result<&Curve, CameraError> {
        Ok(match name.parse::<Slot>()? {
            Slot::Channel(channel) => self.curve(channel),
            Slot::Cell(row, col) => &self.matrix[row][col],
        })
    }

    pub fn channel_mut(&mut self, name: &str) -> Result<&mut Curve, CameraError> {
        Ok(match name.parse::<Slot>()? {
            Slot::Channel(channel) => self.curve_mut(channel),
            Slot::Cell(row, col) => &mut self.matrix[row][col],
        })
    }

    /// Every curve with its file name: channels first, then `a00`..`a33`.
    pub fn curves(&self) -> impl Iterator<Item = (String, &Curve)> {
        let channels = Channel::ALL
            .into_iter()
            .map(move |c| (c.name().to_string(), self.curve(c)));
        let cells = self.matrix.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, curve)| (crate::channel::cell_name(row, col), curve))
        });
        channels.chain(cells)
    }

    /// Pose at `time` with the default unit list.
    pub fn eval(
        &self,
        time: f64,
        options: &EvalOptions<'_>,
    ) -> Result<CameraKeyFrame, CameraError> {
        self.eval_with_config(time, options, &CameraConfig::default())
    }

    /// Pose at `time`. SRT mode composes the nine transform channels into a
    /// matrix; matrix mode decomposes the sixteen cells. The unit factor
    /// scales the translation in both modes. A NaN `time` is rejected.
    pub fn eval_with_config(
        &self,
        time: f64,
        options: &EvalOptions<'_>,
        config: &CameraConfig,
    ) -> Result<CameraKeyFrame, CameraError> {
        if time.is_nan() {
            return Err(CameraError::InvalidTime { time });
        }
        let target = options.unit.unwrap_or(&self.unit);
        let factor = config.unit_factor(&self.unit, target)?;
        let sample = |channel: Channel| {
            sample_curve(self.curve(channel), time, options.method, channel.neutral())
        };

        let (translate, rotate, scale, matrix) = if options.use_matrix {
            let mut rows = [[0.0; 4]; 4];
            for (row, cells) in self.matrix.iter().enumerate() {
                for (col, curve) in cells.iter().enumerate() {
                    let neutral = if row == col { 1.0 } else { 0.0 };
                    rows[row][col] = sample_curve(curve, time, options.method, neutral);
                }
            }
            for row in rows.iter_mut().take(3) {
                row[3] *= factor;
            }
            let matrix = Mat4::from_rows(rows);
            let srt = matrix.decompose(self.transform_order, self.rotation_order)?;
            (srt.translate, srt.rotate, srt.scale, matrix)
        } else {
            let translate = Vec3::new(
                sample(Channel::X) * factor,
                sample(Channel::Y) * factor,
                sample(Channel::Z) * factor,
            );
            let rotate = Vec3::new(sample(Channel::Rx), sample(Channel::Ry), sample(Channel::Rz));
            let scale = Vec3::new(sample(Channel::Sx), sample(Channel::Sy), sample(Channel::Sz));
            let matrix = Mat4::compose(
                translate,
                rotate,
                scale,
                self.transform_order,
                self.rotation_order,
            );
            (translate, rotate, scale, matrix)
        };

        Ok(CameraKeyFrame {
            time,
            translate,
            rotate,
            scale,
            matrix,
            focal: sample(Channel::Focal),
            focus: sample(Channel::Focus),
            fstop: sample(Channel::Fstop),
            near: sample(Channel::Near),
            far: sample(Channel::Far),
            pan: Vec2::new(sample(Channel::PanX), sample(Channel::PanY)),
            zoom: Vec2::new(sample(Channel::ZoomX), sample(Channel::ZoomY)),
        })
    }
}

fn sample_curve(curve: &Curve, time: f64, method: Option<Interpolation>, neutral: f64) -> f64 {
    curve
        .eval_with(time, method.unwrap_or(curve.method()))
        .unwrap_or(neutral)
}
