//! `.cam` camera documents.
//!
//! ```json
//! {"global": {"name": "main", "unit": "cm", "...": "..."},
//!  "channels": {"x": {"global": {}, "keyframes": [], "method": "hermite"}, "a00": {}}}
//! ```
//!
//! Unrecognised `global` keys are kept in [`Camera::extra`]. Channels
//! missing from a document load as empty curves; unknown channel names are
//! skipped with a warning.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use camtrack_curve_core::{CurveConfig, CurveDocument};
use camtrack_math_core::{RotationOrder, TransformOrder};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, ExtraData};
use crate::CameraError;

/// `global` keys owned by [`Camera`] fields.
pub const RESERVED_KEYS: [&str; 15] = [
    "name",
    "type",
    "app",
    "unit",
    "fps",
    "shutter",
    "distort",
    "undistort",
    "ccd",
    "resolution",
    "plate",
    "start",
    "end",
    "transform_order",
    "rotation_order",
];

/// Serde view of the `global` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraGlobal {
    pub name: String,
    #[serde(rename = "type")]
    pub camera_type: String,
    pub app: String,
    pub unit: String,
    pub fps: f64,
    pub shutter: f64,
    pub distort: String,
    pub undistort: String,
    pub ccd: [f64; 2],
    pub resolution: [u32; 2],
    pub plate: String,
    pub start: i64,
    pub end: i64,
    pub transform_order: TransformOrder,
    pub rotation_order: RotationOrder,
    #[serde(flatten)]
    pub extra: ExtraData,
}

impl Default for CameraGlobal {
    fn default() -> Self {
        Self::from(&Camera::default())
    }
}

impl From<&Camera> for CameraGlobal {
    fn from(camera: &Camera) -> Self {
        let extra = camera
            .extra
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self {
            name: camera.name.clone(),
            camera_type: camera.camera_type.clone(),
            app: camera.app.clone(),
            unit: camera.unit.clone(),
            fps: camera.fps,
            shutter: camera.shutter,
            distort: camera.distort.clone(),
            undistort: camera.undistort.clone(),
            ccd: camera.ccd,
            resolution: camera.resolution,
            plate: camera.plate.clone(),
            start: camera.start,
            end: camera.end,
            transform_order: camera.transform_order,
            rotation_order: camera.rotation_order,
            extra,
        }
    }
}

/// Serde view of a whole `.cam` file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraDocument {
    #[serde(default)]
    pub global: CameraGlobal,
    #[serde(default)]
    pub channels: IndexMap<String, CurveDocument>,
}

impl From<&Camera> for CameraDocument {
    fn from(camera: &Camera) -> Self {
        Self {
            global: CameraGlobal::from(camera),
            channels: camera
                .curves()
                .map(|(name, curve)| (name, CurveDocument::from(curve)))
                .collect(),
        }
    }
}

impl CameraDocument {
    pub fn into_camera(self, config: &CurveConfig) -> Camera {
        let global = self.global;
        let mut camera = Camera {
            name: global.name,
            camera_type: global.camera_type,
            app: global.app,
            unit: global.unit,
            fps: global.fps,
            shutter: global.shutter,
            distort: global.distort,
            undistort: global.undistort,
            ccd: global.ccd,
            resolution: global.resolution,
            plate: global.plate,
            start: global.start,
            end: global.end,
            transform_order: global.transform_order,
            rotation_order: global.rotation_order,
            extra: global.extra,
            ..Camera::default()
        };
        for (name, document) in self.channels {
            match camera.channel_mut(&name) {
                Ok(curve) => *curve = document.into_curve(config),
                Err(_) => warn!("skipping unknown camera channel {name:?}"),
            }
        }
        camera
    }
}

fn check_extension(path: &Path) -> Result<(), CameraError> {
    match path.extension().and_then(OsStr::to_str) {
        Some("cam") => Ok(()),
        _ => Err(CameraError::UnsupportedExtension {
            path: path.display().to_string(),
        }),
    }
}

impl Camera {
    pub fn to_document(&self) -> CameraDocument {
        CameraDocument::from(self)
    }

    pub fn from_document(document: CameraDocument) -> Self {
        document.into_camera(&CurveConfig::default())
    }

    pub fn to_json(&self) -> Result<String, CameraError> {
        Ok(serde_json::to_string(&self.to_document())?)
    }

    pub fn from_json(text: &str) -> Result<Self, CameraError> {
        let document: CameraDocument = serde_json::from_str(text)?;
        Ok(Self::from_document(document))
    }

    pub fn read_from(reader: &mut dyn Read) -> Result<Self, CameraError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_json(&text)
    }

    pub fn write_to(&self, writer: &mut dyn Write) -> Result<(), CameraError> {
        serde_json::to_writer(&mut *writer, &self.to_document())?;
        writer.flush()?;
        Ok(())
    }

    /// Load a `.cam` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CameraError> {
        let path = path.as_ref();
        check_extension(path)?;
        debug!("loading camera from {}", path.display());
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    /// Save as a `.cam` file. `.bcam` has no writer and is rejected like
    /// any other suffix.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CameraError> {
        let path = path.as_ref();
        check_extension(path)?;
        debug!("saving camera {:?} to {}", self.name, path.display());
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)
    }

    /// Merge `extra` into [`Camera::extra`], then save. Keys naming a
    /// camera field are dropped.
    pub fn save_with(
        &mut self,
        path: impl AsRef<Path>,
        extra: ExtraData,
    ) -> Result<(), CameraError> {
        let path = path.as_ref();
        check_extension(path)?;
        for (key, value) in extra {
            if RESERVED_KEYS.contains(&key.as_str()) {
                warn!("ignoring extra key {key:?}: it names a camera field");
                continue;
            }
            self.extra.insert(key, value);
        }
        self.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use camtrack_curve_core::{Interpolation, Keyframe};
    use serde_json::json;

    #[test]
    fn test_document_has_every_channel() {
        let value = serde_json::to_value(Camera::new().to_document()).unwrap();
        let channels = value["channels"].as_object().unwrap();
        assert_eq!(channels.len(), 34);
        assert!(channels.contains_key("zoom_y"));
        assert!(channels.contains_key("a33"));
        assert_eq!(value["global"]["type"], json!("generic"));
        assert_eq!(value["global"]["transform_order"], json!("srt"));
    }

    #[test]
    fn test_sparse_document_uses_defaults() {
        let text = r#"{"global": {"name": "shot", "lens": "cooke"},
            "channels": {"focal": {"keyframes": [[[1, 35], [-1, 0], [1, 0]]], "method": "linear"},
                         "tx": {"keyframes": []}}}"#;
        let camera = Camera::from_json(text).unwrap();
        assert_eq!(camera.name, "shot");
        assert_eq!(camera.unit, "cm");
        assert_eq!(camera.start, 1001);
        assert_eq!(camera.extra.get("lens"), Some(&json!("cooke")));
        assert_eq!(camera.curve(Channel::Focal).len(), 1);
        assert_eq!(camera.curve(Channel::Focal).method(), Interpolation::Linear);
        assert!(camera.curve(Channel::X).is_empty());
    }

    #[test]
    fn test_bare_channel_object_loads_empty() {
        let text = r#"{"global": {"name": "main", "unit": "cm"},
            "channels": {"x": {"global": {}, "keyframes": [], "method": "hermite"}, "a00": {}}}"#;
        let camera = Camera::from_json(text).unwrap();
        assert!(camera.curve(Channel::X).is_empty());
        assert!(camera.cell(0, 0).unwrap().is_empty());
        assert_eq!(camera.cell(0, 0).unwrap().method(), Interpolation::Hermite);
    }

    #[test]
    fn test_bad_order_is_invalid_document() {
        let text = r#"{"global": {"rotation_order": "xxz"}, "channels": {}}"#;
        assert!(matches!(
            Camera::from_json(text),
            Err(CameraError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_reserved_extra_keys_not_duplicated() {
        let mut camera = Camera::new();
        camera.extra.insert("name".into(), json!("shadow"));
        camera.extra.insert("artist".into(), json!("kim"));
        let text = camera.to_json().unwrap();
        assert_eq!(text.matches("\"name\"").count(), 1);

        let loaded = Camera::from_json(&text).unwrap();
        assert_eq!(loaded.name, "main");
        assert_eq!(loaded.extra.len(), 1);
    }

    #[test]
    fn test_json_round_trip() {
        let mut camera = Camera::new();
        camera.plate = "A001".into();
        camera.transform_order = TransformOrder::Trs;
        camera.curve_mut(Channel::Rz).add(Keyframe::new(1001.0, 12.5));
        camera.cell_mut(0, 3).unwrap().add(Keyframe::new(1001.0, 3.0));
        let loaded = Camera::from_json(&camera.to_json().unwrap()).unwrap();
        assert_eq!(loaded, camera);
    }

    #[test]
    fn test_extension_check() {
        assert!(check_extension(Path::new("shot.cam")).is_ok());
        for name in ["shot.bcam", "shot.curve", "shot"] {
            assert!(matches!(
                check_extension(Path::new(name)),
                Err(CameraError::UnsupportedExtension { .. })
            ));
        }
    }
}
