//! JSON curve document (`.curve`).
//!
//! ```json
//! {"global": {"plate": "A001"}, "keyframes": [[[0, 0], [-1, 0], [1, 0]]], "method": "hermite"}
//! ```
//!
//! Every entry is optional on read. A missing `method` takes the configured
//! default. Keyframes are re-sorted on load.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::error::Category;

use crate::codec::CurveCodec;
use crate::config::CurveConfig;
use crate::curve::Curve;
use crate::interp::Interpolation;
use crate::keyframe::Keyframe;
use crate::metadata::Metadata;
use crate::CurveError;

/// Serde view of one curve; also embedded in camera files.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveDocument {
    #[serde(default)]
    pub global: Metadata,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Interpolation>,
}

impl From<&Curve> for CurveDocument {
    fn from(curve: &Curve) -> Self {
        Self {
            global: curve.metadata().clone(),
            keyframes: curve.keyframes().to_vec(),
            method: Some(curve.method()),
        }
    }
}

impl CurveDocument {
    pub fn into_curve(self, config: &CurveConfig) -> Curve {
        let mut curve = Curve::with_method(self.method.unwrap_or(config.default_method));
        *curve.metadata_mut() = self.global;
        curve.extend(self.keyframes);
        curve
    }
}

/// Structural JSON problems become [`CurveError::InvalidDocument`]; syntax
/// and I/O problems keep their own kinds.
pub(crate) fn document_error(err: serde_json::Error) -> CurveError {
    match err.classify() {
        Category::Data => CurveError::InvalidDocument {
            reason: err.to_string(),
        },
        Category::Eof => CurveError::Truncated {
            context: err.to_string(),
        },
        Category::Io | Category::Syntax => CurveError::from(err),
    }
}

/// [`CurveCodec`] for `.curve` files.
#[derive(Debug, Clone, Default)]
pub struct TextCodec {
    config: CurveConfig,
}

impl TextCodec {
    pub fn new(config: CurveConfig) -> Self {
        Self { config }
    }

    pub fn to_document(&self, curve: &Curve) -> CurveDocument {
        CurveDocument::from(curve)
    }

    pub fn from_document(&self, document: CurveDocument) -> Curve {
        document.into_curve(&self.config)
    }

    pub fn to_value(&self, curve: &Curve) -> Result<serde_json::Value, CurveError> {
        Ok(serde_json::to_value(self.to_document(curve))?)
    }

    pub fn from_value(&self, value: serde_json::Value) -> Result<Curve, CurveError> {
        let document: CurveDocument = serde_json::from_value(value).map_err(document_error)?;
        Ok(self.from_document(document))
    }

    pub fn to_string(&self, curve: &Curve) -> Result<String, CurveError> {
        let document = self.to_document(curve);
        let text = if self.config.pretty_text {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(text)
    }

    pub fn from_str(&self, text: &str) -> Result<Curve, CurveError> {
        let document: CurveDocument = serde_json::from_str(text).map_err(document_error)?;
        Ok(self.from_document(document))
    }
}

impl CurveCodec for TextCodec {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extension(&self) -> &'static str {
        "curve"
    }

    fn encode(&self, curve: &Curve, writer: &mut dyn Write) -> Result<(), CurveError> {
        writer.write_all(self.to_string(curve)?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<Curve, CurveError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.from_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetaValue;
    use crate::point::Point;

    #[test]
    fn test_document_shape() {
        let mut curve = Curve::with_method(Interpolation::Linear);
        curve.set_meta("plate", "A001");
        curve.add(Keyframe::with_handles(
            Point::new(1.0, 2.0),
            Point::new(-1.0, 0.0),
            Point::new(1.0, 0.5),
        ));
        let value = TextCodec::default().to_value(&curve).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "global": {"plate": "A001"},
                "keyframes": [[[1.0, 2.0], [-1.0, 0.0], [1.0, 0.5]]],
                "method": "linear"
            })
        );
    }

    #[test]
    fn test_missing_method_uses_config_default() {
        let text = r#"{"global": {"fps": 24}, "keyframes": [[[0, 1], [0, 0], [0, 0]]]}"#;
        let curve = TextCodec::default().from_str(text).unwrap();
        assert_eq!(curve.method(), Interpolation::Hermite);
        assert_eq!(curve.metadata().get("fps"), Some(&MetaValue::Int32(24)));

        let config = CurveConfig {
            default_method: Interpolation::Step,
            ..CurveConfig::default()
        };
        let curve = TextCodec::new(config).from_str(text).unwrap();
        assert_eq!(curve.method(), Interpolation::Step);
    }

    #[test]
    fn test_empty_object_is_an_empty_curve() {
        let curve = TextCodec::default().from_str("{}").unwrap();
        assert!(curve.is_empty());
        assert!(curve.metadata().is_empty());
        assert_eq!(curve.method(), Interpolation::Hermite);
    }

    #[test]
    fn test_keyframes_sorted_on_load() {
        let text = r#"{"global": {}, "keyframes": [
            [[5, 0], [0, 0], [0, 0]],
            [[1, 0], [0, 0], [0, 0]]
        ]}"#;
        let curve = TextCodec::default().from_str(text).unwrap();
        assert_eq!(curve.get(0).unwrap().x(), 1.0);
    }

    #[test]
    fn test_malformed_keyframe_is_invalid_document() {
        let text = r#"{"global": {}, "keyframes": [[[0, 0], [1]]]}"#;
        let err = TextCodec::default().from_str(text).unwrap_err();
        assert!(matches!(err, CurveError::InvalidDocument { .. }));
        assert_eq!(err.category(), "format");
    }

    #[test]
    fn test_unknown_method_rejected() {
        let text = r#"{"keyframes": [], "method": "bezier"}"#;
        assert!(matches!(
            TextCodec::default().from_str(text),
            Err(CurveError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_syntax_error() {
        let err = TextCodec::default().from_str("{\"keyframes\": [}").unwrap_err();
        assert_eq!(err.category(), "serialization");
    }

    #[test]
    fn test_pretty_output() {
        let codec = TextCodec::new(CurveConfig {
            pretty_text: true,
            ..CurveConfig::default()
        });
        let text = codec.to_string(&Curve::new()).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(codec.from_str(&text).unwrap(), Curve::new());
    }
}
