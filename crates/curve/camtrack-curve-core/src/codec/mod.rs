//! Curve serialization.
//!
//! Two codecs share the [`CurveCodec`] trait: the big-endian atom format
//! ([`BinaryCodec`], `.bcurve`) and the JSON document ([`TextCodec`],
//! `.curve`). [`CurveFormat`] picks one from a file suffix.

pub mod binary;
pub mod text;

use std::ffi::OsStr;
use std::io::{Read, Write};
use std::path::Path;

use crate::config::CurveConfig;
use crate::curve::Curve;
use crate::CurveError;

pub use binary::{BinaryCodec, BinaryReader, BinaryWriter, MAGIC, VERSION_MAJOR, VERSION_MINOR};
pub use text::{CurveDocument, TextCodec};

/// Reads and writes a single curve.
pub trait CurveCodec {
    /// Get the name of this codec
    fn name(&self) -> &'static str;

    /// File suffix without the dot.
    fn extension(&self) -> &'static str;

    /// Write the keyframes, method and metadata of `curve`.
    fn encode(&self, curve: &Curve, writer: &mut dyn Write) -> Result<(), CurveError>;

    fn decode(&self, reader: &mut dyn Read) -> Result<Curve, CurveError>;

    fn to_bytes(&self, curve: &Curve) -> Result<Vec<u8>, CurveError> {
        let mut buffer = Vec::new();
        self.encode(curve, &mut buffer)?;
        Ok(buffer)
    }

    fn from_bytes(&self, mut bytes: &[u8]) -> Result<Curve, CurveError> {
        self.decode(&mut bytes)
    }
}

/// On-disk representation chosen by file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveFormat {
    Text,
    Binary,
}

impl CurveFormat {
    /// `.curve` is text, `.bcurve` is binary; anything else is rejected.
    pub fn from_path(path: &Path) -> Result<Self, CurveError> {
        match path.extension().and_then(OsStr::to_str) {
            Some("curve") => Ok(Self::Text),
            Some("bcurve") => Ok(Self::Binary),
            _ => Err(CurveError::UnsupportedExtension {
                path: path.display().to_string(),
            }),
        }
    }

    #[inline]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "curve",
            Self::Binary => "bcurve",
        }
    }

    pub fn codec(self, config: &CurveConfig) -> Box<dyn CurveCodec> {
        match self {
            Self::Text => Box::new(TextCodec::new(config.clone())),
            Self::Binary => Box::new(BinaryCodec::new(config.clone())),
        }
    }
}
