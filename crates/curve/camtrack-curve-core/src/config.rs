//! Curve reading and writing options.

use serde::{Deserialize, Serialize};

use crate::interp::Interpolation;
use crate::CurveError;

/// Smallest legal atom: the 8-byte size/tag header.
pub const ATOM_HEADER_SIZE: u32 = 8;

const MB: u32 = 1024 * 1024;

/// Options shared by curve construction and the codecs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Method given to curves built with [`crate::Curve::with_config`] and
    /// to curves read from documents without a `method` entry.
    pub default_method: Interpolation,
    /// Skip atoms with an unknown tag instead of failing the read.
    pub skip_unknown_atoms: bool,
    /// Indent text documents when writing.
    pub pretty_text: bool,
    /// Largest atom size the binary reader accepts, header included.
    pub max_atom_size: u32,
    /// Store `Int64` globals in 4 bytes instead of 8, as older writers did.
    /// Values outside the `i32` range then fail to write.
    pub legacy_int64: bool,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            default_method: Interpolation::Hermite,
            skip_unknown_atoms: false,
            pretty_text: false,
            max_atom_size: 64 * MB,
            legacy_int64: false,
        }
    }
}

impl CurveConfig {
    /// Reader that tolerates atoms written by newer tools.
    pub fn lenient() -> Self {
        Self {
            skip_unknown_atoms: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CurveError> {
        if self.max_atom_size < ATOM_HEADER_SIZE {
            return Err(CurveError::InvalidConfig {
                reason: format!(
                    "max_atom_size {} is smaller than the {ATOM_HEADER_SIZE}-byte atom header",
                    self.max_atom_size
                ),
            });
        }
        Ok(())
    }
}
