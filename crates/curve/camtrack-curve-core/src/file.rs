//! Path-based load and save; the suffix selects the codec.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::debug;

use crate::codec::CurveFormat;
use crate::config::CurveConfig;
use crate::curve::Curve;
use crate::metadata::Metadata;
use crate::CurveError;

impl Curve {
    /// Load a `.curve` or `.bcurve` file with the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CurveError> {
        Self::load_with_config(path, &CurveConfig::default())
    }

    pub fn load_with_config(
        path: impl AsRef<Path>,
        config: &CurveConfig,
    ) -> Result<Self, CurveError> {
        let path = path.as_ref();
        let format = CurveFormat::from_path(path)?;
        config.validate()?;
        debug!("loading {:?} curve from {}", format, path.display());
        let mut reader = BufReader::new(File::open(path)?);
        format.codec(config).decode(&mut reader)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CurveError> {
        self.save_with_config(path, &CurveConfig::default())
    }

    pub fn save_with_config(
        &self,
        path: impl AsRef<Path>,
        config: &CurveConfig,
    ) -> Result<(), CurveError> {
        let path = path.as_ref();
        let format = CurveFormat::from_path(path)?;
        config.validate()?;
        debug!(
            "saving {} keyframes as {:?} to {}",
            self.len(),
            format,
            path.display()
        );
        let mut writer = BufWriter::new(File::create(path)?);
        format.codec(config).encode(self, &mut writer)
    }

    /// Merge `extra` into this curve's metadata, then save.
    ///
    /// The suffix is checked before the metadata is touched.
    pub fn save_with(
        &mut self,
        path: impl AsRef<Path>,
        extra: Metadata,
    ) -> Result<(), CurveError> {
        let path = path.as_ref();
        CurveFormat::from_path(path)?;
        self.metadata_mut().extend(extra);
        self.save(path)
    }
}
