//! Shared curve and camera files for integration tests.
//!
//! Every fixture is listed in `fixtures/manifest.json` at the workspace
//! root and looked up by name.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    curves: HashMap<String, String>,
    #[serde(rename = "binary-curves")]
    binary_curves: HashMap<String, BinaryCurveEntry>,
    cameras: HashMap<String, String>,
}

/// A binary fixture and, optionally, the text curve it was written from.
#[derive(Debug, Deserialize)]
struct BinaryCurveEntry {
    path: String,
    #[serde(default)]
    source: Option<String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn read_bytes(rel: &str) -> Result<Vec<u8>> {
    let path = resolve_path(rel);
    fs::read(&path).with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// `.curve` text documents.
pub mod curves {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.curves.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.curves, "curve", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.curves, "curve", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.curves, "curve", name)?;
        Ok(resolve_path(rel))
    }
}

/// `.bcurve` files.
pub mod binary_curves {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.binary_curves.keys().cloned().collect()
    }

    pub fn bytes(name: &str) -> Result<Vec<u8>> {
        let entry = lookup(&MANIFEST.binary_curves, "binary curve", name)?;
        read_bytes(&entry.path)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.binary_curves, "binary curve", name)?;
        Ok(resolve_path(&entry.path))
    }

    /// Name of the text curve fixture holding the same data, if any.
    pub fn source(name: &str) -> Result<Option<String>> {
        let entry = lookup(&MANIFEST.binary_curves, "binary curve", name)?;
        Ok(entry.source.clone())
    }
}

/// `.cam` camera documents.
pub mod cameras {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.cameras.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.cameras, "camera", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.cameras, "camera", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.cameras, "camera", name)?;
        Ok(resolve_path(rel))
    }
}
