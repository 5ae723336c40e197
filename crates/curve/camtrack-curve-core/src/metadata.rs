//! Global key/value data stored alongside a curve.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Insertion-ordered global data; the order is preserved on disk.
pub type Metadata = IndexMap<String, MetaValue>;

/// Type tag of a [`MetaValue`], matching the binary type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueType {
    Text = 0x01,
    Int32 = 0x02,
    Int64 = 0x04,
    Float32 = 0x08,
}

impl ValueType {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::Text),
            0x02 => Some(Self::Int32),
            0x04 => Some(Self::Int64),
            0x08 => Some(Self::Float32),
            _ => None,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
        }
    }
}

/// A single global value.
///
/// In text form `Int64` is written as `{"int64": n}` so its width survives
/// a round trip. Plain integers read back as `Int32` when they fit and as
/// `Int64` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TextValue", into = "TextValue")]
pub enum MetaValue {
    Text(String),
    Int32(i32),
    Int64(i64),
    Float32(f32),
}

/// JSON shape of a [`MetaValue`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TextValue {
    Text(String),
    Int32(i32),
    Wide(i64),
    Int64 { int64: i64 },
    Float32(f32),
}

impl From<TextValue> for MetaValue {
    fn from(value: TextValue) -> Self {
        match value {
            TextValue::Text(s) => Self::Text(s),
            TextValue::Int32(v) => Self::Int32(v),
            TextValue::Wide(v) | TextValue::Int64 { int64: v } => Self::Int64(v),
            TextValue::Float32(v) => Self::Float32(v),
        }
    }
}

impl From<MetaValue> for TextValue {
    fn from(value: MetaValue) -> Self {
        match value {
            MetaValue::Text(s) => Self::Text(s),
            MetaValue::Int32(v) => Self::Int32(v),
            MetaValue::Int64(v) => Self::Int64 { int64: v },
            MetaValue::Float32(v) => Self::Float32(v),
        }
    }
}

impl MetaValue {
    #[inline]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Text(_) => ValueType::Text,
            Self::Int32(_) => ValueType::Int32,
            Self::Int64(_) => ValueType::Int64,
            Self::Float32(_) => ValueType::Float32,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of either integer width.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int32(v) => Some(i64::from(*v)),
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of any non-text value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int32(v) => Some(f64::from(*v)),
            Self::Int64(v) => Some(*v as f64),
            Self::Float32(v) => Some(f64::from(*v)),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i32> for MetaValue {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f32> for MetaValue {
    fn from(v: f32) -> Self {
        Self::Float32(v)
    }
}
