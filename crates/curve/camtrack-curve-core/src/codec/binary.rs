//! Big-endian atom format (`.bcurve`).
//!
//! ```text
//! "curv" | i16 major | i16 minor
//! atom*  : u32 size (header included) | 4-byte tag | size - 8 payload bytes
//! glob   : (key NUL | u8 type code | 0x00 | value | 0x00)*
//!          text values end at their own NUL, numbers are fixed width
//!          (int64 takes 4 bytes with `CurveConfig::legacy_int64`)
//! keyf   : (f32 cx, cy, lx, ly, rx, ry)*
//! ```
//!
//! Keyframe coordinates are narrowed to `f32` on write.

use std::io::{Cursor, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, warn};

use crate::codec::CurveCodec;
use crate::config::{CurveConfig, ATOM_HEADER_SIZE};
use crate::curve::Curve;
use crate::keyframe::Keyframe;
use crate::metadata::{MetaValue, Metadata, ValueType};
use crate::point::Point;
use crate::CurveError;

pub const MAGIC: &[u8; 4] = b"curv";
pub const VERSION_MAJOR: i16 = 0;
pub const VERSION_MINOR: i16 = 1;

const GLOB: &[u8; 4] = b"glob";
const KEYF: &[u8; 4] = b"keyf";
const KEYFRAME_RECORD_SIZE: usize = 6 * 4;

fn tag_name(tag: &[u8; 4]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}

/// Writer for the binary curve format
pub struct BinaryWriter<W: Write> {
    writer: W,
    config: CurveConfig,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, CurveConfig::default())
    }

    pub fn with_config(writer: W, config: CurveConfig) -> Self {
        Self { writer, config }
    }

    /// Header, then the `glob` atom, then the `keyf` atom.
    pub fn write_curve(&mut self, curve: &Curve) -> Result<(), CurveError> {
        self.writer.write_all(MAGIC)?;
        self.writer.write_i16::<BigEndian>(VERSION_MAJOR)?;
        self.writer.write_i16::<BigEndian>(VERSION_MINOR)?;
        self.write_global_atom(curve.metadata())?;
        self.write_keyframe_atom(curve.keyframes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_atom_header(&mut self, size: usize, tag: &[u8; 4]) -> Result<(), CurveError> {
        let size = u32::try_from(size).map_err(|_| CurveError::AtomTooLarge {
            tag: tag_name(tag),
            size: size as u64,
            limit: u64::from(u32::MAX),
        })?;
        debug!("writing atom {} ({size} bytes)", tag_name(tag));
        self.writer.write_u32::<BigEndian>(size)?;
        self.writer.write_all(tag)?;
        Ok(())
    }

    fn write_global_atom(&mut self, metadata: &Metadata) -> Result<(), CurveError> {
        let legacy = self.config.legacy_int64;
        let mut payload = 0usize;
        for (key, value) in metadata {
            validate_entry(key, value, legacy)?;
            payload += global_entry_size(key, value, legacy);
        }
        self.write_atom_header(ATOM_HEADER_SIZE as usize + payload, GLOB)?;

        for (key, value) in metadata {
            self.writer.write_all(key.as_bytes())?;
            self.writer.write_u8(0x00)?;
            self.writer.write_u8(value.value_type().code())?;
            self.writer.write_u8(0x00)?;
            match value {
                MetaValue::Text(s) => self.writer.write_all(s.as_bytes())?,
                MetaValue::Int32(v) => self.writer.write_i32::<BigEndian>(*v)?,
                MetaValue::Int64(v) if legacy => {
                    self.writer.write_i32::<BigEndian>(narrow_int64(key, *v)?)?
                }
                MetaValue::Int64(v) => self.writer.write_i64::<BigEndian>(*v)?,
                MetaValue::Float32(v) => self.writer.write_f32::<BigEndian>(*v)?,
            }
            // Terminates text values, pads numeric ones.
            self.writer.write_u8(0x00)?;
        }
        Ok(())
    }

    fn write_keyframe_atom(&mut self, keyframes: &[Keyframe]) -> Result<(), CurveError> {
        let size = ATOM_HEADER_SIZE as usize + keyframes.len() * KEYFRAME_RECORD_SIZE;
        self.write_atom_header(size, KEYF)?;
        for k in keyframes {
            for value in [
                k.current.x,
                k.current.y,
                k.left.x,
                k.left.y,
                k.right.x,
                k.right.y,
            ] {
                self.writer.write_f32::<BigEndian>(value as f32)?;
            }
        }
        Ok(())
    }
}

fn narrow_int64(key: &str, value: i64) -> Result<i32, CurveError> {
    i32::try_from(value).map_err(|_| CurveError::InvalidMetadataValue {
        key: key.to_string(),
        reason: format!("{value} does not fit the 4-byte legacy int64 field"),
    })
}

fn validate_entry(key: &str, value: &MetaValue, legacy_int64: bool) -> Result<(), CurveError> {
    if key.as_bytes().contains(&0) {
        return Err(CurveError::InvalidMetadataKey {
            key: key.to_string(),
        });
    }
    match value {
        MetaValue::Text(s) if s.as_bytes().contains(&0) => Err(CurveError::InvalidMetadataValue {
            key: key.to_string(),
            reason: "text contains a NUL byte".to_string(),
        }),
        MetaValue::Int64(v) if legacy_int64 => narrow_int64(key, *v).map(|_| ()),
        _ => Ok(()),
    }
}

/// Bytes one `glob` entry occupies on disk.
fn global_entry_size(key: &str, value: &MetaValue, legacy_int64: bool) -> usize {
    let value_size = match value {
        MetaValue::Text(s) => s.len(),
        MetaValue::Int32(_) | MetaValue::Float32(_) => 4,
        MetaValue::Int64(_) if legacy_int64 => 4,
        MetaValue::Int64(_) => 8,
    };
    // key NUL, code, pad, value, terminator/pad
    key.len() + 1 + 2 + value_size + 1
}

/// Reader for the binary curve format
pub struct BinaryReader<R: Read> {
    reader: R,
    config: CurveConfig,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, CurveConfig::default())
    }

    pub fn with_config(reader: R, config: CurveConfig) -> Self {
        Self { reader, config }
    }

    /// Read a complete curve. Atoms are bounded by their declared sizes.
    pub fn read_curve(&mut self) -> Result<Curve, CurveError> {
        let mut bytes = Vec::new();
        self.reader.read_to_end(&mut bytes)?;
        let total = bytes.len() as u64;
        let mut cursor = Cursor::new(bytes.as_slice());

        let mut magic = [0u8; 4];
        cursor.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(CurveError::BadMagic {
                found: tag_name(&magic),
            });
        }
        let major = cursor.read_i16::<BigEndian>()?;
        let minor = cursor.read_i16::<BigEndian>()?;
        if major != VERSION_MAJOR {
            return Err(CurveError::UnsupportedVersion { major, minor });
        }

        let mut curve = Curve::with_config(&self.config);
        while cursor.position() < total {
            let size = cursor.read_u32::<BigEndian>()?;
            let mut tag = [0u8; 4];
            cursor.read_exact(&mut tag)?;
            let name = tag_name(&tag);

            if size < ATOM_HEADER_SIZE {
                return Err(CurveError::Truncated {
                    context: format!("atom {name:?} declares {size} bytes, below the header size"),
                });
            }
            if size > self.config.max_atom_size {
                return Err(CurveError::AtomTooLarge {
                    tag: name,
                    size: u64::from(size),
                    limit: u64::from(self.config.max_atom_size),
                });
            }
            let start = cursor.position() as usize;
            let end = start + (size - ATOM_HEADER_SIZE) as usize;
            let payload = bytes.get(start..end).ok_or_else(|| CurveError::Truncated {
                context: format!("atom {name:?} needs {size} bytes past offset {}", start - 8),
            })?;
            debug!("reading atom {name} ({size} bytes)");

            match &tag {
                GLOB => read_global_payload(
                    payload,
                    curve.metadata_mut(),
                    self.config.legacy_int64,
                )?,
                KEYF => curve.extend(read_keyframe_payload(payload)?),
                _ if self.config.skip_unknown_atoms => {
                    warn!("skipping unknown atom {name:?} ({size} bytes)");
                }
                _ => return Err(CurveError::UnknownAtom { tag: name }),
            }
            cursor.set_position(end as u64);
        }
        Ok(curve)
    }
}

/// Read up to the next NUL and consume it.
fn read_c_string(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<String, CurveError> {
    let data = *cursor.get_ref();
    let start = cursor.position() as usize;
    let len = data[start..]
        .iter()
        .position(|b| *b == 0)
        .ok_or_else(|| CurveError::Truncated {
            context: format!("unterminated {what} in glob atom"),
        })?;
    let text = std::str::from_utf8(&data[start..start + len])
        .map_err(|e| CurveError::InvalidDocument {
            reason: format!("{what} is not UTF-8: {e}"),
        })?
        .to_string();
    cursor.set_position((start + len + 1) as u64);
    Ok(text)
}

fn read_global_payload(
    payload: &[u8],
    metadata: &mut Metadata,
    legacy_int64: bool,
) -> Result<(), CurveError> {
    let mut cursor = Cursor::new(payload);
    while (cursor.position() as usize) < payload.len() {
        let key = read_c_string(&mut cursor, "key")?;
        let code = cursor.read_u8()?;
        let _pad = cursor.read_u8()?;
        let value_type = ValueType::from_code(code)
            .ok_or_else(|| CurveError::UnknownValueType { key: key.clone(), code })?;
        let value = match value_type {
            ValueType::Text => MetaValue::Text(read_c_string(&mut cursor, "text value")?),
            ValueType::Int32 => {
                let v = cursor.read_i32::<BigEndian>()?;
                cursor.read_u8()?;
                MetaValue::Int32(v)
            }
            ValueType::Int64 if legacy_int64 => {
                let v = cursor.read_i32::<BigEndian>()?;
                cursor.read_u8()?;
                MetaValue::Int64(i64::from(v))
            }
            ValueType::Int64 => {
                let v = cursor.read_i64::<BigEndian>()?;
                cursor.read_u8()?;
                MetaValue::Int64(v)
            }
            ValueType::Float32 => {
                let v = cursor.read_f32::<BigEndian>()?;
                cursor.read_u8()?;
                MetaValue::Float32(v)
            }
        };
        metadata.insert(key, value);
    }
    Ok(())
}

fn read_keyframe_payload(payload: &[u8]) -> Result<Vec<Keyframe>, CurveError> {
    if payload.len() % KEYFRAME_RECORD_SIZE != 0 {
        return Err(CurveError::Truncated {
            context: format!(
                "keyf payload of {} bytes is not a whole number of {KEYFRAME_RECORD_SIZE}-byte records",
                payload.len()
            ),
        });
    }
    let mut cursor = Cursor::new(payload);
    let mut keyframes = Vec::with_capacity(payload.len() / KEYFRAME_RECORD_SIZE);
    for _ in 0..payload.len() / KEYFRAME_RECORD_SIZE {
        let mut v = [0f64; 6];
        for slot in &mut v {
            *slot = f64::from(cursor.read_f32::<BigEndian>()?);
        }
        keyframes.push(Keyframe::with_handles(
            Point::new(v[0], v[1]),
            Point::new(v[2], v[3]),
            Point::new(v[4], v[5]),
        ));
    }
    Ok(keyframes)
}

/// [`CurveCodec`] for `.bcurve` files.
#[derive(Debug, Clone, Default)]
pub struct BinaryCodec {
    config: CurveConfig,
}

impl BinaryCodec {
    pub fn new(config: CurveConfig) -> Self {
        Self { config }
    }
}

impl CurveCodec for BinaryCodec {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn extension(&self) -> &'static str {
        "bcurve"
    }

    fn encode(&self, curve: &Curve, writer: &mut dyn Write) -> Result<(), CurveError> {
        BinaryWriter::with_config(writer, self.config.clone()).write_curve(curve)
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<Curve, CurveError> {
        BinaryReader::with_config(reader, self.config.clone()).read_curve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]);
        bytes
    }

    #[test]
    fn test_empty_curve_layout() {
        let bytes = BinaryCodec::default().to_bytes(&Curve::new()).unwrap();
        let mut expected = header();
        expected.extend_from_slice(&[0, 0, 0, 8]);
        expected.extend_from_slice(GLOB);
        expected.extend_from_slice(&[0, 0, 0, 8]);
        expected.extend_from_slice(KEYF);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_global_entry_layout() {
        let mut curve = Curve::new();
        curve.set_meta("ab", "xy");
        curve.set_meta("n", 7i32);
        let bytes = BinaryCodec::default().to_bytes(&curve).unwrap();
        let glob = &bytes[8..];
        // 8 header + (2+1+2+2+1) text + (1+1+2+4+1) int
        assert_eq!(&glob[..4], &[0, 0, 0, 25]);
        assert_eq!(&glob[4..8], GLOB);
        assert_eq!(&glob[8..16], b"ab\0\x01\0xy\0");
        assert_eq!(&glob[16..25], b"n\0\x02\0\0\0\0\x07\0");
    }

    #[test]
    fn test_keyframes_narrow_to_f32() {
        let mut curve = Curve::new();
        curve.add(Keyframe::with_handles(
            Point::new(0.1, 1.0 / 3.0),
            Point::new(-1.0, 0.0),
            Point::new(1.0, 0.0),
        ));
        let codec = BinaryCodec::default();
        let back = codec.from_bytes(&codec.to_bytes(&curve).unwrap()).unwrap();
        let k = back.get(0).unwrap();
        assert_eq!(k.current.x, f64::from(0.1f32));
        assert_eq!(k.current.y, f64::from((1.0f64 / 3.0) as f32));
    }

    #[test]
    fn test_bad_magic() {
        let err = BinaryCodec::default().from_bytes(b"CURV\0\0\0\x01").unwrap_err();
        assert!(matches!(err, CurveError::BadMagic { .. }));
        assert_eq!(err.category(), "format");
    }

    #[test]
    fn test_short_header_is_truncated() {
        let err = BinaryCodec::default().from_bytes(b"cu").unwrap_err();
        assert!(matches!(err, CurveError::Truncated { .. }));
    }

    #[test]
    fn test_unsupported_major_version() {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&[0x00, 0x02, 0x00, 0x00]);
        assert!(matches!(
            BinaryCodec::default().from_bytes(&bytes),
            Err(CurveError::UnsupportedVersion { major: 2, minor: 0 })
        ));
    }

    fn with_unknown_atom() -> Vec<u8> {
        let mut bytes = header();
        bytes.extend_from_slice(&[0, 0, 0, 12]);
        bytes.extend_from_slice(b"xtra");
        bytes.extend_from_slice(&[1, 2, 3, 4]);
        bytes.extend_from_slice(&[0, 0, 0, 32]);
        bytes.extend_from_slice(KEYF);
        for v in [1.0f32, 2.0, -1.0, 0.0, 1.0, 0.0] {
            bytes.extend_from_slice(&v.to_be_bytes());
        }
        bytes
    }

    #[test]
    fn test_unknown_atom_strict() {
        let err = BinaryCodec::default()
            .from_bytes(&with_unknown_atom())
            .unwrap_err();
        assert_eq!(err, CurveError::UnknownAtom { tag: "xtra".into() });
    }

    #[test]
    fn test_unknown_atom_skipped_when_lenient() {
        let curve = BinaryCodec::new(CurveConfig::lenient())
            .from_bytes(&with_unknown_atom())
            .unwrap();
        assert_eq!(curve.len(), 1);
        assert_eq!(curve.get(0).unwrap().current, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_unknown_value_type() {
        let mut bytes = header();
        bytes.extend_from_slice(&[0, 0, 0, 15]);
        bytes.extend_from_slice(GLOB);
        bytes.extend_from_slice(b"k\0\x10\0\0\0\0");
        assert!(matches!(
            BinaryCodec::default().from_bytes(&bytes),
            Err(CurveError::UnknownValueType { code: 0x10, .. })
        ));
    }

    #[test]
    fn test_atom_overrunning_stream() {
        let mut bytes = header();
        bytes.extend_from_slice(&[0, 0, 0, 64]);
        bytes.extend_from_slice(KEYF);
        bytes.extend_from_slice(&[0; 24]);
        assert!(matches!(
            BinaryCodec::default().from_bytes(&bytes),
            Err(CurveError::Truncated { .. })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_atom_reports_its_length() {
        let mut writer = BinaryWriter::new(Vec::new());
        let err = writer
            .write_atom_header(u32::MAX as usize + 1, GLOB)
            .unwrap_err();
        assert_eq!(
            err,
            CurveError::AtomTooLarge {
                tag: "glob".into(),
                size: 4_294_967_296,
                limit: 4_294_967_295,
            }
        );
        assert!(writer.writer.is_empty());
    }

    #[test]
    fn test_declared_size_over_limit() {
        let mut bytes = header();
        bytes.extend_from_slice(&[0, 0, 1, 0]);
        bytes.extend_from_slice(KEYF);
        let config = CurveConfig {
            max_atom_size: 64,
            ..CurveConfig::default()
        };
        assert_eq!(
            BinaryCodec::new(config).from_bytes(&bytes).unwrap_err(),
            CurveError::AtomTooLarge {
                tag: "keyf".into(),
                size: 256,
                limit: 64,
            }
        );
    }

    fn legacy_config() -> CurveConfig {
        CurveConfig {
            legacy_int64: true,
            ..CurveConfig::default()
        }
    }

    fn with_legacy_int64() -> Vec<u8> {
        let mut bytes = header();
        // 8 header + (1+1+2+4+1)
        bytes.extend_from_slice(&[0, 0, 0, 17]);
        bytes.extend_from_slice(GLOB);
        bytes.extend_from_slice(b"n\0\x04\0\xff\xff\xff\xfe\0");
        bytes
    }

    #[test]
    fn test_legacy_int64_reads_four_bytes() {
        let curve = BinaryCodec::new(legacy_config())
            .from_bytes(&with_legacy_int64())
            .unwrap();
        assert_eq!(curve.metadata().get("n"), Some(&MetaValue::Int64(-2)));

        assert!(matches!(
            BinaryCodec::default().from_bytes(&with_legacy_int64()),
            Err(CurveError::Truncated { .. })
        ));
    }

    #[test]
    fn test_legacy_int64_writes_four_bytes() {
        let mut curve = Curve::new();
        curve.set_meta("n", -2i64);
        let codec = BinaryCodec::new(legacy_config());
        let mut expected = with_legacy_int64();
        expected.extend_from_slice(&[0, 0, 0, 8]);
        expected.extend_from_slice(KEYF);
        assert_eq!(codec.to_bytes(&curve).unwrap(), expected);

        curve.set_meta("n", 5_000_000_000i64);
        assert!(matches!(
            codec.to_bytes(&curve),
            Err(CurveError::InvalidMetadataValue { .. })
        ));
    }

    #[test]
    fn test_nul_in_key_rejected() {
        let mut curve = Curve::new();
        curve.set_meta("bad\0key", 1i32);
        assert!(matches!(
            BinaryCodec::default().to_bytes(&curve),
            Err(CurveError::InvalidMetadataKey { .. })
        ));
    }
}
