//! Byte and JSON encodings of [`BasicData`] for example stores.
//!
//! Binary layout, one tag byte per node:
//!
//! | tag | payload |
//! |-----|---------|
//! | `0` | none (null) |
//! | `1` | 16-byte big-endian `i128` |
//! | `2` | 8-byte big-endian item count, then each item |
//!
//! JSON uses serde's externally tagged form, e.g.
//! `{"Sequence":[{"Integer":-5},"Null"]}`.
//!
//! Input is treated as untrusted. Decoding never panics and never allocates
//! more than the input could describe; anything that does not parse is
//! reported as [`BadData::Malformed`]. Both encodings share one nesting limit,
//! [`MAX_DEPTH`].

use std::io::{self, Cursor};

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use serde::{ser, Deserialize};

use crate::basic::BasicData;
use crate::errors::{BadData, DecodeResult};

const TAG_NULL: u8 = 0;
const TAG_INTEGER: u8 = 1;
const TAG_SEQUENCE: u8 = 2;

/// Deepest sequence nesting accepted by [`decode`] and [`from_json`]
pub const MAX_DEPTH: usize = 128;

/// Serialize basic data to bytes.
pub fn encode(data: &BasicData) -> Vec<u8> {
    let mut out = Vec::new();
    write_basic(&mut out, data);
    out
}

fn write_basic(out: &mut Vec<u8>, data: &BasicData) {
    match data {
        BasicData::Null => out.push(TAG_NULL),
        BasicData::Integer(value) => {
            let mut buf = [0u8; 16];
            BigEndian::write_i128(&mut buf, *value);
            out.push(TAG_INTEGER);
            out.extend_from_slice(&buf);
        }
        BasicData::Sequence(items) => {
            let mut buf = [0u8; 8];
            BigEndian::write_u64(&mut buf, items.len() as u64);
            out.push(TAG_SEQUENCE);
            out.extend_from_slice(&buf);
            for item in items {
                write_basic(out, item);
            }
        }
    }
}

/// Parse bytes produced by [`encode`].
pub fn decode(bytes: &[u8]) -> DecodeResult<BasicData> {
    let mut cursor = Cursor::new(bytes);
    let data = read_basic(&mut cursor, 0)?;

    let consumed = cursor.position() as usize;
    if consumed != bytes.len() {
        log::warn!("[CODEC] rejecting input with {} trailing bytes", bytes.len() - consumed);
        return Err(BadData::Malformed(format!(
            "{} trailing bytes after value",
            bytes.len() - consumed
        )));
    }
    Ok(data)
}

fn read_basic(cursor: &mut Cursor<&[u8]>, depth: usize) -> DecodeResult<BasicData> {
    let tag = cursor.read_u8().map_err(truncated)?;
    match tag {
        TAG_NULL => Ok(BasicData::Null),
        TAG_INTEGER => cursor
            .read_i128::<BigEndian>()
            .map(BasicData::Integer)
            .map_err(truncated),
        TAG_SEQUENCE => {
            if depth >= MAX_DEPTH {
                return Err(BadData::Malformed(format!(
                    "sequences nested deeper than {}",
                    MAX_DEPTH
                )));
            }
            let len = cursor.read_u64::<BigEndian>().map_err(truncated)?;

            // Every item takes at least one byte.
            let remaining = (cursor.get_ref().len() as u64).saturating_sub(cursor.position());
            if len > remaining {
                return Err(BadData::Malformed(format!(
                    "sequence of {} items in {} remaining bytes",
                    len, remaining
                )));
            }

            let mut items = Vec::with_capacity(len as usize);
            for _ in 0..len {
                items.push(read_basic(cursor, depth + 1)?);
            }
            Ok(BasicData::Sequence(items))
        }
        other => Err(BadData::Malformed(format!("unknown tag {:#04x}", other))),
    }
}

fn truncated(err: io::Error) -> BadData {
    BadData::Malformed(format!("truncated input: {}", err))
}

/// Render basic data as JSON text.
///
/// Data nested deeper than [`MAX_DEPTH`] is refused, since [`from_json`]
/// could not read it back.
pub fn to_json(data: &BasicData) -> serde_json::Result<String> {
    let depth = data.depth();
    if depth > MAX_DEPTH {
        return Err(ser::Error::custom(format!(
            "sequences nested {} deep, limit is {}",
            depth, MAX_DEPTH
        )));
    }
    serde_json::to_string(data)
}

/// Parse JSON text written by [`to_json`].
pub fn from_json(text: &str) -> DecodeResult<BasicData> {
    // Each sequence level is an object wrapping an array.
    let nesting = json_nesting(text);
    if nesting > 2 * MAX_DEPTH + 1 {
        log::warn!("[CODEC] rejecting JSON nested {} levels deep", nesting);
        return Err(BadData::Malformed(format!(
            "sequences nested deeper than {}",
            MAX_DEPTH
        )));
    }

    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let data = BasicData::deserialize(&mut deserializer)
        .and_then(|data| deserializer.end().map(|()| data))
        .map_err(|e| BadData::Malformed(format!("invalid JSON: {}", e)))?;

    if data.depth() > MAX_DEPTH {
        return Err(BadData::Malformed(format!(
            "sequences nested deeper than {}",
            MAX_DEPTH
        )));
    }
    Ok(data)
}

/// Deepest bracket nesting in `text`, ignoring brackets inside strings.
fn json_nesting(text: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}
