//! OpenEXR header attribute scan.
//!
//! After the 4-byte magic and 4-byte version field, the header is a list of
//! attributes terminated by an empty name:
//!
//! ```text
//! name\0  type\0  size(u32, little-endian)  value[size]
//! ```
//!
//! The image size comes from `displayWindow`, a `box2i` holding
//! `xMin, yMin, xMax, yMax` as little-endian i32 (inclusive bounds).

use tracing::trace;

use crate::error::ParseError;
use crate::io::{read_i32_le, SourceReader};

use super::{Dimensions, Header};

pub const MAGIC: [u8; 4] = [0x76, 0x2F, 0x31, 0x01];

const HEADER_START: u64 = 8;

/// Longest attribute or type name accepted (long-name files allow 255).
const MAX_NAME_LEN: usize = 255;

const DISPLAY_WINDOW: &[u8] = b"displayWindow";
const BOX2I: &[u8] = b"box2i";
const BOX2I_SIZE: u32 = 16;

pub fn matches(header: &Header) -> bool {
    header.starts_with(&MAGIC) && header.size() > 8 && matches!(header.byte(4), Some(1 | 2))
}

pub fn dimensions(reader: &mut SourceReader<'_>) -> Result<Dimensions, ParseError> {
    reader.seek_to(HEADER_START)?;

    loop {
        let name = read_name(reader)?;
        if name.is_empty() {
            return Err(ParseError::AttributeNotFound);
        }
        let kind = read_name(reader)?;
        let size = reader.read_u32_le()?;
        trace!(
            name = %String::from_utf8_lossy(&name),
            kind = %String::from_utf8_lossy(&kind),
            size,
            "OpenEXR attribute"
        );

        if name == DISPLAY_WINDOW {
            if kind != BOX2I || size != BOX2I_SIZE {
                return Err(ParseError::InvalidAttribute);
            }
            return display_window(reader);
        }

        reader.skip(size as i64)?;
    }
}

fn display_window(reader: &mut SourceReader<'_>) -> Result<Dimensions, ParseError> {
    let bytes = reader.read_exact(BOX2I_SIZE as usize)?;
    let x_min = read_i32_le(&bytes[0..4]) as i64;
    let y_min = read_i32_le(&bytes[4..8]) as i64;
    let x_max = read_i32_le(&bytes[8..12]) as i64;
    let y_max = read_i32_le(&bytes[12..16]) as i64;

    let width = x_max - x_min + 1;
    let height = y_max - y_min + 1;
    if width <= 0 || height <= 0 {
        return Err(ParseError::InvalidDimensions);
    }

    Ok(Dimensions::new(width as u64, height as u64))
}

fn read_name(reader: &mut SourceReader<'_>) -> Result<Vec<u8>, ParseError> {
    reader
        .read_cstring(MAX_NAME_LEN)?
        .ok_or(ParseError::InvalidAttribute)
}
