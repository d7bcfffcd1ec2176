//! WebP RIFF container.
//!
//! The first chunk after the `WEBP` form type decides the layout:
//!
//! ```text
//! Bytes 12-15: Chunk tag ("VP8 ", "VP8L" or "VP8X")
//! Bytes 16-19: Chunk size
//!
//! VP8L (lossless):  byte 20 = 0x2F, bytes 21-24 = packed 14-bit width-1 / height-1
//! VP8  (lossy):     bytes 23-25 = start code 9D 01 2A, bytes 26-29 = u16 width / height
//! VP8X (extended):  bytes 24-26 = u24 canvas width-1, bytes 27-29 = u24 canvas height-1
//! ```

use crate::error::ParseError;
use crate::io::{read_u16_le, read_u24_le};

use super::{Dimensions, Header};

const VP8_START_CODE: [u8; 3] = [0x9D, 0x01, 0x2A];

/// VP8 frame dimensions carry two scaling bits above the 14-bit size.
const VP8_DIMENSION_MASK: u16 = 0x3FFF;

pub fn matches(header: &Header) -> bool {
    header.starts_with(b"RIFF")
        && header.size() >= 30
        && header.get(8..12) == Some(b"WEBP".as_slice())
}

pub fn dimensions(header: &Header) -> Result<Dimensions, ParseError> {
    match header.field(12..16)? {
        b"VP8L" => lossless(header),
        b"VP8 " => lossy(header),
        b"VP8X" => extended(header),
        _ => Err(ParseError::Magic),
    }
}

fn lossless(header: &Header) -> Result<Dimensions, ParseError> {
    let bits = header.field(21..25)?;
    let (b0, b1, b2, b3) = (bits[0] as u64, bits[1] as u64, bits[2] as u64, bits[3] as u64);

    let width = 1 + (((b1 & 0x3F) << 8) | b0);
    let height = 1 + (((b3 & 0x0F) << 10) | (b2 << 2) | ((b1 & 0xC0) >> 6));
    Ok(Dimensions::new(width, height))
}

fn lossy(header: &Header) -> Result<Dimensions, ParseError> {
    if header.field(23..26)? != VP8_START_CODE {
        return Err(ParseError::SubFormat("VP8 "));
    }

    let size = header.field(26..30)?;
    let width = read_u16_le(&size[0..2]) & VP8_DIMENSION_MASK;
    let height = read_u16_le(&size[2..4]) & VP8_DIMENSION_MASK;
    Ok(Dimensions::new(width as u64, height as u64))
}

fn extended(header: &Header) -> Result<Dimensions, ParseError> {
    let canvas = header.field(24..30)?;
    let width = read_u24_le(&canvas[0..3]) as u64 + 1;
    let height = read_u24_le(&canvas[3..6]) as u64 + 1;
    Ok(Dimensions::new(width, height))
}
