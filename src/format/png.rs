//! PNG signature and IHDR chunk.
//!
//! ```text
//! Bytes 0-7:   Signature 89 50 4E 47 0D 0A 1A 0A
//! Bytes 8-11:  IHDR length
//! Bytes 12-15: "IHDR"
//! Bytes 16-19: Width (u32, big-endian)
//! Bytes 20-23: Height (u32, big-endian)
//! ```
//!
//! Some early encoders wrote the dimensions directly after the signature
//! without a chunk header; those are read from bytes 8-15.

use crate::error::ParseError;
use crate::io::read_u32_be;

use super::{Dimensions, Header};

pub const SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

pub fn matches(header: &Header) -> bool {
    header.starts_with(SIGNATURE)
}

pub fn dimensions(header: &Header) -> Result<Dimensions, ParseError> {
    let range = if header.size() >= 24 && header.get(12..16) == Some(b"IHDR".as_slice()) {
        16..24
    } else if header.size() >= 16 {
        8..16
    } else {
        return Err(ParseError::MissingTag);
    };

    let field = header.field(range)?;
    Ok(Dimensions::new(
        read_u32_be(&field[0..4]) as u64,
        read_u32_be(&field[4..8]) as u64,
    ))
}
