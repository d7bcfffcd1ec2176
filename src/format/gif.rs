//! GIF logical screen descriptor.
//!
//! ```text
//! Bytes 0-5:  "GIF87a" or "GIF89a"
//! Bytes 6-7:  Logical screen width (u16, little-endian)
//! Bytes 8-9:  Logical screen height (u16, little-endian)
//! ```

use crate::error::ParseError;
use crate::io::read_u16_le;

use super::{Dimensions, Header};

pub fn matches(header: &Header) -> bool {
    header.size() >= 10 && (header.starts_with(b"GIF87a") || header.starts_with(b"GIF89a"))
}

pub fn dimensions(header: &Header) -> Result<Dimensions, ParseError> {
    let screen = header.field(6..10)?;
    Ok(Dimensions::new(
        read_u16_le(&screen[0..2]) as u64,
        read_u16_le(&screen[2..4]) as u64,
    ))
}
