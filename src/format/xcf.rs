//! GIMP XCF header.
//!
//! ```text
//! Bytes 0-8:   "gimp xcf "
//! Bytes 9-12:  Version tag ("file", "v001", ...)
//! Byte  13:    NUL
//! Bytes 14-17: Width (u32, big-endian)
//! Bytes 18-21: Height (u32, big-endian)
//! ```

use crate::error::ParseError;
use crate::io::read_u32_be;

use super::{Dimensions, Header};

pub fn matches(header: &Header) -> bool {
    header.starts_with(b"gimp xcf ") && header.byte(13) == Some(0) && header.size() >= 22
}

pub fn dimensions(header: &Header) -> Result<Dimensions, ParseError> {
    let field = header.field(14..22)?;
    Ok(Dimensions::new(
        read_u32_be(&field[0..4]) as u64,
        read_u32_be(&field[4..8]) as u64,
    ))
}
