//! QOI header: "qoif", then width and height as big-endian u32.

use crate::error::ParseError;
use crate::io::read_u32_be;

use super::{Dimensions, Header};

pub fn matches(header: &Header) -> bool {
    header.starts_with(b"qoif") && header.size() >= 14
}

pub fn dimensions(header: &Header) -> Result<Dimensions, ParseError> {
    let field = header.field(4..12)?;
    Ok(Dimensions::new(
        read_u32_be(&field[0..4]) as u64,
        read_u32_be(&field[4..8]) as u64,
    ))
}
