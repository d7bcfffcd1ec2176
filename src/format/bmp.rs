//! BMP file header and BITMAPINFOHEADER.
//!
//! ```text
//! Bytes 0-1:   "BM"
//! Bytes 6-9:   Reserved (zero)
//! Bytes 18-21: Width (i32, little-endian)
//! Bytes 22-25: Height (i32, little-endian, negative for top-down rows)
//! ```

use crate::error::ParseError;
use crate::io::read_i32_le;

use super::{Dimensions, Header};

pub fn matches(header: &Header) -> bool {
    header.starts_with(b"BM")
        && header.get(6..10) == Some([0u8; 4].as_slice())
        && header.size() >= 26
}

pub fn dimensions(header: &Header) -> Result<Dimensions, ParseError> {
    let field = header.field(18..26)?;
    let width = read_i32_le(&field[0..4]);
    let height = read_i32_le(&field[4..8]);

    if width < 0 {
        return Err(ParseError::InvalidDimensions);
    }

    Ok(Dimensions::new(width as u64, height.unsigned_abs() as u64))
}
