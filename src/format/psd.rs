//! Photoshop PSD/PSB file header.
//!
//! ```text
//! Bytes 0-3:   "8BPS"
//! Bytes 4-5:   Version (1 = PSD, 2 = PSB)
//! Bytes 6-11:  Reserved (zero)
//! Bytes 12-13: Channel count
//! Bytes 14-17: Height (u32, big-endian)
//! Bytes 18-21: Width (u32, big-endian)
//! ```

use crate::error::ParseError;
use crate::io::read_u32_be;

use super::{Dimensions, Header};

const PSD_SIGNATURE: &[u8] = b"8BPS\0\x01\0\0\0\0\0\0";
const PSB_SIGNATURE: &[u8] = b"8BPS\0\x02\0\0\0\0\0\0";

pub fn matches(header: &Header) -> bool {
    (header.starts_with(PSD_SIGNATURE) || header.starts_with(PSB_SIGNATURE))
        && header.size() >= 22
}

pub fn dimensions(header: &Header) -> Result<Dimensions, ParseError> {
    let field = header.field(14..22)?;
    // Stored height first.
    let height = read_u32_be(&field[0..4]);
    let width = read_u32_be(&field[4..8]);
    Ok(Dimensions::new(width as u64, height as u64))
}
