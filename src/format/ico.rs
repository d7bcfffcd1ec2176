//! Windows ICO icon directory.
//!
//! ```text
//! Bytes 0-3: 00 00 01 00
//! Bytes 4-5: Image count (u16, little-endian)
//! Then one 16-byte entry per image:
//!   byte 0: width  (0 means 256)
//!   byte 1: height (0 means 256)
//!   bytes 2-15: palette, planes, bit count, data size and offset
//! ```
//!
//! The reported size is that of the largest icon. An entry replaces the
//! current choice only when it is at least as wide *and* at least as tall,
//! so an entry that is larger on one axis but smaller on the other never
//! displaces an earlier one.

use crate::error::ParseError;
use crate::io::{read_u16_le, SourceReader};

use super::{Dimensions, Header};

const DIRECTORY_OFFSET: u64 = 6;
const ENTRY_SIZE: usize = 16;

pub fn matches(header: &Header) -> bool {
    header.starts_with(b"\0\0\x01\0") && header.size() >= 6
}

pub fn dimensions(reader: &mut SourceReader<'_>, header: &Header) -> Result<Dimensions, ParseError> {
    let count = read_u16_le(header.field(4..6)?);
    if count == 0 {
        return Err(ParseError::NoEntries);
    }

    reader.seek_to(DIRECTORY_OFFSET)?;
    let mut largest = Dimensions::new(0, 0);
    for _ in 0..count {
        let entry = reader.read_exact(ENTRY_SIZE)?;
        let width = entry_extent(entry[0]);
        let height = entry_extent(entry[1]);

        if width >= largest.width && height >= largest.height {
            largest = Dimensions::new(width, height);
        }
    }

    Ok(largest)
}

#[inline]
fn entry_extent(stored: u8) -> u64 {
    if stored == 0 {
        256
    } else {
        stored as u64
    }
}
