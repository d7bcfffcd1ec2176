//! JPEG marker stream walker.
//!
//! Segments after SOI are scanned until a baseline, extended, progressive or
//! lossless Start-Of-Frame marker (`C0`-`C3`) is found:
//!
//! ```text
//! FF Cn  length(u16)  precision(u8)  height(u16)  width(u16)  ...
//! ```
//!
//! Every other marker is skipped using its declared big-endian length. Fill
//! bytes (`FF FF ...`) in front of a marker are ignored. Reaching SOS before
//! any frame header means the dimensions cannot be found from the header.

use tracing::trace;

use crate::error::ParseError;
use crate::io::SourceReader;

use super::{Dimensions, Header};

const MARKER_PREFIX: u8 = 0xFF;

/// Start of scan. Entropy-coded data follows.
const SOS: u8 = 0xDA;

/// SOF0 (baseline) through SOF3 (lossless).
const SOF_MARKERS: std::ops::RangeInclusive<u8> = 0xC0..=0xC3;

pub fn matches(header: &Header) -> bool {
    header.size() >= 7 && header.starts_with(b"\xFF\xD8")
}

pub fn dimensions(reader: &mut SourceReader<'_>) -> Result<Dimensions, ParseError> {
    reader.seek_to(2)?;

    loop {
        let marker = next_marker(reader)?;
        trace!(marker, offset = reader.position(), "JPEG marker");

        if SOF_MARKERS.contains(&marker) {
            // length(2) + precision(1)
            reader.skip(3)?;
            let height = reader.read_u16_be()?;
            let width = reader.read_u16_be()?;
            return Ok(Dimensions::new(width as u64, height as u64));
        }

        if marker == SOS {
            return Err(ParseError::MissingTag);
        }

        let length = reader.read_u16_be()?;
        if length < 2 {
            return Err(ParseError::SegmentLength(length));
        }
        reader.skip(length as i64 - 2)?;
    }
}

/// Advance to the next `FF` prefix, skip fill bytes and return the marker type.
fn next_marker(reader: &mut SourceReader<'_>) -> Result<u8, ParseError> {
    let mut byte = reader.read_u8()?;
    while byte != MARKER_PREFIX {
        byte = reader.read_u8()?;
    }
    while byte == MARKER_PREFIX {
        byte = reader.read_u8()?;
    }
    Ok(byte)
}
