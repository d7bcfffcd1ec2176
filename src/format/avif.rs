//! AVIF (ISOBMFF/HEIF) box walker.
//!
//! The image size lives in the `ispe` property of the item property
//! container, four boxes deep:
//!
//! ```text
//! ftyp
//! meta (full box: 4-byte version/flags before children)
//! └── iprp
//!     └── ipco
//!         └── ispe (full box: version/flags, width u32, height u32)
//! ```
//!
//! Each level is a linear scan over sibling box headers (`size` u32 big-endian,
//! then a four-character type). A scan fails when it reaches the end of its
//! parent without finding the wanted type, or when a child claims to extend
//! past its parent.

use tracing::trace;

use crate::error::ParseError;
use crate::io::{read_u32_be, SourceReader};

use super::{Dimensions, Header};

/// 4-byte size + 4-byte type
const BOX_HEADER_SIZE: u64 = 8;

/// Version/flags prefix of a full box.
const FULL_BOX_FLAGS_SIZE: u64 = 4;

/// Box header + version/flags + width + height
const ISPE_SIZE: u64 = BOX_HEADER_SIZE + FULL_BOX_FLAGS_SIZE + 8;

pub fn matches(header: &Header) -> bool {
    header.get(4..12) == Some(b"ftypavif".as_slice())
}

/// Box header read from the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoxHeader {
    /// Box type.
    name: [u8; 4],
    /// Size of the box in bytes, header included.
    size: u64,
    /// Absolute offset of the box header.
    offset: u64,
}

impl BoxHeader {
    fn read(reader: &mut SourceReader<'_>) -> Result<Self, ParseError> {
        let offset = reader.position();
        let bytes = reader.read_exact(BOX_HEADER_SIZE as usize)?;
        Ok(Self {
            name: [bytes[4], bytes[5], bytes[6], bytes[7]],
            size: read_u32_be(&bytes[0..4]) as u64,
            offset,
        })
    }

    /// Absolute offset one past the last byte of the box.
    fn end(&self) -> u64 {
        self.offset + self.size
    }
}

pub fn dimensions(reader: &mut SourceReader<'_>, header: &Header) -> Result<Dimensions, ParseError> {
    let ftyp_size = read_u32_be(header.field(0..4)?) as u64;
    if ftyp_size < BOX_HEADER_SIZE {
        return Err(ParseError::BoxBounds);
    }
    reader.seek_to(ftyp_size)?;

    let file_end = reader.size();
    let meta = find_box(reader, b"meta", file_end)?;
    reader.skip(FULL_BOX_FLAGS_SIZE as i64)?;

    let iprp = find_box(reader, b"iprp", meta.end())?;
    let ipco = find_box(reader, b"ipco", iprp.end())?;
    let ispe = find_box(reader, b"ispe", ipco.end())?;
    if ispe.size < ISPE_SIZE {
        return Err(ParseError::BoxBounds);
    }

    let payload = reader.read_exact(12)?;
    Ok(Dimensions::new(
        read_u32_be(&payload[4..8]) as u64,
        read_u32_be(&payload[8..12]) as u64,
    ))
}

/// Scan sibling boxes from the current position up to `end` for `name`.
///
/// On success the reader is positioned right after the found box's header.
fn find_box(
    reader: &mut SourceReader<'_>,
    name: &[u8; 4],
    end: u64,
) -> Result<BoxHeader, ParseError> {
    loop {
        if reader.position() >= end {
            return Err(ParseError::BoxNotFound(*name));
        }

        let header = BoxHeader::read(reader)?;
        trace!(
            name = %String::from_utf8_lossy(&header.name),
            size = header.size,
            offset = header.offset,
            "AVIF box"
        );

        if header.size < BOX_HEADER_SIZE || header.end() > end {
            return Err(ParseError::BoxBounds);
        }
        if &header.name == name {
            return Ok(header);
        }
        reader.seek_to(header.end())?;
    }
}
