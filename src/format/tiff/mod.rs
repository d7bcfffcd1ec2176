//! TIFF image file directory walk.
//!
//! Only the first IFD is read, and only the `ImageWidth` (256) and
//! `ImageLength` (257) entries are decoded. Each entry is 12 bytes:
//!
//! ```text
//! Bytes 0-1:  Tag
//! Bytes 2-3:  Field type (1..=12)
//! Bytes 4-7:  Value count
//! Bytes 8-11: Value, or offset to the value
//! ```
//!
//! The value is decoded from the entry's value slot according to its field
//! type. The walk stops as soon as both tags have been seen, in whatever
//! order they appear.

mod parser;
mod tags;

pub use parser::{ByteOrder, TiffHeader, IFD_ENTRY_SIZE, IFD_VALUE_OFFSET, TIFF_HEADER_SIZE};
pub use tags::{FieldType, TiffTag, FIELD_TYPES};

use tracing::trace;

use crate::error::ParseError;
use crate::io::SourceReader;

use super::{Dimensions, Header};

pub fn matches(header: &Header) -> bool {
    header.size() >= 8 && (header.starts_with(b"II\x2A\0") || header.starts_with(b"MM\0\x2A"))
}

pub fn dimensions(reader: &mut SourceReader<'_>, header: &Header) -> Result<Dimensions, ParseError> {
    let tiff = TiffHeader::parse(header.bytes(), header.size())?;
    let order = tiff.byte_order;

    reader.seek_to(tiff.first_ifd_offset)?;
    let entry_count = order.read_u16(&reader.read_exact(2)?);
    trace!(
        offset = tiff.first_ifd_offset,
        entry_count,
        "TIFF first IFD"
    );

    let mut width = None;
    let mut height = None;

    for index in 0..entry_count as u64 {
        let entry_offset = tiff.entry_offset(index);
        reader.seek_to(entry_offset)?;

        let tag_and_type = reader.read_exact(4)?;
        let Some(tag) = TiffTag::from_u16(order.read_u16(&tag_and_type[0..2])) else {
            continue;
        };

        let raw_type = order.read_u16(&tag_and_type[2..4]);
        let field_type =
            FieldType::from_u16(raw_type).ok_or(ParseError::UnknownFieldType(raw_type))?;

        reader.seek_to(entry_offset + IFD_VALUE_OFFSET)?;
        let value = field_type.decode(&reader.read_exact(field_type.size_in_bytes())?, order)?;
        trace!(?tag, ?field_type, value, "TIFF dimension tag");

        match tag {
            TiffTag::ImageWidth => width = Some(value),
            TiffTag::ImageLength => height = Some(value),
        }

        if let (Some(width), Some(height)) = (width, height) {
            return Ok(Dimensions::new(width, height));
        }
    }

    Err(ParseError::MissingTag)
}
