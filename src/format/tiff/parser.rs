//! Classic TIFF header.
//!
//! ```text
//! Bytes 0-1: "II" (little-endian) or "MM" (big-endian)
//! Bytes 2-3: 42 in the file's byte order
//! Bytes 4-7: Absolute offset of the first image file directory
//! ```
//!
//! BigTIFF (version 43) never reaches this parser; the sniffer only accepts
//! the classic markers.

use crate::error::{IoError, ParseError};
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, read_u64_be, read_u64_le};

/// Length of the classic header.
pub const TIFF_HEADER_SIZE: usize = 8;

/// Entry count that opens every IFD.
pub const IFD_COUNT_SIZE: u64 = 2;

/// Tag (2), field type (2), value count (4), value slot (4).
pub const IFD_ENTRY_SIZE: u64 = 12;

/// Where the value slot starts inside an entry.
pub const IFD_VALUE_OFFSET: u64 = 8;

const CLASSIC_VERSION: u16 = 42;

/// Endianness declared by the first two bytes of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// "II"
    LittleEndian,
    /// "MM"
    BigEndian,
}

impl ByteOrder {
    /// Decode the two-byte order marker.
    pub fn from_marker(marker: &[u8]) -> Option<Self> {
        match marker {
            b"II" => Some(ByteOrder::LittleEndian),
            b"MM" => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    #[inline]
    pub fn read_u64(self, bytes: &[u8]) -> u64 {
        match self {
            ByteOrder::LittleEndian => read_u64_le(bytes),
            ByteOrder::BigEndian => read_u64_be(bytes),
        }
    }
}

/// Byte order and first directory location of a classic TIFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    pub byte_order: ByteOrder,
    pub first_ifd_offset: u64,
}

impl TiffHeader {
    /// Parse the first 8 bytes of a file of `file_size` bytes.
    ///
    /// # Errors
    /// - `Io` when fewer than 8 bytes are given
    /// - `Magic` for an unknown order marker or a version other than 42
    /// - `InvalidOffset` when the first IFD would start at or past the end
    pub fn parse(bytes: &[u8], file_size: u64) -> Result<Self, ParseError> {
        let Some(bytes) = bytes.get(..TIFF_HEADER_SIZE) else {
            return Err(ParseError::Io(IoError::Truncated {
                offset: 0,
                requested: TIFF_HEADER_SIZE as u64,
                available: bytes.len() as u64,
            }));
        };

        let byte_order = ByteOrder::from_marker(&bytes[0..2]).ok_or(ParseError::Magic)?;
        if byte_order.read_u16(&bytes[2..4]) != CLASSIC_VERSION {
            return Err(ParseError::Magic);
        }

        let first_ifd_offset = byte_order.read_u32(&bytes[4..8]) as u64;
        if first_ifd_offset >= file_size {
            return Err(ParseError::InvalidOffset(first_ifd_offset));
        }

        Ok(Self {
            byte_order,
            first_ifd_offset,
        })
    }

    /// Absolute offset of entry `index` in the first IFD.
    #[inline]
    pub const fn entry_offset(&self, index: u64) -> u64 {
        self.first_ifd_offset + IFD_COUNT_SIZE + index * IFD_ENTRY_SIZE
    }
}
