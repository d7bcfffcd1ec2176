//! TIFF tag and field type definitions.
//!
//! This module defines the vocabulary for the dimension scan:
//! - Field types and how a single value of each type is decoded
//! - The two tag IDs that carry the image size

use crate::error::ParseError;

use super::parser::ByteOrder;

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF 6.0 field types.
///
/// Each type has a fixed size in bytes and a decode shape: a single integer,
/// a signed integer, a float, or a numerator/denominator pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    Byte = 1,
    /// 8-bit ASCII character
    Ascii = 2,
    /// Unsigned 16-bit integer
    Short = 3,
    /// Unsigned 32-bit integer
    Long = 4,
    /// Two LONGs: numerator, denominator
    Rational = 5,
    /// Signed 8-bit integer
    SByte = 6,
    /// Undefined byte data
    Undefined = 7,
    /// Signed 16-bit integer
    SShort = 8,
    /// Signed 32-bit integer
    SLong = 9,
    /// Two SLONGs: numerator, denominator
    SRational = 10,
    /// IEEE single precision float
    Float = 11,
    /// IEEE double precision float
    Double = 12,
}

/// Field types indexed by `code - 1`.
pub const FIELD_TYPES: [FieldType; 12] = [
    FieldType::Byte,
    FieldType::Ascii,
    FieldType::Short,
    FieldType::Long,
    FieldType::Rational,
    FieldType::SByte,
    FieldType::Undefined,
    FieldType::SShort,
    FieldType::SLong,
    FieldType::SRational,
    FieldType::Float,
    FieldType::Double,
];

impl FieldType {
    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for codes outside 1..=12.
    pub fn from_u16(value: u16) -> Option<Self> {
        (value as usize)
            .checked_sub(1)
            .and_then(|index| FIELD_TYPES.get(index))
            .copied()
    }

    /// Whether values are a numerator/denominator pair.
    #[inline]
    pub const fn is_rational(self) -> bool {
        matches!(self, FieldType::Rational | FieldType::SRational)
    }

    /// Decode one value of this type as a non-negative integer.
    ///
    /// `bytes` must hold at least [`size_in_bytes`](Self::size_in_bytes)
    /// bytes. Negative values clamp to zero, rationals are floor-divided and
    /// floats are truncated.
    pub fn decode(self, bytes: &[u8], order: ByteOrder) -> Result<u64, ParseError> {
        let value = match self {
            FieldType::Byte | FieldType::Ascii | FieldType::Undefined => bytes[0] as u64,
            FieldType::SByte => clamp(bytes[0] as i8 as i64),
            FieldType::Short => order.read_u16(bytes) as u64,
            FieldType::SShort => clamp(order.read_u16(bytes) as i16 as i64),
            FieldType::Long => order.read_u32(bytes) as u64,
            FieldType::SLong => clamp(order.read_u32(bytes) as i32 as i64),
            FieldType::Rational => {
                let numerator = order.read_u32(&bytes[0..4]) as u64;
                let denominator = order.read_u32(&bytes[4..8]) as u64;
                if denominator == 0 {
                    return Err(ParseError::ZeroDivision);
                }
                numerator / denominator
            }
            FieldType::SRational => {
                let numerator = order.read_u32(&bytes[0..4]) as i32 as i64;
                let denominator = order.read_u32(&bytes[4..8]) as i32 as i64;
                if denominator == 0 {
                    return Err(ParseError::ZeroDivision);
                }
                clamp(floor_div(numerator, denominator))
            }
            FieldType::Float => float(f32::from_bits(order.read_u32(bytes)) as f64)?,
            FieldType::Double => float(f64::from_bits(order.read_u64(bytes)))?,
        };
        Ok(value)
    }
}

#[inline]
fn clamp(value: i64) -> u64 {
    value.max(0) as u64
}

fn floor_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator / denominator;
    if numerator % denominator != 0 && (numerator < 0) != (denominator < 0) {
        quotient - 1
    } else {
        quotient
    }
}

fn float(value: f64) -> Result<u64, ParseError> {
    if !value.is_finite() {
        return Err(ParseError::InvalidDimensions);
    }
    // Saturating cast: negatives become 0.
    Ok(value.trunc() as u64)
}

// =============================================================================
// TIFF Tags
// =============================================================================

/// TIFF tag IDs inspected by the dimension scan.
///
/// All other tags are skipped without reading their field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TiffTag {
    /// Image width in pixels
    ImageWidth = 256,

    /// Image height (length) in pixels
    ImageLength = 257,
}

impl TiffTag {
    /// Create a TiffTag from its numeric value.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            256 => Some(TiffTag::ImageWidth),
            257 => Some(TiffTag::ImageLength),
            _ => None,
        }
    }

    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Tests
// =============================================================================
