use std::fmt;

use thiserror::Error;

use crate::format::ImageFormat;

/// I/O errors raised by [`SourceReader`](crate::io::SourceReader).
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// Fewer bytes remain than a read asked for
    #[error("Truncated read: requested {requested} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: u64,
        requested: u64,
        available: u64,
    },

    /// Seek target lies before the start of the source
    #[error("Invalid seek to offset {offset}")]
    Seek { offset: i128 },

    /// Underlying read or seek failed
    #[error("Read error: {0}")]
    Read(String),
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError::Read(err.to_string())
    }
}

/// Errors raised while walking a single container format.
///
/// These never cross the crate boundary as-is: [`DetectError::from_parse`]
/// collapses them into a format-tagged [`DetectError`].
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// I/O error while reading the source
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// A magic number or start code did not match
    #[error("Magic mismatch")]
    Magic,

    /// A sub-format could not be parsed (reported as the failure detail)
    #[error("Unsupported sub-format: {0:?}")]
    SubFormat(&'static str),

    /// TIFF field type outside of 1..=12
    #[error("Unknown field type: {0}")]
    UnknownFieldType(u16),

    /// An offset points outside the source
    #[error("Invalid offset: {0}")]
    InvalidOffset(u64),

    /// A required TIFF tag never appeared in the directory
    #[error("Missing required tag")]
    MissingTag,

    /// A box with the given type was not found in its parent
    #[error("Box not found: {}", String::from_utf8_lossy(.0))]
    BoxNotFound([u8; 4]),

    /// A box header declared a size outside its parent's bounds
    #[error("Box size out of bounds")]
    BoxBounds,

    /// The OpenEXR header ended without a `displayWindow` attribute
    #[error("Attribute not found")]
    AttributeNotFound,

    /// An attribute had an unexpected type, size or name length
    #[error("Invalid attribute")]
    InvalidAttribute,

    /// Decoded dimensions are not representable as non-negative integers
    #[error("Invalid dimensions")]
    InvalidDimensions,

    /// A rational value had a zero denominator
    #[error("Division by zero in rational value")]
    ZeroDivision,

    /// A directory declared no entries
    #[error("No entries")]
    NoEntries,

    /// A JPEG segment declared a length shorter than its own length field
    #[error("Invalid segment length: {0}")]
    SegmentLength(u16),
}

/// The single failure type returned by detection.
///
/// Carries the caller-supplied identifier, the detected format (if the
/// signature matched) and an optional sub-format or reason string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectError {
    pub path: String,
    pub format: Option<ImageFormat>,
    pub detail: Option<String>,
}

impl DetectError {
    /// No signature matched.
    pub fn unknown(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            format: None,
            detail: None,
        }
    }

    /// The source could not be opened, sized or read before sniffing.
    pub fn unreadable(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            format: None,
            detail: Some(detail.into()),
        }
    }

    /// Wrap a parser failure, keeping only the detail callers may act on.
    pub fn from_parse(path: impl Into<String>, format: ImageFormat, err: &ParseError) -> Self {
        let detail = match err {
            ParseError::SubFormat(sub) => Some((*sub).to_string()),
            ParseError::UnknownFieldType(ty) => Some(format!("unknown field type: {}", ty)),
            _ => None,
        };

        Self {
            path: path.into(),
            format: Some(format),
            detail,
        }
    }
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.format, &self.detail) {
            (None, None) => write!(f, "Unknown image format: {}", self.path),
            (None, Some(detail)) => write!(f, "Cannot read {} ({})", self.path, detail),
            (Some(format), None) => {
                write!(f, "Error parsing {} image: {}", format.name(), self.path)
            }
            (Some(format), Some(detail)) => write!(
                f,
                "Error parsing {} ({}) image: {}",
                format.name(),
                detail,
                self.path
            ),
        }
    }
}

impl std::error::Error for DetectError {}
