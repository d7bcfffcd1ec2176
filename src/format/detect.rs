//! Format sniffing and dispatch.
//!
//! The sniffer reads at most [`HEADER_LEN`] bytes from the start of the
//! source and evaluates a fixed, priority-ordered table of signatures against
//! them. The first signature that matches selects the parser; nothing else
//! about the file is inspected before that decision is made.

use std::fs::File;
use std::ops::Range;
use std::path::Path;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::error::{DetectError, IoError, ParseError};
use crate::io::{ByteSource, SourceReader};

use super::{avif, bmp, exr, gif, ico, jpeg, png, psd, qoi, tiff, webp, xcf};
use super::{Dimensions, ImageFormat, ImageInfo};

/// Number of leading bytes inspected by the sniffer.
pub const HEADER_LEN: usize = 30;

// =============================================================================
// Header
// =============================================================================

/// The leading bytes of a source together with its total size.
///
/// `bytes` may be shorter than [`HEADER_LEN`] when the source itself is
/// shorter.
#[derive(Debug, Clone)]
pub struct Header {
    bytes: Bytes,
    size: u64,
}

impl Header {
    pub fn new(bytes: impl Into<Bytes>, size: u64) -> Self {
        Self {
            bytes: bytes.into(),
            size,
        }
    }

    /// Read the header from the start of `reader`.
    pub fn read(reader: &mut SourceReader<'_>) -> Result<Self, IoError> {
        reader.seek_to(0)?;
        let bytes = reader.read_up_to(HEADER_LEN)?;
        Ok(Self {
            bytes,
            size: reader.size(),
        })
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total size of the source, not of the header.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.bytes.starts_with(prefix)
    }

    /// Bytes in `range`, or `None` if the header is too short.
    #[inline]
    pub fn get(&self, range: Range<usize>) -> Option<&[u8]> {
        self.bytes.get(range)
    }

    #[inline]
    pub fn byte(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// Bytes in `range`, failing as a truncated read if they are missing.
    pub fn field(&self, range: Range<usize>) -> Result<&[u8], ParseError> {
        let available = self.bytes.len().saturating_sub(range.start) as u64;
        let Range { start, end } = range.clone();
        self.bytes.get(range).ok_or_else(|| {
            ParseError::Io(IoError::Truncated {
                offset: start as u64,
                requested: end.saturating_sub(start) as u64,
                available,
            })
        })
    }
}

// =============================================================================
// Signature table
// =============================================================================

struct Signature {
    format: ImageFormat,
    matches: fn(&Header) -> bool,
}

/// Signatures in priority order. The first match wins.
const SIGNATURES: &[Signature] = &[
    Signature {
        format: ImageFormat::Gif,
        matches: gif::matches,
    },
    Signature {
        format: ImageFormat::Png,
        matches: png::matches,
    },
    Signature {
        format: ImageFormat::Jpeg,
        matches: jpeg::matches,
    },
    Signature {
        format: ImageFormat::Webp,
        matches: webp::matches,
    },
    Signature {
        format: ImageFormat::Avif,
        matches: avif::matches,
    },
    Signature {
        format: ImageFormat::Bmp,
        matches: bmp::matches,
    },
    Signature {
        format: ImageFormat::Tiff,
        matches: tiff::matches,
    },
    Signature {
        format: ImageFormat::Qoi,
        matches: qoi::matches,
    },
    Signature {
        format: ImageFormat::Psd,
        matches: psd::matches,
    },
    Signature {
        format: ImageFormat::Xcf,
        matches: xcf::matches,
    },
    Signature {
        format: ImageFormat::Ico,
        matches: ico::matches,
    },
    Signature {
        format: ImageFormat::OpenExr,
        matches: exr::matches,
    },
];

/// Pick the format whose signature matches `header`, if any.
pub fn sniff(header: &Header) -> Option<ImageFormat> {
    SIGNATURES
        .iter()
        .inspect(|sig| trace!(format = sig.format.name(), "Trying signature"))
        .find(|sig| (sig.matches)(header))
        .map(|sig| sig.format)
}

// =============================================================================
// Detection
// =============================================================================

/// Determine the format and dimensions of an image from its header.
///
/// The source is rewound to offset 0 first, so calling this repeatedly on the
/// same unmodified source yields the same result. `identifier` is only used
/// for error reporting.
pub fn probe(source: &mut dyn ByteSource, identifier: &str) -> Result<ImageInfo, DetectError> {
    let mut reader = SourceReader::new(source)
        .map_err(|e| DetectError::unreadable(identifier, e.to_string()))?;

    let header = Header::read(&mut reader)
        .map_err(|e| DetectError::unreadable(identifier, e.to_string()))?;

    let Some(format) = sniff(&header) else {
        debug!(path = identifier, size = header.size(), "No signature matched");
        return Err(DetectError::unknown(identifier));
    };
    debug!(path = identifier, format = format.name(), "Detected format");

    let dimensions = format.parse(&mut reader, &header).map_err(|e| {
        debug!(
            path = identifier,
            format = format.name(),
            error = %e,
            "Failed to parse header"
        );
        DetectError::from_parse(identifier, format, &e)
    })?;

    Ok(ImageInfo { format, dimensions })
}

/// Determine the dimensions of an image from its header.
pub fn detect(source: &mut dyn ByteSource, identifier: &str) -> Result<Dimensions, DetectError> {
    probe(source, identifier).map(|info| info.dimensions)
}

/// Open the file at `path` and probe it.
///
/// The file is closed before returning.
pub fn probe_path(path: impl AsRef<Path>) -> Result<ImageInfo, DetectError> {
    let path = path.as_ref();
    let identifier = path.display().to_string();

    let mut file =
        File::open(path).map_err(|e| DetectError::unreadable(&identifier, e.to_string()))?;
    probe(&mut file, &identifier)
}

/// Open the file at `path` and return its dimensions.
pub fn detect_path(path: impl AsRef<Path>) -> Result<Dimensions, DetectError> {
    probe_path(path).map(|info| info.dimensions)
}

// =============================================================================
// Tests
// =============================================================================
