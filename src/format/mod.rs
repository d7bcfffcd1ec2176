//! Header parsers for every supported image container.
//!
//! Detection is split in two steps:
//!
//! 1. [`detect::sniff`] inspects the first [`HEADER_LEN`](detect::HEADER_LEN)
//!    bytes and the total size and picks exactly one [`ImageFormat`].
//! 2. The parser for that format walks as much of the container as it needs
//!    (chunk lists, box nesting, tag directories, marker streams) and returns
//!    the [`Dimensions`].
//!
//! Parsers never decode pixel data and never read more of the file than the
//! structure requires.

use serde::{Serialize, Serializer};

use crate::error::ParseError;
use crate::io::SourceReader;

pub mod avif;
pub mod bmp;
pub mod detect;
pub mod exr;
pub mod gif;
pub mod ico;
pub mod jpeg;
pub mod png;
pub mod psd;
pub mod qoi;
pub mod tiff;
pub mod webp;
pub mod xcf;

pub use detect::{detect, detect_path, probe, probe_path, sniff, Header};

// =============================================================================
// ImageFormat
// =============================================================================

/// Image container formats recognised by the sniffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Gif,
    Png,
    Jpeg,
    Webp,
    Avif,
    Bmp,
    Tiff,
    Qoi,
    Psd,
    Xcf,
    Ico,
    OpenExr,
}

impl ImageFormat {
    /// Short label used in error messages and reports.
    pub const fn name(&self) -> &'static str {
        match self {
            ImageFormat::Gif => "GIF",
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Webp => "WEBP",
            ImageFormat::Avif => "AVIF",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Tiff => "TIFF",
            ImageFormat::Qoi => "QOI",
            ImageFormat::Psd => "PSD",
            ImageFormat::Xcf => "XCF",
            ImageFormat::Ico => "ICO",
            ImageFormat::OpenExr => "OpenEXR",
        }
    }

    /// Run this format's header parser.
    ///
    /// `header` holds the bytes the sniffer already consumed; the reader is
    /// positioned right after them.
    pub(crate) fn parse(
        self,
        reader: &mut SourceReader<'_>,
        header: &Header,
    ) -> Result<Dimensions, ParseError> {
        match self {
            ImageFormat::Gif => gif::dimensions(header),
            ImageFormat::Png => png::dimensions(header),
            ImageFormat::Jpeg => jpeg::dimensions(reader),
            ImageFormat::Webp => webp::dimensions(header),
            ImageFormat::Avif => avif::dimensions(reader, header),
            ImageFormat::Bmp => bmp::dimensions(header),
            ImageFormat::Tiff => tiff::dimensions(reader, header),
            ImageFormat::Qoi => qoi::dimensions(header),
            ImageFormat::Psd => psd::dimensions(header),
            ImageFormat::Xcf => xcf::dimensions(header),
            ImageFormat::Ico => ico::dimensions(reader, header),
            ImageFormat::OpenExr => exr::dimensions(reader),
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ImageFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// Pixel width and height of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: u64,
    pub height: u64,
}

impl Dimensions {
    pub const fn new(width: u64, height: u64) -> Self {
        Self { width, height }
    }
}

impl From<(u64, u64)> for Dimensions {
    fn from((width, height): (u64, u64)) -> Self {
        Self { width, height }
    }
}

/// Detected format together with its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub format: ImageFormat,
    #[serde(flatten)]
    pub dimensions: Dimensions,
}
