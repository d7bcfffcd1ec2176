//! # image-dims
//!
//! Reads the pixel width and height of an image straight from its container
//! header, without decoding any pixel data.
//!
//! ## Features
//!
//! - **Header-only**: reads a 30-byte prefix, then only the structures that
//!   carry the dimensions (chunk lists, box nesting, tag directories, marker
//!   streams)
//! - **Format support**: GIF, PNG, JPEG, WEBP, AVIF, BMP, TIFF, QOI, PSD, XCF,
//!   ICO and OpenEXR
//! - **Any seekable source**: files, in-memory buffers, or anything that
//!   implements [`ByteSource`]
//!
//! ## Architecture
//!
//! - [`io`] - Bounded reader over a seekable byte source
//! - [`mod@format`] - Format sniffer and per-format header parsers
//! - [`error`] - Error types
//! - [`walk`] - Directory expansion for the command-line tool
//! - [`config`] - CLI configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::io::Cursor;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let dims = image_dims::detect(&mut Cursor::new(bytes), "photo.png").unwrap();
//! println!("{}x{}", dims.width, dims.height);
//!
//! let info = image_dims::probe_path("photo.png").unwrap();
//! println!("{} {}x{}", info.format, info.dimensions.width, info.dimensions.height);
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod walk;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use error::{DetectError, IoError, ParseError};
pub use format::{detect, detect_path, probe, probe_path, sniff, Dimensions, Header, ImageFormat, ImageInfo};
pub use io::{ByteSource, SourceReader};
pub use walk::collect_files;
