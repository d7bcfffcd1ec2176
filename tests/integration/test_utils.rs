//! Test utilities for integration tests.
//!
//! This module provides a byte-counting source and builders for image files,
//! either encoded by the `image` crate or assembled byte by byte.

use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use image_dims::ByteSource;

// =============================================================================
// Tracking Source
// =============================================================================

/// An in-memory source that counts how many bytes were read from it.
///
/// Used to check that detection stays within the file header.
pub struct TrackingSource {
    inner: Cursor<Vec<u8>>,
    bytes_read: u64,
}

impl TrackingSource {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            inner: Cursor::new(data),
            bytes_read: 0,
        }
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl Read for TrackingSource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}

impl Seek for TrackingSource {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl ByteSource for TrackingSource {
    fn size(&mut self) -> std::io::Result<u64> {
        Ok(self.inner.get_ref().len() as u64)
    }
}

// =============================================================================
// Encoded Images
// =============================================================================

/// Encode a gradient RGB image of the given size with the `image` crate.
pub fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });

    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, format)
        .unwrap();
    buf.into_inner()
}

// =============================================================================
// Hand-built Containers
// =============================================================================

fn riff_webp(chunk: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut data = b"RIFF".to_vec();
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(b"WEBP");
    data.extend_from_slice(chunk);
    data.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    data.extend_from_slice(payload);
    data.resize(64, 0);
    let riff_size = (data.len() - 8) as u32;
    data[4..8].copy_from_slice(&riff_size.to_le_bytes());
    data
}

/// Lossless WebP: 14-bit width-1 and height-1 packed after the 0x2F signature.
pub fn webp_lossless(width: u32, height: u32) -> Vec<u8> {
    let bits = (width - 1) | ((height - 1) << 14);
    let mut payload = vec![0x2F];
    payload.extend_from_slice(&bits.to_le_bytes());
    riff_webp(b"VP8L", &payload)
}

/// Lossy WebP key frame header.
pub fn webp_lossy(width: u16, height: u16) -> Vec<u8> {
    let mut payload = vec![0x10, 0x02, 0x00, 0x9D, 0x01, 0x2A];
    payload.extend_from_slice(&width.to_le_bytes());
    payload.extend_from_slice(&height.to_le_bytes());
    riff_webp(b"VP8 ", &payload)
}

/// Extended WebP with a 24-bit canvas size.
pub fn webp_extended(width: u32, height: u32) -> Vec<u8> {
    let mut payload = vec![0x10, 0, 0, 0];
    payload.extend_from_slice(&(width - 1).to_le_bytes()[..3]);
    payload.extend_from_slice(&(height - 1).to_le_bytes()[..3]);
    riff_webp(b"VP8X", &payload)
}

fn bmff_box(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut data = ((payload.len() + 8) as u32).to_be_bytes().to_vec();
    data.extend_from_slice(name);
    data.extend_from_slice(payload);
    data
}

fn bmff_full_box(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut body = vec![0, 0, 0, 0];
    body.extend_from_slice(payload);
    bmff_box(name, &body)
}

/// AVIF with `ftyp`, `meta/iprp/ipco/ispe` and an `mdat`.
pub fn avif(width: u32, height: u32) -> Vec<u8> {
    let mut ispe = width.to_be_bytes().to_vec();
    ispe.extend_from_slice(&height.to_be_bytes());

    let mut properties = bmff_box(b"colr", b"nclx\0\x01\0\x0d\0\x06\x80");
    properties.extend(bmff_full_box(b"ispe", &ispe));
    properties.extend(bmff_full_box(b"pixi", &[3, 8, 8, 8]));

    let mut iprp = bmff_box(b"ipco", &properties);
    iprp.extend(bmff_full_box(b"ipma", &[0, 0, 0, 1, 0, 1, 2, 0x81, 0x02]));

    let mut meta = bmff_full_box(b"hdlr", b"\0\0\0\0pict\0\0\0\0\0\0\0\0\0\0\0\0\0");
    meta.extend(bmff_full_box(b"pitm", &[0, 1]));
    meta.extend(bmff_box(b"iprp", &iprp));

    let mut data = bmff_box(b"ftyp", b"avif\0\0\0\0avifmif1miaf");
    data.extend(bmff_full_box(b"meta", &meta));
    data.extend(bmff_box(b"mdat", &[0; 32]));
    data
}

/// Photoshop header. Version 1 is PSD, 2 is PSB.
pub fn psd(width: u32, height: u32, version: u16) -> Vec<u8> {
    let mut data = b"8BPS".to_vec();
    data.extend_from_slice(&version.to_be_bytes());
    data.extend_from_slice(&[0; 6]);
    data.extend_from_slice(&3u16.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&8u16.to_be_bytes());
    data.extend_from_slice(&3u16.to_be_bytes());
    data.resize(64, 0);
    data
}

/// GIMP XCF header.
pub fn xcf(width: u32, height: u32) -> Vec<u8> {
    let mut data = b"gimp xcf v011\0".to_vec();
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes());
    data.resize(64, 0);
    data
}

/// Icon directory with one entry per `(width, height)`; 256 is stored as 0.
pub fn ico(entries: &[(u32, u32)]) -> Vec<u8> {
    let mut data = vec![0, 0, 1, 0];
    data.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for &(width, height) in entries {
        data.push((width % 256) as u8);
        data.push((height % 256) as u8);
        data.extend_from_slice(&[0, 0, 1, 0, 32, 0]);
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
    }
    data
}

fn exr_attribute(name: &str, kind: &str, value: &[u8]) -> Vec<u8> {
    let mut data = name.as_bytes().to_vec();
    data.push(0);
    data.extend_from_slice(kind.as_bytes());
    data.push(0);
    data.extend_from_slice(&(value.len() as u32).to_le_bytes());
    data.extend_from_slice(value);
    data
}

fn box2i(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Vec<u8> {
    [x_min, y_min, x_max, y_max]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect()
}

/// OpenEXR scanline header whose display window starts at `origin`.
pub fn exr(width: i32, height: i32, origin: (i32, i32)) -> Vec<u8> {
    let (x, y) = origin;
    let mut data = vec![0x76, 0x2F, 0x31, 0x01, 2, 0, 0, 0];
    data.extend(exr_attribute("channels", "chlist", b"R\0\x01\0\0\0\0\0\0\0\x01\0\0\0\x01\0\0\0\0"));
    data.extend(exr_attribute("compression", "compression", &[0]));
    data.extend(exr_attribute("dataWindow", "box2i", &box2i(0, 0, 0, 0)));
    data.extend(exr_attribute(
        "displayWindow",
        "box2i",
        &box2i(x, y, x + width - 1, y + height - 1),
    ));
    data.extend(exr_attribute("lineOrder", "lineOrder", &[0]));
    data.push(0);
    data.extend_from_slice(&[0; 8]);
    data
}

// =============================================================================
// TIFF Builder
// =============================================================================

#[derive(Clone, Copy)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

/// Builder for a classic TIFF with a single IFD of one-value entries.
pub struct TiffBuilder {
    byte_order: ByteOrderType,
    entries: Vec<(u16, u16, u32)>,
}

impl TiffBuilder {
    pub fn new(byte_order: ByteOrderType) -> Self {
        Self {
            byte_order,
            entries: Vec::new(),
        }
    }

    /// Add an entry whose value fits in the 4-byte slot.
    pub fn entry(mut self, tag: u16, field_type: u16, value: u32) -> Self {
        self.entries.push((tag, field_type, value));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut data = match self.byte_order {
            ByteOrderType::LittleEndian => b"II".to_vec(),
            ByteOrderType::BigEndian => b"MM".to_vec(),
        };
        self.write_u16(&mut data, 42);
        self.write_u32(&mut data, 8);

        self.write_u16(&mut data, self.entries.len() as u16);
        for &(tag, field_type, value) in &self.entries {
            self.write_u16(&mut data, tag);
            self.write_u16(&mut data, field_type);
            self.write_u32(&mut data, 1);
            // Values smaller than the slot are left-justified.
            match field_type {
                1 | 2 | 6 | 7 => data.extend_from_slice(&[value as u8, 0, 0, 0]),
                3 | 8 => {
                    self.write_u16(&mut data, value as u16);
                    data.extend_from_slice(&[0, 0]);
                }
                _ => self.write_u32(&mut data, value),
            }
        }
        self.write_u32(&mut data, 0);
        data
    }

    fn write_u16(&self, data: &mut Vec<u8>, value: u16) {
        match self.byte_order {
            ByteOrderType::LittleEndian => data.extend(&value.to_le_bytes()),
            ByteOrderType::BigEndian => data.extend(&value.to_be_bytes()),
        }
    }

    fn write_u32(&self, data: &mut Vec<u8>, value: u32) {
        match self.byte_order {
            ByteOrderType::LittleEndian => data.extend(&value.to_le_bytes()),
            ByteOrderType::BigEndian => data.extend(&value.to_be_bytes()),
        }
    }
}

// =============================================================================
// Files
// =============================================================================

/// Write `data` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, data).unwrap();
    path
}
