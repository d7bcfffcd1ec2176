use std::io::{Read, Seek, SeekFrom};

use bytes::{Bytes, BytesMut};

use crate::error::IoError;

use super::source::ByteSource;

/// Bounded reader over a [`ByteSource`].
///
/// Tracks the current position and the total size so that every read can be
/// checked against the end of the source before it is issued. All parsers go
/// through this type; none of them touch the underlying source directly.
pub struct SourceReader<'a> {
    inner: &'a mut dyn ByteSource,
    size: u64,
    position: u64,
}

impl<'a> SourceReader<'a> {
    /// Wrap a source, rewinding it to offset 0.
    pub fn new(inner: &'a mut dyn ByteSource) -> Result<Self, IoError> {
        let size = inner.size()?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self {
            inner,
            size,
            position: 0,
        })
    }

    /// Total size of the source in bytes.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Current absolute offset.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Bytes left between the current offset and the end of the source.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.size.saturating_sub(self.position)
    }

    /// Seek to an absolute offset.
    ///
    /// Seeking past the end is allowed; the next read will fail.
    pub fn seek_to(&mut self, offset: u64) -> Result<(), IoError> {
        self.inner.seek(SeekFrom::Start(offset))?;
        self.position = offset;
        Ok(())
    }

    /// Seek relative to the current offset.
    pub fn skip(&mut self, delta: i64) -> Result<(), IoError> {
        let target = self.position as i128 + delta as i128;
        if target < 0 || target > u64::MAX as i128 {
            return Err(IoError::Seek { offset: target });
        }
        self.seek_to(target as u64)
    }

    /// Read exactly `len` bytes, failing if the source ends first.
    pub fn read_exact(&mut self, len: usize) -> Result<Bytes, IoError> {
        if (len as u64) > self.remaining() {
            return Err(IoError::Truncated {
                offset: self.position,
                requested: len as u64,
                available: self.remaining(),
            });
        }

        let bytes = self.read_up_to(len)?;
        if bytes.len() < len {
            // The source shrank under us; report what was actually there.
            return Err(IoError::Truncated {
                offset: self.position - bytes.len() as u64,
                requested: len as u64,
                available: bytes.len() as u64,
            });
        }
        Ok(bytes)
    }

    /// Read up to `len` bytes, stopping early at the end of the source.
    pub fn read_up_to(&mut self, len: usize) -> Result<Bytes, IoError> {
        let mut buf = BytesMut::zeroed(len);
        let mut filled = 0;

        while filled < len {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        buf.truncate(filled);
        self.position += filled as u64;
        Ok(buf.freeze())
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, IoError> {
        Ok(self.read_exact(1)?[0])
    }

    /// Read a big-endian u16.
    pub fn read_u16_be(&mut self) -> Result<u16, IoError> {
        Ok(read_u16_be(&self.read_exact(2)?))
    }

    /// Read a little-endian u16.
    pub fn read_u16_le(&mut self) -> Result<u16, IoError> {
        Ok(read_u16_le(&self.read_exact(2)?))
    }

    /// Read a big-endian u32.
    pub fn read_u32_be(&mut self) -> Result<u32, IoError> {
        Ok(read_u32_be(&self.read_exact(4)?))
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32, IoError> {
        Ok(read_u32_le(&self.read_exact(4)?))
    }

    /// Read a NUL-terminated string of at most `max_len` bytes (terminator excluded).
    ///
    /// Returns `None` if no terminator was found within `max_len + 1` bytes.
    pub fn read_cstring(&mut self, max_len: usize) -> Result<Option<Vec<u8>>, IoError> {
        let mut out = Vec::new();
        loop {
            let byte = self.read_u8()?;
            if byte == 0 {
                return Ok(Some(out));
            }
            if out.len() == max_len {
                return Ok(None);
            }
            out.push(byte);
        }
    }
}

// =============================================================================
// Endian Helper Functions
// =============================================================================

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a little-endian u64 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 8 bytes.
#[inline]
pub fn read_u64_le(bytes: &[u8]) -> u64 {
    u64::from_le_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

/// Read a big-endian u64 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 8 bytes.
#[inline]
pub fn read_u64_be(bytes: &[u8]) -> u64 {
    u64::from_be_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

/// Read a little-endian i32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_i32_le(bytes: &[u8]) -> i32 {
    i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a little-endian 24-bit unsigned integer from a byte slice.
#[inline]
pub fn read_u24_le(bytes: &[u8]) -> u32 {
    bytes[0] as u32 | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16
}
