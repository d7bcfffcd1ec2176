use std::fs::File;
use std::io::{Cursor, Read, Seek};

/// A seekable, readable byte source with a known total length.
///
/// This abstraction lets the detector work with files and in-memory buffers
/// alike. A source is owned by a single detection call for its duration.
pub trait ByteSource: Read + Seek {
    /// Get the total size of the source in bytes.
    fn size(&mut self) -> std::io::Result<u64>;
}

impl ByteSource for File {
    fn size(&mut self) -> std::io::Result<u64> {
        Ok(self.metadata()?.len())
    }
}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn size(&mut self) -> std::io::Result<u64> {
        Ok(self.get_ref().as_ref().len() as u64)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn size(&mut self) -> std::io::Result<u64> {
        (**self).size()
    }
}
