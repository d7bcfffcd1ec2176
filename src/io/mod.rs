//! I/O layer: seekable byte sources and the bounded reader parsers use.

mod reader;
mod source;

pub use reader::{
    read_i32_le, read_u16_be, read_u16_le, read_u24_le, read_u32_be, read_u32_le,
    read_u64_be, read_u64_le, SourceReader,
};
pub use source::ByteSource;
