//! WOBJ binary container format
//!
//! POD format, little-endian, no magic bytes. A file is a fixed-size header
//! followed by the index section and the vertex section:
//!
//! ```text
//! 0x000: WobjHeader (1296 bytes)
//! 0x510: indices (index_count * 4 bytes, u32)
//! var:   vertices (vertex_count * 56 bytes)
//! ```
//!
//! All headers implement [`BinarySerializable`].

mod container;
mod error;
mod header;
mod material;
mod serialization;
mod texture_path;
mod vertex;

pub use container::WobjFile;
pub use error::WobjFormatError;
pub use header::{WobjHeader, section_offsets};
pub use material::{MaterialSet, MaterialSlot};
pub use serialization::BinarySerializable;
pub use texture_path::{SENTINEL, TEXTURE_PATH_LEN, TEXTURE_PATH_MAX, TexturePath};
pub use vertex::WobjVertex;

/// Size of one index in the index section
pub const INDEX_SIZE: usize = 4;
