//! Container reader
//!
//! Parses a complete `.wobj` buffer and checks it against the layout the
//! header describes.

use super::serialization::deserialize_all;
use super::{INDEX_SIZE, WobjFormatError, WobjHeader, WobjVertex};

/// A fully decoded container.
#[derive(Debug, Clone, PartialEq)]
pub struct WobjFile {
    pub header: WobjHeader,
    pub indices: Vec<u32>,
    pub vertices: Vec<WobjVertex>,
}

impl WobjFile {
    /// Parse and validate a container. Trailing bytes after the vertex
    /// section are ignored.
    pub fn parse(bytes: &[u8]) -> Result<Self, WobjFormatError> {
        let header = WobjHeader::from_bytes(bytes).ok_or(WobjFormatError::Truncated {
            expected: WobjHeader::SIZE,
            actual: bytes.len(),
        })?;
        header.validate()?;

        let expected = header.file_size();
        if bytes.len() < expected {
            return Err(WobjFormatError::Truncated {
                expected,
                actual: bytes.len(),
            });
        }

        let index_start = header.index_offset as usize;
        let vertex_start = header.vertex_offset as usize;

        let indices = bytes[index_start..vertex_start]
            .chunks_exact(INDEX_SIZE)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        let vertices = deserialize_all(&bytes[vertex_start..], header.vertex_count as usize)
            .ok_or(WobjFormatError::Truncated {
                expected,
                actual: bytes.len(),
            })?;

        Ok(Self {
            header,
            indices,
            vertices,
        })
    }
}
