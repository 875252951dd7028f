//! WOBJ container header
//!
//! # Layout (1296 bytes)
//! ```text
//! 0x000: index_count   i32
//! 0x004: vertex_count  i32
//! 0x008: index_offset  i32  (always 1296)
//! 0x00C: vertex_offset i32  (1296 + 4 * index_count)
//! 0x010: albedo path     [u8; 256]
//! 0x110: normal path     [u8; 256]
//! 0x210: metallic path   [u8; 256]
//! 0x310: roughness path  [u8; 256]
//! 0x410: ao path         [u8; 256]
//! ```

use super::{
    INDEX_SIZE, MaterialSet, MaterialSlot, TEXTURE_PATH_LEN, TexturePath, WobjFormatError,
    WobjVertex,
};

const COUNTS_SIZE: usize = 16;

/// WOBJ header. Offsets are derived from the counts, never set by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WobjHeader {
    pub index_count: i32,
    pub vertex_count: i32,
    pub index_offset: i32,
    pub vertex_offset: i32,
    pub materials: MaterialSet,
}

/// Compute `(index_offset, vertex_offset)` for a container with
/// `index_count` indices.
pub fn section_offsets(index_count: usize) -> Result<(i32, i32), WobjFormatError> {
    let index_offset = WobjHeader::SIZE as i32;
    let vertex_offset = index_count
        .checked_mul(INDEX_SIZE)
        .and_then(|bytes| bytes.checked_add(WobjHeader::SIZE))
        .and_then(|end| i32::try_from(end).ok())
        .ok_or(WobjFormatError::CountOverflow {
            what: "vertex section offset",
            count: index_count,
        })?;
    Ok((index_offset, vertex_offset))
}

fn count_field(what: &'static str, count: usize) -> Result<i32, WobjFormatError> {
    i32::try_from(count).map_err(|_| WobjFormatError::CountOverflow { what, count })
}

impl WobjHeader {
    pub const SIZE: usize = COUNTS_SIZE + 5 * TEXTURE_PATH_LEN;

    /// Build the header for a mesh with the given element counts.
    pub fn for_mesh(
        index_count: usize,
        vertex_count: usize,
        materials: MaterialSet,
    ) -> Result<Self, WobjFormatError> {
        let (index_offset, vertex_offset) = section_offsets(index_count)?;
        Ok(Self {
            index_count: count_field("index count", index_count)?,
            vertex_count: count_field("vertex count", vertex_count)?,
            index_offset,
            vertex_offset,
            materials,
        })
    }

    /// Total container size described by this header
    pub fn file_size(&self) -> usize {
        self.vertex_offset.max(0) as usize + self.vertex_count.max(0) as usize * WobjVertex::SIZE
    }

    /// Check counts and offsets against the computed layout.
    pub fn validate(&self) -> Result<(), WobjFormatError> {
        for (what, value) in [
            ("index count", self.index_count),
            ("vertex count", self.vertex_count),
        ] {
            if value < 0 {
                return Err(WobjFormatError::NegativeCount { what, value });
            }
        }
        let (index_offset, vertex_offset) = section_offsets(self.index_count as usize)?;
        if self.index_offset != index_offset {
            return Err(WobjFormatError::OffsetMismatch {
                what: "index section offset",
                expected: index_offset,
                actual: self.index_offset,
            });
        }
        if self.vertex_offset != vertex_offset {
            return Err(WobjFormatError::OffsetMismatch {
                what: "vertex section offset",
                expected: vertex_offset,
                actual: self.vertex_offset,
            });
        }
        Ok(())
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.index_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.vertex_count.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.index_offset.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.vertex_offset.to_le_bytes());
        for (field, (_, path)) in bytes[COUNTS_SIZE..]
            .chunks_exact_mut(TEXTURE_PATH_LEN)
            .zip(self.materials.iter())
        {
            field.copy_from_slice(path.as_bytes());
        }
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let read_i32 =
            |at: usize| i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);

        let mut materials = MaterialSet::default();
        for (slot, field) in MaterialSlot::ALL
            .into_iter()
            .zip(bytes[COUNTS_SIZE..Self::SIZE].chunks_exact(TEXTURE_PATH_LEN))
        {
            materials.set(slot, TexturePath::from_bytes(field)?);
        }

        Some(Self {
            index_count: read_i32(0),
            vertex_count: read_i32(4),
            index_offset: read_i32(8),
            vertex_offset: read_i32(12),
            materials,
        })
    }
}
