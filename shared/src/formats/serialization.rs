//! Binary serialization trait for fixed-size WOBJ records.
//!
//! Both the header and the vertex implement `BinarySerializable` so generic
//! code (section sizing, readers) can treat them uniformly. Each type keeps
//! its own `to_bytes()` returning a fixed-size array for the hot path.

/// Trait for fixed-size binary records.
///
/// Returns `Vec<u8>` because associated consts cannot yet size a return array
/// (`[u8; Self::SIZE]`) in a trait.
///
/// # Example
///
/// ```
/// use wobj_shared::formats::{BinarySerializable, MaterialSet, WobjHeader};
///
/// let header = WobjHeader::for_mesh(3, 3, MaterialSet::default()).unwrap();
/// let bytes = header.serialize();
/// let parsed = WobjHeader::deserialize(&bytes).unwrap();
/// assert_eq!(parsed.vertex_offset, 1308);
/// ```
pub trait BinarySerializable: Sized {
    /// Size of the serialized record in bytes.
    const SIZE: usize;

    /// Serialize to bytes.
    fn serialize(&self) -> Vec<u8>;

    /// Deserialize from bytes. Returns `None` if the slice is too short.
    fn deserialize(bytes: &[u8]) -> Option<Self>;
}

impl BinarySerializable for super::WobjHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}

impl BinarySerializable for super::WobjVertex {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}

/// Decode `count` consecutive records starting at `bytes[0]`.
pub(crate) fn deserialize_all<T: BinarySerializable>(bytes: &[u8], count: usize) -> Option<Vec<T>> {
    bytes
        .get(..count.checked_mul(T::SIZE)?)?
        .chunks_exact(T::SIZE)
        .map(T::deserialize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{MaterialSet, WobjHeader, WobjVertex};

    #[test]
    fn test_header_trait() {
        let header = WobjHeader::for_mesh(12, 8, MaterialSet::default()).unwrap();
        let bytes = header.serialize();
        assert_eq!(bytes.len(), WobjHeader::SIZE);
        assert_eq!(<WobjHeader as BinarySerializable>::SIZE, 1296);

        let parsed = WobjHeader::deserialize(&bytes).unwrap();
        assert_eq!(parsed.index_count, 12);
        assert_eq!(parsed.vertex_count, 8);
    }

    #[test]
    fn test_vertex_trait() {
        assert_eq!(<WobjVertex as BinarySerializable>::SIZE, 56);
        assert_eq!(WobjVertex::default().serialize().len(), 56);
    }

    #[test]
    fn test_deserialize_insufficient_bytes() {
        assert!(WobjHeader::deserialize(&[0; 1295]).is_none());
        assert!(WobjVertex::deserialize(&[0; 55]).is_none());
    }

    #[test]
    fn test_deserialize_all() {
        let bytes = [WobjVertex::default().serialize(), WobjVertex::default().serialize()].concat();
        let vertices: Vec<WobjVertex> = deserialize_all(&bytes, 2).unwrap();
        assert_eq!(vertices.len(), 2);
        assert!(deserialize_all::<WobjVertex>(&bytes, 3).is_none());
    }
}
