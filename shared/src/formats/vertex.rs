//! WOBJ vertex layout
//!
//! # Layout (56 bytes, little-endian f32)
//! ```text
//! 0x00: position  f32 x 3
//! 0x0C: tangent   f32 x 3
//! 0x18: bitangent f32 x 3
//! 0x24: normal    f32 x 3
//! 0x30: uv        f32 x 2
//! ```

use bytemuck::{Pod, Zeroable};

use crate::math::{Vec2, Vec3};

/// Full PBR vertex: position, tangent frame and one UV channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct WobjVertex {
    pub position: Vec3,
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

const _: () = assert!(std::mem::size_of::<WobjVertex>() == WobjVertex::SIZE);

impl WobjVertex {
    pub const SIZE: usize = 56;

    /// Field values in wire order
    fn floats(&self) -> [f32; 14] {
        let p = self.position;
        let t = self.tangent;
        let b = self.bitangent;
        let n = self.normal;
        [
            p.x, p.y, p.z, t.x, t.y, t.z, b.x, b.y, b.z, n.x, n.y, n.z, self.uv.x, self.uv.y,
        ]
    }

    /// Write vertex to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        for (chunk, value) in bytes.chunks_exact_mut(4).zip(self.floats()) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    /// Read vertex from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes = bytes.get(..Self::SIZE)?;
        let mut f = [0f32; 14];
        for (value, chunk) in f.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Some(Self {
            position: Vec3::new(f[0], f[1], f[2]),
            tangent: Vec3::new(f[3], f[4], f[5]),
            bitangent: Vec3::new(f[6], f[7], f[8]),
            normal: Vec3::new(f[9], f[10], f[11]),
            uv: Vec2::new(f[12], f[13]),
        })
    }
}
