//! Texture slots carried in the container header.

use std::fmt;

use super::TexturePath;

/// One of the five PBR texture slots, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialSlot {
    Albedo,
    Normal,
    Metallic,
    Roughness,
    AmbientOcclusion,
}

impl MaterialSlot {
    /// All slots in the order they appear in the header
    pub const ALL: [MaterialSlot; 5] = [
        MaterialSlot::Albedo,
        MaterialSlot::Normal,
        MaterialSlot::Metallic,
        MaterialSlot::Roughness,
        MaterialSlot::AmbientOcclusion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MaterialSlot::Albedo => "albedo",
            MaterialSlot::Normal => "normal",
            MaterialSlot::Metallic => "metallic",
            MaterialSlot::Roughness => "roughness",
            MaterialSlot::AmbientOcclusion => "ambient occlusion",
        }
    }
}

impl fmt::Display for MaterialSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Texture paths for a single material. Every slot starts unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterialSet {
    pub albedo: TexturePath,
    pub normal: TexturePath,
    pub metallic: TexturePath,
    pub roughness: TexturePath,
    pub ambient_occlusion: TexturePath,
}

impl MaterialSet {
    pub fn get(&self, slot: MaterialSlot) -> &TexturePath {
        match slot {
            MaterialSlot::Albedo => &self.albedo,
            MaterialSlot::Normal => &self.normal,
            MaterialSlot::Metallic => &self.metallic,
            MaterialSlot::Roughness => &self.roughness,
            MaterialSlot::AmbientOcclusion => &self.ambient_occlusion,
        }
    }

    pub fn set(&mut self, slot: MaterialSlot, path: TexturePath) {
        match slot {
            MaterialSlot::Albedo => self.albedo = path,
            MaterialSlot::Normal => self.normal = path,
            MaterialSlot::Metallic => self.metallic = path,
            MaterialSlot::Roughness => self.roughness = path,
            MaterialSlot::AmbientOcclusion => self.ambient_occlusion = path,
        }
    }

    /// Slots paired with their values, in header order
    pub fn iter(&self) -> impl Iterator<Item = (MaterialSlot, &TexturePath)> {
        MaterialSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}
