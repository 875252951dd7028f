//! WOBJ format constants.
//!
//! Single source of truth for file extensions and the version tag reported
//! after an export.
//!
//! # Example
//!
//! ```
//! use wobj_shared::WOBJ_FORMAT;
//!
//! assert_eq!(WOBJ_FORMAT.container_ext, "wobj");
//! assert_eq!(WOBJ_FORMAT.material_ext, "wmf");
//! assert_eq!(WOBJ_FORMAT.version_tag(), "WOBJ 2.0");
//! ```

/// Format specification for the WOBJ container and its material sidecar.
#[derive(Debug, Clone, Copy)]
pub struct WobjFormat {
    /// Container file extension without dot
    pub container_ext: &'static str,

    /// Material text file extension without dot
    pub material_ext: &'static str,

    /// Major format version
    pub version_major: u16,

    /// Minor format version (2.0 is the PBR revision with five texture slots)
    pub version_minor: u16,
}

impl WobjFormat {
    pub const fn new(
        container_ext: &'static str,
        material_ext: &'static str,
        version_major: u16,
        version_minor: u16,
    ) -> Self {
        Self {
            container_ext,
            material_ext,
            version_major,
            version_minor,
        }
    }

    /// Human-readable version tag, e.g. `WOBJ 2.0`.
    ///
    /// The container itself carries no version field; this is informational.
    pub fn version_tag(&self) -> String {
        format!("WOBJ {}.{}", self.version_major, self.version_minor)
    }
}

/// The WOBJ 2.0 (PBR) format.
pub const WOBJ_FORMAT: WobjFormat = WobjFormat::new("wobj", "wmf", 2, 0);
