//! Exporter configuration (optional `wobj.toml`)
//!
//! Every field has a default, so an empty file (or no file) gives the
//! standard export behavior. Command-line flags override file values.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ExportError, Result};
use crate::scene::ImportFlags;
use wobj_shared::WOBJ_FORMAT;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub export: ExportSection,
    #[serde(default)]
    pub import: ImportFlags,
    #[serde(default)]
    pub materials: MaterialSection,
}

/// How face indices of later meshes relate to the merged vertex array
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IndexBase {
    /// Offset each mesh's indices by the vertices appended before it
    #[default]
    Global,
    /// Keep mesh-local indices as the source wrote them
    Local,
}

/// What to do with a material path longer than the header field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathOverflow {
    /// Fail the export with `PathTooLong`
    #[default]
    Reject,
    /// Keep the first 255 bytes (on a character boundary)
    Truncate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportSection {
    #[serde(default)]
    pub index_base: IndexBase,
    /// Output extension used when no output path is given
    #[serde(default = "default_container_ext")]
    pub container_ext: String,
    /// Material extension used when no material path is given
    #[serde(default = "default_material_ext")]
    pub material_ext: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialSection {
    /// Fail instead of exporting sentinel paths when the material file is missing
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub path_overflow: PathOverflow,
}

fn default_container_ext() -> String {
    WOBJ_FORMAT.container_ext.to_string()
}

fn default_material_ext() -> String {
    WOBJ_FORMAT.material_ext.to_string()
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            index_base: IndexBase::default(),
            container_ext: default_container_ext(),
            material_ext: default_material_ext(),
        }
    }
}

impl ExportConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&content).map_err(|reason| ExportError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse configuration from a string
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}
