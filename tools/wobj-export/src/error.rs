//! Export error taxonomy
//!
//! Every variant names the pipeline stage that raised it, so the one-line
//! diagnostic printed by the binary says where the export stopped.

use std::io;
use std::path::PathBuf;

use wobj_shared::{MaterialSlot, WobjFormatError};

pub type Result<T, E = ExportError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Scene file unreadable, unparseable or of an unsupported type
    #[error("import failed for {}: {reason}", path.display())]
    ImportFailure { path: PathBuf, reason: String },

    /// A mesh reached the accumulator without a required vertex channel
    #[error("accumulate failed: mesh '{mesh}' has no {channel} channel")]
    MissingChannel { mesh: String, channel: &'static str },

    /// A node references a mesh the scene does not contain
    #[error("accumulate failed: node '{node}' references missing mesh {index}")]
    DanglingMesh { node: String, index: usize },

    /// Mesh channels disagree in length or a face leaves the mesh
    #[error("accumulate failed: {reason}")]
    MalformedMesh { reason: String },

    /// An accumulated index points past the vertex array
    #[error("accumulate failed: index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// Material file could not be opened
    #[error("materials failed: cannot open {}: {cause}", path.display())]
    MaterialFileOpen { path: PathBuf, cause: io::Error },

    /// Material file opened but could not be read to the end
    #[error("materials failed: cannot read {}: {cause}", path.display())]
    MaterialRead { path: PathBuf, cause: io::Error },

    /// Material value exceeds the 255-byte header field
    #[error("materials failed: {slot} path is {len} bytes, maximum is {max}")]
    PathTooLong {
        slot: MaterialSlot,
        len: usize,
        max: usize,
    },

    /// Material value contains a NUL byte
    #[error("materials failed: {slot} path contains a NUL byte")]
    InvalidPath { slot: MaterialSlot },

    /// Element counts do not fit the header's 32-bit fields
    #[error("write failed: {what} of {count} does not fit in a 32-bit header field")]
    CountOverflow { what: &'static str, count: usize },

    /// Header could not be built from the mesh
    #[error("write failed: {0}")]
    Layout(WobjFormatError),

    /// Output could not be created, written, flushed or moved into place
    #[error("write failed for {}: {cause}", path.display())]
    WriteFailure { path: PathBuf, cause: io::Error },

    /// Configuration file unreadable or invalid
    #[error("config failed for {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl ExportError {
    /// Attach a material slot to a texture path error.
    pub(crate) fn from_path_error(slot: MaterialSlot, err: WobjFormatError) -> Self {
        match err {
            WobjFormatError::PathTooLong { len, max } => ExportError::PathTooLong { slot, len, max },
            _ => ExportError::InvalidPath { slot },
        }
    }

    /// Stage label for logs
    pub fn stage(&self) -> &'static str {
        match self {
            ExportError::ImportFailure { .. } => "import",
            ExportError::MissingChannel { .. }
            | ExportError::DanglingMesh { .. }
            | ExportError::MalformedMesh { .. }
            | ExportError::IndexOutOfRange { .. } => "accumulate",
            ExportError::MaterialFileOpen { .. }
            | ExportError::MaterialRead { .. }
            | ExportError::PathTooLong { .. }
            | ExportError::InvalidPath { .. } => "materials",
            ExportError::CountOverflow { .. }
            | ExportError::Layout(_)
            | ExportError::WriteFailure { .. } => "write",
            ExportError::Config { .. } => "config",
        }
    }
}

impl From<WobjFormatError> for ExportError {
    fn from(err: WobjFormatError) -> Self {
        match err {
            WobjFormatError::CountOverflow { what, count } => {
                ExportError::CountOverflow { what, count }
            }
            other => ExportError::Layout(other),
        }
    }
}
