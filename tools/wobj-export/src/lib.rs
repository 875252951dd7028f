//! wobj-export library
//!
//! Converts glTF/GLB/OBJ scenes plus a `.wmf` material file into a single
//! `.wobj` container.

pub mod accumulate;
pub mod config;
pub mod error;
pub mod formats;
pub mod material;
pub mod mesh;
pub mod pipeline;
pub mod scene;

pub use config::{ExportConfig, IndexBase, PathOverflow};
pub use error::{ExportError, Result};
pub use formats::{WriteReport, read_wobj_file, write_wobj, write_wobj_file};
pub use mesh::Mesh;
pub use pipeline::{ExportJob, export};

// Re-export the container format from shared
pub use wobj_shared::{WOBJ_FORMAT, WobjFormat};
