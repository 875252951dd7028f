//! Export pipeline: import, accumulate, resolve materials, write.

use std::path::{Path, PathBuf};

use wobj_shared::MaterialSet;

use crate::accumulate::accumulate;
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::formats::{WriteReport, write_wobj_file};
use crate::material;
use crate::scene;

/// One export invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub scene: PathBuf,
    /// Material file; defaults to the scene path with the material extension
    pub material: Option<PathBuf>,
    /// Output container; defaults to the scene path with the container extension
    pub output: Option<PathBuf>,
}

impl ExportJob {
    pub fn new(scene: impl Into<PathBuf>) -> Self {
        Self {
            scene: scene.into(),
            material: None,
            output: None,
        }
    }

    pub fn material_path(&self, config: &ExportConfig) -> PathBuf {
        self.material
            .clone()
            .unwrap_or_else(|| self.scene.with_extension(&config.export.material_ext))
    }

    pub fn output_path(&self, config: &ExportConfig) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.scene.with_extension(&config.export.container_ext))
    }
}

/// Run a full export.
pub fn export(job: &ExportJob, config: &ExportConfig) -> Result<WriteReport> {
    let output = job.output_path(config);
    tracing::info!("Exporting {:?} -> {:?}", job.scene, output);

    let scene = scene::import(&job.scene, &config.import)?;
    let mesh = accumulate(&scene, config.export.index_base)?;
    drop(scene);

    let materials = resolve_materials(&job.material_path(config), config)?;

    write_wobj_file(&output, &mesh, &materials)
}

/// Resolve the material file, falling back to unset slots when it is
/// missing and not required.
fn resolve_materials(path: &Path, config: &ExportConfig) -> Result<MaterialSet> {
    match material::resolve(path, config.materials.path_overflow) {
        Err(ExportError::MaterialFileOpen { path, cause }) if !config.materials.required => {
            tracing::warn!(
                "No material file at {:?} ({}), exporting without textures",
                path,
                cause
            );
            Ok(MaterialSet::default())
        }
        other => other,
    }
}
