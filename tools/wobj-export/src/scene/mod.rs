//! Scene import (glTF/GLB/OBJ -> owned scene graph)
//!
//! Loaders produce a [`Scene`]: an owned node tree whose nodes reference
//! entries in a flat mesh table. Post-processing then brings every mesh to the
//! state the accumulator expects (triangles, top-left UVs, normals and a
//! tangent frame).

mod gltf;
mod obj;
mod process;

use serde::Deserialize;
use std::path::Path;

use crate::error::{ExportError, Result};

pub use process::{
    CalcTangentSpace, FlipUvs, GenSmoothNormals, JoinIdenticalVertices, PostProcess, Triangulate,
    post_process,
};

/// Vertical origin of a mesh's UV coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UvOrigin {
    /// v = 0 at the top edge of the texture (glTF, Direct3D)
    #[default]
    TopLeft,
    /// v = 0 at the bottom edge (OBJ, OpenGL)
    BottomLeft,
}

/// Mesh as delivered by a loader. Channels a source did not provide are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub uvs: Option<Vec<[f32; 2]>>,
    pub tangents: Option<Vec<[f32; 3]>>,
    pub bitangents: Option<Vec<[f32; 3]>>,
    /// Faces as lists of vertex indices (triangles after triangulation)
    pub faces: Vec<Vec<u32>>,
    pub uv_origin: UvOrigin,
}

impl SourceMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.faces.iter().map(Vec::len).sum()
    }

    /// Check that channel lengths match and faces stay inside the vertex array.
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        let n = self.positions.len();
        let channels = [
            ("normal", self.normals.as_ref().map(Vec::len)),
            ("uv", self.uvs.as_ref().map(Vec::len)),
            ("tangent", self.tangents.as_ref().map(Vec::len)),
            ("bitangent", self.bitangents.as_ref().map(Vec::len)),
        ];
        for (channel, len) in channels {
            if let Some(len) = len.filter(|&len| len != n) {
                return Err(format!(
                    "mesh '{}' has {} {} values for {} vertices",
                    self.name, len, channel, n
                ));
            }
        }
        if let Some(&index) = self.faces.iter().flatten().find(|&&i| i as usize >= n) {
            return Err(format!(
                "mesh '{}' references vertex {} but has only {}",
                self.name, index, n
            ));
        }
        Ok(())
    }
}

/// Scene graph node. Children are owned, so traversal never needs pointers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub name: String,
    /// Indices into [`Scene::meshes`]
    pub meshes: Vec<usize>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub root: Node,
    pub meshes: Vec<SourceMesh>,
}

/// Post-processing steps applied after loading. All enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportFlags {
    pub triangulate: bool,
    pub flip_uvs: bool,
    pub join_identical_vertices: bool,
    pub gen_smooth_normals: bool,
    pub calc_tangent_space: bool,
}

impl Default for ImportFlags {
    fn default() -> Self {
        Self {
            triangulate: true,
            flip_uvs: true,
            join_identical_vertices: true,
            gen_smooth_normals: true,
            calc_tangent_space: true,
        }
    }
}

pub(crate) fn import_failure(path: &Path, reason: impl ToString) -> ExportError {
    ExportError::ImportFailure {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Name used for synthetic root nodes and unnamed OBJ meshes
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scene".to_string())
}

/// Load a scene file and post-process every mesh.
///
/// The loader is chosen by extension: `.gltf`/`.glb` or `.obj`.
pub fn import(path: &Path, flags: &ImportFlags) -> Result<Scene> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    let mut scene = match ext.as_str() {
        "gltf" | "glb" => gltf::load(path)?,
        "obj" => obj::load(path)?,
        _ => {
            return Err(import_failure(
                path,
                "unsupported scene format (use .gltf, .glb or .obj)",
            ));
        }
    };

    for mesh in &mut scene.meshes {
        mesh.validate().map_err(|reason| import_failure(path, reason))?;
        post_process(mesh, flags);
    }

    tracing::debug!(
        "Imported {:?}: {} meshes, {} vertices",
        path,
        scene.meshes.len(),
        scene.meshes.iter().map(SourceMesh::vertex_count).sum::<usize>()
    );

    Ok(scene)
}
