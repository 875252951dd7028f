//! Mesh accumulator
//!
//! Walks the scene graph depth-first (parent before children, children in
//! order) and concatenates every referenced mesh into one [`Mesh`].

use wobj_shared::{Vec2, Vec3, WobjVertex};

use crate::config::IndexBase;
use crate::error::{ExportError, Result};
use crate::mesh::Mesh;
use crate::scene::{Node, Scene, SourceMesh};

/// Merge all meshes of `scene` into a single validated [`Mesh`].
///
/// With [`IndexBase::Global`] each mesh's indices are shifted by the number of
/// vertices appended before it. [`IndexBase::Local`] keeps the raw per-mesh
/// indices, which only addresses the right vertices for single-mesh scenes.
pub fn accumulate(scene: &Scene, index_base: IndexBase) -> Result<Mesh> {
    let mut mesh = Mesh::default();
    let mut appended = 0usize;

    let mut stack: Vec<&Node> = vec![&scene.root];
    while let Some(node) = stack.pop() {
        for &mesh_index in &node.meshes {
            let source = scene
                .meshes
                .get(mesh_index)
                .ok_or_else(|| ExportError::DanglingMesh {
                    node: node.name.clone(),
                    index: mesh_index,
                })?;
            append(&mut mesh, source, index_base)?;
            appended += 1;
        }
        // Reversed so the first child is visited next
        stack.extend(node.children.iter().rev());
    }

    if index_base == IndexBase::Local && appended > 1 {
        tracing::warn!(
            "{} meshes merged with mesh-local indices; only the first mesh will index correctly",
            appended
        );
    }

    mesh.validate()?;
    Ok(mesh)
}

fn require<'a, T>(
    mesh: &SourceMesh,
    channel: &'static str,
    values: &'a Option<Vec<T>>,
) -> Result<&'a [T]> {
    values.as_deref().ok_or_else(|| ExportError::MissingChannel {
        mesh: mesh.name.clone(),
        channel,
    })
}

fn append(out: &mut Mesh, source: &SourceMesh, index_base: IndexBase) -> Result<()> {
    source
        .validate()
        .map_err(|reason| ExportError::MalformedMesh { reason })?;
    let normals = require(source, "normal", &source.normals)?;
    let uvs = require(source, "uv", &source.uvs)?;
    let tangents = require(source, "tangent", &source.tangents)?;
    let bitangents = require(source, "bitangent", &source.bitangents)?;

    let base = match index_base {
        IndexBase::Global => u32::try_from(out.vertices.len()).map_err(|_| {
            ExportError::CountOverflow {
                what: "vertex count",
                count: out.vertices.len(),
            }
        })?,
        IndexBase::Local => 0,
    };

    out.vertices.reserve(source.positions.len());
    for i in 0..source.positions.len() {
        out.vertices.push(WobjVertex {
            position: Vec3::from(source.positions[i]),
            tangent: Vec3::from(tangents[i]),
            bitangent: Vec3::from(bitangents[i]),
            normal: Vec3::from(normals[i]),
            uv: Vec2::from(uvs[i]),
        });
    }

    out.indices.reserve(source.index_count());
    for &index in source.faces.iter().flatten() {
        let index = index
            .checked_add(base)
            .ok_or(ExportError::CountOverflow {
                what: "index",
                count: index as usize + base as usize,
            })?;
        out.indices.push(index);
    }

    tracing::debug!(
        "Appended '{}': {} vertices, {} indices (base {})",
        source.name,
        source.positions.len(),
        source.index_count(),
        base
    );

    Ok(())
}
