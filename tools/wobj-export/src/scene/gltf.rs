//! glTF/GLB scene loading

use ::gltf::mesh::Mode;
use glam::Vec3;
use std::path::Path;

use super::{Node, Scene, SourceMesh, UvOrigin, file_stem, import_failure};
use crate::error::Result;

/// Deepest node nesting accepted before the file is treated as malformed
const MAX_NODE_DEPTH: usize = 256;

/// Load the default scene (or the first one) of a glTF/GLB file.
///
/// Every primitive becomes one [`SourceMesh`]. The scene's root nodes are
/// attached to a synthetic root named after the file.
pub(super) fn load(path: &Path) -> Result<Scene> {
    let ::gltf::Gltf { document, blob } =
        ::gltf::Gltf::open(path).map_err(|e| import_failure(path, e))?;
    let buffers = ::gltf::import_buffers(&document, path.parent(), blob)
        .map_err(|e| import_failure(path, e))?;

    // glTF mesh index -> indices of the primitives kept in the mesh table
    let mut meshes = Vec::new();
    let mut primitive_table: Vec<Vec<usize>> = Vec::new();

    for mesh in document.meshes() {
        let mesh_name = mesh
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("mesh{}", mesh.index()));
        let mut kept = Vec::new();

        for primitive in mesh.primitives() {
            let name = format!("{}#{}", mesh_name, primitive.index());
            let faces_of = match primitive.mode() {
                Mode::Triangles => triangle_list,
                Mode::TriangleStrip => triangle_strip,
                Mode::TriangleFan => triangle_fan,
                mode => {
                    tracing::warn!("Skipping primitive '{}': {:?} mode has no faces", name, mode);
                    continue;
                }
            };

            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or_else(|| import_failure(path, format!("primitive '{name}' has no positions")))?
                .collect();

            let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|iter| iter.collect());
            let uvs: Option<Vec<[f32; 2]>> = reader
                .read_tex_coords(0)
                .map(|iter| iter.into_f32().collect());

            // Tangents are vec4: xyz direction, w handedness. The bitangent
            // follows from the normal; without normals the tangents are dropped.
            let tangent_frame = match (&normals, reader.read_tangents()) {
                (Some(normals), Some(iter)) => {
                    let tangents: Vec<[f32; 4]> = iter.collect();
                    if tangents.len() == normals.len() {
                        let bitangents: Vec<[f32; 3]> = normals
                            .iter()
                            .zip(&tangents)
                            .map(|(n, t)| {
                                (Vec3::from(*n).cross(Vec3::new(t[0], t[1], t[2])) * t[3])
                                    .to_array()
                            })
                            .collect();
                        let tangents: Vec<[f32; 3]> =
                            tangents.iter().map(|t| [t[0], t[1], t[2]]).collect();
                        Some((tangents, bitangents))
                    } else {
                        None
                    }
                }
                _ => None,
            };
            let (tangents, bitangents) = tangent_frame.unzip();

            let indices: Vec<u32> = reader
                .read_indices()
                .map(|iter| iter.into_u32().collect())
                .unwrap_or_else(|| (0..positions.len() as u32).collect());

            kept.push(meshes.len());
            meshes.push(SourceMesh {
                name,
                positions,
                normals,
                uvs,
                tangents,
                bitangents,
                faces: faces_of(&indices),
                uv_origin: UvOrigin::TopLeft,
            });
        }

        primitive_table.push(kept);
    }

    let mut root = Node::new(file_stem(path));
    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                root.children
                    .push(convert_node(path, &node, &primitive_table, 0)?);
            }
        }
        None => tracing::warn!("{:?} defines no scene; nothing will be exported", path),
    }

    Ok(Scene { root, meshes })
}

fn convert_node(
    path: &Path,
    node: &::gltf::Node,
    primitive_table: &[Vec<usize>],
    depth: usize,
) -> Result<Node> {
    if depth > MAX_NODE_DEPTH {
        return Err(import_failure(
            path,
            format!("node hierarchy deeper than {MAX_NODE_DEPTH} levels"),
        ));
    }

    let mut out = Node::new(
        node.name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("node{}", node.index())),
    );
    if let Some(mesh) = node.mesh() {
        out.meshes.extend_from_slice(&primitive_table[mesh.index()]);
    }
    for child in node.children() {
        out.children
            .push(convert_node(path, &child, primitive_table, depth + 1)?);
    }
    Ok(out)
}

fn triangle_list(indices: &[u32]) -> Vec<Vec<u32>> {
    indices.chunks_exact(3).map(<[u32]>::to_vec).collect()
}

/// Strip triangles alternate winding so every face keeps the same orientation.
fn triangle_strip(indices: &[u32]) -> Vec<Vec<u32>> {
    indices
        .windows(3)
        .enumerate()
        .map(|(i, w)| {
            if i % 2 == 0 {
                vec![w[0], w[1], w[2]]
            } else {
                vec![w[1], w[0], w[2]]
            }
        })
        .collect()
}

fn triangle_fan(indices: &[u32]) -> Vec<Vec<u32>> {
    match indices.split_first() {
        Some((&center, rest)) => rest
            .windows(2)
            .map(|w| vec![center, w[0], w[1]])
            .collect(),
        None => Vec::new(),
    }
}
