//! Programmatic scene generation for integration tests.
//!
//! Builds small GLB files (JSON chunk + BIN chunk) and OBJ text so the tests
//! need no checked-in assets.

#![allow(dead_code)]

use serde_json::{Value, json};
use std::path::Path;

/// One triangle primitive
pub struct TriangleMesh {
    pub name: &'static str,
    pub positions: [[f32; 3]; 3],
    pub with_uvs: bool,
}

impl TriangleMesh {
    pub fn at(name: &'static str, x: f32, with_uvs: bool) -> Self {
        Self {
            name,
            positions: [[x, 0.0, 0.0], [x + 1.0, 0.0, 0.0], [x, 1.0, 0.0]],
            with_uvs,
        }
    }
}

const UVS: [[f32; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
const NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Generate a GLB whose first node holds `meshes[0]` and whose later meshes
/// hang off that node as a chain of children.
pub fn generate_chain_glb(meshes: &[TriangleMesh]) -> Vec<u8> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut views = Vec::new();
    let mut accessors = Vec::new();
    let mut gltf_meshes = Vec::new();
    let mut nodes = Vec::new();

    let mut push_view = |buffer: &mut Vec<u8>, bytes: &[u8], target: u32| {
        let offset = buffer.len();
        buffer.extend_from_slice(bytes);
        views.push(json!({
            "buffer": 0,
            "byteOffset": offset,
            "byteLength": bytes.len(),
            "target": target,
        }));
        views.len() - 1
    };

    for (i, mesh) in meshes.iter().enumerate() {
        let mut attributes = serde_json::Map::new();

        let view = push_view(&mut buffer, bytemuck::cast_slice(&mesh.positions), 34962);
        let (min, max) = bounds(&mesh.positions);
        accessors.push(json!({
            "bufferView": view,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": min,
            "max": max,
        }));
        attributes.insert("POSITION".into(), json!(accessors.len() - 1));

        let normals = [NORMAL; 3];
        let view = push_view(&mut buffer, bytemuck::cast_slice(&normals), 34962);
        accessors.push(json!({
            "bufferView": view,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
        }));
        attributes.insert("NORMAL".into(), json!(accessors.len() - 1));

        if mesh.with_uvs {
            let view = push_view(&mut buffer, bytemuck::cast_slice(&UVS), 34962);
            accessors.push(json!({
                "bufferView": view,
                "componentType": 5126,
                "count": 3,
                "type": "VEC2",
            }));
            attributes.insert("TEXCOORD_0".into(), json!(accessors.len() - 1));
        }

        let indices: [u32; 3] = [0, 1, 2];
        let view = push_view(&mut buffer, bytemuck::cast_slice(&indices), 34963);
        accessors.push(json!({
            "bufferView": view,
            "componentType": 5125,
            "count": 3,
            "type": "SCALAR",
        }));
        let indices_accessor = accessors.len() - 1;

        gltf_meshes.push(json!({
            "name": mesh.name,
            "primitives": [{ "attributes": attributes, "indices": indices_accessor }],
        }));

        let mut node = json!({ "name": format!("node_{}", mesh.name), "mesh": i });
        if i + 1 < meshes.len() {
            node["children"] = json!([i + 1]);
        }
        nodes.push(node);
    }

    let scene_nodes: Vec<usize> = if meshes.is_empty() { vec![] } else { vec![0] };
    let root = json!({
        "asset": { "version": "2.0", "generator": "wobj-export tests" },
        "scene": 0,
        "scenes": [{ "nodes": scene_nodes }],
        "nodes": nodes,
        "meshes": gltf_meshes,
        "accessors": accessors,
        "bufferViews": views,
        "buffers": [{ "byteLength": buffer.len() }],
    });

    assemble_glb(&root, &buffer)
}

fn bounds(positions: &[[f32; 3]]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for p in positions {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    (min, max)
}

/// Assemble the final GLB binary
fn assemble_glb(root: &Value, buffer_data: &[u8]) -> Vec<u8> {
    let json_bytes = serde_json::to_vec(root).expect("Failed to serialize JSON");

    let json_padding = (4 - (json_bytes.len() % 4)) % 4;
    let json_chunk_length = json_bytes.len() + json_padding;
    let buffer_padding = (4 - (buffer_data.len() % 4)) % 4;
    let buffer_chunk_length = buffer_data.len() + buffer_padding;
    let total_length = 12 + 8 + json_chunk_length + 8 + buffer_chunk_length;

    let mut glb = Vec::with_capacity(total_length);

    // Header
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total_length as u32).to_le_bytes());

    // JSON chunk
    glb.extend_from_slice(&(json_chunk_length as u32).to_le_bytes());
    glb.extend_from_slice(&0x4E4F534Au32.to_le_bytes());
    glb.extend_from_slice(&json_bytes);
    glb.extend(std::iter::repeat_n(0x20u8, json_padding));

    // BIN chunk
    glb.extend_from_slice(&(buffer_chunk_length as u32).to_le_bytes());
    glb.extend_from_slice(&0x004E4942u32.to_le_bytes());
    glb.extend_from_slice(buffer_data);
    glb.extend(std::iter::repeat_n(0u8, buffer_padding));

    glb
}

/// Unit quad in the XY plane with UVs and normals, as one `o` object.
pub const QUAD_OBJ: &str = "\
# quad
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

/// Write a material file with the given `(tag, value)` entries.
pub fn write_material(path: &Path, entries: &[(&str, &str)]) {
    let mut text = String::from("generated for tests\n#BEGIN\n");
    for (tag, value) in entries {
        text.push_str(tag);
        text.push('\n');
        text.push_str(value);
        text.push('\n');
    }
    text.push_str("#END\n");
    std::fs::write(path, text).expect("Failed to write material file");
}
