//! Post-processing steps run on every imported mesh
//!
//! Each step implements [`PostProcess`] and can be applied on its own;
//! [`post_process`] runs the steps enabled in [`ImportFlags`] in a fixed order:
//! triangulate, flip UVs, join identical vertices, smooth normals, tangent space.

use glam::{Vec2, Vec3};
use hashbrown::HashMap;

use super::{ImportFlags, SourceMesh, UvOrigin};

/// A single in-place mesh transformation
pub trait PostProcess {
    fn apply(&self, mesh: &mut SourceMesh);
}

/// Run every step enabled in `flags`.
pub fn post_process(mesh: &mut SourceMesh, flags: &ImportFlags) {
    if flags.triangulate {
        Triangulate.apply(mesh);
    }
    if flags.flip_uvs {
        FlipUvs.apply(mesh);
    }
    if flags.join_identical_vertices {
        JoinIdenticalVertices.apply(mesh);
    }
    if flags.gen_smooth_normals {
        GenSmoothNormals.apply(mesh);
    }
    if flags.calc_tangent_space {
        CalcTangentSpace.apply(mesh);
    }
}

/// Triangles of a face, fanned from its first corner
fn fan(face: &[u32]) -> impl Iterator<Item = [usize; 3]> + '_ {
    (1..face.len().saturating_sub(1))
        .map(move |i| [face[0] as usize, face[i] as usize, face[i + 1] as usize])
}

/// Split polygons into triangle fans; drop points and lines.
pub struct Triangulate;

impl PostProcess for Triangulate {
    fn apply(&self, mesh: &mut SourceMesh) {
        let faces = std::mem::take(&mut mesh.faces);
        let before = faces.len();
        mesh.faces = faces
            .iter()
            .flat_map(|face| fan(face).map(|tri| tri.map(|i| i as u32).to_vec()))
            .collect();
        if mesh.faces.len() != before {
            tracing::debug!(
                "Triangulated '{}': {} faces -> {} triangles",
                mesh.name,
                before,
                mesh.faces.len()
            );
        }
    }
}

/// Bring bottom-left-origin UVs to the top-left convention (v' = 1 - v).
pub struct FlipUvs;

impl PostProcess for FlipUvs {
    fn apply(&self, mesh: &mut SourceMesh) {
        if mesh.uv_origin != UvOrigin::BottomLeft {
            return;
        }
        if let Some(uvs) = &mut mesh.uvs {
            for uv in uvs.iter_mut() {
                uv[1] = 1.0 - uv[1];
            }
        }
        mesh.uv_origin = UvOrigin::TopLeft;
    }
}

/// Merge vertices whose every present channel is bit-identical.
pub struct JoinIdenticalVertices;

impl JoinIdenticalVertices {
    fn key(mesh: &SourceMesh, i: usize) -> [u32; 14] {
        let mut key = [0u32; 14];
        let mut put = |offset: usize, values: &[f32]| {
            for (slot, v) in key[offset..].iter_mut().zip(values) {
                *slot = v.to_bits();
            }
        };
        put(0, &mesh.positions[i]);
        if let Some(n) = &mesh.normals {
            put(3, &n[i]);
        }
        if let Some(uv) = &mesh.uvs {
            put(6, &uv[i]);
        }
        if let Some(t) = &mesh.tangents {
            put(8, &t[i]);
        }
        if let Some(b) = &mesh.bitangents {
            put(11, &b[i]);
        }
        key
    }
}

impl PostProcess for JoinIdenticalVertices {
    fn apply(&self, mesh: &mut SourceMesh) {
        let count = mesh.positions.len();
        let mut unique: HashMap<[u32; 14], u32> = HashMap::with_capacity(count);
        let mut remap = Vec::with_capacity(count);
        let mut kept = Vec::with_capacity(count);

        for i in 0..count {
            let next = kept.len() as u32;
            let index = *unique.entry(Self::key(mesh, i)).or_insert(next);
            if index == next {
                kept.push(i);
            }
            remap.push(index);
        }

        if kept.len() == count {
            return;
        }

        fn gather<T: Copy>(values: &mut Vec<T>, kept: &[usize]) {
            *values = kept.iter().map(|&i| values[i]).collect();
        }
        gather(&mut mesh.positions, &kept);
        for channel in [&mut mesh.normals, &mut mesh.tangents, &mut mesh.bitangents] {
            if let Some(values) = channel {
                gather(values, &kept);
            }
        }
        if let Some(uvs) = &mut mesh.uvs {
            gather(uvs, &kept);
        }
        for index in mesh.faces.iter_mut().flatten() {
            *index = remap[*index as usize];
        }

        tracing::debug!(
            "Joined identical vertices in '{}': {} -> {}",
            mesh.name,
            count,
            kept.len()
        );
    }
}

/// Generate normals for meshes that have none.
///
/// Face normals are area-weighted and shared by every vertex at the same
/// position, so UV seams do not split the shading.
pub struct GenSmoothNormals;

impl PostProcess for GenSmoothNormals {
    fn apply(&self, mesh: &mut SourceMesh) {
        if mesh.normals.is_some() {
            return;
        }

        let position_key = |p: &[f32; 3]| p.map(f32::to_bits);
        let mut sums: HashMap<[u32; 3], Vec3> = HashMap::new();

        for face in &mesh.faces {
            for [a, b, c] in fan(face) {
                let p0 = Vec3::from(mesh.positions[a]);
                let p1 = Vec3::from(mesh.positions[b]);
                let p2 = Vec3::from(mesh.positions[c]);
                let weighted = (p1 - p0).cross(p2 - p0);
                for i in [a, b, c] {
                    *sums.entry(position_key(&mesh.positions[i])).or_default() += weighted;
                }
            }
        }

        mesh.normals = Some(
            mesh.positions
                .iter()
                .map(|p| {
                    sums.get(&position_key(p))
                        .copied()
                        .unwrap_or_default()
                        .normalize_or(Vec3::Y)
                        .to_array()
                })
                .collect(),
        );
    }
}

/// Derive per-vertex tangents and bitangents from UV gradients.
///
/// Needs normals and UVs; meshes that already carry a tangent frame are left
/// alone. Triangles with degenerate UVs contribute nothing, and vertices left
/// without a direction get an arbitrary basis perpendicular to the normal.
pub struct CalcTangentSpace;

impl PostProcess for CalcTangentSpace {
    fn apply(&self, mesh: &mut SourceMesh) {
        if mesh.tangents.is_some() && mesh.bitangents.is_some() {
            return;
        }
        let (Some(normals), Some(uvs)) = (&mesh.normals, &mesh.uvs) else {
            return;
        };

        let count = mesh.positions.len();
        let mut tan_sum = vec![Vec3::ZERO; count];
        let mut bit_sum = vec![Vec3::ZERO; count];

        for face in &mesh.faces {
            for [a, b, c] in fan(face) {
                let p0 = Vec3::from(mesh.positions[a]);
                let e1 = Vec3::from(mesh.positions[b]) - p0;
                let e2 = Vec3::from(mesh.positions[c]) - p0;
                let uv0 = Vec2::from(uvs[a]);
                let d1 = Vec2::from(uvs[b]) - uv0;
                let d2 = Vec2::from(uvs[c]) - uv0;

                let det = d1.x * d2.y - d2.x * d1.y;
                if det.abs() <= f32::EPSILON {
                    continue;
                }
                let r = det.recip();
                let tangent = (e1 * d2.y - e2 * d1.y) * r;
                let bitangent = (e2 * d1.x - e1 * d2.x) * r;
                for i in [a, b, c] {
                    tan_sum[i] += tangent;
                    bit_sum[i] += bitangent;
                }
            }
        }

        let mut tangents = Vec::with_capacity(count);
        let mut bitangents = Vec::with_capacity(count);
        for i in 0..count {
            let n = Vec3::from(normals[i]).normalize_or(Vec3::Y);

            let t = tan_sum[i] - n * n.dot(tan_sum[i]);
            let t = t.try_normalize().unwrap_or_else(|| n.any_orthonormal_vector());

            let b = bit_sum[i] - n * n.dot(bit_sum[i]) - t * t.dot(bit_sum[i]);
            let b = b.try_normalize().unwrap_or_else(|| n.cross(t));

            tangents.push(t.to_array());
            bitangents.push(b.to_array());
        }

        mesh.tangents = Some(tangents);
        mesh.bitangents = Some(bitangents);
    }
}
