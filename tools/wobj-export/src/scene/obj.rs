//! OBJ scene loading
//!
//! `o` and `g` records split the file into meshes, each attached to its own
//! child of the root node. Face corners are expanded to one vertex each;
//! `JoinIdenticalVertices` merges them again afterwards.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{Node, Scene, SourceMesh, UvOrigin, file_stem, import_failure};
use crate::error::Result;

/// Corner reference: position, optional texcoord, optional normal (0-based)
type Corner = (usize, Option<usize>, Option<usize>);

/// Mesh under construction, with per-corner channels that may be partial
#[derive(Default)]
struct Group {
    name: String,
    positions: Vec<[f32; 3]>,
    uvs: Vec<Option<[f32; 2]>>,
    normals: Vec<Option<[f32; 3]>>,
    faces: Vec<Vec<u32>>,
}

impl Group {
    fn named(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// A channel survives only if every corner supplied it.
    fn finish(self) -> SourceMesh {
        let uvs = self.uvs.into_iter().collect::<Option<Vec<_>>>();
        let normals = self.normals.into_iter().collect::<Option<Vec<_>>>();
        SourceMesh {
            name: self.name,
            positions: self.positions,
            normals,
            uvs,
            tangents: None,
            bitangents: None,
            faces: self.faces,
            uv_origin: UvOrigin::BottomLeft,
        }
    }
}

pub(super) fn load(path: &Path) -> Result<Scene> {
    let file = File::open(path).map_err(|e| import_failure(path, e))?;
    parse(BufReader::new(file), &file_stem(path)).map_err(|reason| import_failure(path, reason))
}

fn parse<R: BufRead>(reader: R, stem: &str) -> std::result::Result<Scene, String> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut tex_coords: Vec<[f32; 2]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();

    let mut groups: Vec<Group> = Vec::new();
    let mut current = Group::named(stem.to_string());

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.map_err(|e| format!("line {line_no}: {e}"))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" => positions.push(parse_floats(&parts[1..], line_no)?),
            "vt" => tex_coords.push(parse_floats(&parts[1..], line_no)?),
            "vn" => normals.push(parse_floats(&parts[1..], line_no)?),
            "o" | "g" => {
                let name = parts[1..].join(" ");
                let name = if name.is_empty() { stem.to_string() } else { name };
                if current.faces.is_empty() {
                    current.name = name;
                } else {
                    groups.push(std::mem::replace(&mut current, Group::named(name)));
                }
            }
            "f" => {
                let corners = parts[1..]
                    .iter()
                    .map(|token| {
                        parse_corner(
                            token,
                            positions.len(),
                            tex_coords.len(),
                            normals.len(),
                        )
                        .ok_or_else(|| format!("line {line_no}: bad face vertex '{token}'"))
                    })
                    .collect::<std::result::Result<Vec<Corner>, String>>()?;

                let mut face = Vec::with_capacity(corners.len());
                for (vi, vti, vni) in corners {
                    face.push(current.positions.len() as u32);
                    current.positions.push(positions[vi]);
                    current.uvs.push(vti.map(|i| tex_coords[i]));
                    current.normals.push(vni.map(|i| normals[i]));
                }
                current.faces.push(face);
            }
            _ => {
                // Materials, smoothing groups, lines etc. carry nothing we export
            }
        }
    }

    if !current.faces.is_empty() {
        groups.push(current);
    }

    let mut root = Node::new(stem);
    let mut meshes = Vec::with_capacity(groups.len());
    for (index, group) in groups.into_iter().enumerate() {
        let mut node = Node::new(group.name.clone());
        node.meshes.push(index);
        root.children.push(node);
        meshes.push(group.finish());
    }

    Ok(Scene { root, meshes })
}

fn parse_floats<const N: usize>(
    tokens: &[&str],
    line_no: usize,
) -> std::result::Result<[f32; N], String> {
    let mut out = [0.0f32; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let token = tokens
            .get(i)
            .ok_or_else(|| format!("line {line_no}: expected {N} values"))?;
        *slot = token
            .parse()
            .map_err(|_| format!("line {line_no}: invalid number '{token}'"))?;
    }
    Ok(out)
}

/// Parse a face corner: "v", "v/vt", "v/vt/vn" or "v//vn".
///
/// Indices are 1-based; negative values count back from the latest element.
fn parse_corner(token: &str, v_len: usize, vt_len: usize, vn_len: usize) -> Option<Corner> {
    let mut parts = token.split('/');
    let vi = resolve_index(parts.next()?, v_len)?;

    let vti = match parts.next() {
        Some(s) if !s.is_empty() => Some(resolve_index(s, vt_len)?),
        _ => None,
    };
    let vni = match parts.next() {
        Some(s) if !s.is_empty() => Some(resolve_index(s, vn_len)?),
        _ => None,
    };

    Some((vi, vti, vni))
}

fn resolve_index(token: &str, len: usize) -> Option<usize> {
    let raw: i64 = token.parse().ok()?;
    let index = match raw {
        0 => return None,
        r if r > 0 => r - 1,
        r => len as i64 + r,
    };
    (index >= 0 && (index as usize) < len).then_some(index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_str(src: &str) -> Scene {
        parse(Cursor::new(src), "test").expect("parse OBJ")
    }

    #[test]
    fn test_single_triangle() {
        let scene = parse_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 1\nf 1/1/1 2/2/1 3/3/1\n",
        );
        assert_eq!(scene.meshes.len(), 1);
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.name, "test");
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
        assert_eq!(mesh.uvs.as_ref().unwrap()[1], [1.0, 0.0]);
        assert_eq!(mesh.normals.as_ref().unwrap()[2], [0.0, 0.0, 1.0]);
        assert_eq!(mesh.uv_origin, UvOrigin::BottomLeft);
        assert_eq!(scene.root.children.len(), 1);
        assert_eq!(scene.root.children[0].meshes, vec![0]);
    }

    #[test]
    fn test_objects_become_child_nodes() {
        let scene = parse_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\n\
             o first\nf 1 2 3\n\
             o second\nf 2 4 3\nf 1 2 4\n",
        );
        assert_eq!(scene.meshes.len(), 2);
        assert_eq!(scene.root.children[0].name, "first");
        assert_eq!(scene.root.children[1].name, "second");
        assert_eq!(scene.root.children[1].meshes, vec![1]);
        assert_eq!(scene.meshes[1].faces.len(), 2);
        // Face corners are expanded per mesh
        assert_eq!(scene.meshes[1].positions.len(), 6);
    }

    #[test]
    fn test_partial_uvs_dropped() {
        let scene = parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2 3\n");
        assert!(scene.meshes[0].uvs.is_none());
        assert!(scene.meshes[0].normals.is_none());
    }

    #[test]
    fn test_quad_kept_until_triangulation() {
        let scene = parse_str("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        assert_eq!(scene.meshes[0].faces, vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_negative_indices() {
        let scene = parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n");
        assert_eq!(scene.meshes[0].positions[2], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_face_fails() {
        let err = parse(Cursor::new("v 0 0 0\nf 1 2 3\n"), "bad").unwrap_err();
        assert!(err.contains("line 2"));
    }

    #[test]
    fn test_bad_number_fails() {
        let err = parse(Cursor::new("v 0 zero 0\n"), "bad").unwrap_err();
        assert!(err.contains("invalid number"));
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index("1", 3), Some(0));
        assert_eq!(resolve_index("-1", 3), Some(2));
        assert_eq!(resolve_index("0", 3), None);
        assert_eq!(resolve_index("4", 3), None);
        assert_eq!(resolve_index("-4", 3), None);
    }
}
