//! WOBJ container writer
//!
//! Re-exports the shared container definitions and adds the file-level
//! operations used by the exporter and by `wobj inspect`.

pub use wobj_shared::formats::*;

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use wobj_shared::WOBJ_FORMAT;

use crate::error::{ExportError, Result};
use crate::mesh::Mesh;

/// Summary of a completed write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub path: PathBuf,
    pub bytes: u64,
    pub vertex_count: usize,
    pub index_count: usize,
}

/// Write a complete WOBJ container: header, indices, vertices.
///
/// Returns the number of bytes written.
pub fn write_wobj<W: Write>(w: &mut W, mesh: &Mesh, materials: &MaterialSet) -> Result<u64> {
    let header = WobjHeader::for_mesh(mesh.index_count(), mesh.vertex_count(), *materials)?;
    write_sections(w, &header, mesh).map_err(|cause| ExportError::WriteFailure {
        path: PathBuf::new(),
        cause,
    })?;
    Ok(header.file_size() as u64)
}

fn write_sections<W: Write>(w: &mut W, header: &WobjHeader, mesh: &Mesh) -> io::Result<()> {
    w.write_all(&header.to_bytes())?;
    for index in &mesh.indices {
        w.write_all(&index.to_le_bytes())?;
    }
    for vertex in &mesh.vertices {
        w.write_all(&vertex.to_bytes())?;
    }
    Ok(())
}

/// Sibling temp path used while the container is being written
fn temp_path(path: &Path) -> io::Result<PathBuf> {
    match path.file_name() {
        Some(name) => {
            let mut tmp_name = OsString::from(name);
            tmp_name.push(".tmp");
            Ok(path.with_file_name(tmp_name))
        }
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "output path has no file name",
        )),
    }
}

/// Write a container to `path`.
///
/// The bytes go to `<path>.tmp` first and are renamed into place once
/// flushed and synced, so `path` never holds a partial container.
pub fn write_wobj_file(path: &Path, mesh: &Mesh, materials: &MaterialSet) -> Result<WriteReport> {
    let write_failure = |cause| ExportError::WriteFailure {
        path: path.to_path_buf(),
        cause,
    };
    let tmp_path = temp_path(path).map_err(write_failure)?;

    let bytes = match write_to(&tmp_path, path, mesh, materials) {
        Ok(bytes) => bytes,
        Err(err) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }
    };

    let report = WriteReport {
        path: path.to_path_buf(),
        bytes,
        vertex_count: mesh.vertex_count(),
        index_count: mesh.index_count(),
    };
    tracing::info!(
        "Wrote {} ({}): {} vertices, {} indices, layout=pos|tan|bitan|normal|uv, {:.1} KiB",
        report.path.display(),
        WOBJ_FORMAT.version_tag(),
        report.vertex_count,
        report.index_count,
        report.bytes as f64 / 1024.0
    );
    Ok(report)
}

fn write_to(tmp_path: &Path, path: &Path, mesh: &Mesh, materials: &MaterialSet) -> Result<u64> {
    let write_failure = |cause| ExportError::WriteFailure {
        path: path.to_path_buf(),
        cause,
    };

    let file = File::create(tmp_path).map_err(write_failure)?;
    let mut writer = BufWriter::new(file);
    let bytes = write_wobj(&mut writer, mesh, materials).map_err(|err| match err {
        ExportError::WriteFailure { cause, .. } => write_failure(cause),
        other => other,
    })?;
    let file = writer
        .into_inner()
        .map_err(|err| write_failure(err.into_error()))?;
    file.sync_all().map_err(write_failure)?;
    drop(file);

    #[cfg(windows)]
    {
        if path.exists() {
            // Windows rename fails if destination exists.
            fs::remove_file(path).map_err(write_failure)?;
        }
    }

    fs::rename(tmp_path, path).map_err(write_failure)?;
    Ok(bytes)
}

/// Read and validate a container from disk.
pub fn read_wobj_file(path: &Path) -> anyhow::Result<WobjFile> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    WobjFile::parse(&bytes).with_context(|| format!("Invalid WOBJ container: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wobj_shared::{Vec2, Vec3};

    fn triangle() -> Mesh {
        let vertex = |x: f32, u: f32| WobjVertex {
            position: Vec3::new(x, 0.0, 0.0),
            tangent: Vec3::new(1.0, 0.0, 0.0),
            bitangent: Vec3::new(0.0, 1.0, 0.0),
            normal: Vec3::new(0.0, 0.0, 1.0),
            uv: Vec2::new(u, 0.5),
        };
        Mesh::new(
            vec![vertex(0.0, 0.0), vertex(1.0, 1.0), vertex(2.0, 0.5)],
            vec![0, 1, 2],
        )
    }

    fn albedo(path: &str) -> MaterialSet {
        let mut set = MaterialSet::default();
        set.set(MaterialSlot::Albedo, TexturePath::new(path).unwrap());
        set
    }

    #[test]
    fn test_empty_mesh_is_header_only() {
        let mut out = Vec::new();
        let bytes = write_wobj(&mut out, &Mesh::default(), &MaterialSet::default()).unwrap();
        assert_eq!(bytes, 1296);
        assert_eq!(out.len(), 1296);
        assert_eq!(&out[8..12], &1296i32.to_le_bytes());
        assert_eq!(&out[12..16], &1296i32.to_le_bytes());
        assert_eq!(out[16], b'`');
        assert!(out[17..272].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_section_layout() {
        let mesh = triangle();
        let mut out = Vec::new();
        let bytes = write_wobj(&mut out, &mesh, &albedo("rock.png")).unwrap();

        assert_eq!(bytes as usize, out.len());
        assert_eq!(out.len(), 1296 + 3 * 4 + 3 * 56);
        assert_eq!(&out[0..4], &3i32.to_le_bytes());
        assert_eq!(&out[4..8], &3i32.to_le_bytes());
        assert_eq!(&out[12..16], &1308i32.to_le_bytes());
        assert_eq!(&out[16..24], b"rock.png");
        assert_eq!(out[24], 0);
        assert_eq!(&out[1296 + 4..1296 + 8], &1u32.to_le_bytes());
        assert_eq!(&out[1308..1308 + 56], &mesh.vertices[0].to_bytes());
    }

    #[test]
    fn test_all_material_slots_round_trip() {
        let mut materials = MaterialSet::default();
        for (slot, value) in MaterialSlot::ALL.into_iter().zip([
            "tex/albedo.png",
            "tex/normal.png",
            "tex/metallic.png",
            "tex/roughness.png",
            "tex/ao.png",
        ]) {
            materials.set(slot, TexturePath::new(value).unwrap());
        }

        let mut out = Vec::new();
        write_wobj(&mut out, &triangle(), &materials).unwrap();
        let file = WobjFile::parse(&out).unwrap();

        for slot in MaterialSlot::ALL {
            let written = materials.get(slot).as_bytes();
            let read = file.header.materials.get(slot).as_bytes();
            assert_eq!(read, written, "{slot} field differs");
        }
        assert_eq!(file.header.materials, materials);
        assert_eq!(&out[16 + 4 * 256..16 + 4 * 256 + 10], b"tex/ao.png");
        assert!(out[16 + 4 * 256 + 10..1296].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.wobj");
        let mesh = triangle();
        let report = write_wobj_file(&path, &mesh, &albedo("a.png")).unwrap();

        assert_eq!(report.vertex_count, 3);
        assert_eq!(report.index_count, 3);
        assert_eq!(report.bytes, fs::metadata(&path).unwrap().len());
        assert!(!dir.path().join("tri.wobj.tmp").exists());

        let file = read_wobj_file(&path).unwrap();
        assert_eq!(file.indices, mesh.indices);
        assert_eq!(file.vertices, mesh.vertices);
        assert_eq!(file.header.materials.albedo.as_str(), "a.png");
        assert!(file.header.materials.normal.is_unset());
    }

    #[test]
    fn test_rewrite_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.wobj");
        write_wobj_file(&path, &triangle(), &albedo("a.png")).unwrap();
        let first = fs::read(&path).unwrap();
        write_wobj_file(&path, &triangle(), &albedo("a.png")).unwrap();
        assert_eq!(first, fs::read(&path).unwrap());
    }

    #[test]
    fn test_failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("tri.wobj");
        let err = write_wobj_file(&path, &triangle(), &MaterialSet::default()).unwrap_err();
        assert!(matches!(err, ExportError::WriteFailure { .. }));
        assert!(err.to_string().starts_with("write failed"));
        assert!(!path.exists());
        assert!(!dir.path().join("missing-dir").exists());
    }

    #[test]
    fn test_read_rejects_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.wobj");
        write_wobj_file(&path, &triangle(), &MaterialSet::default()).unwrap();
        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - 1]).unwrap();
        assert!(read_wobj_file(&path).is_err());
    }
}
