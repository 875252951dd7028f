//! Material file resolver (`.wmf`)
//!
//! ```text
//! any preamble, ignored
//! #BEGIN
//! #diffuse
//! textures/rock_albedo.png
//! #normal
//! textures/rock_normal.png
//! #END
//! anything after #END is ignored
//! ```
//!
//! Markers match as substrings of a line. The line after a property tag is
//! taken verbatim as that slot's path.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use wobj_shared::{MaterialSet, MaterialSlot, TexturePath};

use crate::config::PathOverflow;
use crate::error::{ExportError, Result};

const BEGIN: &str = "#BEGIN";
const END: &str = "#END";

/// Property tags, in the order they are tested against a line
const TAGS: [(&str, MaterialSlot); 5] = [
    ("#diffuse", MaterialSlot::Albedo),
    ("#normal", MaterialSlot::Normal),
    ("#metallic", MaterialSlot::Metallic),
    ("#roughness", MaterialSlot::Roughness),
    ("#ao", MaterialSlot::AmbientOcclusion),
];

/// Read a material file into a [`MaterialSet`].
pub fn resolve(path: &Path, overflow: PathOverflow) -> Result<MaterialSet> {
    let file = File::open(path).map_err(|cause| ExportError::MaterialFileOpen {
        path: path.to_path_buf(),
        cause,
    })?;

    parse(BufReader::new(file), overflow).map_err(|err| match err {
        ExportError::MaterialRead { cause, .. } => ExportError::MaterialRead {
            path: path.to_path_buf(),
            cause,
        },
        other => other,
    })
}

/// Parse material text from any reader.
pub fn parse<R: BufRead>(reader: R, overflow: PathOverflow) -> Result<MaterialSet> {
    let mut materials = MaterialSet::default();
    let mut lines = reader.lines();
    let mut next_line = move || {
        lines.next().transpose().map_err(|cause| ExportError::MaterialRead {
            path: Default::default(),
            cause,
        })
    };

    // Preamble
    loop {
        match next_line()? {
            Some(line) if line.contains(BEGIN) => break,
            Some(_) => continue,
            None => return Ok(materials),
        }
    }

    while let Some(line) = next_line()? {
        if line.contains(END) {
            break;
        }
        let Some(&(_, slot)) = TAGS.iter().find(|(tag, _)| line.contains(tag)) else {
            continue;
        };
        let Some(value) = next_line()? else {
            tracing::warn!("Material tag for {} has no value line", slot);
            break;
        };
        let path = match overflow {
            PathOverflow::Reject => TexturePath::new(&value),
            PathOverflow::Truncate => TexturePath::truncated(&value),
        }
        .map_err(|err| ExportError::from_path_error(slot, err))?;

        if overflow == PathOverflow::Truncate && path.value_bytes().len() < value.len() {
            tracing::warn!(
                "Truncated {} path from {} to {} bytes",
                slot,
                value.len(),
                path.value_bytes().len()
            );
        }
        materials.set(slot, path);
    }

    Ok(materials)
}
