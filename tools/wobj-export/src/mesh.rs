//! Merged export mesh

use wobj_shared::WobjVertex;

use crate::error::{ExportError, Result};

/// All vertices and indices of a scene, concatenated in traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<WobjVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<WobjVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Check that every index addresses an existing vertex.
    pub fn validate(&self) -> Result<()> {
        match self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.vertices.len())
        {
            Some(&index) => Err(ExportError::IndexOutOfRange {
                index,
                vertex_count: self.vertices.len(),
            }),
            None => Ok(()),
        }
    }
}
