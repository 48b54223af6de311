//! Rendering glue for the voxel engine.
//!
//! This module owns everything between a chunk's block data and the GPU:
//! the vertex format, the texture atlas lookup, quad geometry, and the
//! uploader seam that hands finished meshes to a backend.
//!
//! The engine never draws anything itself. A [`MeshUploader`] receives each
//! rebuilt mesh and decides what to do with it: [`buffer_state::GpuMeshUploader`]
//! stores it in wgpu buffers, [`MeshStatistics`] only tallies it.

use std::collections::HashMap;

pub mod atlas;
pub mod buffer_state;
pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use meshing::{generate_face_indices, ChunkMesh};
pub use vertex::Vertex;

/// Receives chunk meshes after every rebuild.
///
/// Implementations must release whatever they hold for `chunk_index`
/// before installing the replacement.
pub trait MeshUploader {
    /// Replaces the stored mesh of one chunk.
    fn upload(&mut self, chunk_index: usize, mesh: &ChunkMesh);
}

/// A CPU-only uploader that records what it was given.
///
/// Used when no GPU adapter is available and by tests.
#[derive(Debug, Default, Clone)]
pub struct MeshStatistics {
    vertex_counts: HashMap<usize, usize>,
    upload_log: Vec<usize>,
}

impl MeshStatistics {
    /// Vertex count of the latest upload for a chunk.
    pub fn vertex_count(&self, chunk_index: usize) -> Option<usize> {
        self.vertex_counts.get(&chunk_index).copied()
    }

    /// Sum of the latest vertex counts of every chunk.
    pub fn total_vertices(&self) -> usize {
        self.vertex_counts.values().sum()
    }

    /// Chunk indices in upload order, including repeats.
    pub fn uploads(&self) -> &[usize] {
        &self.upload_log
    }

    /// Forgets the upload order but keeps the latest counts.
    pub fn clear_log(&mut self) {
        self.upload_log.clear();
    }
}

impl MeshUploader for MeshStatistics {
    fn upload(&mut self, chunk_index: usize, mesh: &ChunkMesh) {
        self.vertex_counts.insert(chunk_index, mesh.vertex_count());
        self.upload_log.push(chunk_index);
    }
}
