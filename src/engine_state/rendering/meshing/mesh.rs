//! Mesh data structures for voxel rendering.
//!
//! A chunk's mesh is a derived cache: it is rebuilt wholesale from the block
//! array on every recalculation and never patched in place.

use super::face::Face;
use crate::engine_state::rendering::{atlas::TextureAtlas, Vertex};

/// Vertices emitted per exposed face.
pub const VERTICES_PER_FACE: usize = 4;

/// Indices emitted per exposed face (two triangles).
pub const INDICES_PER_FACE: usize = 6;

/// The flat vertex list of one chunk, four vertices per exposed face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertices in emission order
    pub vertices: Vec<Vertex>,
}

impl ChunkMesh {
    /// Creates an empty mesh with room for exactly `vertex_count` vertices.
    pub fn with_capacity(vertex_count: usize) -> Self {
        ChunkMesh {
            vertices: Vec::with_capacity(vertex_count),
        }
    }

    /// Appends the four vertices of `face`.
    pub fn push_face(&mut self, face: &Face, atlas: &TextureAtlas) {
        self.vertices.extend_from_slice(&face.vertices(atlas));
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    /// Whether the chunk produced no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Builds the index list for every quad in the mesh.
    pub fn indices(&self) -> Vec<u32> {
        (0..self.face_count() as u32)
            .flat_map(generate_face_indices)
            .collect()
    }
}

/// Generates index data for a face, adjusted by the number of previously generated faces.
///
/// # Returns
/// Six indices forming the triangles (0, 1, 2) and (0, 2, 3) of the quad.
pub fn generate_face_indices(num_faces_generated: u32) -> [u32; INDICES_PER_FACE] {
    let base = num_faces_generated * VERTICES_PER_FACE as u32;
    [base, base + 1, base + 2, base, base + 2, base + 3]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_side::BlockSide;
    use cgmath::Point3;

    #[test]
    fn face_indices_are_offset_per_quad() {
        assert_eq!(generate_face_indices(0), [0, 1, 2, 0, 2, 3]);
        assert_eq!(generate_face_indices(2), [8, 9, 10, 8, 10, 11]);
    }

    #[test]
    fn mesh_counts_follow_pushed_faces() {
        let atlas = TextureAtlas::default();
        let mut mesh = ChunkMesh::with_capacity(8);
        assert!(mesh.is_empty());
        mesh.push_face(&Face::new(Point3::new(0, 0, 0), 1, BlockSide::TOP), &atlas);
        mesh.push_face(&Face::new(Point3::new(0, 0, 0), 1, BlockSide::LEFT), &atlas);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.indices(), vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
    }
}
