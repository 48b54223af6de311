//! Mesh generation for voxel rendering.
//!
//! This module turns exposed block faces into textured quads:
//! - [`Face`]: one exposed side of one block, with its fixed corner layout
//! - [`ChunkMesh`]: the flat per-chunk vertex list handed to the renderer
//!
//! The visibility pass that decides which faces exist lives with the chunk
//! (`voxels::chunk::chunk_visibility`); this module only knows geometry.

mod face;
mod mesh;

pub use face::Face;
pub use mesh::*;
