//! # Chunk Visibility Module
//!
//! Face culling for a single chunk. For every non-air block, a face is
//! exposed when the neighbouring cell across it is AIR, whether that cell is
//! local or resolved through the chunk's [`BlockSource`].
//!
//! The pass walks the chunk twice in x-outer, y-middle, z-inner order:
//!
//! 1. **Count**: tests all six neighbours, writes each block's visibility
//!    mask, and tallies the vertex count.
//! 2. **Emit**: allocates a vertex list of exactly that size and re-tests
//!    every neighbour to decide which quads to append. The mask written in
//!    the first pass is never read back.
//!
//! The previous mesh is replaced wholesale once the new one is complete.

use cgmath::{Point3, Vector3};
use log::trace;

use super::{BlockSource, Chunk};
use crate::engine_state::{
    rendering::{
        atlas::TextureAtlas,
        meshing::{ChunkMesh, Face, VERTICES_PER_FACE},
    },
    voxels::block::{block_side::BlockSide, Block, VISIBILITY_COMPUTED},
};

impl Chunk {
    /// The neighbour of local block (x, y, z) across `side`.
    #[inline]
    fn neighbor<S: BlockSource + ?Sized>(
        &self,
        x: usize,
        y: usize,
        z: usize,
        side: BlockSide,
        source: &S,
    ) -> Block {
        let step = side.neighbor_offset();
        self.get(x as i32 + step.x, y as i32 + step.y, z as i32 + step.z, source)
    }

    /// Visibility mask for the block at a local coordinate: the "computed"
    /// bit plus one bit per side whose neighbour is AIR.
    pub fn exposed_sides<S: BlockSource + ?Sized>(
        &self,
        x: usize,
        y: usize,
        z: usize,
        source: &S,
    ) -> u8 {
        BlockSide::all()
            .into_iter()
            .filter(|side| self.neighbor(x, y, z, *side, source).is_air())
            .fold(VISIBILITY_COMPUTED, |mask, side| mask | side.visibility_pattern())
    }

    /// Recomputes which faces are exposed and rebuilds the vertex list.
    ///
    /// # Arguments
    /// * `offset` - Global block coordinate of this chunk's local origin
    /// * `source` - Answers queries that cross the chunk boundary
    /// * `atlas` - Texture coordinates for each block type and corner
    ///
    /// # Returns
    /// The new vertex count, always four times the number of exposed faces.
    pub fn calculate_visible_sides<S: BlockSource + ?Sized>(
        &mut self,
        offset: Point3<i32>,
        source: &S,
        atlas: &TextureAtlas,
    ) -> usize {
        self.offset = offset;

        let mut exposed_faces = 0;
        let mut vertex_count = 0;
        for x in 0..self.size.x {
            for y in 0..self.size.y {
                for z in 0..self.size.z {
                    let index = self.index(x, y, z);
                    if self.blocks[index].is_air() {
                        continue;
                    }
                    let mask = self.exposed_sides(x, y, z, source);
                    self.blocks[index].visible = mask;

                    let faces = (mask & !VISIBILITY_COMPUTED).count_ones() as usize;
                    exposed_faces += faces;
                    vertex_count += faces * VERTICES_PER_FACE;
                }
            }
        }

        let mut mesh = ChunkMesh::with_capacity(vertex_count);

        for x in 0..self.size.x {
            for y in 0..self.size.y {
                for z in 0..self.size.z {
                    let block = self.get_local(x, y, z);
                    if block.is_air() {
                        continue;
                    }
                    let position = offset + Vector3::new(x as i32, y as i32, z as i32);
                    for side in BlockSide::all() {
                        if self.neighbor(x, y, z, side, source).is_air() {
                            mesh.push_face(&Face::new(position, block.block_type, side), atlas);
                        }
                    }
                }
            }
        }

        debug_assert_eq!(mesh.vertex_count(), vertex_count);
        trace!(
            "chunk at {:?}: {} exposed faces, {} vertices",
            offset,
            exposed_faces,
            vertex_count
        );

        self.mesh = mesh;
        self.dirty = false;
        vertex_count
    }
}
