//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a dense, fixed-size 3D array of
//! blocks plus the mesh cache derived from it.
//!
//! ## Boundary queries
//!
//! A chunk never holds a reference to the world that owns it. Reads that
//! fall outside its own bounds are rebased into global coordinates and
//! answered by a [`BlockSource`] supplied by the caller. The chunk never
//! reasons about *which* neighbour holds the data.
//!
//! ## Storage
//!
//! Blocks are stored in one flat `Vec` in x-outer, y-middle, z-inner order,
//! the same order the visibility pass walks them.

use cgmath::{Point3, Vector3};

use super::block::{block_type::BlockType, Block, BlockTypeSize};
use crate::engine_state::rendering::{ChunkMesh, Vertex};
use crate::error::{VoxelError, VoxelResult};

pub mod chunk_visibility;

/// The default dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: usize = 16;

/// Answers block queries in global coordinates.
///
/// This is the context a chunk consults for cells outside its own bounds.
pub trait BlockSource {
    /// Returns the block at a global coordinate.
    fn block_at(&self, position: Point3<i32>) -> Block;
}

/// A source with nothing in it: every query resolves to AIR.
///
/// Useful for meshing a chunk in isolation.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmptySpace;

impl BlockSource for EmptySpace {
    fn block_at(&self, _position: Point3<i32>) -> Block {
        Block::default()
    }
}

/// A fixed-size collection of voxel blocks and the mesh built from them.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Extent of the chunk in blocks; never changes after construction.
    size: Vector3<usize>,

    /// Block data, `size.x * size.y * size.z` cells.
    blocks: Vec<Block>,

    /// Global block coordinate of local (0, 0, 0), as supplied to the last
    /// visibility pass.
    offset: Point3<i32>,

    /// Vertex cache from the last visibility pass. Stale after any `set`.
    mesh: ChunkMesh,

    /// Set by edits, cleared by recalculation.
    dirty: bool,
}

impl Chunk {
    /// Allocates a chunk with every cell set to AIR.
    ///
    /// # Errors
    /// `InvalidDimensions` if any extent is zero.
    pub fn new(x_dim: usize, y_dim: usize, z_dim: usize) -> VoxelResult<Self> {
        if x_dim == 0 || y_dim == 0 || z_dim == 0 {
            return Err(VoxelError::InvalidDimensions {
                x: x_dim,
                y: y_dim,
                z: z_dim,
            });
        }
        Ok(Chunk {
            size: Vector3::new(x_dim, y_dim, z_dim),
            blocks: vec![Block::default(); x_dim * y_dim * z_dim],
            offset: Point3::new(0, 0, 0),
            mesh: ChunkMesh::default(),
            dirty: true,
        })
    }

    /// Extent of the chunk in blocks.
    pub fn size(&self) -> Vector3<usize> {
        self.size
    }

    /// Global offset recorded by the last visibility pass.
    pub fn offset(&self) -> Point3<i32> {
        self.offset
    }

    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(
            x < self.size.x && y < self.size.y && z < self.size.z,
            "local ({x}, {y}, {z}) outside chunk of size {:?}",
            self.size
        );
        (x * self.size.y + y) * self.size.z + z
    }

    /// Whether a signed local coordinate lies inside the chunk.
    #[inline]
    pub fn contains_local(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.size.x
            && (y as usize) < self.size.y
            && (z as usize) < self.size.z
    }

    /// Writes a block type at a local coordinate.
    ///
    /// Callers must keep the coordinate in range; the world is the only
    /// sanctioned path. Clears the block's visibility mask and marks the
    /// chunk dirty, but does not rebuild the mesh.
    pub fn set(&mut self, x: usize, y: usize, z: usize, block_type: BlockType) {
        let index = self.index(x, y, z);
        self.blocks[index] = Block::new(block_type);
        self.dirty = true;
    }

    /// Reads a block at an in-range local coordinate.
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[self.index(x, y, z)]
    }

    /// Reads a block at a signed local coordinate.
    ///
    /// In-range coordinates are served from the chunk. Anything else is
    /// rebased by the chunk's offset and forwarded to `source`.
    pub fn get<S: BlockSource + ?Sized>(&self, x: i32, y: i32, z: i32, source: &S) -> Block {
        if self.contains_local(x, y, z) {
            return self.get_local(x as usize, y as usize, z as usize);
        }
        source.block_at(self.offset + Vector3::new(x, y, z))
    }

    /// Fills every cell with the type `fill` yields for its local coordinate.
    pub fn fill_with<F>(&mut self, mut fill: F)
    where
        F: FnMut(usize, usize, usize) -> BlockType,
    {
        for x in 0..self.size.x {
            for y in 0..self.size.y {
                for z in 0..self.size.z {
                    let index = self.index(x, y, z);
                    self.blocks[index] = Block::new(fill(x, y, z));
                }
            }
        }
        self.dirty = true;
    }

    /// Number of non-air blocks.
    pub fn solid_block_count(&self) -> usize {
        self.blocks.iter().filter(|block| !block.is_air()).count()
    }

    /// Stored type id at a local coordinate.
    pub fn block_type_at(&self, x: usize, y: usize, z: usize) -> BlockTypeSize {
        self.get_local(x, y, z).block_type
    }

    /// The mesh built by the last visibility pass.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Vertices built by the last visibility pass.
    pub fn vertices(&self) -> &[Vertex] {
        &self.mesh.vertices
    }

    /// Vertex count from the last visibility pass.
    pub fn get_vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Whether a block changed since the last recalculation.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flags the chunk for rebuilding by the owner's dirty pass.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
