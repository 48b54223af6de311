//! # World Module
//!
//! This module provides the `World` struct which owns every chunk of the
//! loaded region and maps global block coordinates onto them.
//!
//! ## Architecture
//!
//! Chunks sit on a dense 3D grid starting at a configurable chunk-space
//! origin. A global coordinate is split into (chunk, local) with floor
//! division, so negative coordinates land in the chunk below/behind them.
//!
//! ## Out-of-world policy
//!
//! Reads outside the loaded grid resolve to AIR ([`World::get_block`]) or
//! fail with `OutOfWorldBounds` ([`World::try_get_block`]). Writes and
//! recalculations outside the grid are rejected with `OutOfWorldBounds`.
//!
//! ## Recalculation
//!
//! Rebuilding a chunk borrows it mutably while the rest of the grid is
//! borrowed immutably through a [`ChunkNeighborhood`], which answers the
//! chunk's boundary queries. Meshes are only rebuilt when a caller asks.

use std::cmp::Ordering;

use cgmath::{Point3, Vector3};
use log::{debug, info, trace};
use web_time::Instant;

use super::{
    block::{block_side::BlockSide, block_type::BlockType, Block},
    chunk::{BlockSource, Chunk},
    generation::TerrainGenerator,
};
use crate::engine_state::rendering::{atlas::TextureAtlas, MeshUploader};
use crate::error::{VoxelError, VoxelResult};

/// Geometry of the chunk grid: how many chunks, how big, and where.
///
/// A layout only exists once every block it covers, plus a one-block
/// margin on each side, is addressable with `i32` coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorldLayout {
    grid_size: Vector3<usize>,
    chunk_size: Vector3<usize>,
    block_size: Vector3<i32>,
    origin: Point3<i32>,
}

impl WorldLayout {
    /// Creates a layout after checking every extent is non-zero and the
    /// covered block range fits in `i32`.
    ///
    /// # Errors
    /// `InvalidDimensions` for a zero axis, `ExtentOverflow` for a grid that
    /// reaches past the `i32` block range or whose chunk count overflows.
    pub fn new(
        grid_size: Vector3<usize>,
        chunk_size: Vector3<usize>,
        origin: Point3<i32>,
    ) -> VoxelResult<Self> {
        for size in [grid_size, chunk_size] {
            if size.x == 0 || size.y == 0 || size.z == 0 {
                return Err(VoxelError::InvalidDimensions {
                    x: size.x,
                    y: size.y,
                    z: size.z,
                });
            }
        }
        let overflow = || VoxelError::ExtentOverflow {
            grid: grid_size.into(),
            origin: origin.into(),
        };
        grid_size
            .x
            .checked_mul(grid_size.y)
            .and_then(|count| count.checked_mul(grid_size.z))
            .ok_or_else(overflow)?;
        let block_size = Vector3::new(
            Self::axis_block_size(grid_size.x, chunk_size.x, origin.x).ok_or_else(overflow)?,
            Self::axis_block_size(grid_size.y, chunk_size.y, origin.y).ok_or_else(overflow)?,
            Self::axis_block_size(grid_size.z, chunk_size.z, origin.z).ok_or_else(overflow)?,
        );

        Ok(WorldLayout {
            grid_size,
            chunk_size,
            block_size,
            origin,
        })
    }

    /// Chunk size on one axis as `i32`, if the first block minus one and the
    /// last block plus one are both representable.
    fn axis_block_size(grid: usize, chunk: usize, origin: i32) -> Option<i32> {
        let chunk = i32::try_from(chunk).ok()?;
        let grid = i64::try_from(grid).ok()?;
        let first = i64::from(origin).checked_mul(i64::from(chunk))?;
        let end = i64::from(origin)
            .checked_add(grid)?
            .checked_mul(i64::from(chunk))?;
        (first > i64::from(i32::MIN) && end <= i64::from(i32::MAX)).then_some(chunk)
    }

    /// Number of chunks along each axis.
    pub fn grid_size(&self) -> Vector3<usize> {
        self.grid_size
    }

    /// Number of blocks per chunk along each axis.
    pub fn chunk_size(&self) -> Vector3<usize> {
        self.chunk_size
    }

    /// Chunk coordinate of the first grid cell.
    pub fn origin(&self) -> Point3<i32> {
        self.origin
    }

    /// Total number of chunks in the grid.
    pub fn chunk_count(&self) -> usize {
        self.grid_size.x * self.grid_size.y * self.grid_size.z
    }

    /// Chunk coordinate (not grid index) containing a global block coordinate.
    pub fn chunk_coordinate(&self, position: Point3<i32>) -> Point3<i32> {
        let size = self.block_size;
        Point3::new(
            position.x.div_euclid(size.x),
            position.y.div_euclid(size.y),
            position.z.div_euclid(size.z),
        )
    }

    /// Grid index of a chunk coordinate, if it lies inside the grid.
    pub fn index_of_chunk(&self, chunk: Point3<i32>) -> Option<usize> {
        let cell = Vector3::new(
            usize::try_from(chunk.x.checked_sub(self.origin.x)?).ok()?,
            usize::try_from(chunk.y.checked_sub(self.origin.y)?).ok()?,
            usize::try_from(chunk.z.checked_sub(self.origin.z)?).ok()?,
        );
        if cell.x >= self.grid_size.x || cell.y >= self.grid_size.y || cell.z >= self.grid_size.z {
            return None;
        }
        Some((cell.x * self.grid_size.y + cell.y) * self.grid_size.z + cell.z)
    }

    /// Chunk coordinate of a grid index.
    pub fn chunk_at_index(&self, index: usize) -> Point3<i32> {
        let z = index % self.grid_size.z;
        let y = (index / self.grid_size.z) % self.grid_size.y;
        let x = index / (self.grid_size.z * self.grid_size.y);
        self.origin + Vector3::new(x as i32, y as i32, z as i32)
    }

    /// Global block coordinate of a chunk's local origin.
    pub fn chunk_offset(&self, index: usize) -> Point3<i32> {
        let chunk = self.chunk_at_index(index);
        let size = self.block_size;
        Point3::new(chunk.x * size.x, chunk.y * size.y, chunk.z * size.z)
    }

    /// Splits a global block coordinate into (grid index, local coordinate).
    pub fn locate(&self, position: Point3<i32>) -> Option<(usize, Point3<usize>)> {
        let index = self.index_of_chunk(self.chunk_coordinate(position))?;
        let size = self.block_size;
        let local = Point3::new(
            position.x.rem_euclid(size.x) as usize,
            position.y.rem_euclid(size.y) as usize,
            position.z.rem_euclid(size.z) as usize,
        );
        Some((index, local))
    }

    /// Grid indices of every chunk a block touches: its own, plus each
    /// neighbour across a face that lies on the chunk boundary.
    pub fn chunks_touching(&self, position: Point3<i32>) -> Vec<usize> {
        let mut touched = Vec::with_capacity(4);
        let Some((own, _)) = self.locate(position) else {
            return touched;
        };
        touched.push(own);
        for side in BlockSide::all() {
            let Some(neighbour) = checked_offset(position, side.neighbor_offset()) else {
                continue;
            };
            if let Some((index, _)) = self.locate(neighbour) {
                if !touched.contains(&index) {
                    touched.push(index);
                }
            }
        }
        touched
    }
}

/// `position + offset`, or `None` when an axis leaves the `i32` range.
pub fn checked_offset(position: Point3<i32>, offset: Vector3<i32>) -> Option<Point3<i32>> {
    Some(Point3::new(
        position.x.checked_add(offset.x)?,
        position.y.checked_add(offset.y)?,
        position.z.checked_add(offset.z)?,
    ))
}

/// Read-only view of every chunk except the one being rebuilt.
///
/// Produced by splitting the chunk table around the target index, so the
/// target can be borrowed mutably while its neighbours are read.
pub struct ChunkNeighborhood<'a> {
    layout: &'a WorldLayout,
    before: &'a [Chunk],
    after: &'a [Chunk],
}

impl BlockSource for ChunkNeighborhood<'_> {
    fn block_at(&self, position: Point3<i32>) -> Block {
        let Some((index, local)) = self.layout.locate(position) else {
            return Block::default();
        };
        let split = self.before.len();
        let chunk = match index.cmp(&split) {
            Ordering::Less => &self.before[index],
            Ordering::Greater => &self.after[index - split - 1],
            Ordering::Equal => {
                debug_assert!(false, "chunk {index} forwarded a query for its own block");
                return Block::default();
            }
        };
        chunk.get_local(local.x, local.y, local.z)
    }
}

/// Represents the loaded voxel world: a dense grid of chunks.
///
/// # Examples
///
/// ```
/// use cgmath::{Point3, Vector3};
/// use voxel_world::engine_state::rendering::{atlas::TextureAtlas, MeshStatistics};
/// use voxel_world::engine_state::voxels::{block::block_type::BlockType, world::World};
///
/// let mut world = World::load(
///     Vector3::new(2, 1, 2),
///     Vector3::new(16, 16, 16),
///     Point3::new(0, 0, 0),
///     TextureAtlas::default(),
/// )
/// .unwrap();
/// world.set_block(3, 4, 5, BlockType::DIRT).unwrap();
/// let mut stats = MeshStatistics::default();
/// assert_eq!(world.recalculate_chunk(3, 4, 5, &mut stats).unwrap(), 24);
/// ```
pub struct World {
    layout: WorldLayout,
    chunks: Vec<Chunk>,
    atlas: TextureAtlas,
}

impl World {
    /// Allocates every chunk of the grid, all AIR, with empty meshes.
    ///
    /// # Arguments
    /// * `grid_size` - Number of chunks along each axis
    /// * `chunk_size` - Number of blocks per chunk along each axis
    /// * `origin` - Chunk coordinate of the first grid cell
    /// * `atlas` - Texture lookup used when meshing
    pub fn load(
        grid_size: Vector3<usize>,
        chunk_size: Vector3<usize>,
        origin: Point3<i32>,
        atlas: TextureAtlas,
    ) -> VoxelResult<Self> {
        let layout = WorldLayout::new(grid_size, chunk_size, origin)?;
        let chunks = (0..layout.chunk_count())
            .map(|_| Chunk::new(chunk_size.x, chunk_size.y, chunk_size.z))
            .collect::<VoxelResult<Vec<_>>>()?;
        debug!(
            "loaded {} chunks of {:?} blocks from chunk {:?}",
            chunks.len(),
            chunk_size,
            origin
        );
        Ok(World {
            layout,
            chunks,
            atlas,
        })
    }

    /// Grid geometry.
    pub fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    /// Texture lookup used when meshing.
    pub fn atlas(&self) -> &TextureAtlas {
        &self.atlas
    }

    /// All chunks in grid order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunk by grid index.
    pub fn chunk(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    /// Grid index of the chunk holding a global block coordinate.
    pub fn chunk_index_at(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        self.layout.locate(Point3::new(x, y, z)).map(|(index, _)| index)
    }

    /// Whether a global block coordinate lies inside the loaded grid.
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.chunk_index_at(x, y, z).is_some()
    }

    /// Sum of the vertex counts of every chunk's current mesh.
    pub fn total_vertex_count(&self) -> usize {
        self.chunks.iter().map(Chunk::get_vertex_count).sum()
    }

    /// Reads the block at a global coordinate; outside the world reads AIR.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Block {
        self.try_get_block(x, y, z).unwrap_or_default()
    }

    /// Reads the block at a global coordinate.
    ///
    /// # Errors
    /// `OutOfWorldBounds` when no loaded chunk holds the coordinate.
    pub fn try_get_block(&self, x: i32, y: i32, z: i32) -> VoxelResult<Block> {
        let (index, local) = self
            .layout
            .locate(Point3::new(x, y, z))
            .ok_or(VoxelError::OutOfWorldBounds { x, y, z })?;
        Ok(self.chunks[index].get_local(local.x, local.y, local.z))
    }

    /// Reads the block containing a continuous position.
    pub fn block_at_point(&self, point: Point3<f32>) -> Block {
        self.get_block(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        )
    }

    /// Writes a block type at a global coordinate.
    ///
    /// The owning chunk, and any neighbour chunk across a face the block
    /// touches, are marked dirty. No mesh is rebuilt.
    ///
    /// # Errors
    /// `OutOfWorldBounds` when no loaded chunk holds the coordinate.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> VoxelResult<()> {
        let position = Point3::new(x, y, z);
        let (index, local) = self
            .layout
            .locate(position)
            .ok_or(VoxelError::OutOfWorldBounds { x, y, z })?;
        self.chunks[index].set(local.x, local.y, local.z, block_type);
        for touched in self.layout.chunks_touching(position) {
            self.chunks[touched].mark_dirty();
        }
        Ok(())
    }

    /// Rebuilds the mesh of the chunk holding a global coordinate and hands
    /// it to `uploader`.
    ///
    /// Callers are responsible for also recalculating neighbours whose
    /// surface an edit may have changed.
    ///
    /// # Returns
    /// The rebuilt chunk's vertex count.
    ///
    /// # Errors
    /// `OutOfWorldBounds` when no loaded chunk holds the coordinate.
    pub fn recalculate_chunk<U: MeshUploader + ?Sized>(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        uploader: &mut U,
    ) -> VoxelResult<usize> {
        let index = self
            .chunk_index_at(x, y, z)
            .ok_or(VoxelError::OutOfWorldBounds { x, y, z })?;
        Ok(self.recalculate_chunk_at_index(index, uploader))
    }

    /// Rebuilds the mesh of the chunk at a grid index and uploads it.
    ///
    /// # Panics
    /// Panics if `index` is not a valid grid index.
    pub fn recalculate_chunk_at_index<U: MeshUploader + ?Sized>(
        &mut self,
        index: usize,
        uploader: &mut U,
    ) -> usize {
        let offset = self.layout.chunk_offset(index);
        let (before, rest) = self.chunks.split_at_mut(index);
        let (chunk, after) = rest
            .split_first_mut()
            .unwrap_or_else(|| panic!("chunk index {index} outside the world grid"));
        let neighborhood = ChunkNeighborhood {
            layout: &self.layout,
            before,
            after,
        };
        let vertex_count = chunk.calculate_visible_sides(offset, &neighborhood, &self.atlas);
        uploader.upload(index, chunk.mesh());
        trace!("recalculated chunk {index} at {:?}", offset);
        vertex_count
    }

    /// Rebuilds and uploads every chunk.
    pub fn recalculate_all<U: MeshUploader + ?Sized>(&mut self, uploader: &mut U) -> usize {
        (0..self.chunks.len())
            .map(|index| self.recalculate_chunk_at_index(index, uploader))
            .sum()
    }

    /// Rebuilds and uploads every chunk marked dirty.
    ///
    /// # Returns
    /// The number of chunks rebuilt.
    pub fn recalculate_dirty<U: MeshUploader + ?Sized>(&mut self, uploader: &mut U) -> usize {
        let dirty: Vec<usize> = (0..self.chunks.len())
            .filter(|index| self.chunks[*index].is_dirty())
            .collect();
        for index in &dirty {
            self.recalculate_chunk_at_index(*index, uploader);
        }
        dirty.len()
    }

    /// Fills every chunk from `generator`, then meshes and uploads them all.
    ///
    /// On return every chunk is populated and has a current mesh. Calling it
    /// again regenerates the whole world.
    pub fn generate<G, U>(&mut self, generator: &mut G, uploader: &mut U)
    where
        G: TerrainGenerator + ?Sized,
        U: MeshUploader + ?Sized,
    {
        let start = Instant::now();
        for index in 0..self.chunks.len() {
            let offset = self.layout.chunk_offset(index);
            generator.fill(&mut self.chunks[index], offset);
        }
        let vertex_count = self.recalculate_all(uploader);
        info!(
            "world generation took {} seconds ({} chunks, {} vertices)",
            start.elapsed().as_secs_f32(),
            self.chunks.len(),
            vertex_count
        );
    }
}

impl BlockSource for World {
    fn block_at(&self, position: Point3<i32>) -> Block {
        self.get_block(position.x, position.y, position.z)
    }
}
