//! # Engine State Module
//!
//! The single-threaded coordinator of the voxel engine: it owns the world,
//! the terrain generator and the mesh uploader, and exposes the edits a
//! game loop drives.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `rendering` - Vertex format, atlas, quad geometry and mesh uploaders
//! * `voxels` - Blocks, chunks, the world grid and terrain generation
//!
//! ## Edit path
//!
//! Editing blocks never rebuilds meshes by itself. [`EngineState::remove_blocks_around`]
//! writes its blocks first and then rebuilds the chunk under the player plus
//! its eight horizontal neighbours, so faces along chunk boundaries stay in
//! agreement on both sides.

use cgmath::{Point3, Vector3};
use log::{debug, info};

use rendering::MeshUploader;
use voxels::{
    block::block_type::BlockType,
    generation::{build_generator, TerrainGenerator},
    world::{checked_offset, World},
};

use crate::config::EngineConfig;
use crate::error::{VoxelError, VoxelResult};

pub mod rendering;
pub mod voxels;

/// Offsets, relative to the player's block, cleared by [`EngineState::remove_blocks_around`].
const REMOVAL_PATTERN: [[i32; 3]; 8] = [
    [1, 0, 0],
    [-1, 0, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
    [0, -1, 1],
    [0, -1, -1],
];

/// Chunk steps, in units of one chunk, rebuilt after a removal.
const REBUILD_PATTERN: [[i32; 2]; 9] = [
    [0, 0],
    [-1, 0],
    [1, 0],
    [0, 1],
    [0, -1],
    [-1, 1],
    [-1, -1],
    [1, 1],
    [1, -1],
];

/// The main state container for the voxel engine
///
/// # Examples
///
/// ```
/// use voxel_world::config::{EngineConfig, GenerationConfig};
/// use voxel_world::engine_state::{
///     rendering::MeshStatistics, voxels::block::block_type::BlockType, EngineState,
/// };
///
/// let config = EngineConfig {
///     world_size: [2, 1, 2],
///     generation: GenerationConfig::Flat { height: 4, fill: BlockType::DIRT },
///     ..Default::default()
/// };
/// let mut engine = EngineState::new(config, MeshStatistics::default()).unwrap();
/// engine.remove_blocks_around(cgmath::Point3::new(8.5, 4.0, 8.5));
/// assert!(engine.world().get_block(9, 3, 8).is_air());
/// ```
pub struct EngineState<U: MeshUploader> {
    config: EngineConfig,
    world: World,
    generator: Box<dyn TerrainGenerator>,
    uploader: U,
    player_position: Point3<f32>,
}

impl<U: MeshUploader> EngineState<U> {
    /// Builds the world described by `config`, fills it and uploads every mesh.
    ///
    /// # Errors
    /// Any validation error of `config`.
    pub fn new(config: EngineConfig, mut uploader: U) -> VoxelResult<Self> {
        config.validate()?;
        let mut world = World::load(
            config.world_size(),
            config.chunk_size(),
            config.origin(),
            config.texture_atlas()?,
        )?;
        let mut generator = build_generator(&config.generation);
        world.generate(generator.as_mut(), &mut uploader);

        Ok(EngineState {
            player_position: config.spawn(),
            config,
            world,
            generator,
            uploader,
        })
    }

    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world, for direct edits. Callers rebuild meshes themselves.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The uploader receiving rebuilt meshes.
    pub fn uploader(&self) -> &U {
        &self.uploader
    }

    /// The configuration the engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current player position.
    pub fn player_position(&self) -> Point3<f32> {
        self.player_position
    }

    /// Moves the player.
    pub fn set_player_position(&mut self, position: Point3<f32>) {
        self.player_position = position;
    }

    /// Sets one block and immediately rebuilds every chunk whose surface it touches.
    ///
    /// # Errors
    /// `OutOfWorldBounds` when the coordinate is outside the world.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> VoxelResult<()> {
        self.world.set_block(x, y, z, block_type)?;
        self.world.recalculate_dirty(&mut self.uploader);
        Ok(())
    }

    /// Digs around `position`: clears the four horizontal neighbours of the
    /// player's block and the four below them, then rebuilds the chunk
    /// under the player and its eight horizontal neighbours.
    ///
    /// Blocks or chunks outside the world are skipped.
    ///
    /// # Returns
    /// The number of chunks rebuilt.
    pub fn remove_blocks_around(&mut self, position: Point3<f32>) -> usize {
        let center = Point3::new(
            position.x.floor() as i32,
            position.y.floor() as i32,
            position.z.floor() as i32,
        );

        for [dx, dy, dz] in REMOVAL_PATTERN {
            let Some(target) = checked_offset(center, Vector3::new(dx, dy, dz)) else {
                debug!("skipping removal next to {:?}, past the coordinate range", center);
                continue;
            };
            match self.world.set_block(target.x, target.y, target.z, BlockType::AIR) {
                Ok(()) => {}
                Err(VoxelError::OutOfWorldBounds { x, y, z }) => {
                    debug!("skipping removal at ({x}, {y}, {z}) outside the world");
                }
                Err(err) => debug!("removal failed: {err}"),
            }
        }

        let chunk_size = self.world.layout().chunk_size().cast::<i32>();
        let mut rebuilt = 0;
        for [step_x, step_z] in REBUILD_PATTERN {
            let target = chunk_size.and_then(|size| {
                let step = Vector3::new(step_x.checked_mul(size.x)?, 0, step_z.checked_mul(size.z)?);
                checked_offset(center, step)
            });
            let Some(target) = target else {
                debug!("skipping recalculation {step_x},{step_z} chunks from {:?}", center);
                continue;
            };
            match self.world.recalculate_chunk(target.x, target.y, target.z, &mut self.uploader) {
                Ok(_) => rebuilt += 1,
                Err(err) => debug!("skipping recalculation: {err}"),
            }
        }

        // The lower ring can fall into the chunk below the player.
        rebuilt += self.world.recalculate_dirty(&mut self.uploader);
        debug!("removed blocks around {:?}, rebuilt {rebuilt} chunks", center);
        rebuilt
    }

    /// Refills the whole world from the generator and resets the player to
    /// the spawn point.
    pub fn regenerate(&mut self) {
        info!("regenerating");
        self.world.generate(self.generator.as_mut(), &mut self.uploader);
        self.player_position = self.config.spawn();
    }
}
