//! # Engine Configuration
//!
//! Everything needed to build a world, loaded from JSON. Every field has a
//! default, so an empty object (or no file at all) yields the classic
//! 8x8x8 grid of 16³ chunks filled with Perlin terrain.
//!
//! ```json
//! {
//!     "world_size": [4, 2, 4],
//!     "origin": [-2, 0, -2],
//!     "generation": { "method": "flat", "height": 5 }
//! }
//! ```

use std::path::Path;

use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::engine_state::{
    rendering::atlas::TextureAtlas,
    voxels::{
        block::block_type::BlockType,
        chunk::CHUNK_DIMENSION,
        generation::{PERLIN_POSITIVE_THRESHOLD, PERLIN_SCALE_FACTOR},
        world::WorldLayout,
    },
};
use crate::error::{VoxelError, VoxelResult};

/// Terrain generator selection, tagged by `method`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum GenerationConfig {
    /// 3D Perlin noise.
    Perlin {
        /// Noise seed
        #[serde(default)]
        seed: u32,
        /// Multiplier applied to block coordinates before sampling
        #[serde(default = "default_perlin_scale")]
        scale: f64,
        /// Samples inside `[-threshold, threshold]` are AIR
        #[serde(default = "default_perlin_threshold")]
        threshold: f64,
    },
    /// Level ground.
    Flat {
        /// Global Y of the first air layer
        #[serde(default = "default_flat_height")]
        height: i32,
        /// Type of the buried layers
        #[serde(default = "default_flat_fill")]
        fill: BlockType,
    },
    /// Scattered random blocks.
    Random {
        /// Generator seed
        #[serde(default)]
        seed: u64,
        /// Probability that a cell stays AIR
        #[serde(default = "default_sparseness")]
        sparseness: f32,
    },
    /// Alternating DIRT and AIR.
    Checkerboard,
    /// One solid type everywhere.
    Solid {
        /// The fill type
        #[serde(default = "default_flat_fill")]
        block: BlockType,
    },
    /// Nothing at all.
    Empty,
}

fn default_perlin_scale() -> f64 {
    PERLIN_SCALE_FACTOR
}

fn default_perlin_threshold() -> f64 {
    PERLIN_POSITIVE_THRESHOLD
}

fn default_flat_height() -> i32 {
    4
}

fn default_flat_fill() -> BlockType {
    BlockType::DIRT
}

fn default_sparseness() -> f32 {
    0.9
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig::Perlin {
            seed: 0,
            scale: default_perlin_scale(),
            threshold: default_perlin_threshold(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Chunks along each axis
    pub world_size: [u32; 3],
    /// Blocks per chunk along each axis
    pub chunk_size: [u32; 3],
    /// Chunk coordinate of the first grid cell
    pub origin: [i32; 3],
    /// Terrain generator
    pub generation: GenerationConfig,
    /// Replacement texture atlas table, four entries per solid block type
    pub atlas: Option<Vec<[f32; 2]>>,
    /// Player spawn point in block units
    pub spawn: [f32; 3],
}

impl Default for EngineConfig {
    fn default() -> Self {
        let chunk = CHUNK_DIMENSION as u32;
        EngineConfig {
            world_size: [8, 8, 8],
            chunk_size: [chunk, chunk, chunk],
            origin: [0, 0, 0],
            generation: GenerationConfig::default(),
            atlas: None,
            spawn: [0.5, 5.0, 0.5],
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> VoxelResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn load(path: impl AsRef<Path>) -> VoxelResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks every size is non-zero, the grid's blocks are addressable with
    /// `i32` coordinates, and the atlas table, if any, is complete.
    pub fn validate(&self) -> VoxelResult<()> {
        if self.world_size.contains(&0) {
            return Err(VoxelError::InvalidConfig(format!(
                "world_size {:?} has a zero axis",
                self.world_size
            )));
        }
        if self.chunk_size.contains(&0) {
            return Err(VoxelError::InvalidConfig(format!(
                "chunk_size {:?} has a zero axis",
                self.chunk_size
            )));
        }
        WorldLayout::new(self.world_size(), self.chunk_size(), self.origin())
            .map_err(|err| VoxelError::InvalidConfig(err.to_string()))?;
        if let GenerationConfig::Random { sparseness, .. } = self.generation {
            if !(0.0..=1.0).contains(&sparseness) {
                return Err(VoxelError::InvalidConfig(format!(
                    "sparseness {sparseness} outside [0, 1]"
                )));
            }
        }
        self.texture_atlas().map(|_| ())
    }

    /// Grid dimensions as a vector.
    pub fn world_size(&self) -> Vector3<usize> {
        let [x, y, z] = self.world_size;
        Vector3::new(x as usize, y as usize, z as usize)
    }

    /// Chunk dimensions as a vector.
    pub fn chunk_size(&self) -> Vector3<usize> {
        let [x, y, z] = self.chunk_size;
        Vector3::new(x as usize, y as usize, z as usize)
    }

    /// Grid origin as a chunk coordinate.
    pub fn origin(&self) -> Point3<i32> {
        Point3::from(self.origin)
    }

    /// Spawn point as a position.
    pub fn spawn(&self) -> Point3<f32> {
        Point3::from(self.spawn)
    }

    /// The configured atlas, or the built-in one.
    pub fn texture_atlas(&self) -> VoxelResult<TextureAtlas> {
        match &self.atlas {
            Some(coords) => TextureAtlas::from_coords(coords.clone()),
            None => Ok(TextureAtlas::default()),
        }
    }
}
