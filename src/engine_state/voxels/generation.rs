//! # Terrain Generation
//!
//! Generators populate a chunk's blocks from its global offset. They only
//! ever write block types; meshing happens afterwards, once every chunk of
//! the world has been filled.
//!
//! Supported strategies:
//! - Perlin noise for natural-looking terrain
//! - Flat layered ground
//! - Sparse random blocks
//! - Checkerboard pattern for testing
//! - Solid chunks (all blocks filled)
//! - Empty chunks (all blocks air)

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use super::{block::block_type::BlockType, chunk::Chunk};
use crate::config::GenerationConfig;

/// Threshold above which Perlin noise is considered solid for terrain generation.
pub const PERLIN_POSITIVE_THRESHOLD: f64 = 0.2;
/// Threshold below which Perlin noise is considered solid for terrain generation.
pub const PERLIN_NEGATIVE_THRESHOLD: f64 = -0.2;
/// Scaling factor applied to world coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.02;

/// Fills chunks with block types.
pub trait TerrainGenerator {
    /// Overwrites every cell of `chunk`, whose local origin sits at the
    /// global block coordinate `offset`.
    fn fill(&mut self, chunk: &mut Chunk, offset: Point3<i32>);
}

fn global(offset: Point3<i32>, x: usize, y: usize, z: usize) -> Point3<i32> {
    Point3::new(offset.x + x as i32, offset.y + y as i32, offset.z + z as i32)
}

/// Caves and overhangs carved from 3D Perlin noise.
///
/// A cell is solid when the noise sample leaves the band
/// `[-threshold, threshold]`. Solid cells with open space above become
/// GRASS, the rest DIRT.
pub struct PerlinTerrain {
    perlin: Perlin,
    scale: f64,
    threshold: f64,
}

impl PerlinTerrain {
    /// Creates a Perlin generator with the given seed and the default
    /// scale and threshold.
    pub fn new(seed: u32) -> Self {
        Self::with_parameters(seed, PERLIN_SCALE_FACTOR, PERLIN_POSITIVE_THRESHOLD)
    }

    /// Creates a Perlin generator with explicit sampling parameters.
    pub fn with_parameters(seed: u32, scale: f64, threshold: f64) -> Self {
        PerlinTerrain {
            perlin: Perlin::new(seed),
            scale,
            threshold: threshold.abs(),
        }
    }

    fn is_solid(&self, position: Point3<i32>) -> bool {
        let sample = self.perlin.get([
            position.x as f64 * self.scale,
            position.y as f64 * self.scale,
            position.z as f64 * self.scale,
        ]);
        !(-self.threshold..=self.threshold).contains(&sample)
    }
}

impl TerrainGenerator for PerlinTerrain {
    fn fill(&mut self, chunk: &mut Chunk, offset: Point3<i32>) {
        chunk.fill_with(|x, y, z| {
            let position = global(offset, x, y, z);
            if !self.is_solid(position) {
                BlockType::AIR
            } else if self.is_solid(position + cgmath::Vector3::unit_y()) {
                BlockType::DIRT
            } else {
                BlockType::GRASS
            }
        });
    }
}

/// Level ground: everything below `height` is solid, topped with grass.
pub struct FlatTerrain {
    /// Global Y of the first air layer.
    pub height: i32,
    /// Type of the buried layers.
    pub fill: BlockType,
}

impl TerrainGenerator for FlatTerrain {
    fn fill(&mut self, chunk: &mut Chunk, offset: Point3<i32>) {
        let height = self.height;
        let fill = self.fill;
        chunk.fill_with(|_, y, _| {
            let global_y = offset.y + y as i32;
            if global_y >= height {
                BlockType::AIR
            } else if global_y == height - 1 {
                BlockType::GRASS
            } else {
                fill
            }
        });
    }
}

/// Scattered blocks of random solid types.
///
/// Each cell independently becomes solid with probability `1 - sparseness`.
pub struct RandomTerrain {
    rng: fastrand::Rng,
    sparseness: f32,
}

impl RandomTerrain {
    /// Creates a seeded generator.
    pub fn new(seed: u64, sparseness: f32) -> Self {
        RandomTerrain {
            rng: fastrand::Rng::with_seed(seed),
            sparseness: sparseness.clamp(0.0, 1.0),
        }
    }
}

impl TerrainGenerator for RandomTerrain {
    fn fill(&mut self, chunk: &mut Chunk, _offset: Point3<i32>) {
        let rng = &mut self.rng;
        let sparseness = self.sparseness;
        chunk.fill_with(|_, _, _| {
            if rng.f32() < sparseness {
                BlockType::AIR
            } else {
                BlockType::get_random_type(rng)
            }
        });
    }
}

/// Alternates DIRT and AIR along every axis, in global coordinates.
pub struct Checkerboard;

impl TerrainGenerator for Checkerboard {
    fn fill(&mut self, chunk: &mut Chunk, offset: Point3<i32>) {
        chunk.fill_with(|x, y, z| {
            let position = global(offset, x, y, z);
            if (position.x + position.y + position.z).rem_euclid(2) == 0 {
                BlockType::DIRT
            } else {
                BlockType::AIR
            }
        });
    }
}

/// Every cell the same solid type.
pub struct Solid(pub BlockType);

impl TerrainGenerator for Solid {
    fn fill(&mut self, chunk: &mut Chunk, _offset: Point3<i32>) {
        let block_type = self.0;
        chunk.fill_with(|_, _, _| block_type);
    }
}

/// Every cell AIR.
pub struct Empty;

impl TerrainGenerator for Empty {
    fn fill(&mut self, chunk: &mut Chunk, _offset: Point3<i32>) {
        chunk.fill_with(|_, _, _| BlockType::AIR);
    }
}

/// Builds the generator a configuration names.
pub fn build_generator(config: &GenerationConfig) -> Box<dyn TerrainGenerator> {
    match *config {
        GenerationConfig::Perlin {
            seed,
            scale,
            threshold,
        } => Box::new(PerlinTerrain::with_parameters(seed, scale, threshold)),
        GenerationConfig::Flat { height, fill } => Box::new(FlatTerrain { height, fill }),
        GenerationConfig::Random { seed, sparseness } => {
            Box::new(RandomTerrain::new(seed, sparseness))
        }
        GenerationConfig::Checkerboard => Box::new(Checkerboard),
        GenerationConfig::Solid { block } => Box::new(Solid(block)),
        GenerationConfig::Empty => Box::new(Empty),
    }
}
