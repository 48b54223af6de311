//! Texture-atlas lookup for block faces.
//!
//! The atlas is a flat table of UV coordinates laid out in 4-entry blocks per
//! solid block type, one entry per quad corner. Block ids are 1-based, so the
//! entry for a corner is `(block_type - 1) * 4 + corner_role`.

use crate::engine_state::voxels::block::{block_type::SOLID_BLOCK_TYPE_COUNT, BlockTypeSize};
use crate::error::{VoxelError, VoxelResult};

/// The corner of a face quad a vertex sits on, as seen on the texture tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CornerRole {
    /// Lower-left corner of the tile
    LowerLeft = 0,
    /// Lower-right corner of the tile
    LowerRight = 1,
    /// Upper-left corner of the tile
    UpperLeft = 2,
    /// Upper-right corner of the tile
    UpperRight = 3,
}

/// Entries per block type in the atlas table.
pub const CORNERS_PER_BLOCK_TYPE: usize = 4;

/// Built-in table for the default tileset: one tile per solid block type,
/// laid out left to right in a single row (DIRT, GRASS, WOOD, WHITE).
///
/// Each block of four is ordered lower-left, lower-right, upper-left, upper-right.
pub static BLOCK_TEX_COORDS: [[f32; 2]; SOLID_BLOCK_TYPE_COUNT * CORNERS_PER_BLOCK_TYPE] = [
    [0.00, 1.0], [0.25, 1.0], [0.00, 0.0], [0.25, 0.0], // DIRT
    [0.25, 1.0], [0.50, 1.0], [0.25, 0.0], [0.50, 0.0], // GRASS
    [0.50, 1.0], [0.75, 1.0], [0.50, 0.0], [0.75, 0.0], // WOOD
    [0.75, 1.0], [1.00, 1.0], [0.75, 0.0], [1.00, 0.0], // WHITE
];

/// Maps (block type, corner role) to atlas UV coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureAtlas {
    coords: Vec<[f32; 2]>,
}

impl Default for TextureAtlas {
    fn default() -> Self {
        TextureAtlas {
            coords: BLOCK_TEX_COORDS.to_vec(),
        }
    }
}

impl TextureAtlas {
    /// Wraps an externally supplied table.
    ///
    /// # Errors
    /// `AtlasSize` unless the table holds exactly four entries for every solid
    /// block type.
    pub fn from_coords(coords: Vec<[f32; 2]>) -> VoxelResult<Self> {
        let expected = SOLID_BLOCK_TYPE_COUNT * CORNERS_PER_BLOCK_TYPE;
        if coords.len() != expected {
            return Err(VoxelError::AtlasSize {
                expected,
                actual: coords.len(),
            });
        }
        Ok(TextureAtlas { coords })
    }

    /// Table index for a corner of a solid block type.
    ///
    /// Returns `None` for AIR and for ids past the end of the table.
    pub fn index_of(&self, block_type: BlockTypeSize, corner: CornerRole) -> Option<usize> {
        let index = (block_type as usize).checked_sub(1)? * CORNERS_PER_BLOCK_TYPE + corner as usize;
        (index < self.coords.len()).then_some(index)
    }

    /// UV coordinate for a corner of a solid block type.
    ///
    /// AIR never reaches this lookup; an unmapped id samples the atlas origin.
    pub fn tex_coord(&self, block_type: BlockTypeSize, corner: CornerRole) -> [f32; 2] {
        match self.index_of(block_type, corner) {
            Some(index) => self.coords[index],
            None => {
                debug_assert!(false, "block type {block_type} has no atlas entry");
                [0.0, 0.0]
            }
        }
    }
}
