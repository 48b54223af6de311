//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! Solid ids are 1-based because the texture atlas is indexed by `id - 1`.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::BlockTypeSize;

/// Number of block types that are ever meshed (every variant except AIR).
pub const SOLID_BLOCK_TYPE_COUNT: usize = 4;

/// Enumerates all possible block types in the voxel world.
///
/// The `FromPrimitive` derive allows conversion from the compact stored id.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Empty space. Never rendered, always transparent to its neighbours.
    AIR = 0,

    /// A basic dirt block.
    DIRT = 1,

    /// A grass block, used for surface layers.
    GRASS = 2,

    /// A wooden block.
    WOOD = 3,

    /// A plain white block, often used for testing.
    WHITE = 4,
}

impl BlockType {
    /// Converts a stored `BlockTypeSize` to a `BlockType`.
    ///
    /// # Returns
    /// `None` if the id does not name a known block type.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Draws a uniformly random solid block type from `rng`.
    pub fn get_random_type(rng: &mut fastrand::Rng) -> Self {
        let id = rng.u8(1..=SOLID_BLOCK_TYPE_COUNT as BlockTypeSize);
        Self::get_block_type_from_int(id).unwrap_or(BlockType::DIRT)
    }

    /// Returns `true` for every type except AIR.
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_the_stored_size() {
        for block_type in [
            BlockType::AIR,
            BlockType::DIRT,
            BlockType::GRASS,
            BlockType::WOOD,
            BlockType::WHITE,
        ] {
            assert_eq!(
                BlockType::get_block_type_from_int(block_type as BlockTypeSize),
                Some(block_type)
            );
        }
        assert_eq!(BlockType::get_block_type_from_int(5), None);
    }

    #[test]
    fn random_types_are_never_air() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..256 {
            assert!(BlockType::get_random_type(&mut rng).is_solid());
        }
    }

    #[test]
    fn names_deserialize_lowercase() {
        let parsed: BlockType = serde_json::from_str("\"grass\"").unwrap();
        assert_eq!(parsed, BlockType::GRASS);
    }
}
