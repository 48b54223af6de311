//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, and the per-block
//! visibility mask written by the chunk mesher.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Set on a block's visibility mask once its faces have been evaluated.
pub const VISIBILITY_COMPUTED: u8 = 0b1000_0000;

/// Represents a single voxel block in the world.
///
/// A block is a type id plus a visibility mask. The mask is diagnostic only:
/// bit 7 marks "computed" and bits 5..0 record which faces
/// (right, left, bottom, back, top, front) were exposed at the last
/// recalculation. Meshing never reads it back.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute keeps the two bytes tightly packed.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, Default, PartialEq, Eq)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
    /// Faces found exposed the last time visibility was computed.
    pub visible: u8,
}

impl Block {
    /// Creates a new block of the specified type with a cleared visibility mask.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
            visible: 0,
        }
    }

    /// Returns `true` for the AIR sentinel.
    #[inline]
    pub fn is_air(&self) -> bool {
        self.block_type == BlockType::AIR as BlockTypeSize
    }

    /// Returns the rich block type, or `None` when the stored id is unknown.
    pub fn get_block_type(&self) -> Option<BlockType> {
        BlockType::get_block_type_from_int(self.block_type)
    }

    /// Whether the mask holds a result from a visibility pass.
    pub fn is_visibility_computed(&self) -> bool {
        self.visible & VISIBILITY_COMPUTED != 0
    }
}
