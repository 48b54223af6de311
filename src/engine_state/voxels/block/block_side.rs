//! # Block Side Module
//!
//! This module defines the six faces of a voxel block, the neighbour each
//! face looks at, and the bit each face owns in a block's visibility mask.

use cgmath::Vector3;

use super::VISIBILITY_COMPUTED;

/// Represents the six possible faces of a voxel block.
///
/// The discriminant order is the order in which faces are tested and emitted
/// by the mesher: right, left, bottom, back, top, front.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The right face (facing positive X)
    RIGHT = 0,

    /// The left face (facing negative X)
    LEFT = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The back face (facing negative Z)
    BACK = 3,

    /// The top face (facing positive Y)
    TOP = 4,

    /// The front face (facing positive Z)
    FRONT = 5,
}

impl BlockSide {
    /// Returns all six block faces in emission order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::BOTTOM,
            BlockSide::BACK,
            BlockSide::TOP,
            BlockSide::FRONT,
        ]
    }

    /// Offset from a block to the neighbour this face borders.
    pub fn neighbor_offset(self) -> Vector3<i32> {
        match self {
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
        }
    }

    /// The bit this face owns in a block's visibility mask.
    ///
    /// Layout: bit 5 right, 4 left, 3 bottom, 2 back, 1 top, 0 front.
    pub fn visibility_bit(self) -> u8 {
        match self {
            BlockSide::RIGHT => 0b0010_0000,
            BlockSide::LEFT => 0b0001_0000,
            BlockSide::BOTTOM => 0b0000_1000,
            BlockSide::BACK => 0b0000_0100,
            BlockSide::TOP => 0b0000_0010,
            BlockSide::FRONT => 0b0000_0001,
        }
    }

    /// The pattern OR-ed into the mask when this face is exposed: the face
    /// bit together with the "computed" bit.
    pub fn visibility_pattern(self) -> u8 {
        VISIBILITY_COMPUTED | self.visibility_bit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_patterns_match_mask_layout() {
        assert_eq!(BlockSide::RIGHT.visibility_pattern(), 0b1010_0000);
        assert_eq!(BlockSide::LEFT.visibility_pattern(), 0b1001_0000);
        assert_eq!(BlockSide::BOTTOM.visibility_pattern(), 0b1000_1000);
        assert_eq!(BlockSide::BACK.visibility_pattern(), 0b1000_0100);
        assert_eq!(BlockSide::TOP.visibility_pattern(), 0b1000_0010);
        assert_eq!(BlockSide::FRONT.visibility_pattern(), 0b1000_0001);
    }

    #[test]
    fn face_bits_are_disjoint() {
        let combined = BlockSide::all()
            .iter()
            .fold(0u8, |acc, side| {
                assert_eq!(acc & side.visibility_bit(), 0);
                acc | side.visibility_bit()
            });
        assert_eq!(combined, 0b0011_1111);
    }

    #[test]
    fn opposite_faces_have_opposite_offsets() {
        let pairs = [
            (BlockSide::RIGHT, BlockSide::LEFT),
            (BlockSide::TOP, BlockSide::BOTTOM),
            (BlockSide::FRONT, BlockSide::BACK),
        ];
        for (a, b) in pairs {
            assert_eq!(a.neighbor_offset() + b.neighbor_offset(), Vector3::new(0, 0, 0));
        }
    }
}
