use cgmath::{Point3, Vector3};

use crate::engine_state::{
    rendering::{
        atlas::{CornerRole, TextureAtlas},
        Vertex,
    },
    voxels::block::{block_side::BlockSide, BlockTypeSize},
};

/// Corner offsets (relative to the block position) and their tile roles,
/// in emission order, for every side.
///
/// Blocks span `x ± 0.5`, `y ± 0.5` and `z - 1 ..= z`. Every side is wound
/// counter-clockwise when viewed from outside the block, so the renderer can
/// cull back faces.
const fn corners(side: BlockSide) -> [([f32; 3], CornerRole); 4] {
    use CornerRole::*;
    match side {
        BlockSide::RIGHT => [
            ([0.5, -0.5, 0.0], LowerLeft),
            ([0.5, -0.5, -1.0], LowerRight),
            ([0.5, 0.5, -1.0], UpperRight),
            ([0.5, 0.5, 0.0], UpperLeft),
        ],
        BlockSide::LEFT => [
            ([-0.5, -0.5, -1.0], LowerLeft),
            ([-0.5, -0.5, 0.0], LowerRight),
            ([-0.5, 0.5, 0.0], UpperRight),
            ([-0.5, 0.5, -1.0], UpperLeft),
        ],
        BlockSide::BOTTOM => [
            ([-0.5, -0.5, -1.0], LowerLeft),
            ([0.5, -0.5, -1.0], LowerRight),
            ([0.5, -0.5, 0.0], UpperRight),
            ([-0.5, -0.5, 0.0], UpperLeft),
        ],
        BlockSide::BACK => [
            ([0.5, -0.5, -1.0], LowerLeft),
            ([-0.5, -0.5, -1.0], LowerRight),
            ([-0.5, 0.5, -1.0], UpperRight),
            ([0.5, 0.5, -1.0], UpperLeft),
        ],
        BlockSide::TOP => [
            ([-0.5, 0.5, 0.0], UpperLeft),
            ([0.5, 0.5, 0.0], UpperRight),
            ([0.5, 0.5, -1.0], LowerRight),
            ([-0.5, 0.5, -1.0], LowerLeft),
        ],
        BlockSide::FRONT => [
            ([-0.5, -0.5, 0.0], LowerLeft),
            ([0.5, -0.5, 0.0], LowerRight),
            ([0.5, 0.5, 0.0], UpperRight),
            ([-0.5, 0.5, 0.0], UpperLeft),
        ],
    }
}

/// Represents a single exposed quad face of a voxel.
///
/// A face is anchored at the block's global position and knows which side of
/// the block it covers and which block type textures it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Global position of the owning block
    pub position: Point3<i32>,
    /// The block type id, used for texture mapping
    pub block_type_int: BlockTypeSize,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates a new face for the block at `position`.
    pub fn new(position: Point3<i32>, block_type_int: BlockTypeSize, block_side: BlockSide) -> Self {
        Face {
            position,
            block_type_int,
            block_side,
        }
    }

    /// Builds the four vertices of this face in winding order.
    pub fn vertices(&self, atlas: &TextureAtlas) -> [Vertex; 4] {
        let origin = self.position.cast::<f32>().unwrap_or(Point3::new(0.0, 0.0, 0.0));
        corners(self.block_side).map(|(offset, role)| {
            Vertex::new(
                origin + Vector3::from(offset),
                atlas.tex_coord(self.block_type_int, role),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    fn corner_points(side: BlockSide) -> Vec<Vector3<f32>> {
        corners(side)
            .iter()
            .map(|(offset, _)| Vector3::from(*offset))
            .collect()
    }

    #[test]
    fn every_side_winds_toward_its_outward_normal() {
        for side in BlockSide::all() {
            let points = corner_points(side);
            let normal = (points[1] - points[0]).cross(points[2] - points[0]).normalize();
            let outward = side.neighbor_offset().cast::<f32>().unwrap();
            assert!(
                (normal - outward).magnitude() < 1e-6,
                "{side:?} wound toward {normal:?}"
            );
        }
    }

    #[test]
    fn every_side_uses_each_corner_role_once() {
        for side in BlockSide::all() {
            let mut roles: Vec<usize> = corners(side).iter().map(|(_, role)| *role as usize).collect();
            roles.sort_unstable();
            assert_eq!(roles, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn vertices_are_translated_to_the_block_position() {
        let atlas = TextureAtlas::default();
        let face = Face::new(Point3::new(3, -2, 7), 1, BlockSide::FRONT);
        let vertices = face.vertices(&atlas);
        assert_eq!(vertices[0].position, [2.5, -2.5, 7.0]);
        assert_eq!(vertices[2].position, [3.5, -1.5, 7.0]);
        assert_eq!(vertices[0].tex_coords, atlas.tex_coord(1, CornerRole::LowerLeft));
        assert_eq!(vertices[3].tex_coords, atlas.tex_coord(1, CornerRole::UpperLeft));
    }

    #[test]
    fn top_face_starts_with_upper_left_role() {
        let atlas = TextureAtlas::default();
        let vertices = Face::new(Point3::new(0, 0, 0), 2, BlockSide::TOP).vertices(&atlas);
        assert_eq!(vertices[0].tex_coords, atlas.tex_coord(2, CornerRole::UpperLeft));
        assert_eq!(vertices[3].tex_coords, atlas.tex_coord(2, CornerRole::LowerLeft));
    }
}
