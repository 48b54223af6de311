use cgmath::{Point3, Vector3};
use voxel_world::config::{EngineConfig, GenerationConfig};
use voxel_world::engine_state::{
    rendering::{atlas::TextureAtlas, MeshStatistics},
    voxels::{
        block::block_type::BlockType,
        generation::{Checkerboard, FlatTerrain},
        world::World,
    },
    EngineState,
};
use voxel_world::error::VoxelError;

fn world(grid: [usize; 3], chunk: [usize; 3], origin: [i32; 3]) -> World {
    World::load(
        Vector3::from(grid),
        Vector3::from(chunk),
        Point3::from(origin),
        TextureAtlas::default(),
    )
    .unwrap()
}

#[test]
fn negative_coordinates_use_floor_division() {
    let mut world = world([2, 2, 2], [4, 4, 4], [-1, -1, -1]);

    world.set_block(-1, -1, -1, BlockType::GRASS).unwrap();
    world.set_block(-4, -4, -4, BlockType::WOOD).unwrap();
    world.set_block(3, 3, 3, BlockType::WHITE).unwrap();

    assert_eq!(world.chunk_index_at(-1, -1, -1), Some(0));
    assert_eq!(world.chunk_index_at(0, 0, 0), Some(7));
    assert_eq!(
        world.try_get_block(-1, -1, -1).unwrap().get_block_type(),
        Some(BlockType::GRASS)
    );
    assert_eq!(world.chunk(0).unwrap().block_type_at(3, 3, 3), BlockType::GRASS as u8);
    assert_eq!(world.chunk(0).unwrap().block_type_at(0, 0, 0), BlockType::WOOD as u8);
    assert_eq!(world.chunk(7).unwrap().block_type_at(3, 3, 3), BlockType::WHITE as u8);
}

#[test]
fn a_block_on_a_chunk_corner_meshes_against_three_neighbours() {
    let mut world = world([2, 2, 2], [4, 4, 4], [-1, -1, -1]);
    world.set_block(-1, -1, -1, BlockType::DIRT).unwrap();
    world.set_block(0, -1, -1, BlockType::DIRT).unwrap();
    let mut stats = MeshStatistics::default();

    world.recalculate_all(&mut stats);

    // Two blocks side by side across the x = -0.5 chunk boundary.
    assert_eq!(world.total_vertex_count(), 40);
    let left = world.chunk(0).unwrap();
    assert_eq!(left.get_vertex_count(), 20);
    assert!(left
        .vertices()
        .chunks(4)
        .all(|quad| !quad.iter().all(|vertex| vertex.position[0] == -0.5)));
}

#[test]
fn reads_outside_the_world_are_air_and_checked_reads_fail() {
    let world = world([1, 1, 1], [4, 4, 4], [0, 0, 0]);

    assert!(world.get_block(-1, 0, 0).is_air());
    assert!(world.get_block(0, 4, 0).is_air());
    assert!(!world.contains(0, 0, 4));
    assert!(matches!(
        world.try_get_block(0, 0, 4),
        Err(VoxelError::OutOfWorldBounds { x: 0, y: 0, z: 4 })
    ));
    assert!(world.block_at_point(Point3::new(-0.1, 1.0, 1.0)).is_air());
}

#[test]
fn writes_and_recalculations_outside_the_world_are_rejected() {
    let mut world = world([1, 1, 1], [4, 4, 4], [0, 0, 0]);
    let mut stats = MeshStatistics::default();

    assert!(matches!(
        world.set_block(4, 0, 0, BlockType::DIRT),
        Err(VoxelError::OutOfWorldBounds { x: 4, .. })
    ));
    assert!(matches!(
        world.recalculate_chunk(0, -1, 0, &mut stats),
        Err(VoxelError::OutOfWorldBounds { .. })
    ));
    assert!(stats.uploads().is_empty());
}

#[test]
fn blocks_on_the_world_edge_show_their_outer_faces() {
    let mut world = world([1, 1, 1], [4, 4, 4], [0, 0, 0]);
    let mut stats = MeshStatistics::default();
    world.generate(&mut FlatTerrain { height: 4, fill: BlockType::DIRT }, &mut stats);

    // A full 4x4x4 cube: only its outer shell.
    assert_eq!(world.total_vertex_count(), 6 * 16 * 4);
}

#[test]
fn block_at_point_floors_each_axis() {
    let mut world = world([2, 1, 1], [4, 4, 4], [-1, 0, 0]);
    world.set_block(-1, 2, 3, BlockType::WOOD).unwrap();

    let block = world.block_at_point(Point3::new(-0.5, 2.9, 3.01));
    assert_eq!(block.get_block_type(), Some(BlockType::WOOD));
    assert!(world.block_at_point(Point3::new(0.5, 2.9, 3.01)).is_air());
}

#[test]
fn generation_leaves_every_chunk_filled_and_meshed() {
    let mut world = world([2, 2, 2], [4, 4, 4], [0, 0, 0]);
    let mut stats = MeshStatistics::default();

    world.generate(&mut Checkerboard, &mut stats);

    assert_eq!(stats.uploads(), &[0, 1, 2, 3, 4, 5, 6, 7]);
    for chunk in world.chunks() {
        assert_eq!(chunk.solid_block_count(), 32);
        assert!(!chunk.is_dirty());
        // Isolated blocks: every face exposed.
        assert_eq!(chunk.get_vertex_count(), 32 * 24);
    }

    stats.clear_log();
    world.generate(&mut Checkerboard, &mut stats);
    assert_eq!(stats.uploads().len(), 8);
}

#[test]
fn edits_mark_touching_chunks_dirty() {
    let mut world = world([2, 1, 2], [4, 4, 4], [0, 0, 0]);
    let mut stats = MeshStatistics::default();
    world.recalculate_all(&mut stats);
    stats.clear_log();

    world.set_block(1, 1, 1, BlockType::DIRT).unwrap();
    assert_eq!(world.recalculate_dirty(&mut stats), 1);

    // On the +x and +z faces of chunk 0.
    world.set_block(3, 1, 3, BlockType::DIRT).unwrap();
    assert!(world.chunks().iter().filter(|chunk| chunk.is_dirty()).count() == 3);
    assert_eq!(world.recalculate_dirty(&mut stats), 3);
    assert_eq!(world.recalculate_dirty(&mut stats), 0);
    assert_eq!(stats.uploads().len(), 4);
}

fn flat_config(world_size: [u32; 3], chunk_size: [u32; 3]) -> EngineConfig {
    EngineConfig {
        world_size,
        chunk_size,
        generation: GenerationConfig::Flat {
            height: 4,
            fill: BlockType::DIRT,
        },
        ..Default::default()
    }
}

#[test]
fn digging_rebuilds_the_nine_surrounding_chunks() {
    let mut engine = EngineState::new(flat_config([3, 1, 3], [16, 16, 16]), MeshStatistics::default()).unwrap();
    let before = engine.world().chunk(4).unwrap().get_vertex_count();

    let world = engine.world();
    assert_eq!(world.get_block(25, 3, 24).get_block_type(), Some(BlockType::GRASS));

    let rebuilt = engine.remove_blocks_around(Point3::new(24.5, 4.2, 24.5));

    assert_eq!(rebuilt, 9);
    for (x, y, z) in [(25, 3, 24), (23, 3, 24), (24, 3, 25), (24, 3, 23)] {
        assert!(engine.world().get_block(x, y, z).is_air());
    }
    assert!(engine.world().chunk(4).unwrap().get_vertex_count() > before);
}

#[test]
fn digging_in_a_corner_skips_chunks_outside_the_world() {
    let mut engine = EngineState::new(flat_config([3, 1, 3], [16, 16, 16]), MeshStatistics::default()).unwrap();

    assert_eq!(engine.remove_blocks_around(Point3::new(0.5, 4.0, 0.5)), 4);
    assert!(engine.world().get_block(1, 3, 0).is_air());
}

#[test]
fn digging_across_a_vertical_boundary_rebuilds_the_chunk_below() {
    let config = EngineConfig {
        world_size: [1, 2, 1],
        chunk_size: [4, 4, 4],
        generation: GenerationConfig::Solid {
            block: BlockType::DIRT,
        },
        ..Default::default()
    };
    let mut engine = EngineState::new(config, MeshStatistics::default()).unwrap();

    assert_eq!(engine.remove_blocks_around(Point3::new(1.5, 4.0, 1.5)), 2);

    let below = engine.world().chunk(0).unwrap();
    assert!(!below.is_dirty());
    let count = below.get_vertex_count();
    let mut stats = MeshStatistics::default();
    assert_eq!(engine.world_mut().recalculate_chunk(1, 3, 1, &mut stats).unwrap(), count);
}

#[test]
fn regenerating_restores_terrain_and_spawn() {
    let mut engine = EngineState::new(flat_config([1, 1, 1], [8, 8, 8]), MeshStatistics::default()).unwrap();
    let baseline = engine.world().total_vertex_count();

    engine.set_block(2, 3, 2, BlockType::AIR).unwrap();
    engine.set_player_position(Point3::new(4.0, 7.0, 4.0));
    assert_ne!(engine.world().total_vertex_count(), baseline);

    engine.regenerate();

    assert_eq!(engine.world().total_vertex_count(), baseline);
    assert_eq!(engine.player_position(), Point3::new(0.5, 5.0, 0.5));
}

#[test]
fn a_world_against_the_coordinate_limit_meshes_and_reads_safely() {
    // Blocks 2_147_483_640..=2_147_483_643 along x.
    let mut world = world([1, 1, 1], [4, 4, 4], [536_870_910, 0, 0]);
    let mut stats = MeshStatistics::default();
    world.generate(&mut FlatTerrain { height: 4, fill: BlockType::DIRT }, &mut stats);

    assert_eq!(world.total_vertex_count(), 6 * 16 * 4);
    assert!(!world.get_block(i32::MAX - 4, 0, 0).is_air());
    assert!(world.get_block(i32::MAX, 0, 0).is_air());
    assert!(world.get_block(i32::MIN, i32::MIN, i32::MIN).is_air());
    assert!(world.block_at_point(Point3::new(f32::MAX, 0.0, 0.0)).is_air());
    assert!(matches!(
        world.try_get_block(i32::MAX, 0, 0),
        Err(VoxelError::OutOfWorldBounds { .. })
    ));
}

#[test]
fn reads_far_from_an_offset_origin_are_air() {
    let world = world([1, 1, 1], [1, 1, 1], [-2_000_000_000, 0, 0]);

    assert!(world.get_block(i32::MAX, 0, 0).is_air());
    assert!(world.get_block(-2_000_000_000, 0, 0).is_air());
    assert!(world.contains(-2_000_000_000, 0, 0));
    assert!(!world.contains(i32::MAX, 0, 0));
}

#[test]
fn unaddressable_origins_are_rejected_before_building() {
    let result = World::load(
        Vector3::new(1, 1, 1),
        Vector3::new(16, 16, 16),
        Point3::new(-2_100_000_000, 0, 0),
        TextureAtlas::default(),
    );
    assert!(matches!(result, Err(VoxelError::ExtentOverflow { .. })));

    let config = EngineConfig {
        origin: [200_000_000, 0, 0],
        generation: GenerationConfig::Empty,
        ..Default::default()
    };
    let result = EngineState::new(config, MeshStatistics::default());
    assert!(matches!(result, Err(VoxelError::InvalidConfig(_))));
}

#[test]
fn digging_at_the_coordinate_limit_skips_overflowing_targets() {
    let config = EngineConfig {
        world_size: [1, 1, 1],
        chunk_size: [4, 4, 4],
        origin: [536_870_910, 0, 0],
        generation: GenerationConfig::Solid {
            block: BlockType::DIRT,
        },
        ..Default::default()
    };
    let mut engine = EngineState::new(config, MeshStatistics::default()).unwrap();

    // The player saturates to i32::MAX; only the chunk one step back is in reach.
    assert_eq!(engine.remove_blocks_around(Point3::new(f32::MAX, 1.0, 1.0)), 1);
    assert_eq!(engine.remove_blocks_around(Point3::new(f32::MAX, f32::MAX, f32::MAX)), 0);
    assert_eq!(engine.world().total_vertex_count(), 6 * 16 * 4);
}
