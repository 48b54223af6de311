#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A chunked voxel world with face-culling mesh generation, built with Rust and WGPU.
//!
//! The world is a dense grid of fixed-size chunks. Each chunk turns its
//! blocks into a list of textured quads, emitting only the faces that touch
//! AIR, including faces that border a neighbouring chunk.
//!
//! ## Key Modules
//!
//! * `config` - JSON configuration for world size, terrain and textures
//! * `engine_state` - The world, meshing, mesh uploaders and the edit path
//! * `error` - The crate error type
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_world::run().unwrap();
//! }
//! ```
//!
//! Pass a JSON configuration path as the first argument to override the
//! defaults; `RUST_LOG=debug` shows per-chunk detail.

use log::{info, warn};

use config::EngineConfig;
use engine_state::{
    rendering::{buffer_state::GpuMeshUploader, MeshStatistics, MeshUploader},
    EngineState,
};
use error::VoxelResult;

pub mod config;
pub mod engine_state;
pub mod error;

/// Initializes logging, builds the configured world and reports what was meshed.
///
/// Uploads to the GPU when an adapter is available and falls back to
/// CPU-side statistics otherwise.
pub fn run() -> VoxelResult<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("loading configuration from {path}");
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };

    match pollster::block_on(GpuMeshUploader::headless()) {
        Ok(uploader) => {
            let engine = EngineState::new(config, uploader)?;
            let analytics = engine.uploader().analytics();
            info!(
                "{} chunks resident on the gpu, {} bytes allocated",
                engine.uploader().live_chunk_count(),
                analytics.allocated_memory
            );
            summarize(&engine);
        }
        Err(err) => {
            warn!("{err}; meshing without a gpu");
            let engine = EngineState::new(config, MeshStatistics::default())?;
            info!("{} vertices uploaded", engine.uploader().total_vertices());
            summarize(&engine);
        }
    }
    Ok(())
}

fn summarize<U: MeshUploader>(engine: &EngineState<U>) {
    let world = engine.world();
    let solid: usize = world.chunks().iter().map(|chunk| chunk.solid_block_count()).sum();
    info!(
        "{} chunks, {} solid blocks, {} vertices; player at {:?} standing on {:?}",
        world.chunks().len(),
        solid,
        world.total_vertex_count(),
        engine.player_position(),
        world
            .block_at_point(engine.player_position() - cgmath::Vector3::unit_y())
            .get_block_type()
    );
}
