//! # Error Types
//!
//! All errors that can occur while building, editing, or meshing the voxel world.

use thiserror::Error;

/// Errors produced by the voxel world and its collaborators.
#[derive(Error, Debug)]
pub enum VoxelError {
    /// A global block coordinate does not fall inside any loaded chunk.
    #[error("block ({x}, {y}, {z}) lies outside the loaded world")]
    OutOfWorldBounds {
        /// Global X coordinate.
        x: i32,
        /// Global Y coordinate.
        y: i32,
        /// Global Z coordinate.
        z: i32,
    },

    /// A chunk or world was requested with a zero-sized axis.
    #[error("invalid dimensions {x}x{y}x{z}: every axis must be non-zero")]
    InvalidDimensions {
        /// Requested X extent.
        x: usize,
        /// Requested Y extent.
        y: usize,
        /// Requested Z extent.
        z: usize,
    },

    /// A world grid whose blocks cannot all be addressed with `i32` coordinates.
    #[error("world grid {grid:?} from chunk {origin:?} leaves the addressable block range")]
    ExtentOverflow {
        /// Requested chunks per axis.
        grid: [usize; 3],
        /// Requested chunk-space origin.
        origin: [i32; 3],
    },

    /// An externally supplied texture atlas table has the wrong number of entries.
    #[error("texture atlas has {actual} entries, expected {expected}")]
    AtlasSize {
        /// Entries required for every solid block type.
        expected: usize,
        /// Entries actually supplied.
        actual: usize,
    },

    /// The engine configuration is semantically invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a configuration file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// No GPU adapter or device could be acquired.
    #[error("gpu unavailable: {0}")]
    Gpu(String),
}

/// Convenience alias used throughout the crate.
pub type VoxelResult<T> = Result<T, VoxelError>;
