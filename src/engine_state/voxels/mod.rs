//! # Voxel World
//!
//! This module contains the data side of the engine: how blocks are stored,
//! grouped into chunks, and addressed across the whole world.
//!
//! ## Architecture
//!
//! * **Block**: block types, sides, and the per-block visibility mask
//! * **Chunk**: fixed-size 3D arrays of blocks plus the face-culling pass
//! * **World**: the chunk grid, global coordinate mapping and edits
//! * **Generation**: terrain generators that fill chunks before meshing
//!
//! ## Data Flow
//!
//! 1. A generator fills every chunk
//! 2. Each chunk runs its visibility pass, asking the world about cells
//!    past its boundary
//! 3. Completed meshes are handed to the renderer
//! 4. Edits write blocks and mark chunks dirty; callers choose which chunks
//!    to rebuild

pub mod block;
pub mod chunk;
pub mod generation;
pub mod world;
