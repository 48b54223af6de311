//! # Voxel World Entry Point
//!
//! Calls into the library's `run()` to build and mesh the world.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- world.json
//! ```

fn main() {
    if let Err(err) = voxel_world::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
