//! cg-core: deterministic grid dungeon generation
//!
//! Builds a 2-D layout in one pass: binary space partition, rooms, a
//! greedy spanning chain of corridors plus random loops, a start/goal
//! pair, and per-cell corridor tags for gameplay.
//!
//! Every random decision draws from a single seeded stream, so the same
//! config and seed always give the same layout.
//!
//! ```
//! use cg_core::{GenerationConfig, generate};
//!
//! let layout = generate(GenerationConfig::default().with_seed(42)).unwrap();
//! assert!(layout.is_fully_connected());
//! ```

pub mod config;
pub mod dungeon;
pub mod error;
pub mod render;

mod rng;

pub use config::{
    CorridorParams, EventableMode, GenerationConfig, MAX_GRID_SIDE, RoomParams, SeedSource,
};
pub use dungeon::{Generator, Layout, generate};
pub use error::{GenError, GenResult};
pub use rng::GenRng;
