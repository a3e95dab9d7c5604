//! Dungeon layout model and generation stages
//!
//! Contains the grid, rooms, corridor planning and carving, and corridor
//! cell classification.

mod bsp;
mod cell;
mod classify;
mod connectivity;
mod corridor;
mod eventable;
mod generation;
mod grid;
mod layout;
mod rect;
mod room;
mod start_goal;

pub use bsp::{MAX_SPLIT_DEPTH, SpaceSplitter};
pub use cell::{CellType, Neighborhood};
pub use classify::{ClassificationMap, PathClass, classify_adjacency};
pub use connectivity::{ConnectivityTracker, Edge, plan_connections, spanning_chain};
pub use corridor::{
    CorridorCarver, CorridorSegment, MAX_CORRIDOR_DEPTH, MIDPOINT_JITTER, carve_corridors,
};
pub use eventable::select_eventable;
pub use generation::{Generator, generate};
pub use grid::Grid;
pub use layout::{GenerationStats, Layout};
pub use rect::{Point, Rect};
pub use room::{MIN_CARVED_SIDE, Room, carve_rooms};
pub use start_goal::{StartGoal, select_start_goal};
