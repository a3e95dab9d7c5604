//! Generation request parameters
//!
//! Every struct uses `#[serde(default)]` so a partial JSON file only
//! overrides the fields it names.

use serde::{Deserialize, Serialize};

use crate::dungeon::Neighborhood;
use crate::error::{GenError, GenResult};

/// Room sizing and placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomParams {
    pub min_size: i32,
    pub max_size: i32,
    /// Chance in `[0, 1]` that a BSP leaf receives a room
    pub density: f64,
    /// Stop after this many rooms; 0 or negative means no limit
    pub target_count: i32,
}

impl Default for RoomParams {
    fn default() -> Self {
        Self {
            min_size: 4,
            max_size: 10,
            density: 0.8,
            target_count: 0,
        }
    }
}

/// Corridor planning and carving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorParams {
    /// Chance in `[0, 1]` that any room pair gets an extra corridor
    pub connectivity: f64,
    /// 1, 2 or 3 cells
    pub width: i32,
    /// Longest straight piece carved in one go
    pub max_straight_length: i32,
    /// Chance in `[0, 1]` that a short straight piece bends instead
    pub bend_probability: f64,
}

impl Default for CorridorParams {
    fn default() -> Self {
        Self {
            connectivity: 0.1,
            width: 1,
            max_straight_length: 8,
            bend_probability: 0.3,
        }
    }
}

/// How corridor cells are picked as eventable. Exactly one runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EventableMode {
    /// Uniform sample of isolated cells.
    ///
    /// `count == -1` takes all of them, `count == 0` takes
    /// `round(isolated * ratio)`, a positive count is capped at the
    /// number of isolated cells.
    Random { count: i32, ratio: f64 },
    /// Straight runs of isolated corridor with a length in
    /// `[min_length, max_length]`
    RunDetection {
        min_length: i32,
        max_length: i32,
        /// Debug switch: let runs touch rooms
        #[serde(default)]
        ignore_room_adjacency: bool,
    },
}

impl Default for EventableMode {
    fn default() -> Self {
        EventableMode::Random {
            count: 0,
            ratio: 0.25,
        }
    }
}

/// Where the RNG seed comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    Fixed(u64),
    #[default]
    Entropy,
}

/// A full generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: i32,
    pub height: i32,
    pub rooms: RoomParams,
    pub corridors: CorridorParams,
    /// Neighborhood used to decide if a corridor cell touches a room
    pub adjacency: Neighborhood,
    pub eventable: EventableMode,
    /// Start and goal centers must be at least this far apart
    pub min_room_distance: f64,
    pub seed: SeedSource,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            rooms: RoomParams::default(),
            corridors: CorridorParams::default(),
            adjacency: Neighborhood::Four,
            eventable: EventableMode::default(),
            min_room_distance: 10.0,
            seed: SeedSource::Entropy,
        }
    }
}

/// Largest accepted grid side; keeps `width * height` well inside `i32`
pub const MAX_GRID_SIDE: i32 = 4096;

fn check_side(field: &'static str, value: i32) -> GenResult<()> {
    if value <= 0 {
        return Err(GenError::invalid(field, "must be positive"));
    }
    if value > MAX_GRID_SIDE {
        return Err(GenError::invalid(
            field,
            format!("{value} is above {MAX_GRID_SIDE}"),
        ));
    }
    Ok(())
}

fn check_unit(field: &'static str, value: f64) -> GenResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GenError::invalid(field, format!("{value} is not in [0, 1]")));
    }
    Ok(())
}

impl GenerationConfig {
    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = SeedSource::Fixed(seed);
        self
    }

    /// Reject ranges the splitter and carvers cannot work with
    pub fn validate(&self) -> GenResult<()> {
        check_side("width", self.width)?;
        check_side("height", self.height)?;

        let rooms = &self.rooms;
        if rooms.min_size < 1 {
            return Err(GenError::invalid("rooms.min_size", "must be at least 1"));
        }
        if rooms.min_size > rooms.max_size {
            return Err(GenError::invalid(
                "rooms.min_size",
                format!(
                    "{} is greater than rooms.max_size {}",
                    rooms.min_size, rooms.max_size
                ),
            ));
        }
        check_unit("rooms.density", rooms.density)?;

        let corridors = &self.corridors;
        check_unit("corridors.connectivity", corridors.connectivity)?;
        check_unit("corridors.bend_probability", corridors.bend_probability)?;
        if !(1..=3).contains(&corridors.width) {
            return Err(GenError::invalid(
                "corridors.width",
                format!("{} is not 1, 2 or 3", corridors.width),
            ));
        }
        if corridors.max_straight_length < 1 {
            return Err(GenError::invalid(
                "corridors.max_straight_length",
                "must be at least 1",
            ));
        }

        if !self.min_room_distance.is_finite() || self.min_room_distance < 0.0 {
            return Err(GenError::invalid(
                "min_room_distance",
                "must be a non-negative number",
            ));
        }

        match self.eventable {
            EventableMode::Random { count, ratio } => {
                if count < -1 {
                    return Err(GenError::invalid(
                        "eventable.count",
                        format!("{count} is below -1"),
                    ));
                }
                check_unit("eventable.ratio", ratio)?;
            }
            EventableMode::RunDetection {
                min_length,
                max_length,
                ..
            } => {
                if min_length < 1 {
                    return Err(GenError::invalid(
                        "eventable.min_length",
                        "must be at least 1",
                    ));
                }
                if max_length < min_length {
                    return Err(GenError::invalid(
                        "eventable.max_length",
                        format!("{max_length} is below eventable.min_length {min_length}"),
                    ));
                }
            }
        }

        Ok(())
    }
}
