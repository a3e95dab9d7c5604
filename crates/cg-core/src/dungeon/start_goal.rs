//! Start and goal room selection

use serde::{Deserialize, Serialize};

use super::Room;
use crate::error::{GenError, GenResult};

/// The two rooms chosen as entry and exit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartGoal {
    pub start: usize,
    pub goal: usize,
    /// Euclidean distance between the two centers
    pub distance: f64,
}

/// Pick the pair of rooms whose centers are farthest apart.
///
/// Every pair `i < j` is compared; the first pair reaching the maximum
/// wins ties. Fails with `NoValidStartGoal` when there are fewer than two
/// rooms or the farthest pair is closer than `min_distance`.
pub fn select_start_goal(rooms: &[Room], min_distance: f64) -> GenResult<StartGoal> {
    let mut best: Option<StartGoal> = None;
    for i in 0..rooms.len() {
        for j in i + 1..rooms.len() {
            let distance = rooms[i].center.distance(rooms[j].center);
            if best.is_none_or(|b| distance > b.distance) {
                best = Some(StartGoal {
                    start: i,
                    goal: j,
                    distance,
                });
            }
        }
    }

    match best {
        Some(pair) if pair.distance >= min_distance => Ok(pair),
        other => Err(GenError::NoValidStartGoal {
            best: other.map_or(0.0, |p| p.distance),
            required: min_distance,
        }),
    }
}
