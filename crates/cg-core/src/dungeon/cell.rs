//! Map cell types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cell/terrain type
///
/// A cell only ever moves `Empty -> RoomFloor` or `Empty -> PathFloor`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellType {
    #[default]
    Empty = 0,
    RoomFloor = 1,
    PathFloor = 2,
}

impl CellType {
    /// Check if this cell can be walked on
    pub const fn is_walkable(&self) -> bool {
        matches!(self, CellType::RoomFloor | CellType::PathFloor)
    }

    /// Get the display character for this cell type
    pub const fn symbol(&self) -> char {
        match self {
            CellType::Empty => ' ',
            CellType::RoomFloor => '.',
            CellType::PathFloor => '#',
        }
    }
}

/// Which neighbors count as adjacent
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Neighborhood {
    /// N, S, E, W
    #[default]
    Four,
    /// The four cardinals plus diagonals
    Eight,
}

const CARDINALS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

const ALL_DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

impl Neighborhood {
    /// Offsets to visit for this neighborhood
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Neighborhood::Four => &CARDINALS,
            Neighborhood::Eight => &ALL_DIRECTIONS,
        }
    }
}
