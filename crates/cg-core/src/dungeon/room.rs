//! Rooms and the room carving stage

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Grid, Point, Rect};
use crate::config::RoomParams;
use crate::error::GenResult;
use crate::rng::GenRng;

/// Smallest room side the carver will produce
pub const MIN_CARVED_SIDE: i32 = 3;

/// A rectangular room carved into the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Index in the layout's room list
    pub id: usize,
    pub rect: Rect,
    /// Integer center of `rect`
    pub center: Point,
}

impl Room {
    pub fn new(id: usize, rect: Rect) -> Self {
        Self {
            id,
            rect,
            center: rect.center(),
        }
    }

    /// Check if point is inside room
    pub fn contains(&self, p: Point) -> bool {
        self.rect.contains_point(p)
    }

    /// Check if this room shares any cell with another
    pub fn overlaps(&self, other: &Room) -> bool {
        self.rect.intersects(&other.rect)
    }
}

/// Carve rooms into BSP leaves.
///
/// Leaves are visited in shuffled order. Each one is skipped when the
/// density draw fails or when it is too small to hold a room with a
/// one-cell margin; otherwise a room of random size is placed at a
/// random offset inside it.
///
/// Fails with `OutOfBounds` if a leaf reaches outside the grid.
pub fn carve_rooms(
    grid: &mut Grid,
    mut leaves: Vec<Rect>,
    params: &RoomParams,
    rng: &mut GenRng,
) -> GenResult<Vec<Room>> {
    rng.shuffle(&mut leaves);

    let mut rooms = Vec::new();
    for leaf in &leaves {
        if params.target_count > 0 && rooms.len() >= params.target_count as usize {
            break;
        }

        if rng.next_f64() > params.density {
            continue;
        }

        let width = rng
            .range_inclusive(params.min_size, params.max_size)
            .min(leaf.width - 2);
        let height = rng
            .range_inclusive(params.min_size, params.max_size)
            .min(leaf.height - 2);
        if width < MIN_CARVED_SIDE || height < MIN_CARVED_SIDE {
            continue;
        }

        let x = leaf.x + 1 + rng.range_inclusive(0, leaf.width - 2 - width);
        let y = leaf.y + 1 + rng.range_inclusive(0, leaf.height - 2 - height);

        let room = Room::new(rooms.len(), Rect::new(x, y, width, height));
        grid.fill_room(&room.rect)?;
        rooms.push(room);
    }

    debug!("carved {} rooms from {} leaves", rooms.len(), leaves.len());
    Ok(rooms)
}
