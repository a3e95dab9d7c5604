//! Binary space partition of the map into leaf regions
//!
//! The leaves tile the input rectangle exactly. Rooms are later carved
//! inside individual leaves, which is what keeps rooms from overlapping.

use log::debug;

use super::Rect;
use crate::rng::GenRng;

/// Recursion stops once a region is deeper than this
pub const MAX_SPLIT_DEPTH: u32 = 8;

/// Splits regions along their longer axis
#[derive(Debug, Clone, Copy)]
pub struct SpaceSplitter {
    min_room_size: i32,
    max_room_size: i32,
}

impl SpaceSplitter {
    pub fn new(min_room_size: i32, max_room_size: i32) -> Self {
        Self {
            min_room_size,
            max_room_size,
        }
    }

    /// Partition `bounds`, returning leaves in depth-first order
    /// (left/top half before right/bottom half)
    pub fn split(&self, bounds: Rect, rng: &mut GenRng) -> Vec<Rect> {
        let mut leaves = Vec::new();
        self.split_into(bounds, 0, rng, &mut leaves);
        debug!("split {}x{} into {} leaves", bounds.width, bounds.height, leaves.len());
        leaves
    }

    fn should_stop(&self, region: &Rect, depth: u32) -> bool {
        let floor = 2 * self.max_room_size;
        depth > MAX_SPLIT_DEPTH || region.width < floor || region.height < floor
    }

    fn split_into(&self, region: Rect, depth: u32, rng: &mut GenRng, leaves: &mut Vec<Rect>) {
        if self.should_stop(&region, depth) {
            leaves.push(region);
            return;
        }

        let (first, second) = if region.width >= region.height {
            let at = rng.range_inclusive(self.min_room_size, region.width - self.min_room_size);
            (
                Rect::new(region.x, region.y, at, region.height),
                Rect::new(region.x + at, region.y, region.width - at, region.height),
            )
        } else {
            let at = rng.range_inclusive(self.min_room_size, region.height - self.min_room_size);
            (
                Rect::new(region.x, region.y, region.width, at),
                Rect::new(region.x, region.y + at, region.width, region.height - at),
            )
        };

        self.split_into(first, depth + 1, rng, leaves);
        self.split_into(second, depth + 1, rng, leaves);
    }
}
