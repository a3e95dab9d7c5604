//! Corridor cell classification
//!
//! Every `PathFloor` cell carries exactly one `PathClass`. The map is
//! addressed by grid coordinate; non-corridor cells have no entry.

use log::debug;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{CellType, Grid, Neighborhood, Point};

/// Gameplay tag of one corridor cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum PathClass {
    #[default]
    Unclassified,
    /// Touches room floor under the configured neighborhood
    RoomAdjacent,
    /// Touches no room floor
    Isolated,
    /// Picked to host a gameplay event
    Eventable,
    /// Quiet buffer next to an event run
    NotEventable,
}

impl PathClass {
    /// Overlay character used by the text renderer
    pub const fn symbol(&self) -> char {
        match self {
            PathClass::Unclassified => '?',
            PathClass::RoomAdjacent => '+',
            PathClass::Isolated => '#',
            PathClass::Eventable => 'E',
            PathClass::NotEventable => '-',
        }
    }
}

/// Per-cell classes for a grid, `None` for non-corridor cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationMap {
    width: i32,
    height: i32,
    classes: Vec<Option<PathClass>>,
}

impl ClassificationMap {
    /// Start every corridor cell of `grid` as `Unclassified`
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            classes: grid
                .iter()
                .map(|(_, c)| (c == CellType::PathFloor).then_some(PathClass::Unclassified))
                .collect(),
        }
    }

    fn index(&self, p: Point) -> Option<usize> {
        (p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height)
            .then(|| p.y as usize * self.width as usize + p.x as usize)
    }

    /// Class of a corridor cell; `None` off the map or off the corridors
    pub fn get(&self, p: Point) -> Option<PathClass> {
        self.index(p).and_then(|i| self.classes[i])
    }

    /// Reclassify a corridor cell. Returns false if `p` is not a corridor cell.
    pub fn set(&mut self, p: Point, class: PathClass) -> bool {
        match self.index(p) {
            Some(i) if self.classes[i].is_some() => {
                self.classes[i] = Some(class);
                true
            }
            _ => false,
        }
    }

    /// Corridor cells with their classes in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Point, PathClass)> + '_ {
        let width = self.width.max(1);
        self.classes.iter().enumerate().filter_map(move |(i, c)| {
            c.map(|class| (Point::new(i as i32 % width, i as i32 / width), class))
        })
    }

    /// Corridor cells holding `class`, row-major
    pub fn cells_with(&self, class: PathClass) -> Vec<Point> {
        self.iter()
            .filter(|&(_, c)| c == class)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn count(&self, class: PathClass) -> usize {
        self.classes.iter().filter(|c| **c == Some(class)).count()
    }

    /// Number of corridor cells
    pub fn len(&self) -> usize {
        self.classes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tag every corridor cell as `RoomAdjacent` or `Isolated`
pub fn classify_adjacency(grid: &Grid, hood: Neighborhood) -> ClassificationMap {
    let mut map = ClassificationMap::for_grid(grid);
    for (p, cell) in grid.iter() {
        if cell != CellType::PathFloor {
            continue;
        }
        let class = if grid.has_neighbor(p.x, p.y, CellType::RoomFloor, hood) {
            PathClass::RoomAdjacent
        } else {
            PathClass::Isolated
        };
        map.set(p, class);
    }
    debug!(
        "classified corridors: {} room-adjacent, {} isolated",
        map.count(PathClass::RoomAdjacent),
        map.count(PathClass::Isolated)
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Room at column 0, corridor along row 1 from x = 1 to x = 4
    fn sample_grid() -> Grid {
        let mut grid = Grid::new(6, 3);
        grid.set(0, 0, CellType::RoomFloor).unwrap();
        for x in 1..5 {
            grid.set(x, 1, CellType::PathFloor).unwrap();
        }
        grid
    }

    #[test]
    fn test_new_map_is_unclassified() {
        let map = ClassificationMap::for_grid(&sample_grid());
        assert_eq!(map.len(), 4);
        assert_eq!(map.count(PathClass::Unclassified), 4);
        assert_eq!(map.get(Point::new(0, 0)), None);
        assert_eq!(map.get(Point::new(-1, 0)), None);
    }

    #[test]
    fn test_set_ignores_non_corridor_cells() {
        let mut map = ClassificationMap::for_grid(&sample_grid());
        assert!(!map.set(Point::new(0, 0), PathClass::Eventable));
        assert!(!map.set(Point::new(9, 9), PathClass::Eventable));
        assert!(map.set(Point::new(2, 1), PathClass::Eventable));
        assert_eq!(map.get(Point::new(2, 1)), Some(PathClass::Eventable));
    }

    #[test]
    fn test_four_neighborhood() {
        let map = classify_adjacency(&sample_grid(), Neighborhood::Four);
        // (1, 1) only touches the room diagonally
        assert_eq!(map.count(PathClass::RoomAdjacent), 0);
        assert_eq!(map.count(PathClass::Isolated), 4);
    }

    #[test]
    fn test_eight_neighborhood() {
        let map = classify_adjacency(&sample_grid(), Neighborhood::Eight);
        assert_eq!(map.get(Point::new(1, 1)), Some(PathClass::RoomAdjacent));
        assert_eq!(map.count(PathClass::Isolated), 3);
        assert_eq!(map.count(PathClass::Unclassified), 0);
    }

    #[test]
    fn test_iter_is_row_major() {
        let map = classify_adjacency(&sample_grid(), Neighborhood::Four);
        let points: Vec<Point> = map.iter().map(|(p, _)| p).collect();
        assert_eq!(
            points,
            (1..5).map(|x| Point::new(x, 1)).collect::<Vec<_>>()
        );
    }
}
