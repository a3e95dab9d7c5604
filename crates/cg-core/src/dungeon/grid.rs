//! Dense cell grid (the map every stage writes into)

use serde::{Deserialize, Serialize};

use super::{CellType, Neighborhood, Point, Rect};
use crate::error::{GenError, GenResult};

/// A `width x height` array of cells stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<CellType>,
}

impl Grid {
    /// Create an all-empty grid
    ///
    /// Dimensions are validated by the generation config; a non-positive
    /// dimension yields an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![CellType::Empty; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The whole grid as a rectangle at the origin
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> GenError {
        GenError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    fn index(&self, x: i32, y: i32) -> GenResult<usize> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Read a cell, failing outside the grid
    pub fn get(&self, x: i32, y: i32) -> GenResult<CellType> {
        Ok(self.cells[self.index(x, y)?])
    }

    /// Write a cell, failing outside the grid
    pub fn set(&mut self, x: i32, y: i32, cell: CellType) -> GenResult<()> {
        let idx = self.index(x, y)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Read a cell, treating anything outside the grid as empty
    pub fn get_or_empty(&self, x: i32, y: i32) -> CellType {
        self.get(x, y).unwrap_or(CellType::Empty)
    }

    /// Carve one corridor cell.
    ///
    /// Out-of-range coordinates are dropped and room floor is never
    /// overwritten. Returns true if the cell was newly carved.
    pub fn carve_path_cell(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Ok(idx) if self.cells[idx] == CellType::Empty => {
                self.cells[idx] = CellType::PathFloor;
                true
            }
            _ => false,
        }
    }

    /// Fill a rectangle with room floor.
    ///
    /// Fails with `OutOfBounds` on the first cell outside the grid, before
    /// anything is written.
    pub fn fill_room(&mut self, rect: &Rect) -> GenResult<()> {
        if let Some(p) = rect.cells().find(|p| !self.in_bounds(p.x, p.y)) {
            return Err(self.out_of_bounds(p.x, p.y));
        }
        for p in rect.cells() {
            self.set(p.x, p.y, CellType::RoomFloor)?;
        }
        Ok(())
    }

    /// True if any neighbor under `hood` holds `cell`
    pub fn has_neighbor(&self, x: i32, y: i32, cell: CellType, hood: Neighborhood) -> bool {
        hood.offsets()
            .iter()
            .any(|&(dx, dy)| self.get(x + dx, y + dy).is_ok_and(|c| c == cell))
    }

    /// In-bounds neighbors of a point under `hood`
    pub fn neighbors(&self, p: Point, hood: Neighborhood) -> impl Iterator<Item = Point> + '_ {
        hood.offsets()
            .iter()
            .map(move |&(dx, dy)| Point::new(p.x + dx, p.y + dy))
            .filter(move |n| self.in_bounds(n.x, n.y))
    }

    /// Iterate `(point, cell)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellType)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (Point::new(i as i32 % width, i as i32 / width), c))
    }

    /// Count cells of a given type
    pub fn count(&self, cell: CellType) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(CellType::Empty);
    }
}
