//! Corridor carving
//!
//! Turns planned edges into carved cells. Segments are bisected until no
//! straight piece covers more than `max_straight_length` cells:
//! 1. Far apart (> 3x the limit): recurse through a jittered midpoint
//! 2. Aligned and too long: carve one piece of exactly the limit, recurse
//!    from the next cell on
//! 3. Aligned and short: straight, or a one-cell jog with `bend_probability`
//! 4. Not aligned: L-shape through a random corner

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Edge, Grid, Point};
use crate::config::CorridorParams;
use crate::rng::GenRng;

/// Recursion past this depth carves plain chunked L-shapes
pub const MAX_CORRIDOR_DEPTH: u32 = 32;

/// Midpoints move by up to this many cells on each axis
pub const MIDPOINT_JITTER: i32 = 2;

/// One straight, axis-aligned piece of carved corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorSegment {
    pub from: Point,
    pub to: Point,
}

impl CorridorSegment {
    /// Number of steps from one end to the other
    pub fn length(&self) -> i32 {
        self.from.manhattan(self.to)
    }

    /// Number of cells carved, both ends included
    pub fn cell_count(&self) -> i32 {
        self.length() + 1
    }

    pub fn is_horizontal(&self) -> bool {
        self.from.y == self.to.y
    }
}

/// Move `steps` cells from `from` toward `to` along their shared axis
fn step_toward(from: Point, to: Point, steps: i32) -> Point {
    Point::new(
        from.x + (to.x - from.x).signum() * steps,
        from.y + (to.y - from.y).signum() * steps,
    )
}

/// Carving state for one run
pub struct CorridorCarver<'a> {
    grid: &'a mut Grid,
    rng: &'a mut GenRng,
    params: &'a CorridorParams,
    segments: Vec<CorridorSegment>,
    capped: usize,
}

impl<'a> CorridorCarver<'a> {
    pub fn new(grid: &'a mut Grid, rng: &'a mut GenRng, params: &'a CorridorParams) -> Self {
        Self {
            grid,
            rng,
            params,
            segments: Vec::new(),
            capped: 0,
        }
    }

    /// Carve every edge in order and return the straight pieces carved
    pub fn carve_all(mut self, edges: &[Edge]) -> Vec<CorridorSegment> {
        for edge in edges {
            self.carve_segment(edge.from_center, edge.to_center, 0);
        }
        if self.capped > 0 {
            debug!("{} corridor segments hit the depth cap", self.capped);
        }
        debug!(
            "carved {} edges as {} straight segments",
            edges.len(),
            self.segments.len()
        );
        self.segments
    }

    fn max_len(&self) -> i32 {
        self.params.max_straight_length
    }

    /// True if `from..=to` covers more cells than one piece may
    fn too_long(&self, from: Point, to: Point) -> bool {
        from.manhattan(to) + 1 > self.max_len()
    }

    /// Carve the first `max_straight_length` cells of an aligned run and
    /// return the cell after them
    fn carve_full_piece(&mut self, from: Point, to: Point) -> Point {
        let max = self.max_len();
        self.carve_straight(from, step_toward(from, to, max - 1));
        step_toward(from, to, max)
    }

    /// Recursive carving policy for one segment
    pub fn carve_segment(&mut self, from: Point, to: Point, depth: u32) {
        if from == to {
            self.carve_straight(from, to);
            return;
        }
        if depth >= MAX_CORRIDOR_DEPTH {
            self.capped += 1;
            let corner = Point::new(to.x, from.y);
            self.carve_chunked(from, corner);
            self.carve_chunked(corner, to);
            return;
        }

        let max = self.max_len();
        let dist = from.manhattan(to);

        if dist > 3 * max {
            let mid = self.jittered_midpoint(from, to);
            self.carve_segment(from, mid, depth + 1);
            self.carve_segment(mid, to, depth + 1);
        } else if from.is_aligned_with(to) {
            if self.too_long(from, to) {
                let next = self.carve_full_piece(from, to);
                self.carve_segment(next, to, depth + 1);
            } else if dist < 2 || self.rng.next_f64() > self.params.bend_probability {
                self.carve_straight(from, to);
            } else {
                self.carve_jog(from, to, depth);
            }
        } else {
            let corner = if self.rng.coin() {
                Point::new(to.x, from.y)
            } else {
                Point::new(from.x, to.y)
            };
            self.carve_leg(from, corner, depth);
            self.carve_leg(corner, to, depth);
        }
    }

    fn carve_leg(&mut self, from: Point, to: Point, depth: u32) {
        if self.too_long(from, to) {
            self.carve_segment(from, to, depth + 1);
        } else {
            self.carve_straight(from, to);
        }
    }

    /// Bend a short aligned segment through a corner one cell off its axis
    fn carve_jog(&mut self, from: Point, to: Point, depth: u32) {
        let side = if self.rng.coin() { 1 } else { -1 };
        let mid = Point::new((from.x + to.x) / 2, (from.y + to.y) / 2);
        let corner = if from.y == to.y {
            self.clamp(Point::new(mid.x, mid.y + side))
        } else {
            self.clamp(Point::new(mid.x + side, mid.y))
        };

        // Clamping pushed the corner back onto the line at the map edge
        if corner.is_aligned_with(from) && corner.is_aligned_with(to) {
            self.carve_straight(from, to);
            return;
        }
        self.carve_segment(from, corner, depth + 1);
        self.carve_segment(corner, to, depth + 1);
    }

    fn jittered_midpoint(&mut self, from: Point, to: Point) -> Point {
        let jx = self.rng.range_inclusive(-MIDPOINT_JITTER, MIDPOINT_JITTER);
        let jy = self.rng.range_inclusive(-MIDPOINT_JITTER, MIDPOINT_JITTER);
        self.clamp(Point::new(
            (from.x + to.x) / 2 + jx,
            (from.y + to.y) / 2 + jy,
        ))
    }

    fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0, (self.grid.width() - 1).max(0)),
            p.y.clamp(0, (self.grid.height() - 1).max(0)),
        )
    }

    /// Aligned pieces of at most `max_straight_length` cells, no randomness
    fn carve_chunked(&mut self, mut from: Point, to: Point) {
        while self.too_long(from, to) {
            from = self.carve_full_piece(from, to);
        }
        self.carve_straight(from, to);
    }

    /// Carve an aligned run of cells, inclusive of both ends
    fn carve_straight(&mut self, from: Point, to: Point) {
        debug_assert!(from.is_aligned_with(to));
        self.segments.push(CorridorSegment { from, to });

        let horizontal = from.y == to.y;
        let steps = from.manhattan(to);
        for i in 0..=steps {
            let p = step_toward(from, to, i);
            self.carve_cell(p, horizontal);
        }
    }

    /// Carve one cell plus the extra width orthogonal to travel
    fn carve_cell(&mut self, p: Point, horizontal: bool) {
        self.grid.carve_path_cell(p.x, p.y);

        let (ox, oy) = if horizontal { (0, 1) } else { (1, 0) };
        if self.params.width >= 2 {
            self.grid.carve_path_cell(p.x + ox, p.y + oy);
        }
        if self.params.width >= 3 {
            self.grid.carve_path_cell(p.x - ox, p.y - oy);
        }
    }
}

/// Carve all edges into the grid
pub fn carve_corridors(
    grid: &mut Grid,
    edges: &[Edge],
    params: &CorridorParams,
    rng: &mut GenRng,
) -> Vec<CorridorSegment> {
    CorridorCarver::new(grid, rng, params).carve_all(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{CellType, Rect, Room};

    fn params(width: i32, max_straight_length: i32, bend_probability: f64) -> CorridorParams {
        CorridorParams {
            connectivity: 0.0,
            width,
            max_straight_length,
            bend_probability,
        }
    }

    fn edge(from: Point, to: Point) -> Edge {
        Edge {
            from: 0,
            to: 1,
            from_center: from,
            to_center: to,
            spanning: true,
        }
    }

    /// 4-connected walk over walkable cells
    fn reachable(grid: &Grid, from: Point, to: Point) -> bool {
        let mut seen = vec![false; (grid.width() * grid.height()) as usize];
        let mut stack = vec![from];
        while let Some(p) = stack.pop() {
            if p == to {
                return true;
            }
            let idx = (p.y * grid.width() + p.x) as usize;
            if seen[idx] || !grid.get_or_empty(p.x, p.y).is_walkable() {
                continue;
            }
            seen[idx] = true;
            stack.extend(grid.neighbors(p, crate::dungeon::Neighborhood::Four));
        }
        false
    }

    #[test]
    fn test_short_straight_without_bend() {
        let mut grid = Grid::new(20, 5);
        let mut rng = GenRng::new(1);
        let p = params(1, 10, 0.0);
        let segments = carve_corridors(
            &mut grid,
            &[edge(Point::new(2, 2), Point::new(9, 2))],
            &p,
            &mut rng,
        );
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].length(), 7);
        assert_eq!(grid.count(CellType::PathFloor), 8);
    }

    #[test]
    fn test_long_straight_is_split() {
        let mut grid = Grid::new(30, 5);
        let mut rng = GenRng::new(1);
        let p = params(1, 5, 0.0);
        let segments = carve_corridors(
            &mut grid,
            &[edge(Point::new(0, 2), Point::new(14, 2))],
            &p,
            &mut rng,
        );
        assert_eq!(segments[0].from, Point::new(0, 2));
        assert_eq!(segments[0].to, Point::new(4, 2));
        assert_eq!(segments[1].from, Point::new(5, 2));
        assert!(segments.iter().all(|s| s.cell_count() <= 5));
        assert_eq!(grid.count(CellType::PathFloor), 15);
    }

    #[test]
    fn test_certain_bend_leaves_the_line() {
        let mut grid = Grid::new(20, 9);
        let mut rng = GenRng::new(4);
        let p = params(1, 10, 1.0);
        let from = Point::new(2, 4);
        let to = Point::new(8, 4);
        carve_corridors(&mut grid, &[edge(from, to)], &p, &mut rng);

        let off_line = grid
            .iter()
            .filter(|(pt, c)| *c == CellType::PathFloor && pt.y != 4)
            .count();
        assert!(off_line > 0, "bend must leave row 4");
        assert!(reachable(&grid, from, to));
    }

    #[test]
    fn test_never_overwrites_rooms() {
        let mut grid = Grid::new(30, 30);
        let a = Room::new(0, Rect::new(2, 2, 5, 5));
        let b = Room::new(1, Rect::new(20, 20, 5, 5));
        grid.fill_room(&a.rect).unwrap();
        grid.fill_room(&b.rect).unwrap();
        let mut rng = GenRng::new(8);
        carve_corridors(
            &mut grid,
            &[edge(a.center, b.center)],
            &params(3, 4, 0.5),
            &mut rng,
        );
        assert_eq!(grid.count(CellType::RoomFloor), 50);
        assert!(reachable(&grid, a.center, b.center));
    }

    #[test]
    fn test_width_two_doubles_a_straight_run() {
        let mut grid = Grid::new(20, 5);
        let mut rng = GenRng::new(1);
        carve_corridors(
            &mut grid,
            &[edge(Point::new(2, 1), Point::new(6, 1))],
            &params(2, 10, 0.0),
            &mut rng,
        );
        assert_eq!(grid.count(CellType::PathFloor), 10);
        assert_eq!(grid.get(4, 2).unwrap(), CellType::PathFloor);
        assert_eq!(grid.get(4, 0).unwrap(), CellType::Empty);
    }

    #[test]
    fn test_edge_of_map_width_is_dropped() {
        let mut grid = Grid::new(10, 3);
        let mut rng = GenRng::new(1);
        carve_corridors(
            &mut grid,
            &[edge(Point::new(0, 2), Point::new(5, 2))],
            &params(2, 10, 0.0),
            &mut rng,
        );
        // The extra row would be y = 3, outside the grid
        assert_eq!(grid.count(CellType::PathFloor), 6);
    }

    #[test]
    fn test_distant_points_respect_straight_limit() {
        for seed in 0..25 {
            let mut grid = Grid::new(60, 60);
            let mut rng = GenRng::new(seed);
            let from = Point::new(1, 1);
            let to = Point::new(58, 55);
            let segments =
                carve_corridors(&mut grid, &[edge(from, to)], &params(1, 4, 0.4), &mut rng);
            assert!(segments.iter().all(|s| s.cell_count() <= 4), "seed {seed}");
            assert!(reachable(&grid, from, to), "seed {seed}");
        }
    }

    #[test]
    fn test_depth_cap_still_respects_limit() {
        let mut grid = Grid::new(40, 40);
        let mut rng = GenRng::new(2);
        let p = params(1, 3, 0.0);
        let mut carver = CorridorCarver::new(&mut grid, &mut rng, &p);
        carver.carve_segment(Point::new(0, 0), Point::new(30, 17), MAX_CORRIDOR_DEPTH);
        let segments = carver.segments.clone();
        assert_eq!(carver.capped, 1);
        assert!(segments.iter().all(|s| s.cell_count() <= 3));
        assert!(reachable(&grid, Point::new(0, 0), Point::new(30, 17)));
    }

    #[test]
    fn test_bent_corridors_never_exceed_cell_limit() {
        for seed in 0..50 {
            let mut grid = Grid::new(64, 48);
            let mut rng = GenRng::new(seed);
            let from = Point::new(3, 5);
            let to = Point::new(60, 40);
            let segments =
                carve_corridors(&mut grid, &[edge(from, to)], &params(1, 4, 1.0), &mut rng);
            let longest = segments.iter().map(|s| s.cell_count()).max().unwrap();
            assert!(longest <= 4, "seed {seed}: {longest} cells in one piece");
            assert!(reachable(&grid, from, to), "seed {seed}");
        }
    }

    #[test]
    fn test_single_cell_limit() {
        let mut grid = Grid::new(20, 5);
        let mut rng = GenRng::new(6);
        let from = Point::new(1, 2);
        let to = Point::new(9, 2);
        let segments = carve_corridors(&mut grid, &[edge(from, to)], &params(1, 1, 0.5), &mut rng);
        assert!(segments.iter().all(|s| s.from == s.to));
        assert!(reachable(&grid, from, to));
    }
}
