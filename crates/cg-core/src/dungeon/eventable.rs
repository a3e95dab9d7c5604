//! Eventable corridor selection
//!
//! Runs after adjacency classification, in exactly one of two modes:
//! - random sampling of isolated cells
//! - straight-run detection over rows, then columns

use log::debug;

use super::{CellType, ClassificationMap, Grid, Neighborhood, PathClass, Point};
use crate::config::EventableMode;
use crate::rng::GenRng;

/// Apply the configured mode and return how many cells became `Eventable`
pub fn select_eventable(
    grid: &Grid,
    map: &mut ClassificationMap,
    mode: &EventableMode,
    rng: &mut GenRng,
) -> usize {
    let marked = match *mode {
        EventableMode::Random { count, ratio } => select_random(map, count, ratio, rng),
        EventableMode::RunDetection {
            min_length,
            max_length,
            ignore_room_adjacency,
        } => {
            let mut detector = RunDetector {
                grid,
                map,
                min_length: min_length.max(1) as usize,
                max_length: max_length.max(1) as usize,
                ignore_room_adjacency,
                marked: 0,
            };
            detector.scan();
            detector.marked
        }
    };
    debug!("marked {marked} eventable corridor cells");
    marked
}

/// Number of isolated cells to sample for `count`/`ratio`
fn random_target(isolated: usize, count: i32, ratio: f64) -> usize {
    match count {
        -1 => isolated,
        0 => ((isolated as f64 * ratio).round() as usize).min(isolated),
        n => (n.max(0) as usize).min(isolated),
    }
}

fn select_random(map: &mut ClassificationMap, count: i32, ratio: f64, rng: &mut GenRng) -> usize {
    let mut isolated = map.cells_with(PathClass::Isolated);
    let target = random_target(isolated.len(), count, ratio);
    rng.shuffle(&mut isolated);
    for &p in &isolated[..target] {
        map.set(p, PathClass::Eventable);
    }
    target
}

struct RunDetector<'a> {
    grid: &'a Grid,
    map: &'a mut ClassificationMap,
    min_length: usize,
    max_length: usize,
    ignore_room_adjacency: bool,
    marked: usize,
}

impl RunDetector<'_> {
    fn scan(&mut self) {
        for y in 0..self.grid.height() {
            let row: Vec<Point> = (0..self.grid.width()).map(|x| Point::new(x, y)).collect();
            self.scan_line(&row);
        }
        for x in 0..self.grid.width() {
            let column: Vec<Point> = (0..self.grid.height()).map(|y| Point::new(x, y)).collect();
            self.scan_line(&column);
        }
    }

    fn is_claimed(&self, p: Point) -> bool {
        matches!(
            self.map.get(p),
            Some(PathClass::Eventable | PathClass::NotEventable)
        )
    }

    fn is_eligible(&self, p: Point) -> bool {
        if self.grid.get_or_empty(p.x, p.y) != CellType::PathFloor || self.is_claimed(p) {
            return false;
        }
        self.ignore_room_adjacency
            || (self.map.get(p) != Some(PathClass::RoomAdjacent)
                && !self
                    .grid
                    .has_neighbor(p.x, p.y, CellType::RoomFloor, Neighborhood::Four))
    }

    /// Find maximal eligible runs along one row or column
    fn scan_line(&mut self, line: &[Point]) {
        let mut i = 0;
        while i < line.len() {
            if !self.is_eligible(line[i]) {
                i += 1;
                continue;
            }
            let start = i;
            while i < line.len() && self.is_eligible(line[i]) {
                i += 1;
            }
            self.mark_run(line, start, i - 1);
        }
    }

    /// Mark the eligible run `line[start..=end]`.
    ///
    /// A run within bounds becomes one event. A longer run is tiled as
    /// buffer, event, buffer, ...; a tail shorter than the minimum is left.
    fn mark_run(&mut self, line: &[Point], start: usize, end: usize) {
        let len = end - start + 1;
        if len < self.min_length {
            return;
        }
        if len <= self.max_length {
            self.mark_event(line, start, end);
            if start > 0 {
                self.mark_flank(line[start - 1]);
            }
            self.mark_trailing_flank(line, end);
            return;
        }

        let mut cursor = start;
        self.mark_buffer(line[cursor]);
        loop {
            let available = end - cursor;
            if available < self.min_length {
                break;
            }
            if available <= self.max_length {
                self.mark_event(line, cursor + 1, end);
                self.mark_trailing_flank(line, end);
                break;
            }
            self.mark_event(line, cursor + 1, cursor + self.max_length);
            cursor += self.max_length + 1;
            self.mark_buffer(line[cursor]);
        }
    }

    fn mark_event(&mut self, line: &[Point], start: usize, end: usize) {
        for &p in &line[start..=end] {
            self.map.set(p, PathClass::Eventable);
        }
        self.marked += end - start + 1;
    }

    fn mark_trailing_flank(&mut self, line: &[Point], end: usize) {
        if let Some(&p) = line.get(end + 1) {
            self.mark_flank(p);
        }
    }

    /// Buffer cell inside a tiled run
    fn mark_buffer(&mut self, p: Point) {
        self.map.set(p, PathClass::NotEventable);
    }

    /// Cell just outside a run: quiet only if it is corridor and not an event
    fn mark_flank(&mut self, p: Point) {
        if self.grid.get_or_empty(p.x, p.y) == CellType::PathFloor
            && self.map.get(p) != Some(PathClass::Eventable)
        {
            self.map.set(p, PathClass::NotEventable);
        }
    }
}
