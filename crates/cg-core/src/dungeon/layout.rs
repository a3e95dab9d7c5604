//! Finished generation output

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    CellType, ClassificationMap, CorridorSegment, Edge, Grid, Neighborhood, PathClass, Point, Room,
    StartGoal,
};

/// Summary counts for one layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub room_count: usize,
    pub spanning_edges: usize,
    pub extra_edges: usize,
    pub segment_count: usize,
    pub room_cells: usize,
    pub corridor_cells: usize,
    pub room_adjacent: usize,
    pub isolated: usize,
    pub eventable: usize,
    pub not_eventable: usize,
    pub unclassified: usize,
}

impl GenerationStats {
    fn collect(
        grid: &Grid,
        rooms: &[Room],
        edges: &[Edge],
        segments: &[CorridorSegment],
        classes: &ClassificationMap,
    ) -> Self {
        let spanning_edges = edges.iter().filter(|e| e.spanning).count();
        Self {
            room_count: rooms.len(),
            spanning_edges,
            extra_edges: edges.len() - spanning_edges,
            segment_count: segments.len(),
            room_cells: grid.count(CellType::RoomFloor),
            corridor_cells: grid.count(CellType::PathFloor),
            room_adjacent: classes.count(PathClass::RoomAdjacent),
            isolated: classes.count(PathClass::Isolated),
            eventable: classes.count(PathClass::Eventable),
            not_eventable: classes.count(PathClass::NotEventable),
            unclassified: classes.count(PathClass::Unclassified),
        }
    }
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "rooms: {} ({} cells)",
            self.room_count, self.room_cells
        )?;
        writeln!(
            f,
            "corridors: {} spanning + {} extra edges, {} segments, {} cells",
            self.spanning_edges, self.extra_edges, self.segment_count, self.corridor_cells
        )?;
        write!(
            f,
            "classes: {} room-adjacent, {} isolated, {} eventable, {} not eventable",
            self.room_adjacent, self.isolated, self.eventable, self.not_eventable
        )?;
        if self.unclassified > 0 {
            write!(f, ", {} unclassified", self.unclassified)?;
        }
        Ok(())
    }
}

/// Everything a generation run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Seed that reproduces this layout
    pub seed: u64,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    /// Planned corridors, spanning chain first
    pub edges: Vec<Edge>,
    /// Straight pieces actually carved
    pub segments: Vec<CorridorSegment>,
    pub start_goal: Option<StartGoal>,
    pub classes: ClassificationMap,
    pub stats: GenerationStats,
}

impl Layout {
    pub(crate) fn assemble(
        seed: u64,
        grid: Grid,
        rooms: Vec<Room>,
        edges: Vec<Edge>,
        segments: Vec<CorridorSegment>,
        start_goal: Option<StartGoal>,
        classes: ClassificationMap,
    ) -> Self {
        let stats = GenerationStats::collect(&grid, &rooms, &edges, &segments, &classes);
        Self {
            seed,
            grid,
            rooms,
            edges,
            segments,
            start_goal,
            classes,
            stats,
        }
    }

    /// Room containing a point, if any
    pub fn room_at(&self, p: Point) -> Option<&Room> {
        self.rooms.iter().find(|r| r.contains(p))
    }

    pub fn start_room(&self) -> Option<&Room> {
        self.start_goal.map(|sg| &self.rooms[sg.start])
    }

    pub fn goal_room(&self) -> Option<&Room> {
        self.start_goal.map(|sg| &self.rooms[sg.goal])
    }

    /// Cells reachable from `from` over 4-connected walkable cells
    pub fn reachable_from(&self, from: Point) -> Vec<bool> {
        let grid = &self.grid;
        let mut seen = vec![false; (grid.width() * grid.height()) as usize];
        if !grid.get_or_empty(from.x, from.y).is_walkable() {
            return seen;
        }

        let index = |p: Point| (p.y * grid.width() + p.x) as usize;
        seen[index(from)] = true;
        let mut stack = vec![from];
        while let Some(p) = stack.pop() {
            for n in grid.neighbors(p, Neighborhood::Four) {
                if !seen[index(n)] && grid.get_or_empty(n.x, n.y).is_walkable() {
                    seen[index(n)] = true;
                    stack.push(n);
                }
            }
        }
        seen
    }

    /// True if every room center can reach every other
    pub fn is_fully_connected(&self) -> bool {
        let Some(first) = self.rooms.first() else {
            return true;
        };
        let seen = self.reachable_from(first.center);
        let width = self.grid.width();
        self.rooms
            .iter()
            .all(|r| seen[(r.center.y * width + r.center.x) as usize])
    }
}
