//! Corridor planning between rooms
//!
//! 1. Greedy nearest-unvisited chain from room 0 (guarantees reachability)
//! 2. Independent extra edge per room pair with probability `connectivity`
//!
//! The chain is not a minimum spanning tree: each step only looks from
//! the most recently attached room.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Point, Room};
use crate::rng::GenRng;

/// A planned corridor between two rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub from_center: Point,
    pub to_center: Point,
    /// Part of the spanning chain rather than an extra loop
    pub spanning: bool,
}

impl Edge {
    fn between(a: &Room, b: &Room, spanning: bool) -> Self {
        Self {
            from: a.id,
            to: b.id,
            from_center: a.center,
            to_center: b.center,
            spanning,
        }
    }
}

/// Disjoint-set forest over room indices
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    parent: Vec<usize>,
    /// Set size, valid for roots only
    size: Vec<usize>,
    groups: usize,
}

impl ConnectivityTracker {
    /// Create a tracker where every room starts alone
    pub fn new(num_rooms: usize) -> Self {
        Self {
            parent: (0..num_rooms).collect(),
            size: vec![1; num_rooms],
            groups: num_rooms,
        }
    }

    fn root(&self, mut room: usize) -> usize {
        while self.parent[room] != room {
            room = self.parent[room];
        }
        room
    }

    /// Check if two rooms are in the same set. Unknown rooms never are.
    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        a < self.parent.len() && b < self.parent.len() && self.root(a) == self.root(b)
    }

    /// Join the sets of two rooms; returns false if they were already joined
    pub fn merge(&mut self, a: usize, b: usize) -> bool {
        if a >= self.parent.len() || b >= self.parent.len() {
            return false;
        }
        let (ra, rb) = (self.root(a), self.root(b));
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.groups -= 1;
        true
    }

    /// Number of disjoint sets
    pub fn groups(&self) -> usize {
        self.groups
    }

    /// Check if all rooms share one set
    pub fn all_connected(&self) -> bool {
        self.groups <= 1
    }

    /// Tracker with every edge in `edges` merged
    pub fn from_edges(num_rooms: usize, edges: &[Edge]) -> Self {
        let mut tracker = Self::new(num_rooms);
        for edge in edges {
            tracker.merge(edge.from, edge.to);
        }
        tracker
    }
}

/// Greedy nearest-unvisited chain over room centers.
///
/// Returns `rooms.len() - 1` edges (none for fewer than two rooms).
pub fn spanning_chain(rooms: &[Room]) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(rooms.len().saturating_sub(1));
    let Some(first) = rooms.first() else {
        return edges;
    };

    let mut remaining: Vec<&Room> = rooms[1..].iter().collect();
    let mut current = first;
    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_dist = current.center.dist_sq(remaining[0].center);
        for (i, candidate) in remaining.iter().enumerate().skip(1) {
            let dist = current.center.dist_sq(candidate.center);
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }

        let next = remaining.remove(best);
        edges.push(Edge::between(current, next, true));
        current = next;
    }
    edges
}

/// Plan every corridor for a set of rooms
///
/// # Panics
///
/// Panics if the spanning chain fails to connect every room; that is an
/// internal invariant, not a recoverable condition.
pub fn plan_connections(rooms: &[Room], connectivity: f64, rng: &mut GenRng) -> Vec<Edge> {
    let mut edges = spanning_chain(rooms);

    let tracker = ConnectivityTracker::from_edges(rooms.len(), &edges);
    assert!(
        tracker.all_connected(),
        "spanning chain left a room disconnected"
    );

    let chain_len = edges.len();
    for i in 0..rooms.len() {
        for j in i + 1..rooms.len() {
            if rng.next_f64() < connectivity {
                edges.push(Edge::between(&rooms[i], &rooms[j], false));
            }
        }
    }

    debug!(
        "planned {} spanning + {} extra corridors",
        chain_len,
        edges.len() - chain_len
    );
    edges
}
