//! Plain-text dump of a layout
//!
//! `' '` empty, `.` room floor, `#` corridor. With the class overlay,
//! corridor cells show their `PathClass` symbol instead. `S` and `G` mark
//! the start and goal room centers.

use crate::dungeon::{CellType, Layout, Point};

/// What to draw on top of the bare grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw corridor classes instead of plain `#`
    pub overlay: bool,
    /// Draw `S`/`G` at start and goal centers
    pub markers: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            overlay: true,
            markers: true,
        }
    }
}

/// Render one character per cell, one line per row
pub fn render_ascii(layout: &Layout, options: RenderOptions) -> String {
    let grid = &layout.grid;
    let (start, goal) = match (options.markers, layout.start_room(), layout.goal_room()) {
        (true, Some(s), Some(g)) => (Some(s.center), Some(g.center)),
        _ => (None, None),
    };

    let mut out = String::with_capacity(((grid.width() + 1) * grid.height()) as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            let cell = grid.get_or_empty(x, y);
            let ch = if Some(p) == start {
                'S'
            } else if Some(p) == goal {
                'G'
            } else if options.overlay && cell == CellType::PathFloor {
                layout.classes.get(p).map_or(cell.symbol(), |c| c.symbol())
            } else {
                cell.symbol()
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Legend lines for the characters `render_ascii` can emit
pub fn legend(options: RenderOptions) -> Vec<String> {
    use crate::dungeon::PathClass;
    use strum::IntoEnumIterator;

    let mut lines: Vec<String> = CellType::iter()
        .filter(|c| !(options.overlay && *c == CellType::PathFloor))
        .map(|c| format!("'{}' {}", c.symbol(), c))
        .collect();
    if options.overlay {
        lines.extend(PathClass::iter().map(|c| format!("'{}' {}", c.symbol(), c)));
    }
    if options.markers {
        lines.push("'S' start".to_string());
        lines.push("'G' goal".to_string());
    }
    lines
}
