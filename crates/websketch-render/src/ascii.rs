//! ASCII grid rendering of a capture for human inspection.
//!
//! Mechanical painting: map each visible node's bounding box onto a fixed
//! character grid, draw borders for container roles large enough to show
//! one, and stamp a compact `[ROLE:semantic]` label. Every cell keeps the
//! priority of whoever painted it, so overlays (`MODAL`, `TOAST`,
//! `DROPDOWN`) float over structural containers regardless of paint order.

use tracing::debug;
use websketch_core::{Capture, Node, Role};

/// Smallest cell rectangle that gets a border, in columns x rows.
const MIN_BOX_COLS: usize = 4;
const MIN_BOX_ROWS: usize = 3;

/// Output grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: usize,
    pub height: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: 80,
            height: 24,
        }
    }
}

/// Paint priority per role. Higher priorities overwrite lower ones.
const fn role_priority(role: Role) -> u8 {
    match role {
        Role::Page | Role::Unknown => 1,
        Role::Section | Role::List | Role::Table | Role::Image | Role::Text => 2,
        Role::Nav | Role::Header | Role::Footer | Role::Card => 3,
        Role::Form | Role::Pagination => 4,
        Role::Input | Role::Button | Role::Link | Role::Checkbox | Role::Radio | Role::Icon => 6,
        Role::Dropdown => 8,
        Role::Modal | Role::Toast => 9,
    }
}

struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
    priorities: Vec<u8>,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![' '; width * height],
            priorities: vec![0; width * height],
        }
    }

    fn put(&mut self, col: usize, row: usize, ch: char, priority: u8) {
        if col >= self.width || row >= self.height {
            return;
        }
        let index = row * self.width + col;
        if priority >= self.priorities[index] {
            self.cells[index] = ch;
            self.priorities[index] = priority;
        }
    }

    fn put_str(&mut self, col: usize, row: usize, text: &str, priority: u8) {
        for (offset, ch) in text.chars().enumerate() {
            self.put(col + offset, row, ch, priority);
        }
    }

    fn to_string_grid(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            let start = row * self.width;
            out.extend(&self.cells[start..start + self.width]);
            if row + 1 < self.height {
                out.push('\n');
            }
        }
        out
    }
}

/// Cell rectangle of a node on the grid, clamped to bounds.
fn cell_rect(node: &Node, width: usize, height: usize) -> (usize, usize, usize, usize) {
    let clamp_round = |v: f64, max: usize| -> usize {
        let cells = (v * max as f64).round();
        if cells <= 0.0 {
            0
        } else if cells >= max as f64 {
            max
        } else {
            cells as usize
        }
    };
    let col0 = clamp_round(node.bbox.x(), width);
    let row0 = clamp_round(node.bbox.y(), height);
    let col1 = clamp_round(node.bbox.x() + node.bbox.w(), width).max(col0);
    let row1 = clamp_round(node.bbox.y() + node.bbox.h(), height).max(row0);
    (col0, row0, col1 - col0, row1 - row0)
}

fn label_for(node: &Node) -> String {
    match &node.semantic {
        Some(semantic) => format!("[{}:{}]", node.role.as_str(), semantic),
        None => format!("[{}]", node.role.as_str()),
    }
}

fn truncated(label: &str, max: usize) -> String {
    label.chars().take(max).collect()
}

fn paint(node: &Node, grid: &mut Grid) {
    if !node.visible {
        return;
    }

    let priority = role_priority(node.role);
    let (col0, row0, cols, rows) = cell_rect(node, grid.width, grid.height);

    if node.role.is_container() && cols >= MIN_BOX_COLS && rows >= MIN_BOX_ROWS {
        let col1 = col0 + cols - 1;
        let row1 = row0 + rows - 1;
        for col in col0..=col1 {
            grid.put(col, row0, '-', priority);
            grid.put(col, row1, '-', priority);
        }
        for row in row0..=row1 {
            grid.put(col0, row, '|', priority);
            grid.put(col1, row, '|', priority);
        }
        grid.put(col0, row0, '+', priority);
        grid.put(col1, row0, '+', priority);
        grid.put(col0, row1, '+', priority);
        grid.put(col1, row1, '+', priority);
        // Label one row below the top-left corner, inside the border.
        let label = truncated(&label_for(node), cols.saturating_sub(2));
        grid.put_str(col0 + 1, row0 + 1, &label, priority);
    } else if node.interactive && node.children.is_empty() {
        // Interactive leaves always show up, however small.
        let label = truncated(&label_for(node), grid.width.saturating_sub(col0));
        grid.put_str(col0, row0.min(grid.height.saturating_sub(1)), &label, priority);
    }

    for child in &node.children {
        paint(child, grid);
    }
}

/// Render `capture` onto a character grid and return it as newline-joined
/// rows.
#[must_use]
pub fn render_ascii(capture: &Capture, options: &RenderOptions) -> String {
    let mut grid = Grid::new(options.width.max(1), options.height.max(1));
    paint(&capture.root, &mut grid);
    let out = grid.to_string_grid();
    debug!(
        target: "websketch.render",
        width = options.width,
        height = options.height,
        node_count = capture.root.subtree_len(),
        "capture rendered"
    );
    out
}
