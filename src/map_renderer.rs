use std::collections::HashMap;

use crate::map_ast::Relation;
use crate::map_layout::{MapLayout, NodeLayout};

struct Grid {
    cells: Vec<Vec<char>>,
    // Box rectangles, including their blank padding cells, are
    // off-limits to link lines and labels.
    reserved: Vec<Vec<bool>>,
    width: usize,
    height: usize,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            reserved: vec![vec![false; width]; height],
            width,
            height,
        }
    }

    fn reserve_rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.reserved[row][col] = true;
            }
        }
    }

    fn set(&mut self, row: usize, col: usize, ch: char) {
        if row < self.height && col < self.width {
            if self.cells[row][col] == '\0' && col > 0 && self.cells[row][col - 1] != '\0' {
                self.cells[row][col - 1] = ' ';
            }
            self.cells[row][col] = ch;
        }
    }

    fn write_str(&mut self, row: usize, col: usize, s: &str) {
        let mut offset = 0;
        for ch in s.chars() {
            self.set(row, col + offset, ch);
            let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1);
            for j in 1..w {
                self.set(row, col + offset + j, '\0');
            }
            offset += w;
        }
    }

    fn is_blank(&self, row: usize, col: usize) -> bool {
        row < self.height
            && col < self.width
            && !self.reserved[row][col]
            && self.cells[row][col] == ' '
    }

    fn is_blank_or_dot(&self, row: usize, col: usize) -> bool {
        row < self.height
            && col < self.width
            && !self.reserved[row][col]
            && (self.cells[row][col] == ' ' || self.cells[row][col] == '·')
    }

    fn render(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                let line: String = row.iter().filter(|&&ch| ch != '\0').collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn render(layout: &MapLayout) -> String {
    let mut grid = Grid::new(layout.width, layout.height);
    let node_map: HashMap<&str, &NodeLayout> =
        layout.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    // Boxes first; link lines only touch blank cells, so they can never
    // cut through a box.
    for node in &layout.nodes {
        draw_box(&mut grid, node);
    }

    for edge in &layout.edges {
        let from = node_map[edge.from_id.as_str()];
        let to = node_map[edge.to_id.as_str()];
        draw_link(&mut grid, from, to);
    }

    for edge in &layout.edges {
        let from = node_map[edge.from_id.as_str()];
        let to = node_map[edge.to_id.as_str()];
        draw_relation_label(&mut grid, from, to, edge.relation);
    }

    grid.render()
}

fn draw_box(grid: &mut Grid, node: &NodeLayout) {
    let (x, y, w) = (node.x, node.y, node.width);
    grid.reserve_rect(x, y, w, node.height);

    grid.set(y, x, '┌');
    for col in (x + 1)..(x + w - 1) {
        grid.set(y, col, '─');
    }
    grid.set(y, x + w - 1, '┐');

    grid.set(y + 1, x, '│');
    grid.write_str(y + 1, x + 2, &node.concept);
    grid.set(y + 1, x + w - 1, '│');

    grid.set(y + 2, x, '└');
    for col in (x + 1)..(x + w - 1) {
        grid.set(y + 2, col, '─');
    }
    grid.set(y + 2, x + w - 1, '┘');
}

/// Dotted line between box centers; the last cell plotted before the
/// target box becomes the arrowhead.
fn draw_link(grid: &mut Grid, from: &NodeLayout, to: &NodeLayout) {
    let (r0, c0) = (from.center_y as isize, from.center_x as isize);
    let (r1, c1) = (to.center_y as isize, to.center_x as isize);
    let steps = (r1 - r0).abs().max((c1 - c0).abs());
    if steps == 0 {
        return;
    }

    let mut last = None;
    for t in 1..steps {
        let frac = t as f64 / steps as f64;
        let row = (r0 as f64 + (r1 - r0) as f64 * frac).round() as usize;
        let col = (c0 as f64 + (c1 - c0) as f64 * frac).round() as usize;
        if grid.is_blank(row, col) {
            grid.set(row, col, '·');
            last = Some((row, col));
        }
    }

    if let Some((row, col)) = last {
        grid.set(row, col, arrowhead(r1 - r0, c1 - c0));
    }
}

fn arrowhead(dr: isize, dc: isize) -> char {
    if dc.abs() >= dr.abs() {
        if dc > 0 { '>' } else { '<' }
    } else if dr > 0 {
        '▼'
    } else {
        '▲'
    }
}

fn draw_relation_label(grid: &mut Grid, from: &NodeLayout, to: &NodeLayout, relation: Relation) {
    let label = relation.as_str();
    let row = (from.center_y + to.center_y) / 2;
    let mid = (from.center_x + to.center_x) / 2;
    let start = mid.saturating_sub(label.len() / 2);

    // Only claim the midpoint when nothing but line dots is there.
    if (start..start + label.len()).all(|col| grid.is_blank_or_dot(row, col)) {
        grid.write_str(row, start, label);
    }
}
