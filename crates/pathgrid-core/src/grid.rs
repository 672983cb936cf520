//! The display [`Grid`]: a 2D buffer of styled [`Cell`]s, plus frame
//! diffing for drivers.

use crate::cell::Cell;
use crate::geom::{Point, Range};
use crate::style::Style;

/// A 2D grid of [`Cell`]s in row-major order.
///
/// Writes outside the bounds are ignored and reads outside the bounds
/// return `Cell::default()`, so drawing code can clip freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with default cells.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::with_size(Point::new(width, height));
        Self {
            cells: vec![Cell::default(); bounds.len()],
            bounds,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.width() as usize) + (p.x as usize))
    }

    /// Read the cell at `p`.
    pub fn at(&self, p: Point) -> Cell {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Set the cell at `p`. No-op outside the bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Fill every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Fill the part of `rng` that overlaps the grid with `cell`.
    pub fn fill_range(&mut self, rng: Range, cell: Cell) {
        for p in self.bounds.intersect(rng) {
            self.set(p, cell);
        }
    }

    /// Write `text` left to right starting at `p`, clipped to the grid.
    /// Returns the number of columns the text occupies.
    pub fn put_str(&mut self, p: Point, text: &str, style: Style) -> i32 {
        let mut x = p.x;
        for ch in text.chars() {
            self.set(Point::new(x, p.y), Cell { ch, style });
            x += 1;
        }
        x - p.x
    }

    /// Copy the overlapping part of `src` into `self`, cell for cell.
    pub fn copy_from(&mut self, src: &Grid) {
        for p in self.bounds.intersect(src.bounds) {
            self.set(p, src.at(p));
        }
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// The characters of the grid as text, one line per row with trailing
    /// blanks removed. Styles are dropped.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height() as usize);
        for y in 0..self.height() {
            let row: String = (0..self.width())
                .map(|x| self.at(Point::new(x, y)).ch)
                .collect();
            out.push_str(row.trim_end());
            out.push('\n');
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// The set of cells that changed since the previous frame.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the cells of `curr` that differ from `prev`.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let cells = curr
        .iter()
        .filter(|&(p, c)| prev.at(p) != c || !prev.contains(p))
        .map(|(pos, cell)| FrameCell { cell, pos })
        .collect();
    Frame {
        cells,
        width: curr.width(),
        height: curr.height(),
    }
}
