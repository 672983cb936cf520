//! The obstacle map searched by [`run_search`](crate::run_search).

use pathgrid_core::{Point, Range};

use crate::error::ParseError;

/// The type of a single grid cell.
///
/// The discriminants are the codes used by level files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CellType {
    #[default]
    Free = 1,
    Blocked = 2,
    Start = 3,
    End = 4,
}

impl CellType {
    /// Start and End cells are walkable like Free ones.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, Self::Blocked)
    }

    /// The level-file code of this cell type.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Free),
            2 => Some(Self::Blocked),
            3 => Some(Self::Start),
            4 => Some(Self::End),
            _ => None,
        }
    }

    /// Character used by [`Grid::from_ascii`] and [`Grid::to_ascii`].
    pub const fn glyph(self) -> char {
        match self {
            Self::Free => '.',
            Self::Blocked => '#',
            Self::Start => 'S',
            Self::End => 'E',
        }
    }

    const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Free),
            '#' => Some(Self::Blocked),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            _ => None,
        }
    }
}

/// A fixed-size `width × height` map of [`CellType`]s.
///
/// The grid is built and edited by its owner; a search only ever borrows
/// it immutably.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: Vec<CellType>,
    width: i32,
    height: i32,
}

/// Number of cells in a `width` x `height` grid. Negative sides count as
/// zero and the product is taken in `usize`, so it cannot wrap for any pair
/// of `i32` sides on 64-bit targets.
fn cell_count(width: i32, height: i32) -> usize {
    width.max(0) as usize * height.max(0) as usize
}

impl Grid {
    /// Create a grid where every cell is [`CellType::Free`].
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![CellType::Free; cell_count(width, height)],
            width,
            height,
        }
    }

    /// Parse a grid from rows of `.` (free), `#` (blocked), `S` (start)
    /// and `E` (end). Blank lines are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, ParseError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(ParseError::Empty);
        };
        let width = first.chars().count();
        let mut grid = Grid::new(width as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ParseError::InconsistentWidth {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let cell = CellType::from_glyph(ch).ok_or(ParseError::InvalidChar { ch, pos })?;
                grid.set(pos, cell);
            }
        }
        Ok(grid)
    }

    /// Render the grid in the [`from_ascii`](Grid::from_ascii) format.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.cells[self.index(Point::new(x, y))].glyph());
            }
            out.push('\n');
        }
        out
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::with_size(self.size())
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    /// The type of the cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn cell_type(&self, p: Point) -> Option<CellType> {
        self.contains(p).then(|| self.cells[self.index(p)])
    }

    /// Set the cell at `p`. Returns `false` (and does nothing) outside the
    /// grid.
    pub fn set(&mut self, p: Point, cell: CellType) -> bool {
        if !self.contains(p) {
            return false;
        }
        let i = self.index(p);
        self.cells[i] = cell;
        true
    }

    /// Set every cell to `cell`.
    pub fn fill(&mut self, cell: CellType) {
        self.cells.fill(cell);
    }

    /// Row-major iterator over `(Point, CellType)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellType)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// The first cell of type `cell` in row-major order.
    pub fn find(&self, cell: CellType) -> Option<Point> {
        self.iter().find(|&(_, c)| c == cell).map(|(p, _)| p)
    }
}
