//! The demo level: an obstacle [`Grid`] plus its start and goal, and the
//! `level.dat` file format.
//!
//! A level file is a flat run of byte triples `x, y, code`, one per cell,
//! written column by column (x outer, y inner). `code` is
//! [`CellType::code`].

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, warn};
use pathgrid_core::Point;
use pathgrid_search::{CellType, Costs, Endpoint, Grid, SearchError, SearchResult, run_search_with};
use rand::{Rng, RngExt};

pub const LEVEL_WIDTH: i32 = 16;
pub const LEVEL_HEIGHT: i32 = 14;
/// Largest side a level file can describe; coordinates are single bytes.
pub const MAX_LEVEL_SIDE: i32 = 256;

const DEMO_START: Point = Point::new(2, 2);
const DEMO_GOAL: Point = Point::new(14, 10);
const DEMO_BLOCKS: [(i32, i32); 17] = [
    (4, 1),
    (4, 2),
    (4, 3),
    (2, 6),
    (3, 6),
    (4, 6),
    (5, 6),
    (6, 6),
    (7, 6),
    (8, 6),
    (9, 6),
    (10, 6),
    (13, 9),
    (14, 9),
    (15, 9),
    (13, 10),
    (15, 10),
];

/// Errors from building, saving or loading a level.
#[derive(Debug)]
pub enum LevelError {
    Io(io::Error),
    /// The file holds no cells.
    Empty,
    /// The file length is not a multiple of three.
    Truncated { len: usize },
    /// A cell code outside 1..=4.
    InvalidCode { code: u8, pos: Point },
    /// The same cell appears twice.
    Duplicate { pos: Point },
    /// A cell inside the inferred bounds never appears.
    Missing { pos: Point },
    /// No cell of the endpoint's type, or the endpoint is off the grid.
    MissingEndpoint(Endpoint),
    /// More than one cell of the endpoint's type.
    DuplicateEndpoint(Endpoint),
    /// The grid is too wide or tall for byte coordinates.
    TooLarge { width: i32, height: i32 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "level i/o: {e}"),
            Self::Empty => f.write_str("level file is empty"),
            Self::Truncated { len } => {
                write!(f, "level file length {len} is not a multiple of 3")
            }
            Self::InvalidCode { code, pos } => write!(f, "invalid cell code {code} at {pos}"),
            Self::Duplicate { pos } => write!(f, "cell {pos} appears more than once"),
            Self::Missing { pos } => write!(f, "cell {pos} is missing"),
            Self::MissingEndpoint(e) => write!(f, "level has no {e} cell"),
            Self::DuplicateEndpoint(e) => write!(f, "level has more than one {e} cell"),
            Self::TooLarge { width, height } => write!(
                f,
                "{width}x{height} level exceeds {MAX_LEVEL_SIDE}x{MAX_LEVEL_SIDE}"
            ),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LevelError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// An obstacle grid with its start and goal marked.
///
/// The start cell always holds [`CellType::Start`] and the goal cell
/// [`CellType::End`]; edits never overwrite them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    grid: Grid,
    start: Point,
    goal: Point,
}

impl Level {
    /// Wrap `grid`, marking `start` and `goal` on it.
    pub fn new(mut grid: Grid, start: Point, goal: Point) -> Result<Self, LevelError> {
        if !grid.contains(start) {
            return Err(LevelError::MissingEndpoint(Endpoint::Start));
        }
        if !grid.contains(goal) || goal == start {
            return Err(LevelError::MissingEndpoint(Endpoint::Goal));
        }
        grid.set(start, CellType::Start);
        grid.set(goal, CellType::End);
        Ok(Self { grid, start, goal })
    }

    /// The 16×14 demonstration layout.
    pub fn demo() -> Self {
        let mut grid = Grid::new(LEVEL_WIDTH, LEVEL_HEIGHT);
        for (x, y) in DEMO_BLOCKS {
            grid.set(Point::new(x, y), CellType::Blocked);
        }
        grid.set(DEMO_START, CellType::Start);
        grid.set(DEMO_GOAL, CellType::End);
        Self {
            grid,
            start: DEMO_START,
            goal: DEMO_GOAL,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Search from start to goal on a fresh node table.
    pub fn search(&self, costs: &Costs) -> Result<SearchResult, SearchError> {
        run_search_with(&self.grid, self.start, self.goal, costs)
    }

    /// Make every cell free again, keeping the start and goal.
    pub fn clear(&mut self) {
        self.grid.fill(CellType::Free);
        self.grid.set(self.start, CellType::Start);
        self.grid.set(self.goal, CellType::End);
    }

    /// Flip `p` between free and blocked. Returns whether anything
    /// changed; the endpoints and cells off the grid are left alone.
    pub fn toggle(&mut self, p: Point) -> bool {
        let next = match self.grid.cell_type(p) {
            Some(CellType::Free) => CellType::Blocked,
            Some(CellType::Blocked) => CellType::Free,
            _ => return false,
        };
        self.grid.set(p, next)
    }

    /// Block up to `count` random free cells. Returns how many were
    /// blocked.
    pub fn scatter_walls(&mut self, rng: &mut impl Rng, count: usize) -> usize {
        let mut free: Vec<Point> = self
            .grid
            .iter()
            .filter(|&(_, c)| c == CellType::Free)
            .map(|(p, _)| p)
            .collect();
        let mut placed = 0;
        while placed < count && !free.is_empty() {
            let i = rng.random_range(0..free.len());
            let p = free.swap_remove(i);
            self.grid.set(p, CellType::Blocked);
            placed += 1;
        }
        placed
    }

    /// Write the level in the `level.dat` format.
    pub fn write_to<W: Write>(&self, mut w: W) -> Result<(), LevelError> {
        let (width, height) = (self.grid.width(), self.grid.height());
        if width > MAX_LEVEL_SIDE || height > MAX_LEVEL_SIDE {
            return Err(LevelError::TooLarge { width, height });
        }
        let mut buf = Vec::with_capacity((width * height * 3) as usize);
        for x in 0..width {
            for y in 0..height {
                let p = Point::new(x, y);
                let code = self.grid.cell_type(p).unwrap_or_default().code();
                buf.extend_from_slice(&[x as u8, y as u8, code]);
            }
        }
        w.write_all(&buf)?;
        w.flush()?;
        Ok(())
    }

    /// Parse a level from `level.dat` bytes.
    ///
    /// The size is taken from the largest coordinates present; every cell
    /// inside must appear exactly once, and exactly one cell each must be
    /// Start and End.
    pub fn read_from<R: Read>(mut r: R) -> Result<Self, LevelError> {
        let mut data = Vec::new();
        r.read_to_end(&mut data)?;
        if data.is_empty() {
            return Err(LevelError::Empty);
        }
        if data.len() % 3 != 0 {
            return Err(LevelError::Truncated { len: data.len() });
        }

        let (mut width, mut height) = (0, 0);
        for t in data.chunks_exact(3) {
            width = width.max(t[0] as i32 + 1);
            height = height.max(t[1] as i32 + 1);
        }

        let mut grid = Grid::new(width, height);
        let mut seen = vec![false; (width * height) as usize];
        let mut start = None;
        let mut goal = None;
        for t in data.chunks_exact(3) {
            let pos = Point::new(t[0] as i32, t[1] as i32);
            let cell = CellType::from_code(t[2]).ok_or(LevelError::InvalidCode { code: t[2], pos })?;
            let i = (pos.y * width + pos.x) as usize;
            if seen[i] {
                return Err(LevelError::Duplicate { pos });
            }
            seen[i] = true;
            let slot = match cell {
                CellType::Start => Some((&mut start, Endpoint::Start)),
                CellType::End => Some((&mut goal, Endpoint::Goal)),
                _ => None,
            };
            if let Some((slot, endpoint)) = slot {
                if slot.replace(pos).is_some() {
                    return Err(LevelError::DuplicateEndpoint(endpoint));
                }
            }
            grid.set(pos, cell);
        }

        if let Some(i) = seen.iter().position(|&s| !s) {
            let i = i as i32;
            return Err(LevelError::Missing {
                pos: Point::new(i % width, i / width),
            });
        }
        let start = start.ok_or(LevelError::MissingEndpoint(Endpoint::Start))?;
        let goal = goal.ok_or(LevelError::MissingEndpoint(Endpoint::Goal))?;
        Ok(Self { grid, start, goal })
    }

    /// Save to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), LevelError> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        debug!("saved {}x{} level to {}", self.grid.width(), self.grid.height(), path.display());
        Ok(())
    }

    /// Load from `path`.
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let file = File::open(path)?;
        let level = Self::read_from(BufReader::new(file)).inspect_err(|e| {
            warn!("failed to load {}: {e}", path.display());
        })?;
        debug!(
            "loaded {}x{} level from {}",
            level.grid.width(),
            level.grid.height(),
            path.display()
        );
        Ok(level)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathgrid_search::{NodeStatus, SearchStatus};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    fn bytes(level: &Level) -> Vec<u8> {
        let mut buf = Vec::new();
        level.write_to(&mut buf).unwrap();
        buf
    }

    impl Level {
        fn endpoints_marked(&self) -> bool {
            self.grid.cell_type(self.start) == Some(CellType::Start)
                && self.grid.cell_type(self.goal) == Some(CellType::End)
        }
    }

    fn blocked(level: &Level) -> usize {
        level
            .grid()
            .iter()
            .filter(|&(_, c)| c == CellType::Blocked)
            .count()
    }

    #[test]
    fn demo_layout() {
        let level = Level::demo();
        assert_eq!(level.grid().size(), Point::new(16, 14));
        assert_eq!(blocked(&level), 17);
        assert!(level.endpoints_marked());
        assert_eq!(level.grid().cell_type(Point::new(4, 2)), Some(CellType::Blocked));
    }

    #[test]
    fn demo_level_is_solvable() {
        let level = Level::demo();
        let r = level.search(&Costs::default()).unwrap();
        assert_eq!(r.status, SearchStatus::Found);
        assert_eq!(r.path.first(), Some(&level.goal()));
        assert_eq!(r.node(level.start()).unwrap().status, NodeStatus::Closed);
    }

    #[test]
    fn file_layout_is_column_major_triples() {
        let buf = bytes(&Level::demo());
        assert_eq!(buf.len(), 16 * 14 * 3);
        assert_eq!(&buf[..6], &[0, 0, 1, 0, 1, 1]);
        // x = 0 spans the first 14 triples.
        assert_eq!(&buf[14 * 3..14 * 3 + 3], &[1, 0, 1]);
        // (2, 2) is the start.
        let i = (2 * 14 + 2) * 3;
        assert_eq!(&buf[i..i + 3], &[2, 2, 3]);
    }

    #[test]
    fn save_then_load_restores_level() {
        let mut level = Level::demo();
        level.toggle(Point::new(7, 7));
        let back = Level::read_from(Cursor::new(bytes(&level))).unwrap();
        assert_eq!(back, level);
    }

    #[test]
    fn load_accepts_any_triple_order() {
        let mut triples: Vec<[u8; 3]> = bytes(&Level::demo())
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();
        triples.reverse();
        let back = Level::read_from(Cursor::new(triples.concat())).unwrap();
        assert_eq!(back, Level::demo());
    }

    #[test]
    fn load_rejects_malformed_files() {
        assert!(matches!(
            Level::read_from(Cursor::new(Vec::new())),
            Err(LevelError::Empty)
        ));
        assert!(matches!(
            Level::read_from(Cursor::new(vec![0, 0])),
            Err(LevelError::Truncated { len: 2 })
        ));

        let good = bytes(&Level::demo());

        let mut bad = good.clone();
        bad[2] = 9;
        assert!(matches!(
            Level::read_from(Cursor::new(bad)),
            Err(LevelError::InvalidCode { code: 9, .. })
        ));

        let mut dup = good.clone();
        dup[3] = 0;
        dup[4] = 0;
        assert!(matches!(
            Level::read_from(Cursor::new(dup)),
            Err(LevelError::Duplicate { pos }) if pos == Point::new(0, 0)
        ));

        let missing = good[3..].to_vec();
        assert!(matches!(
            Level::read_from(Cursor::new(missing)),
            Err(LevelError::Missing { pos }) if pos == Point::new(0, 0)
        ));

        let mut no_goal = good.clone();
        let i = (14 * 14 + 10) * 3;
        no_goal[i + 2] = CellType::Free.code();
        assert!(matches!(
            Level::read_from(Cursor::new(no_goal)),
            Err(LevelError::MissingEndpoint(Endpoint::Goal))
        ));

        let mut two_starts = good;
        two_starts[2] = CellType::Start.code();
        assert!(matches!(
            Level::read_from(Cursor::new(two_starts)),
            Err(LevelError::DuplicateEndpoint(Endpoint::Start))
        ));
    }

    #[test]
    fn oversized_levels_cannot_be_saved() {
        let level = Level::new(Grid::new(300, 4), Point::new(1, 1), Point::new(2, 2)).unwrap();
        assert!(matches!(
            level.write_to(Vec::new()),
            Err(LevelError::TooLarge { width: 300, .. })
        ));
    }

    #[test]
    fn clear_keeps_endpoints() {
        let mut level = Level::demo();
        level.clear();
        assert_eq!(blocked(&level), 0);
        assert!(level.endpoints_marked());
    }

    #[test]
    fn toggle_flips_free_and_blocked_only() {
        let mut level = Level::demo();
        let p = Point::new(7, 7);
        assert!(level.toggle(p));
        assert_eq!(level.grid().cell_type(p), Some(CellType::Blocked));
        assert!(level.toggle(p));
        assert_eq!(level.grid().cell_type(p), Some(CellType::Free));
        assert!(!level.toggle(level.start()));
        assert!(!level.toggle(level.goal()));
        assert!(!level.toggle(Point::new(-1, 3)));
        assert!(level.endpoints_marked());
    }

    #[test]
    fn scatter_is_seeded_and_spares_endpoints() {
        let mut a = Level::demo();
        let mut b = Level::demo();
        assert_eq!(a.scatter_walls(&mut StdRng::seed_from_u64(7), 20), 20);
        b.scatter_walls(&mut StdRng::seed_from_u64(7), 20);
        assert_eq!(a, b);
        assert_eq!(blocked(&a), 37);
        assert!(a.endpoints_marked());

        let mut full = Level::new(Grid::new(3, 1), Point::new(0, 0), Point::new(2, 0)).unwrap();
        assert_eq!(full.scatter_walls(&mut StdRng::seed_from_u64(1), 10), 1);
    }

    #[test]
    fn new_rejects_bad_endpoints() {
        assert!(matches!(
            Level::new(Grid::new(4, 4), Point::new(4, 0), Point::new(1, 1)),
            Err(LevelError::MissingEndpoint(Endpoint::Start))
        ));
        assert!(matches!(
            Level::new(Grid::new(4, 4), Point::new(1, 1), Point::new(1, 1)),
            Err(LevelError::MissingEndpoint(Endpoint::Goal))
        ));
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error;
        let err = Level::load(Path::new("/nonexistent/dir/level.dat")).unwrap_err();
        assert!(matches!(err, LevelError::Io(_)));
        assert!(err.source().is_some());
    }
}
