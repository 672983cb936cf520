//! Interactive pathfinding overlay shared by the terminal binary and the
//! headless `--print`/`--json` modes.
//!
//! Each map tile shows its terrain, whether the last search opened or
//! closed it, and on scored tiles the f (top-left), g (bottom-left) and
//! h (bottom-right) costs. Path tiles carry a dot.

pub mod config;
pub mod level;

use log::{debug, warn};
use pathgrid_core::{
    Cell, Point, Range,
    app::{Effect, Model},
    grid::Grid,
    messages::{Key, MouseAction, Msg},
    style::{AttrMask, Color, Style},
};
use pathgrid_search::{CellType, NodeStatus, SearchResult, SearchStatus};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use config::{Args, DemoConfig, STATUS_ROWS};
pub use level::{Level, LevelError};

// Colours
const COL_GRASS: Color = Color::from_rgb(45, 110, 45);
const COL_ROCK: Color = Color::from_rgb(95, 90, 85);
const COL_ROCK_FG: Color = Color::from_rgb(170, 165, 160);
const COL_START: Color = Color::from_rgb(200, 170, 40);
const COL_END: Color = Color::from_rgb(180, 50, 50);
const COL_OPEN: Color = Color::from_rgb(60, 140, 170);
const COL_CLOSED: Color = Color::from_rgb(40, 70, 110);
const COL_LABEL: Color = Color::from_rgb(230, 230, 230);
const COL_PATH: Color = Color::from_rgb(255, 230, 80);
const COL_STATUS_FG: Color = Color::from_rgb(200, 200, 200);
const COL_STATUS_BG: Color = Color::from_rgb(30, 30, 50);
const COL_ERROR: Color = Color::from_rgb(230, 80, 80);

pub(crate) const HELP_LINE: &str = "q quit  c clear  r rerun  s save  l load  w walls  click toggle";

/// The demo model: a level, the last search over it and a status line.
pub struct PathfindingDemo {
    level: Level,
    config: DemoConfig,
    result: Option<SearchResult>,
    rng: StdRng,
    message: String,
    failed: bool,
}

impl PathfindingDemo {
    /// Build the demo and run the first search.
    pub fn new(level: Level, config: DemoConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let mut demo = Self {
            level,
            config,
            result: None,
            rng,
            message: String::new(),
            failed: false,
        };
        demo.rerun();
        demo
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The last search, unless it was rejected.
    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Screen size for the current level.
    pub fn screen_size(&self) -> Point {
        self.config.screen_size(self.level.grid().size())
    }

    /// Search the current level again from scratch.
    pub fn rerun(&mut self) {
        match self.level.search(&self.config.costs) {
            Ok(r) => {
                self.message = summary(&r);
                self.failed = false;
                self.result = Some(r);
            }
            Err(e) => {
                warn!("search rejected: {e}");
                self.message = e.to_string();
                self.failed = true;
                self.result = None;
            }
        }
    }

    /// The map tile under screen cell `pos`.
    pub fn tile_at(&self, pos: Point) -> Option<Point> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let tile = self.config.tile;
        let p = Point::new(pos.x / tile.x, pos.y / tile.y);
        self.level.grid().contains(p).then_some(p)
    }

    /// The overlay as plain text, status rows included.
    pub fn render_text(&self) -> String {
        let size = self.screen_size();
        let mut grid = Grid::new(size.x, size.y);
        self.draw(&mut grid);
        grid.to_text()
    }

    fn save(&mut self) {
        let path = &self.config.save_path;
        match self.level.save(path) {
            Ok(()) => self.note(format!("saved {}", path.display())),
            Err(e) => self.fail(format!("save failed: {e}")),
        }
    }

    /// The screen was sized for the current level, so a level of any other
    /// size is refused.
    fn load(&mut self) {
        match Level::load(&self.config.save_path) {
            Ok(level) if level.grid().size() != self.level.grid().size() => {
                let (got, want) = (level.grid().size(), self.level.grid().size());
                self.fail(format!(
                    "load failed: level is {}x{}, screen fits {}x{}",
                    got.x, got.y, want.x, want.y
                ));
            }
            Ok(level) => {
                self.level = level;
                self.rerun();
            }
            Err(e) => self.fail(format!("load failed: {e}")),
        }
    }

    fn note(&mut self, msg: String) {
        debug!("{msg}");
        self.message = msg;
        self.failed = false;
    }

    fn fail(&mut self, msg: String) {
        warn!("{msg}");
        self.message = msg;
        self.failed = true;
    }

    fn node_status(&self, p: Point) -> NodeStatus {
        self.result
            .as_ref()
            .map(|r| r.nodes.status(p))
            .unwrap_or_default()
    }

    fn on_path(&self, p: Point) -> bool {
        self.result.as_ref().is_some_and(|r| r.path.contains(&p))
    }

    fn draw_tile(&self, grid: &mut Grid, p: Point, cell: CellType) {
        let tile = self.config.tile;
        let origin = Point::new(p.x * tile.x, p.y * tile.y);
        let rect = Range::new(origin.x, origin.y, origin.x + tile.x, origin.y + tile.y);
        let status = self.node_status(p);

        let bg = match (cell, status) {
            (CellType::Blocked, _) => COL_ROCK,
            (CellType::Start, _) => COL_START,
            (CellType::End, _) => COL_END,
            (CellType::Free, NodeStatus::Open) => COL_OPEN,
            (CellType::Free, NodeStatus::Closed) => COL_CLOSED,
            (CellType::Free, NodeStatus::Unvisited) => COL_GRASS,
        };
        let base = Style::default().with_fg(COL_LABEL).with_bg(bg);
        grid.fill_range(rect, Cell::blank(base));

        let centre = origin.shift((tile.x - 1) / 2, (tile.y - 1) / 2);
        let (ch, style) = if cell == CellType::Free && self.on_path(p) {
            ('*', base.with_fg(COL_PATH).with_attrs(AttrMask::BOLD))
        } else if cell == CellType::Blocked {
            (glyph(cell, status), base.with_fg(COL_ROCK_FG))
        } else {
            (glyph(cell, status), base.with_attrs(AttrMask::BOLD))
        };
        grid.set(centre, Cell::blank(style).with_char(ch));

        if self.config.labels && status != NodeStatus::Unvisited {
            if let Some(r) = &self.result {
                if let Some(n) = r.node(p) {
                    draw_labels(grid, rect, n.f_cost, n.g_cost, n.h_cost, base);
                }
            }
        }
    }

    fn draw_status(&self, grid: &mut Grid) {
        let map_height = self.level.grid().height() * self.config.tile.y;
        let width = grid.width();
        let style = Style::default()
            .with_fg(COL_STATUS_FG)
            .with_bg(COL_STATUS_BG);
        let rows = Range::new(0, map_height, width, map_height + STATUS_ROWS);
        grid.fill_range(rows, Cell::blank(style));

        let msg_style = if self.failed {
            style.with_fg(COL_ERROR)
        } else {
            style
        };
        grid.put_str(Point::new(0, map_height), &self.message, msg_style);
        grid.put_str(Point::new(0, map_height + 1), HELP_LINE, style.with_attrs(AttrMask::DIM));
    }
}

impl Model for PathfindingDemo {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init | Msg::Screen { .. } => None,
            Msg::Quit => Some(Effect::End),

            Msg::KeyDown { key, ctrl } => {
                match key {
                    Key::Escape | Key::Char('q') | Key::Char('Q') => return Some(Effect::End),
                    Key::Char('c') if ctrl => return Some(Effect::End),
                    Key::Char('c') => {
                        self.level.clear();
                        self.rerun();
                    }
                    Key::Char('r') => self.rerun(),
                    Key::Char('s') => self.save(),
                    Key::Char('l') => self.load(),
                    Key::Char('w') => {
                        let placed = self.level.scatter_walls(&mut self.rng, self.config.walls);
                        debug!("scattered {placed} walls");
                        self.rerun();
                    }
                    _ => {}
                }
                None
            }

            Msg::Mouse {
                action: MouseAction::Main,
                pos,
            } => {
                if let Some(p) = self.tile_at(pos) {
                    if self.level.toggle(p) {
                        self.rerun();
                    }
                }
                None
            }

            Msg::Mouse { .. } => None,
        }
    }

    fn draw(&self, grid: &mut Grid) {
        for (p, cell) in self.level.grid().iter() {
            self.draw_tile(grid, p, cell);
        }
        self.draw_status(grid);
    }
}

/// Centre glyph of a tile.
fn glyph(cell: CellType, status: NodeStatus) -> char {
    match (cell, status) {
        (CellType::Free, NodeStatus::Open) => 'o',
        (CellType::Free, NodeStatus::Closed) => 'x',
        _ => cell.glyph(),
    }
}

/// f along the top edge, g and h along the bottom. h is dropped when the
/// bottom row is too narrow for both.
fn draw_labels(grid: &mut Grid, rect: Range, f: i32, g: i32, h: i32, style: Style) {
    let bottom = rect.max.y - 1;
    let width = rect.width();
    let (f, g, h) = (f.to_string(), g.to_string(), h.to_string());
    let fits = |s: &str| s.chars().count() as i32 <= width;

    if fits(&f) {
        grid.put_str(rect.min, &f, style);
    }
    if bottom == rect.min.y {
        return;
    }
    if fits(&g) {
        grid.put_str(Point::new(rect.min.x, bottom), &g, style);
    }
    let (gw, hw) = (g.chars().count() as i32, h.chars().count() as i32);
    if gw + 1 + hw <= width {
        grid.put_str(Point::new(rect.max.x - hw, bottom), &h, style);
    }
}

/// One-line description of a search.
pub fn summary(r: &SearchResult) -> String {
    match r.status {
        SearchStatus::Found => format!(
            "path found: {} steps, cost {}, {} expansions",
            r.path.len(),
            r.goal_cost().unwrap_or_default(),
            r.expansions
        ),
        SearchStatus::NotFound => format!("no path, {} expansions", r.expansions),
    }
}
