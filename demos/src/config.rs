//! Demo settings: command-line [`Args`] and the [`DemoConfig`] built from
//! them.

use std::path::PathBuf;

use clap::Parser;
use pathgrid_core::Point;
use pathgrid_search::Costs;

/// Screen rows below the map: status message and key help.
pub const STATUS_ROWS: i32 = 2;
/// Narrowest screen, wide enough for the key help line.
pub const MIN_SCREEN_WIDTH: i32 = 64;

/// Interactive best-first pathfinding over a tile grid.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Level file to start from (defaults to the built-in level)
    #[arg(long)]
    pub level: Option<PathBuf>,

    /// Where `s` saves and `l` loads the level
    #[arg(long, default_value = "level.dat")]
    pub save_path: PathBuf,

    /// One character per tile, no cost labels
    #[arg(long)]
    pub compact: bool,

    /// Number of walls `w` scatters
    #[arg(long, default_value_t = 20)]
    pub walls: usize,

    /// Seed for wall scattering
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Render the overlay once as text and exit
    #[arg(long, conflicts_with = "json")]
    pub print: bool,

    /// Print the search result as JSON and exit
    #[arg(long)]
    pub json: bool,

    /// Write log output to this file (the terminal UI otherwise logs
    /// nothing)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Whether the demo runs without the terminal UI.
    pub fn headless(&self) -> bool {
        self.print || self.json
    }

    pub fn demo_config(&self) -> DemoConfig {
        let base = if self.compact {
            DemoConfig::compact()
        } else {
            DemoConfig::default()
        };
        DemoConfig {
            save_path: self.save_path.clone(),
            walls: self.walls,
            seed: self.seed,
            ..base
        }
    }
}

/// How the demo lays out and edits a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Screen cells per map tile.
    pub tile: Point,
    /// Draw f/g/h labels on scored tiles.
    pub labels: bool,
    pub save_path: PathBuf,
    pub walls: usize,
    pub seed: u64,
    pub costs: Costs,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tile: Point::new(7, 3),
            labels: true,
            save_path: PathBuf::from("level.dat"),
            walls: 20,
            seed: 42,
            costs: Costs::default(),
        }
    }
}

impl DemoConfig {
    /// Two columns per tile and no labels.
    pub fn compact() -> Self {
        Self {
            tile: Point::new(2, 1),
            labels: false,
            ..Self::default()
        }
    }

    /// Screen size needed to show a map of `map_size` tiles.
    pub fn screen_size(&self, map_size: Point) -> Point {
        Point::new(
            (map_size.x * self.tile.x).max(MIN_SCREEN_WIDTH),
            map_size.y * self.tile.y + STATUS_ROWS,
        )
    }
}
