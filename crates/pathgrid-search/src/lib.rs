//! Best-first shortest-path search over fixed-size tile grids.
//!
//! A [`Grid`] marks every cell as free, blocked, start or end. A search
//! walks the grid in 8 directions, keeping one [`SearchNode`] per cell in a
//! [`NodeTable`], and repeatedly expands the open node with the lowest
//! `f = g + h`:
//!
//! - **g** is the accumulated move cost (10 straight, 14 diagonal),
//! - **h** is the Manhattan distance to the goal × 10.
//!
//! The result keeps the whole node table, so a caller can draw which cells
//! were opened and closed and the costs recorded for each.
//!
//! ```
//! use pathgrid_core::Point;
//! use pathgrid_search::{Grid, SearchStatus, run_search};
//!
//! let grid = Grid::new(4, 4);
//! let result = run_search(&grid, Point::new(1, 1), Point::new(2, 2)).unwrap();
//! assert_eq!(result.status, SearchStatus::Found);
//! assert_eq!(result.path, vec![Point::new(2, 2)]);
//! ```
//!
//! # Building blocks
//!
//! | Item | Role |
//! |---|---|
//! | [`select_lowest_open`] | frontier selection |
//! | [`expand`] | neighbour relaxation |
//! | [`reconstruct`] | parent-chain walk |
//! | [`SearchState`] | step-by-step driver |
//! | [`run_search`] | one-shot search |

mod cost;
mod error;
mod expand;
mod frontier;
mod grid;
mod node;
mod path;
mod search;

pub use cost::{
    Costs, DIAGONAL_COST, HEURISTIC_SCALE, STRAIGHT_COST, estimate, manhattan, step_cost,
};
pub use error::{Endpoint, ParseError, SearchError};
pub use expand::{expand, is_expandable};
pub use frontier::select_lowest_open;
pub use grid::{CellType, Grid};
pub use node::{NodeStatus, NodeTable, SearchNode, UNSCORED_F_COST};
pub use path::reconstruct;
pub use search::{SearchResult, SearchState, SearchStatus, Step, run_search, run_search_with};
