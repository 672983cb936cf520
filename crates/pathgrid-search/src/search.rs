use log::debug;
use pathgrid_core::Point;

use crate::cost::Costs;
use crate::error::{Endpoint, SearchError};
use crate::expand::expand;
use crate::frontier::select_lowest_open;
use crate::grid::Grid;
use crate::node::{NodeTable, SearchNode};
use crate::path::reconstruct;

/// Final outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    Found,
    NotFound,
}

/// What a single [`SearchState::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The node was closed and its neighbourhood relaxed.
    Expanded(Point),
    /// The goal was selected; the path is available.
    Found,
    /// The frontier ran dry before reaching the goal.
    NotFound,
}

/// Everything a finished search leaves behind for its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub status: SearchStatus,
    /// Goal first, start excluded. Empty unless `status` is `Found` and the
    /// goal differs from the start.
    pub path: Vec<Point>,
    /// Final per-cell states, for overlays and cost labels.
    pub nodes: NodeTable,
    pub start: Point,
    pub goal: Point,
    /// Number of nodes closed and expanded.
    pub expansions: usize,
}

impl SearchResult {
    #[inline]
    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }

    /// The node record at `p`.
    #[inline]
    pub fn node(&self, p: Point) -> Option<&SearchNode> {
        self.nodes.get(p)
    }

    /// Accumulated cost of the goal, when it was reached.
    pub fn goal_cost(&self) -> Option<i32> {
        if !self.is_found() {
            return None;
        }
        self.nodes.get(self.goal).map(|n| n.g_cost)
    }

    /// The route in travel order, start first and goal last.
    pub fn route(&self) -> Vec<Point> {
        if !self.is_found() {
            return Vec::new();
        }
        let mut route = Vec::with_capacity(self.path.len() + 1);
        route.push(self.start);
        route.extend(self.path.iter().rev());
        route
    }
}

/// An in-progress search over a borrowed grid.
///
/// Built fresh for every search; the node table it owns is never shared.
/// Drive it with [`step`](SearchState::step) to watch the frontier evolve,
/// or with [`run`](SearchState::run) to finish in one call.
#[derive(Debug)]
pub struct SearchState<'g> {
    grid: &'g Grid,
    nodes: NodeTable,
    start: Point,
    goal: Point,
    costs: Costs,
    expansions: usize,
    outcome: Option<SearchStatus>,
    path: Vec<Point>,
}

fn check_endpoint(grid: &Grid, endpoint: Endpoint, point: Point) -> Result<(), SearchError> {
    match grid.cell_type(point) {
        None => Err(SearchError::OutOfBounds {
            endpoint,
            point,
            size: grid.size(),
        }),
        Some(cell) if !cell.is_traversable() => Err(SearchError::Blocked { endpoint, point }),
        Some(_) => Ok(()),
    }
}

impl<'g> SearchState<'g> {
    /// Set up a search with the default costs.
    pub fn new(grid: &'g Grid, start: Point, goal: Point) -> Result<Self, SearchError> {
        Self::with_costs(grid, start, goal, Costs::default())
    }

    /// Set up a search: validate both endpoints and open the start node.
    pub fn with_costs(
        grid: &'g Grid,
        start: Point,
        goal: Point,
        costs: Costs,
    ) -> Result<Self, SearchError> {
        check_endpoint(grid, Endpoint::Start, start)?;
        check_endpoint(grid, Endpoint::Goal, goal)?;

        let mut nodes = NodeTable::new(grid.size());
        if let Some(n) = nodes.get_mut(start) {
            n.open();
            n.g_cost = 0;
            n.h_cost = costs.estimate(start, goal);
            n.recalculate();
        }
        debug!(
            "search {start} -> {goal} on {}x{} grid",
            grid.width(),
            grid.height()
        );

        Ok(Self {
            grid,
            nodes,
            start,
            goal,
            costs,
            expansions: 0,
            outcome: None,
            path: Vec::new(),
        })
    }

    /// Advance the search by one selection.
    ///
    /// Once the search has finished, further calls keep returning the
    /// terminal step without touching the table.
    pub fn step(&mut self) -> Step {
        match self.outcome {
            Some(SearchStatus::Found) => return Step::Found,
            Some(SearchStatus::NotFound) => return Step::NotFound,
            None => {}
        }

        let Some(current) = select_lowest_open(&self.nodes) else {
            debug!("frontier exhausted after {} expansions", self.expansions);
            self.outcome = Some(SearchStatus::NotFound);
            return Step::NotFound;
        };

        if current == self.goal {
            self.path = reconstruct(&self.nodes, current);
            debug!(
                "reached {} after {} expansions, path length {}",
                self.goal,
                self.expansions,
                self.path.len()
            );
            self.outcome = Some(SearchStatus::Found);
            return Step::Found;
        }

        if let Some(n) = self.nodes.get_mut(current) {
            n.close();
        }
        expand(self.grid, &mut self.nodes, current, self.goal, &self.costs);
        self.expansions += 1;
        Step::Expanded(current)
    }

    /// Step until the search finishes.
    pub fn run(mut self) -> SearchResult {
        while let Step::Expanded(_) = self.step() {}
        SearchResult {
            status: self.outcome.unwrap_or(SearchStatus::NotFound),
            path: self.path,
            nodes: self.nodes,
            start: self.start,
            goal: self.goal,
            expansions: self.expansions,
        }
    }

    #[inline]
    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// `None` while the search is still running.
    #[inline]
    pub fn outcome(&self) -> Option<SearchStatus> {
        self.outcome
    }
}

/// Search `grid` from `start` to `goal` with the default costs.
pub fn run_search(grid: &Grid, start: Point, goal: Point) -> Result<SearchResult, SearchError> {
    run_search_with(grid, start, goal, &Costs::default())
}

/// Search `grid` from `start` to `goal` with explicit costs.
pub fn run_search_with(
    grid: &Grid,
    start: Point,
    goal: Point,
    costs: &Costs,
) -> Result<SearchResult, SearchError> {
    Ok(SearchState::with_costs(grid, start, goal, *costs)?.run())
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn result_round_trip() {
        let grid = Grid::new(4, 4);
        let r = run_search(&grid, Point::new(1, 1), Point::new(3, 2)).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
        assert!(json.contains(r#""status":"Found""#));
    }
}
