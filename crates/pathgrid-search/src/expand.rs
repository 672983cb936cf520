use log::trace;
use pathgrid_core::Point;

use crate::cost::Costs;
use crate::grid::Grid;
use crate::node::{NodeStatus, NodeTable};

/// Whether `p` may be entered by an expansion.
///
/// The x = 0 column and the y = 0 row are never expansion targets; a
/// start placed there is still searched from, but no search ever steps
/// onto them.
#[inline]
pub fn is_expandable(grid: &Grid, p: Point) -> bool {
    p.x > 0
        && p.x < grid.width()
        && p.y > 0
        && p.y < grid.height()
        && grid.cell_type(p).is_some_and(|c| c.is_traversable())
}

/// Relax the 3×3 neighbourhood of `current`, which must already be
/// closed. Returns how many neighbours got a new parent.
pub fn expand(
    grid: &Grid,
    nodes: &mut NodeTable,
    current: Point,
    goal: Point,
    costs: &Costs,
) -> usize {
    let Some(current_g) = nodes.get(current).map(|n| n.g_cost) else {
        return 0;
    };
    let mut improved = 0;

    for x in current.x - 1..=current.x + 1 {
        for y in current.y - 1..=current.y + 1 {
            let np = Point::new(x, y);
            if !is_expandable(grid, np) {
                continue;
            }
            let Some(n) = nodes.get_mut(np) else {
                continue;
            };

            let tentative_g = current_g + costs.step_cost(current, np);
            let better = match n.status {
                NodeStatus::Closed => continue,
                NodeStatus::Unvisited => {
                    n.open();
                    n.h_cost = costs.estimate(np, goal);
                    true
                }
                NodeStatus::Open => tentative_g < n.g_cost,
            };

            if better {
                n.parent = Some(current);
                n.g_cost = tentative_g;
                n.recalculate();
                improved += 1;
                trace!("{np}: parent {current} g={} h={} f={}", n.g_cost, n.h_cost, n.f_cost);
            }
        }
    }
    improved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellType;

    /// A table with `c` closed at cost `g`, as the search loop leaves it.
    fn closed_at(grid: &Grid, c: Point, g: i32) -> NodeTable {
        let mut nodes = NodeTable::new(grid.size());
        let n = nodes.get_mut(c).unwrap();
        n.open();
        n.g_cost = g;
        n.recalculate();
        n.close();
        nodes
    }

    #[test]
    fn opens_all_free_neighbours() {
        let grid = Grid::new(5, 5);
        let c = Point::new(2, 2);
        let goal = Point::new(4, 4);
        let mut nodes = closed_at(&grid, c, 0);

        assert_eq!(expand(&grid, &mut nodes, c, goal, &Costs::default()), 8);
        assert_eq!(nodes.count(NodeStatus::Open), 8);

        let diag = nodes.get(Point::new(3, 3)).unwrap();
        assert_eq!(diag.parent, Some(c));
        assert_eq!((diag.g_cost, diag.h_cost, diag.f_cost), (14, 20, 34));
        let side = nodes.get(Point::new(2, 3)).unwrap();
        assert_eq!((side.g_cost, side.h_cost, side.f_cost), (10, 30, 40));
    }

    #[test]
    fn skips_blocked_and_border_cells() {
        let mut grid = Grid::new(4, 4);
        grid.set(Point::new(2, 1), CellType::Blocked);
        let c = Point::new(1, 1);
        let mut nodes = closed_at(&grid, c, 0);

        expand(&grid, &mut nodes, c, Point::new(3, 3), &Costs::default());
        let open: Vec<Point> = nodes
            .iter()
            .filter(|n| n.is_open())
            .map(|n| n.position)
            .collect();
        // Row 0 and column 0 are out of reach; (2, 1) is blocked.
        assert_eq!(open, vec![Point::new(1, 2), Point::new(2, 2)]);
    }

    #[test]
    fn start_and_end_cells_are_walkable() {
        let mut grid = Grid::new(4, 4);
        grid.set(Point::new(2, 2), CellType::End);
        let c = Point::new(1, 1);
        let mut nodes = closed_at(&grid, c, 0);
        expand(&grid, &mut nodes, c, Point::new(2, 2), &Costs::default());
        assert!(nodes.get(Point::new(2, 2)).unwrap().is_open());
    }

    #[test]
    fn open_node_only_improves_on_lower_cost() {
        let grid = Grid::new(5, 5);
        let goal = Point::new(4, 4);
        let costs = Costs::default();
        let target = Point::new(3, 2);

        let mut nodes = closed_at(&grid, Point::new(2, 2), 0);
        expand(&grid, &mut nodes, Point::new(2, 2), goal, &costs);
        assert_eq!(nodes.get(target).unwrap().g_cost, 10);

        // A worse route from (2, 3) leaves the node alone.
        let via = Point::new(2, 3);
        nodes.get_mut(via).unwrap().close();
        expand(&grid, &mut nodes, via, goal, &costs);
        let n = nodes.get(target).unwrap();
        assert_eq!((n.g_cost, n.parent), (10, Some(Point::new(2, 2))));

        // A cheaper route re-parents it.
        let cheap = Point::new(3, 3);
        {
            let n = nodes.get_mut(cheap).unwrap();
            n.g_cost = -5;
            n.close();
        }
        expand(&grid, &mut nodes, cheap, goal, &costs);
        let n = nodes.get(target).unwrap();
        assert_eq!((n.g_cost, n.parent), (5, Some(cheap)));
        assert_eq!(n.f_cost, n.g_cost + n.h_cost);
    }

    #[test]
    fn closed_neighbours_are_untouched() {
        let grid = Grid::new(4, 4);
        let c = Point::new(2, 2);
        let mut nodes = closed_at(&grid, c, 100);
        let before = *nodes.get(c).unwrap();
        expand(&grid, &mut nodes, c, Point::new(1, 1), &Costs::default());
        assert_eq!(*nodes.get(c).unwrap(), before);
    }
}
