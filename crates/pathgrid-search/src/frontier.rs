use pathgrid_core::Point;

use crate::node::NodeTable;

/// The open node with the lowest `f_cost`, or `None` when nothing is open.
///
/// Nodes are scanned column by column (outer loop over x, inner over y)
/// and the first node reaching the minimum wins, so ties go to the
/// smallest `(x, y)`. An `f_cost` of 0 is an ordinary candidate.
pub fn select_lowest_open(nodes: &NodeTable) -> Option<Point> {
    let mut best: Option<(i32, Point)> = None;
    for x in 0..nodes.width() {
        for y in 0..nodes.height() {
            let p = Point::new(x, y);
            let Some(node) = nodes.get(p) else {
                continue;
            };
            if !node.is_open() {
                continue;
            }
            match best {
                Some((f, _)) if node.f_cost >= f => {}
                _ => best = Some((node.f_cost, p)),
            }
        }
    }
    best.map(|(_, p)| p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_with(nodes: &mut NodeTable, p: Point, f: i32) {
        let n = nodes.get_mut(p).unwrap();
        n.open();
        n.h_cost = f;
        n.recalculate();
    }

    #[test]
    fn empty_frontier() {
        let nodes = NodeTable::new(Point::new(3, 3));
        assert_eq!(select_lowest_open(&nodes), None);
    }

    #[test]
    fn picks_lowest_f() {
        let mut nodes = NodeTable::new(Point::new(4, 4));
        open_with(&mut nodes, Point::new(0, 1), 40);
        open_with(&mut nodes, Point::new(3, 3), 12);
        open_with(&mut nodes, Point::new(2, 0), 30);
        assert_eq!(select_lowest_open(&nodes), Some(Point::new(3, 3)));
    }

    #[test]
    fn ignores_closed_and_unvisited() {
        let mut nodes = NodeTable::new(Point::new(3, 3));
        open_with(&mut nodes, Point::new(1, 1), 5);
        nodes.get_mut(Point::new(1, 1)).unwrap().close();
        open_with(&mut nodes, Point::new(2, 2), 50);
        assert_eq!(select_lowest_open(&nodes), Some(Point::new(2, 2)));
    }

    #[test]
    fn ties_go_to_first_column_then_row() {
        let mut nodes = NodeTable::new(Point::new(4, 4));
        open_with(&mut nodes, Point::new(2, 0), 20);
        open_with(&mut nodes, Point::new(1, 3), 20);
        open_with(&mut nodes, Point::new(1, 2), 20);
        // (1, 2) precedes (1, 3) and (2, 0) in the column-major scan.
        assert_eq!(select_lowest_open(&nodes), Some(Point::new(1, 2)));
    }

    #[test]
    fn zero_cost_is_selectable() {
        let mut nodes = NodeTable::new(Point::new(4, 4));
        open_with(&mut nodes, Point::new(1, 1), 10);
        open_with(&mut nodes, Point::new(3, 3), 0);
        assert_eq!(select_lowest_open(&nodes), Some(Point::new(3, 3)));

        let mut nodes = NodeTable::new(Point::new(4, 4));
        open_with(&mut nodes, Point::new(0, 0), 0);
        open_with(&mut nodes, Point::new(2, 2), 0);
        assert_eq!(select_lowest_open(&nodes), Some(Point::new(0, 0)));
    }
}
