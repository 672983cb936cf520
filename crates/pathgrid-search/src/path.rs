use pathgrid_core::Point;

use crate::node::NodeTable;

/// Follow parent links from `from` back to the node without a parent.
///
/// The result runs goal first and never contains the parentless start
/// node. The walk is bounded by the table size, so a malformed table with
/// a parent cycle cannot loop forever.
pub fn reconstruct(nodes: &NodeTable, from: Point) -> Vec<Point> {
    let mut path = Vec::new();
    let mut current = from;
    for _ in 0..nodes.len() {
        let Some(parent) = nodes.get(current).and_then(|n| n.parent) else {
            break;
        };
        path.push(current);
        current = parent;
    }
    path
}
