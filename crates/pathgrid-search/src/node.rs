//! Per-cell search bookkeeping: [`SearchNode`] and the [`NodeTable`].

use pathgrid_core::{Point, Range};

/// `f_cost` of a node that has never been scored.
pub const UNSCORED_F_COST: i32 = 999;

/// Where a node is in the search.
///
/// A node moves `Unvisited → Open → Closed` and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeStatus {
    #[default]
    Unvisited,
    Open,
    Closed,
}

/// Search record for one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchNode {
    pub position: Point,
    /// Predecessor on the best known path. Stays `None` for the start.
    pub parent: Option<Point>,
    pub g_cost: i32,
    pub h_cost: i32,
    /// Always `g_cost + h_cost` once scored.
    pub f_cost: i32,
    pub status: NodeStatus,
}

impl SearchNode {
    /// An unvisited node at `position` carrying the unscored sentinel.
    pub const fn new(position: Point) -> Self {
        Self {
            position,
            parent: None,
            g_cost: 0,
            h_cost: 0,
            f_cost: UNSCORED_F_COST,
            status: NodeStatus::Unvisited,
        }
    }

    /// Recompute `f_cost` from `g_cost` and `h_cost`.
    #[inline]
    pub fn recalculate(&mut self) {
        self.f_cost = self.g_cost + self.h_cost;
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == NodeStatus::Open
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.status == NodeStatus::Closed
    }

    pub(crate) fn open(&mut self) {
        debug_assert_eq!(self.status, NodeStatus::Unvisited, "reopening {}", self.position);
        self.status = NodeStatus::Open;
    }

    pub(crate) fn close(&mut self) {
        debug_assert_eq!(self.status, NodeStatus::Open, "closing {}", self.position);
        self.status = NodeStatus::Closed;
    }
}

/// One [`SearchNode`] per grid cell, addressed by coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeTable {
    nodes: Vec<SearchNode>,
    width: i32,
    height: i32,
}

impl NodeTable {
    /// A table for a `size.x × size.y` grid with every node unvisited and
    /// all costs zeroed.
    pub fn new(size: Point) -> Self {
        let bounds = Range::with_size(size);
        let nodes = bounds
            .iter()
            .map(|p| SearchNode {
                f_cost: 0,
                ..SearchNode::new(p)
            })
            .collect();
        Self {
            nodes,
            width: bounds.width(),
            height: bounds.height(),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of nodes (`width × height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// The node at `p`, or `None` outside the table.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&SearchNode> {
        self.index(p).map(|i| &self.nodes[i])
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, p: Point) -> Option<&mut SearchNode> {
        self.index(p).map(|i| &mut self.nodes[i])
    }

    /// Status of the node at `p`; `Unvisited` outside the table.
    pub fn status(&self, p: Point) -> NodeStatus {
        self.get(p).map(|n| n.status).unwrap_or_default()
    }

    /// Row-major iterator over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = &SearchNode> {
        self.nodes.iter()
    }

    /// Nodes currently in the given status.
    pub fn count(&self, status: NodeStatus) -> usize {
        self.nodes.iter().filter(|n| n.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_carries_sentinel() {
        let n = SearchNode::new(Point::new(3, 4));
        assert_eq!(n.f_cost, UNSCORED_F_COST);
        assert_eq!(n.status, NodeStatus::Unvisited);
        assert_eq!(n.parent, None);
    }

    #[test]
    fn table_starts_zeroed_and_unvisited() {
        let t = NodeTable::new(Point::new(4, 3));
        assert_eq!(t.len(), 12);
        for n in t.iter() {
            assert_eq!((n.g_cost, n.h_cost, n.f_cost), (0, 0, 0));
            assert_eq!(n.status, NodeStatus::Unvisited);
            assert_eq!(t.get(n.position), Some(n));
        }
        assert_eq!(t.count(NodeStatus::Unvisited), 12);
    }

    #[test]
    fn lookups_outside_are_none() {
        let t = NodeTable::new(Point::new(2, 2));
        assert!(t.get(Point::new(2, 0)).is_none());
        assert!(t.get(Point::new(-1, 0)).is_none());
        assert_eq!(t.status(Point::new(5, 5)), NodeStatus::Unvisited);
    }

    #[test]
    fn recalculate_sums_costs() {
        let mut n = SearchNode::new(Point::ZERO);
        n.g_cost = 24;
        n.h_cost = 30;
        n.recalculate();
        assert_eq!(n.f_cost, 54);
    }

    #[test]
    fn status_moves_forward() {
        let mut n = SearchNode::new(Point::ZERO);
        n.open();
        assert!(n.is_open());
        n.close();
        assert!(n.is_closed());
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn closed_node_cannot_reopen() {
        let mut n = SearchNode::new(Point::ZERO);
        n.open();
        n.close();
        n.open();
    }
}
