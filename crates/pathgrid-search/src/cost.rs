//! Movement costs and the distance heuristic.
//!
//! Costs are integers in tenths of a straight step: a straight move costs
//! 10 and a diagonal move 14 (≈ √2 × 10). The heuristic is the Manhattan
//! distance in the same units, so it can overestimate when diagonal moves
//! are available; searches over open terrain are therefore not guaranteed
//! to return the cheapest route.

use pathgrid_core::Point;

/// Cost of a horizontal or vertical move.
pub const STRAIGHT_COST: i32 = 10;
/// Cost of a diagonal move.
pub const DIAGONAL_COST: i32 = 14;
/// Multiplier applied to the Manhattan distance by the heuristic.
pub const HEURISTIC_SCALE: i32 = 10;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Cost parameters of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Costs {
    pub straight: i32,
    pub diagonal: i32,
    pub heuristic_scale: i32,
}

impl Default for Costs {
    fn default() -> Self {
        Self {
            straight: STRAIGHT_COST,
            diagonal: DIAGONAL_COST,
            heuristic_scale: HEURISTIC_SCALE,
        }
    }
}

impl Costs {
    /// Heuristic estimate of the remaining cost from `from` to `to`.
    #[inline]
    pub fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to) * self.heuristic_scale
    }

    /// Cost of a single move between adjacent cells `from` and `to`.
    ///
    /// Only meaningful for neighbours in the 3×3 block around `from`.
    #[inline]
    pub fn step_cost(&self, from: Point, to: Point) -> i32 {
        debug_assert!(from.is_adjacent(to), "step_cost on non-adjacent {from} {to}");
        if from.x != to.x && from.y != to.y {
            self.diagonal
        } else {
            self.straight
        }
    }
}

/// [`Costs::estimate`] with the default costs.
#[inline]
pub fn estimate(from: Point, to: Point) -> i32 {
    Costs::default().estimate(from, to)
}

/// [`Costs::step_cost`] with the default costs.
#[inline]
pub fn step_cost(from: Point, to: Point) -> i32 {
    Costs::default().step_cost(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_is_scaled_manhattan() {
        assert_eq!(estimate(Point::new(1, 1), Point::new(1, 1)), 0);
        assert_eq!(estimate(Point::new(1, 1), Point::new(4, 3)), 50);
        assert_eq!(estimate(Point::new(4, 3), Point::new(1, 1)), 50);
        assert_eq!(estimate(Point::new(2, 2), Point::new(14, 10)), 200);
    }

    #[test]
    fn step_costs() {
        let c = Point::new(5, 5);
        assert_eq!(step_cost(c, c.shift(1, 0)), 10);
        assert_eq!(step_cost(c, c.shift(0, -1)), 10);
        assert_eq!(step_cost(c, c.shift(1, 1)), 14);
        assert_eq!(step_cost(c, c.shift(-1, 1)), 14);
    }

    #[test]
    fn heuristic_overestimates_a_single_diagonal() {
        let a = Point::new(1, 1);
        let b = Point::new(2, 2);
        assert!(estimate(a, b) > step_cost(a, b));
    }

    #[test]
    fn custom_costs() {
        let costs = Costs {
            straight: 2,
            diagonal: 3,
            heuristic_scale: 1,
        };
        assert_eq!(costs.estimate(Point::new(0, 0), Point::new(3, 4)), 7);
        assert_eq!(costs.step_cost(Point::new(0, 0), Point::new(1, 1)), 3);
    }
}
