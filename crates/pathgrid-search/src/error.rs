//! Error types for search setup and grid parsing.

use std::fmt;

use pathgrid_core::Point;

/// Which end of a search a coordinate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Goal => "goal",
        })
    }
}

/// Invalid input rejected before a search begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// An endpoint lies outside the grid.
    OutOfBounds {
        endpoint: Endpoint,
        point: Point,
        size: Point,
    },
    /// An endpoint sits on a blocked cell.
    Blocked { endpoint: Endpoint, point: Point },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                endpoint,
                point,
                size,
            } => write!(
                f,
                "{endpoint} {point} is outside the {}x{} grid",
                size.x, size.y
            ),
            Self::Blocked { endpoint, point } => {
                write!(f, "{endpoint} {point} is on a blocked cell")
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Errors produced by [`Grid::from_ascii`](crate::Grid::from_ascii).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text contains no rows.
    Empty,
    /// A row's width differs from the first row's.
    InconsistentWidth { row: usize, expected: usize, found: usize },
    /// A character outside `.`, `#`, `S`, `E`.
    InvalidChar { ch: char, pos: Point },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("grid text is empty"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(f, "row {row} has width {found}, expected {expected}"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "invalid grid character \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_endpoint() {
        let e = SearchError::OutOfBounds {
            endpoint: Endpoint::Goal,
            point: Point::new(9, 1),
            size: Point::new(4, 4),
        };
        assert_eq!(e.to_string(), "goal (9, 1) is outside the 4x4 grid");
        let e = SearchError::Blocked {
            endpoint: Endpoint::Start,
            point: Point::new(2, 3),
        };
        assert_eq!(e.to_string(), "start (2, 3) is on a blocked cell");
    }
}
