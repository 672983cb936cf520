//! **pathgrid-core**: framework types shared by the pathgrid crates.
//!
//! Geometry primitives, styled display cells, a display grid with frame
//! diffing, input events, and the Elm-architecture application loop that
//! drives the terminal demo.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Driver, Effect, Model};
pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::Grid;
pub use messages::*;
pub use style::{AttrMask, Color, Style};
