//! The [`Cell`] type: a single character with styling.

use crate::style::Style;

/// A styled character cell of the display grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    /// A blank cell painted with `style`.
    #[inline]
    pub const fn blank(style: Style) -> Self {
        Self { ch: ' ', style }
    }

    /// Set the character (builder).
    #[inline]
    pub const fn with_char(mut self, ch: char) -> Self {
        self.ch = ch;
        self
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::blank(Style::default())
    }
}
