//! Unit of grid occupancy.

use core::fmt;

use crate::input::Side;

/// A single occupied square. The position changes as pieces move and rows compact; the
/// tag (a color or piece identity) never does.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Cell<T> {
    row: i32,
    col: i32,
    tag: T,
}

impl<T: Copy> Cell<T> {
    pub fn new(row: i32, col: i32, tag: T) -> Self {
        Self { row, col, tag }
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.col
    }

    #[inline]
    pub fn pos(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    #[inline]
    pub fn tag(&self) -> T {
        self.tag
    }

    /// Position one step toward `side`.
    pub fn neighbour(&self, side: Side) -> (i32, i32) {
        let (dr, dc) = side.delta();
        (self.row + dr, self.col + dc)
    }

    pub(crate) fn shift(&mut self, dr: i32, dc: i32) {
        self.row += dr;
        self.col += dc;
    }

    pub(crate) fn set_row(&mut self, row: i32) {
        self.row = row;
    }
}

impl<T: fmt::Debug> fmt::Debug for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.row, self.col, &self.tag).fmt(f)
    }
}
