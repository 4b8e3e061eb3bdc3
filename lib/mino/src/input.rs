//! Directions and player inputs.

/// One of the four edges of the matrix, also used as a movement direction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    /// `(row, col)` delta of a single step toward this side.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Side::Top => (-1, 0),
            Side::Bottom => (1, 0),
            Side::Left => (0, -1),
            Side::Right => (0, 1),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Input {
    Left,
    Right,
    Down,
    Rotate,
    /// Move down as far as possible. A piece that is already resting locks.
    SonicDrop,
}
