//! Piece abstraction. This module does not specify the actual shapes for the pieces; see
//! [`standard_rules`](crate::standard_rules) for those.

use core::fmt;

use crate::cell::Cell;
use crate::error::Error;
use crate::input::Side;

/// Number of cells in every rotation state.
pub const CELLS_PER_STATE: usize = 4;

/// One rotation state, as `(row, col)` offsets from the piece anchor.
pub type RotationState = [(i32, i32); CELLS_PER_STATE];

/// Abstraction for the rotation table of a shape.
pub trait Shape: Copy {
    /// Rotation states in rotation order. Must not be empty.
    fn rotation_states(&self) -> &'static [RotationState];
}

/// A movable group of cells. Every rotation state is kept at absolute coordinates at all
/// times, so the state after the next rotation can be collision-tested without rotating.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Piece<T> {
    tag: T,
    row: i32,
    col: i32,
    states: Vec<[Cell<T>; CELLS_PER_STATE]>,
    index: usize,
}

fn materialize<T: Copy>(
    tag: T,
    offsets: RotationState,
    row: i32,
    col: i32,
) -> [Cell<T>; CELLS_PER_STATE] {
    offsets.map(|(dr, dc)| Cell::new(row + dr, col + dc, tag))
}

impl<T: Copy> Piece<T> {
    /// Build a piece from arbitrary offset lists, anchored at `(row, col)`. Every state must
    /// hold exactly [`CELLS_PER_STATE`] offsets.
    pub fn new<S: AsRef<[(i32, i32)]>>(
        tag: T,
        states: &[S],
        (row, col): (i32, i32),
    ) -> Result<Self, Error> {
        if states.is_empty() {
            return Err(Error::NoRotationStates);
        }

        let states = states
            .iter()
            .enumerate()
            .map(|(index, state)| -> Result<_, Error> {
                let offsets = state.as_ref();
                let offsets = RotationState::try_from(offsets).map_err(|_| {
                    Error::RotationStateSize {
                        index,
                        len: offsets.len(),
                        expected: CELLS_PER_STATE,
                    }
                })?;
                Ok(materialize(tag, offsets, row, col))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            tag,
            row,
            col,
            states,
            index: 0,
        })
    }

    pub fn tag(&self) -> T {
        self.tag
    }

    pub fn anchor(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    pub fn rotation_index(&self) -> usize {
        self.index
    }

    pub fn rotation_count(&self) -> usize {
        self.states.len()
    }

    #[inline]
    fn next_index(&self) -> usize {
        (self.index + 1) % self.states.len()
    }

    /// Cells of the active rotation state.
    pub fn current(&self) -> &[Cell<T>; CELLS_PER_STATE] {
        &self.states[self.index]
    }

    /// Cells of the state that [`rotate`](Self::rotate) would make active.
    pub fn next(&self) -> &[Cell<T>; CELLS_PER_STATE] {
        &self.states[self.next_index()]
    }

    pub fn translate(&mut self, dr: i32, dc: i32) {
        self.row += dr;
        self.col += dc;
        for cell in self.states.iter_mut().flatten() {
            cell.shift(dr, dc);
        }
    }

    pub fn move_to(&mut self, row: i32, col: i32) {
        self.translate(row - self.row, col - self.col);
    }

    /// Translate `step` cells toward `side`.
    pub fn shift(&mut self, side: Side, step: i32) {
        let (dr, dc) = side.delta();
        self.translate(dr * step, dc * step);
    }

    /// Advance to the next rotation state. The anchor does not move and legality is not
    /// checked here.
    pub fn rotate(&mut self) {
        self.index = self.next_index();
    }

    /// Consume the piece, yielding the cells of its active state.
    pub fn into_cells(self) -> [Cell<T>; CELLS_PER_STATE] {
        self.states[self.index]
    }
}

impl<T: Shape> Piece<T> {
    /// Build a piece from a static shape table, anchored at the origin. The tag is the
    /// shape itself.
    pub fn from_shape(shape: T) -> Self {
        let table = shape.rotation_states();
        assert!(!table.is_empty(), "shape has no rotation states");
        Self {
            tag: shape,
            row: 0,
            col: 0,
            states: table
                .iter()
                .map(|&offsets| materialize(shape, offsets, 0, 0))
                .collect(),
            index: 0,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Piece<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Piece")
            .field(&self.tag)
            .field(&self.row)
            .field(&self.col)
            .field(&self.index)
            .finish()
    }
}
