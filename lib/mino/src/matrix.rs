//! Matrix data structure.

use crate::cell::Cell;
use crate::error::Error;
use crate::input::Side;

type HashSet<T> = hashbrown::HashSet<T, core::hash::BuildHasherDefault<ahash::AHasher>>;

/// Occupancy matrix holding every locked cell. Stored row-major as a flat slice of
/// optional cells; row 0 is the top row and rows increase downward.
///
/// A stored cell's own `(row, col)` always equals the slot it is stored in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Matrix<T> {
    rows: i32,
    cols: i32,
    slots: Vec<Option<Cell<T>>>,
}

/// Result of [`Matrix::lock`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Locked<T> {
    /// Cells actually committed. Cells above the top edge or on an occupied slot are
    /// dropped.
    pub cells: Vec<Cell<T>>,
    /// Present if the lock completed one or more rows.
    pub cleared: Option<Cleared<T>>,
}

/// Rows removed from the matrix, with snapshots so a renderer can erase and redraw.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cleared<T> {
    /// Removed row indices, ascending.
    pub rows: Vec<i32>,
    /// All locked cells before removal.
    pub before: Vec<Cell<T>>,
    /// All locked cells after compaction, at their new positions.
    pub after: Vec<Cell<T>>,
}

impl<T: Copy> Matrix<T> {
    pub fn new(rows: i32, cols: i32) -> Result<Self, Error> {
        if rows <= 0 || cols <= 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let len = rows as usize * cols as usize;
        Ok(Self {
            rows,
            cols,
            slots: vec![None; len],
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn get(&self, row: i32, col: i32) -> Option<&Cell<T>> {
        self.index(row, col).and_then(|i| self.slots[i].as_ref())
    }

    /// Iterate all locked cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell<T>> + '_ {
        self.slots.iter().flatten()
    }

    /// Positions outside the matrix are never occupied, so scans may probe one step past
    /// an edge.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some()
    }

    /// Returns true if `(row, col)` lies beyond the given edge.
    pub fn is_over_border(&self, row: i32, col: i32, side: Side) -> bool {
        match side {
            Side::Top => row < 0,
            Side::Bottom => row > self.rows - 1,
            Side::Left => col < 0,
            Side::Right => col > self.cols - 1,
        }
    }

    pub fn is_over_borders(&self, row: i32, col: i32, sides: &[Side]) -> bool {
        sides
            .iter()
            .any(|&side| self.is_over_border(row, col, side))
    }

    /// Returns true if the cell sits exactly on the outermost line of the given edge, so
    /// one more step toward it would leave the matrix.
    pub fn is_touch_border(&self, cell: &Cell<T>, side: Side) -> bool {
        match side {
            Side::Top => cell.row() == 0,
            Side::Bottom => cell.row() == self.rows - 1,
            Side::Left => cell.col() == 0,
            Side::Right => cell.col() == self.cols - 1,
        }
    }

    pub fn has_neighbour(&self, cell: &Cell<T>, side: Side) -> bool {
        let (row, col) = cell.neighbour(side);
        self.is_occupied(row, col)
    }

    pub fn is_overlap(&self, cells: &[Cell<T>]) -> bool {
        cells
            .iter()
            .any(|cell| self.is_occupied(cell.row(), cell.col()))
    }

    /// Number of whole steps `cell` can travel toward `side` before reaching the edge or
    /// the nearest locked cell in its row/column.
    pub fn free_distance(&self, cell: &Cell<T>, side: Side) -> i32 {
        if self.is_touch_border(cell, side) || self.has_neighbour(cell, side) {
            return 0;
        }

        let (row, col) = cell.pos();
        let dist = match side {
            Side::Top => (0..row)
                .rev()
                .find(|&r| self.is_occupied(r, col))
                .map_or(row, |r| row - r - 1),
            Side::Bottom => (row + 1..self.rows)
                .find(|&r| self.is_occupied(r, col))
                .map_or(self.rows - 1 - row, |r| r - row - 1),
            Side::Left => (0..col)
                .rev()
                .find(|&c| self.is_occupied(row, c))
                .map_or(col, |c| col - c - 1),
            Side::Right => (col + 1..self.cols)
                .find(|&c| self.is_occupied(row, c))
                .map_or(self.cols - 1 - col, |c| c - col - 1),
        };
        dist.max(0)
    }

    /// The group moves as a whole, so it is limited by its most constrained cell.
    pub fn max_free_distance(&self, cells: &[Cell<T>], side: Side) -> i32 {
        cells
            .iter()
            .map(|cell| self.free_distance(cell, side))
            .min()
            .unwrap_or(0)
    }

    /// Clamp a requested step count to what `cells` can actually travel.
    pub fn clamp_step(&self, cells: &[Cell<T>], step: u32, side: Side) -> u32 {
        let max = self.max_free_distance(cells, side);
        step.min(max as u32)
    }

    pub fn is_row_full(&self, row: i32) -> bool {
        let Some(start) = self.index(row, 0) else {
            return false;
        };
        let end = start + self.cols as usize;
        self.slots[start..end].iter().all(Option::is_some)
    }

    /// Commit cells into the matrix, then clear any row they completed.
    ///
    /// Only the rows touched by newly stored cells are checked for fullness; every other
    /// row was already non-full after the previous lock.
    pub fn lock(&mut self, cells: impl IntoIterator<Item = Cell<T>>) -> Locked<T> {
        let mut stored = Vec::with_capacity(4);
        let mut touched = HashSet::default();

        for cell in cells {
            let (row, col) = cell.pos();
            if self.is_over_border(row, col, Side::Top) || self.is_occupied(row, col) {
                continue;
            }
            let Some(i) = self.index(row, col) else {
                continue;
            };
            self.slots[i] = Some(cell);
            touched.insert(row);
            stored.push(cell);
        }

        let full = touched
            .into_iter()
            .filter(|&row| self.is_row_full(row))
            .collect::<Vec<_>>();
        let cleared = self.clear_and_compact(&full);

        Locked {
            cells: stored,
            cleared,
        }
    }

    /// Remove `rows` (any order, need not be contiguous) and pack every surviving row
    /// toward the bottom, keeping their relative order. Indices outside the matrix are
    /// ignored. Returns `None` if nothing was removed.
    pub fn clear_and_compact(&mut self, rows: &[i32]) -> Option<Cleared<T>> {
        let mut rows = rows
            .iter()
            .copied()
            .filter(|&row| row >= 0 && row < self.rows)
            .collect::<Vec<_>>();
        rows.sort_unstable();
        rows.dedup();
        if rows.is_empty() {
            return None;
        }

        let before = self.cells().copied().collect();
        let width = self.cols as usize;

        // bottom-up pass: `cursor` is the lowest row not yet written to
        let mut cursor = None;
        for row in (0..self.rows).rev() {
            if rows.binary_search(&row).is_ok() {
                cursor.get_or_insert(row);
            } else if let Some(dst) = cursor {
                let src_start = row as usize * width;
                let dst_start = dst as usize * width;
                for col in 0..width {
                    let mut cell = self.slots[src_start + col].take();
                    if let Some(cell) = cell.as_mut() {
                        cell.set_row(dst);
                    }
                    self.slots[dst_start + col] = cell;
                }
                cursor = Some(dst - 1);
            }
        }

        if let Some(top) = cursor {
            let end = (top + 1) as usize * width;
            self.slots[..end].fill(None);
        }

        let after = self.cells().copied().collect();
        Some(Cleared {
            rows,
            before,
            after,
        })
    }

    /// Empty every slot, keeping the dimensions.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }
}
