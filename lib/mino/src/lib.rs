//! Grid and piece model for falling-block puzzles.

pub mod cell;
pub use cell::Cell;

pub mod error;
pub use error::Error;

pub mod input;
pub use input::{Input, Side};

pub mod matrix;
pub use matrix::{Cleared, Locked, Matrix};

pub mod piece;
pub use piece::{Piece, RotationState, Shape};

pub mod standard_rules;
