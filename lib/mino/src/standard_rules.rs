//! Standard implementation of tetris pieces.

use core::fmt;
use core::str::FromStr;

use super::piece::{RotationState, Shape};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum PieceType {
    I = 0,
    L = 1,
    J = 2,
    Z = 3,
    S = 4,
    T = 5,
    O = 6,
}

pub type Piece = super::piece::Piece<PieceType>;

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::I,
        PieceType::L,
        PieceType::J,
        PieceType::Z,
        PieceType::S,
        PieceType::T,
        PieceType::O,
    ];

    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// CSS color used to paint cells of this piece.
    pub fn color(self) -> &'static str {
        COLORS[self as usize]
    }
}

static NAMES: [&str; 7] = ["I", "L", "J", "Z", "S", "T", "O"];

static COLORS: [&str; 7] = [
    "#5bcacc", "#c16b27", "#001ec5", "red", "green", "#8c2ac6", "#cecb42",
];

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown piece type {0:?}")]
pub struct ParsePieceTypeError(String);

impl FromStr for PieceType {
    type Err = ParsePieceTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceType::ALL
            .into_iter()
            .find(|pc| pc.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePieceTypeError(s.to_owned()))
    }
}

// Offsets are (row, col) inside a 4x4 box whose top-left corner is the anchor.

// .... ..I.
// IIII ..I.
// .... ..I.
// .... ..I.
static I_STATES: [RotationState; 2] = [
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
];

// .... .LL. ...L ..L.
// .LLL ..L. .LLL ..L.
// .L.. ..L. .... ..LL
static L_STATES: [RotationState; 4] = [
    [(1, 1), (1, 2), (1, 3), (2, 1)],
    [(0, 1), (0, 2), (1, 2), (2, 2)],
    [(0, 3), (1, 1), (1, 2), (1, 3)],
    [(0, 2), (1, 2), (2, 2), (2, 3)],
];

// .... ..J. .J.. ..JJ
// .JJJ ..J. .JJJ ..J.
// ...J .JJ. .... ..J.
static J_STATES: [RotationState; 4] = [
    [(1, 1), (1, 2), (1, 3), (2, 3)],
    [(0, 2), (1, 2), (2, 1), (2, 2)],
    [(0, 1), (1, 1), (1, 2), (1, 3)],
    [(0, 2), (0, 3), (1, 2), (2, 2)],
];

// .... ..Z.
// .ZZ. .ZZ.
// ..ZZ .Z..
static Z_STATES: [RotationState; 2] = [
    [(1, 1), (1, 2), (2, 2), (2, 3)],
    [(0, 2), (1, 1), (1, 2), (2, 1)],
];

// .... .S..
// ..SS .SS.
// .SS. ..S.
static S_STATES: [RotationState; 2] = [
    [(1, 2), (1, 3), (2, 1), (2, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
];

// .... ..T. ..T. ..T.
// .TTT .TT. .TTT ..TT
// ..T. ..T. .... ..T.
static T_STATES: [RotationState; 4] = [
    [(1, 1), (1, 2), (1, 3), (2, 2)],
    [(0, 2), (1, 1), (1, 2), (2, 2)],
    [(0, 2), (1, 1), (1, 2), (1, 3)],
    [(0, 2), (1, 2), (1, 3), (2, 2)],
];

// ....
// .OO.
// .OO.
static O_STATES: [RotationState; 1] = [[(1, 1), (1, 2), (2, 1), (2, 2)]];

static STATES: [&[RotationState]; 7] = [
    &I_STATES, &L_STATES, &J_STATES, &Z_STATES, &S_STATES, &T_STATES, &O_STATES,
];

impl Shape for PieceType {
    fn rotation_states(&self) -> &'static [RotationState] {
        STATES[*self as usize]
    }
}
