/// Construction-time misuse. Gameplay never produces these; a blocked move or rotation is
/// a no-op, not an error.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("matrix dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },
    #[error("piece has no rotation states")]
    NoRotationStates,
    #[error("rotation state {index} has {len} cells, expected {expected}")]
    RotationStateSize {
        index: usize,
        len: usize,
        expected: usize,
    },
}
