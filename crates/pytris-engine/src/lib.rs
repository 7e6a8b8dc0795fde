pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("coordinate ({x}, {y}) is outside the {num_cols}x{num_rows} board")]
    CoordinateOutOfBounds {
        x: i32,
        y: i32,
        num_cols: usize,
        num_rows: usize,
    },
    #[display("column {x} is outside the board ({num_cols} columns)")]
    ColumnOutOfBounds { x: usize, num_cols: usize },
    #[display("row {y} is outside the board ({num_rows} rows)")]
    RowOutOfBounds { y: usize, num_rows: usize },
    #[display("row has {len} cells, board has {num_cols} columns")]
    RowLengthMismatch { len: usize, num_cols: usize },
    #[display("index {index} is outside the grid ({len} cells)")]
    IndexOutOfBounds { index: usize, len: usize },
    #[display("grid has {len} cells, expected {expected}")]
    GridSizeMismatch { len: usize, expected: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("holder is closed")]
pub struct HolderClosedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece has already been placed")]
pub struct AlreadyPlacedError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    #[display("invalid seed: expected 32 hex digits, got {len} characters")]
    InvalidLength { len: usize },
    #[display("invalid seed: {seed:?} is not a hexadecimal number")]
    InvalidDigit { seed: String },
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board must have at least one column and one row, got {num_cols}x{num_rows}")]
    EmptyBoard { num_cols: usize, num_rows: usize },
    #[display("board may have at most {max} columns and {max} rows, got {num_cols}x{num_rows}")]
    BoardTooLarge {
        num_cols: usize,
        num_rows: usize,
        max: usize,
    },
    #[display("spawn point ({x}, {y}) puts piece {kind} outside the {num_cols}x{num_rows} board")]
    SpawnOutsideBoard {
        x: i32,
        y: i32,
        kind: PieceKind,
        num_cols: usize,
        num_rows: usize,
    },
    #[display("start speed must be positive, got {speed}")]
    InvalidStartSpeed { speed: f64 },
    #[display("speed increment must be non-negative, got {increment}")]
    InvalidSpeedIncrement { increment: f64 },
    #[display("lines per level must be positive")]
    ZeroLinesPerLevel,
}

/// A broken precondition inside the game controller.
///
/// These never happen during normal play; rejected moves are reported as `false`
/// and the end of a game is a state change, not an error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    #[display("board access failed: {_0}")]
    Board(BoardError),
    #[display("hold failed: {_0}")]
    HolderClosed(HolderClosedError),
    #[display("spawn failed: {_0}")]
    AlreadyPlaced(AlreadyPlacedError),
    #[display("no falling piece")]
    NoFallingPiece,
}
