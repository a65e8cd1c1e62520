//! Errors for text input the rules engine refuses.

/// Malformed Forsyth-Edwards Notation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 fields, got {0}")]
    MissingFields(usize),

    #[error("expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("rank {rank} describes {files} files")]
    RankWidth { rank: usize, files: usize },

    #[error("invalid piece character {0:?}")]
    InvalidPiece(char),

    #[error("invalid side to move {0:?}")]
    InvalidSideToMove(String),

    #[error("invalid castling field {0:?}")]
    InvalidCastling(String),

    #[error("invalid en passant square {0:?}")]
    InvalidEnPassant(String),

    #[error("invalid move counter {0:?}")]
    InvalidCounter(String),

    #[error("{0:?} has {1} kings")]
    KingCount(crate::Color, usize),
}

/// A move in coordinate notation that could not be applied.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("malformed move text {0:?}")]
    Malformed(String),

    #[error("illegal move {0:?}")]
    Illegal(String),
}

/// Errors from a UCI `position` command.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionCommandError {
    #[error("position command needs `startpos` or `fen`")]
    MissingSetup,

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Move(#[from] MoveParseError),
}
