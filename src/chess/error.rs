//! Error types for position parsing and strict move application.

use thiserror::Error;

use crate::chess::bitboard::Square;

/// A FEN string that could not be turned into a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("no piece placement field found")]
    MissingPlacement,

    #[error("piece placement has {found} ranks, expected 8")]
    RankCount { found: usize },

    /// `rank` is the rank number as written in the FEN, 8 down to 1.
    #[error("rank {rank} describes {found} files, expected 8")]
    FileCount { rank: usize, found: usize },

    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),

    #[error("invalid side to move '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),

    #[error("invalid castling availability '{0}'")]
    InvalidCastling(String),

    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid move counter '{0}'")]
    InvalidCounter(String),
}

/// Rejections from [`Position::try_apply_move`](crate::chess::Position::try_apply_move).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("move from square {0} to itself")]
    SameSquare(Square),

    #[error("no piece at source square {0}")]
    NoPieceAtSource(Square),
}
