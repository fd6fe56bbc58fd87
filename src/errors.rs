//! Errors used throughout the crate.
//!
//! `ChessError` is the single error type for position construction, fixture
//! parsing and checked move application. Illegal moves during search are not
//! errors: a move is legal iff it appears in `generate_all_moves()`.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A piece or flag refers to a square outside the 0x88 board.
    #[error("square 0x{0:02x} is not on the board")]
    SquareOffBoard(Square),

    #[error("{0:?} has no king")]
    MissingKing(Color),

    #[error("{0:?} has more than one king")]
    DuplicateKing(Color),

    #[error("{color:?} has {count} pieces, at most 16 are allowed")]
    TooManyPieces { color: Color, count: usize },

    #[error("square 0x{0:02x} holds more than one piece")]
    SquareOccupiedTwice(Square),

    #[error("pawn on back rank square 0x{0:02x}")]
    PawnOnBackRank(Square),

    #[error("en-passant square 0x{0:02x} is not on the third or sixth rank")]
    InvalidEnPassantSquare(Square),

    /// The side that just moved would have its king capturable.
    #[error("{0:?} is in check but not to move")]
    OpponentInCheck(Color),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid algebraic notation: {0}")]
    InvalidAlgebraic(String),

    /// The move is not in the position's legal move list.
    #[error("illegal move {0}")]
    IllegalMove(Move),
}

pub type ChessResult<T> = Result<T, ChessError>;
