//! Canonical chess-rule constants.
//!
//! Starting position, the fifty-move limit, castling geometry and the game
//! result vocabulary returned by `Position::get_result`.

use crate::game_state::chess_types::*;
use crate::moves::chess_move::MoveModifier;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u8 = 100;

/// Squares and rights involved in one castling move.
#[derive(Debug, Clone, Copy)]
pub struct CastlingLane {
    pub color: Color,
    pub right: CastlingRights,
    pub modifier: MoveModifier,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook.
    pub must_be_empty: &'static [Square],
    /// Squares the king crosses or lands on.
    pub must_be_safe: &'static [Square],
}

pub const CASTLING_LANES: [CastlingLane; 4] = [
    CastlingLane {
        color: Color::White,
        right: CASTLE_WHITE_KINGSIDE,
        modifier: MoveModifier::WhiteKingside,
        king_from: 0x04,
        king_to: 0x06,
        rook_from: 0x07,
        rook_to: 0x05,
        must_be_empty: &[0x05, 0x06],
        must_be_safe: &[0x05, 0x06],
    },
    CastlingLane {
        color: Color::Black,
        right: CASTLE_BLACK_KINGSIDE,
        modifier: MoveModifier::BlackKingside,
        king_from: 0x74,
        king_to: 0x76,
        rook_from: 0x77,
        rook_to: 0x75,
        must_be_empty: &[0x75, 0x76],
        must_be_safe: &[0x75, 0x76],
    },
    CastlingLane {
        color: Color::White,
        right: CASTLE_WHITE_QUEENSIDE,
        modifier: MoveModifier::WhiteQueenside,
        king_from: 0x04,
        king_to: 0x02,
        rook_from: 0x00,
        rook_to: 0x03,
        must_be_empty: &[0x01, 0x02, 0x03],
        must_be_safe: &[0x03, 0x02],
    },
    CastlingLane {
        color: Color::Black,
        right: CASTLE_BLACK_QUEENSIDE,
        modifier: MoveModifier::BlackQueenside,
        king_from: 0x74,
        king_to: 0x72,
        rook_from: 0x70,
        rook_to: 0x73,
        must_be_empty: &[0x71, 0x72, 0x73],
        must_be_safe: &[0x73, 0x72],
    },
];

/// Lane for a castling modifier.
pub fn castling_lane(modifier: MoveModifier) -> Option<&'static CastlingLane> {
    CASTLING_LANES.iter().find(|lane| lane.modifier == modifier)
}

/// Rights lost when a move starts or ends on `square`.
#[inline]
pub const fn rights_cleared_by_square(square: Square) -> CastlingRights {
    match square {
        0x04 => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        0x74 => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
        0x00 => CASTLE_WHITE_QUEENSIDE,
        0x07 => CASTLE_WHITE_KINGSIDE,
        0x70 => CASTLE_BLACK_QUEENSIDE,
        0x77 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw(DrawReason),
}

impl GameResult {
    #[inline]
    pub const fn is_decided(self) -> bool {
        !matches!(self, GameResult::Ongoing)
    }

    #[inline]
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }
}
