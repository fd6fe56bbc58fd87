//! Square and move conversions for coordinate notation.
//!
//! Converts between human-readable coordinates (`e4`, `e7e8q`) and 0x88
//! squares / legal moves. Used by the fixture parser, the perft tool and the
//! `Display` impls.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{file_of, rank_of, square_at, PieceKind, Square};
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;

/// Convert coordinate notation (for example: "e4") to a 0x88 square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidAlgebraic(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidAlgebraic(square.to_owned()));
    }

    Ok(square_at(rank - b'1', file - b'a'))
}

/// Convert an on-board 0x88 square to coordinate notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    debug_assert!(square & 0x88 == 0, "square 0x{square:02x} is off the board");
    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));
    format!("{file_char}{rank_char}")
}

/// Resolve coordinate notation against the legal moves of `position`.
///
/// Castling is written with the king's squares (`e1g1`); promotions need the
/// piece suffix (`e7e8q`).
pub fn parse_move(text: &str, position: &Position) -> ChessResult<Move> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidAlgebraic(text.to_owned()));
    }

    let start = algebraic_to_square(&text[0..2])?;
    let end = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        Some(symbol) => match PieceKind::from_symbol(symbol) {
            Some(kind @ (PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)) => {
                Some(kind)
            }
            _ => return Err(ChessError::InvalidAlgebraic(text.to_owned())),
        },
        None => None,
    };

    position
        .generate_all_moves()
        .iter()
        .copied()
        .find(|mv| mv.start == start && mv.end == end && mv.promotion_kind() == promotion)
        .ok_or_else(|| ChessError::InvalidAlgebraic(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::chess_move::MoveModifier;

    #[test]
    fn squares_convert_both_ways() {
        assert_eq!(algebraic_to_square("a1"), Ok(0x00));
        assert_eq!(algebraic_to_square("h8"), Ok(0x77));
        assert_eq!(algebraic_to_square("e4"), Ok(0x34));
        assert_eq!(square_to_algebraic(0x34), "e4");
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("a").is_err());
    }

    #[test]
    fn parse_move_finds_the_legal_move() {
        let game = Position::new_game();
        let mv = parse_move("e2e4", &game).expect("e2e4 is legal");
        assert_eq!(mv.modifier, MoveModifier::DoublePawnPush);
        assert!(parse_move("e2e5", &game).is_err());
        assert!(parse_move("e2e4q", &game).is_err());
    }
}
