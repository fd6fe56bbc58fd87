//! FEN-to-Position parser.
//!
//! Splits a Forsyth-Edwards Notation string into `PositionParts` and hands
//! them to `Position::from_parts`, which validates the board and computes the
//! hash.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::PositionParts;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    Position::from_parts(parse_fen_parts(fen)?)
}

pub fn parse_fen_parts(fen: &str) -> ChessResult<PositionParts> {
    let mut fields = fen.split_whitespace();

    let board_part = fields.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = fields.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = fields.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = fields.next().ok_or_else(|| invalid("missing en-passant square"))?;
    // Clocks are optional in many fixture sources.
    let halfmove_part = fields.next().unwrap_or("0");
    let fullmove_part = fields.next().unwrap_or("1");

    if fields.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut parts = PositionParts::default();
    parse_board(board_part, &mut parts)?;

    let side_to_move = parse_side_to_move(side_part)?;
    parts.side_to_move = Some(side_to_move);
    parts.castling_rights = parse_castling_rights(castling_part)?;
    parts.en_passant_square = parse_en_passant_square(en_passant_part)?;
    parts.fifty_move_clock = halfmove_part
        .parse::<u8>()
        .map_err(|_| invalid(&format!("halfmove clock {halfmove_part}")))?;
    let fullmove = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("fullmove number {fullmove_part}")))?;
    parts.half_moves = fullmove
        .saturating_sub(1)
        .saturating_mul(2)
        .saturating_add(u16::from(side_to_move == Color::Black));

    Ok(parts)
}

fn parse_board(board_part: &str, parts: &mut PositionParts) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid("board rank has too many files"));
                }
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("piece character '{ch}'")))?;

            if file >= 8 {
                return Err(invalid("board rank has too many files"));
            }

            let piece = Piece::new(square_at(rank, file), kind, color);
            match color {
                Color::White => parts.white.push(piece),
                Color::Black => parts.black.push(piece),
            }
            file += 1;
        }

        if file != 8 {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("side to move {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid(&format!("castling rights character {ch}"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    Ok(Some(algebraic_to_square(en_passant_part)?))
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = PieceKind::from_symbol(ch.to_ascii_lowercase())?;
    Some((color, kind))
}

fn invalid(reason: &str) -> ChessError {
    ChessError::InvalidFen(reason.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn parse_starting_fen() {
        let parts = parse_fen_parts(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(parts.white.len(), 16);
        assert_eq!(parts.black.len(), 16);
        assert_eq!(parts.side_to_move, Some(Color::White));
        assert_eq!(parts.castling_rights, CASTLE_ALL);
        assert_eq!(parts.half_moves, 0);

        let game = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(game, Position::new_game());
    }

    #[test]
    fn clocks_and_en_passant_are_read() {
        let parts = parse_fen_parts("4k3/8/8/3pP3/8/8/8/4K3 w - d6 7 31").expect("FEN should parse");
        assert_eq!(parts.en_passant_square, Some(0x53));
        assert_eq!(parts.fifty_move_clock, 7);
        assert_eq!(parts.half_moves, 60);
    }

    #[test]
    fn missing_clocks_default_to_zero() {
        let position = parse_fen("4k3/8/8/8/8/8/8/4K3 b -  -").expect("FEN should parse");
        assert_eq!(position.fifty_move_clock(), 0);
        assert_eq!(position.half_moves(), 1);
    }

    #[test]
    fn malformed_fen_is_rejected() {
        assert!(matches!(parse_fen("8/8/8 w - - 0 1"), Err(ChessError::InvalidFen(_))));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(ChessError::InvalidFen(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4KK2 w - - 0 1"),
            Err(ChessError::DuplicateKing(Color::White))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/4K3 w - e9 0 1"),
            Err(ChessError::InvalidAlgebraic(_))
        ));
    }
}
