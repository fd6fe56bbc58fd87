use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::king_in_check;
use crate::moves::chess_move::{Move, MoveModifier, PROMOTION_KINDS};

/// Pushes, double pushes, captures and promotions for one pawn.
///
/// En passant is only emitted when the capture does not expose the king,
/// since removing two pawns from one rank can open a line no pin scan sees.
pub fn generate_pawn_moves(position: &Position, pawn: Piece, out: &mut Vec<Move>) {
    let side = pawn.color();
    let from = pawn.square();
    let forward = side.forward();

    if let Some(to) = offset(from, forward) {
        if position.is_empty(to) {
            push_pawn_move(from, to, side, false, out);

            if rank_of(from) == side.pawn_start_rank() {
                if let Some(two) = offset(to, forward) {
                    if position.is_empty(two) {
                        out.push(Move::new(from, two, MoveModifier::DoublePawnPush));
                    }
                }
            }
        }
    }

    for &delta in side.pawn_attacks() {
        let Some(to) = offset(from, delta) else {
            continue;
        };
        if position.piece_of(side.opposite(), to).is_some() {
            push_pawn_move(from, to, side, true, out);
        } else if position.en_passant_square() == Some(to) {
            let mv = Move::new(from, to, MoveModifier::EnPassant);
            if !king_in_check(&apply_move(position, mv), side) {
                out.push(mv);
            }
        }
    }
}

fn push_pawn_move(from: Square, to: Square, side: Color, capture: bool, out: &mut Vec<Move>) {
    if rank_of(to) == side.promotion_rank() {
        for kind in PROMOTION_KINDS {
            if let Some(modifier) = MoveModifier::promotion(kind, capture) {
                out.push(Move::new(from, to, modifier));
            }
        }
    } else if capture {
        out.push(Move::capture(from, to));
    } else {
        out.push(Move::quiet(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn pawn_moves(fen: &str, square: &str) -> Vec<Move> {
        let position = parse_fen(fen).expect("FEN should parse");
        let sq = algebraic_to_square(square).expect("valid square");
        let pawn = position.piece_at(sq).expect("pawn on square");
        let mut moves = Vec::new();
        generate_pawn_moves(&position, pawn, &mut moves);
        moves
    }

    #[test]
    fn start_rank_pawn_pushes_once_or_twice() {
        let moves = pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", "e2");
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|mv| mv.modifier == MoveModifier::DoublePawnPush));
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2");
        assert!(moves.is_empty());
    }

    #[test]
    fn capture_promotion_expands_to_four() {
        let moves = pawn_moves("3rk3/4P3/8/8/8/8/8/4K3 w - - 0 1", "e7");
        // Blocked push is impossible here: e8 holds the black king.
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|mv| mv.modifier.is_capture()));
    }

    #[test]
    fn en_passant_exposing_the_king_is_dropped() {
        // Taking d6 would clear the fifth rank between king and rook.
        let moves = pawn_moves("4k3/8/8/K2pP2r/8/8/8/8 w - d6 0 1", "e5");
        assert!(!moves.iter().any(|mv| mv.modifier == MoveModifier::EnPassant));

        let moves = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5");
        assert!(moves.iter().any(|mv| mv.modifier == MoveModifier::EnPassant));
    }
}
