use crate::game_state::chess_rules::{castling_lane, rights_cleared_by_square};
use crate::game_state::chess_types::*;
use crate::moves::chess_move::{Move, MoveModifier};
use crate::search::zobrist::{
    xor_castling_diff, xor_en_passant_diff, xor_piece, xor_promotion, xor_relocate,
    xor_side_to_move,
};

/// Build the successor of `position` after `mv`, updating the hash
/// incrementally.
///
/// # Panics
///
/// Panics when the side to move has no piece on `mv.start`; callers only pass
/// moves produced by the generator.
pub fn apply_move(position: &Position, mv: Move) -> Position {
    let side = position.side_to_move();
    let enemy = side.opposite();
    let mut pieces = *position.piece_lists();
    let mut hash = position.hash();
    let mut resets_clock = false;

    let Some(slot) = pieces[side.index()].slot_of(mv.start) else {
        panic!("no {side:?} piece on 0x{:02x} for move {mv}", mv.start);
    };
    let Some(mover) = pieces[side.index()].get(slot) else {
        unreachable!("slot_of returned an active slot");
    };
    let mut moved = mover.moved_to(mv.end);
    hash = xor_relocate(hash, side, mover.kind(), mv.start, mv.end);

    // Remove whatever stands on the destination.
    if let Some(victim_slot) = pieces[enemy.index()].slot_of(mv.end) {
        if let Some(victim) = pieces[enemy.index()].remove(victim_slot) {
            hash = xor_piece(hash, enemy, victim.kind(), mv.end);
            resets_clock = true;
        }
    }

    match mv.modifier {
        MoveModifier::EnPassant => {
            if let Some(victim_square) = offset(mv.end, -side.forward()) {
                if let Some(victim_slot) = pieces[enemy.index()].slot_of(victim_square) {
                    if let Some(victim) = pieces[enemy.index()].remove(victim_slot) {
                        hash = xor_piece(hash, enemy, victim.kind(), victim_square);
                    }
                }
            }
            resets_clock = true;
        }
        modifier if modifier.is_castling() => {
            if let Some(lane) = castling_lane(modifier) {
                if let Some(rook_slot) = pieces[side.index()].slot_of(lane.rook_from) {
                    if let Some(rook) = pieces[side.index()].get(rook_slot) {
                        pieces[side.index()].replace(rook_slot, rook.moved_to(lane.rook_to));
                        hash = xor_relocate(
                            hash,
                            side,
                            PieceKind::Rook,
                            lane.rook_from,
                            lane.rook_to,
                        );
                    }
                }
            }
        }
        modifier => {
            if let Some(kind) = modifier.promotion_kind() {
                moved = moved.promoted_to(kind);
                hash = xor_promotion(hash, side, mv.end, kind);
            }
        }
    }

    pieces[side.index()].replace(slot, moved);
    if mover.kind() == PieceKind::Pawn {
        resets_clock = true;
    }

    // Rights go away independently for each home square touched.
    let old_rights = position.castling_rights();
    let mut rights = old_rights;
    if mover.kind() == PieceKind::King {
        rights &= !castling_rights_of(side);
    }
    rights &= !rights_cleared_by_square(mv.start);
    rights &= !rights_cleared_by_square(mv.end);
    hash = xor_castling_diff(hash, old_rights, rights);

    // En passant is only offered when an enemy pawn can actually take.
    let en_passant = if mv.modifier == MoveModifier::DoublePawnPush
        && [LEFT_MOVE, RIGHT_MOVE].iter().any(|&delta| {
            offset(mv.end, delta)
                .and_then(|sq| pieces[enemy.index()].piece_on(sq))
                .is_some_and(|p| p.kind() == PieceKind::Pawn)
        }) {
        offset(mv.end, -side.forward())
    } else {
        None
    };
    hash = xor_en_passant_diff(hash, position.en_passant_square(), en_passant);
    hash = xor_side_to_move(hash);

    let fifty_move_clock = if resets_clock {
        0
    } else {
        position.fifty_move_clock().saturating_add(1)
    };

    Position::from_transition(
        pieces,
        rights,
        en_passant,
        fifty_move_clock,
        position.half_moves().wrapping_add(1),
        enemy,
        hash,
        mv,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::search::zobrist::compute_hash;
    use crate::utils::algebraic::{algebraic_to_square, parse_move};
    use crate::utils::fen_parser::parse_fen;

    fn play(fen: &str, moves: &[&str]) -> Position {
        let mut position = parse_fen(fen).expect("FEN should parse");
        for text in moves {
            let mv = parse_move(text, &position).expect("scripted move is legal");
            position = position.make_move(mv);
            assert_eq!(position.hash(), compute_hash(&position), "hash after {text}");
        }
        position
    }

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("valid square")
    }

    #[test]
    fn castling_moves_the_rook_and_clears_both_rights() {
        let after = play("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 1", &["e1g1"]);
        assert_eq!(after.piece_at(sq("f1")).map(Piece::kind), Some(PieceKind::Rook));
        assert_eq!(after.piece_at(sq("h1")), None);
        assert_eq!(after.castling_rights(), CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
        assert_eq!(after.fifty_move_clock(), 4);
    }

    #[test]
    fn rook_capture_clears_the_victims_right() {
        let after = play("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", &["h1h8"]);
        assert_eq!(
            after.castling_rights(),
            CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_QUEENSIDE
        );
        assert_eq!(after.fifty_move_clock(), 0);
        assert_eq!(after.pieces(Color::Black).len(), 2);
    }

    #[test]
    fn double_push_sets_en_passant_only_next_to_enemy_pawn() {
        let quiet = play("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", &["e2e4"]);
        assert_eq!(quiet.en_passant_square(), None);

        let live = play("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1", &["e2e4"]);
        assert_eq!(live.en_passant_square(), Some(sq("e3")));

        let taken = play("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1", &["e2e4", "d4e3"]);
        assert_eq!(taken.piece_at(sq("e4")), None);
        assert_eq!(taken.pieces(Color::White).len(), 1);
        assert_eq!(taken.en_passant_square(), None);
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let after = play("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", &["a7a8n"]);
        let piece = after.piece_at(sq("a8")).expect("promoted piece");
        assert_eq!(piece.kind(), PieceKind::Knight);
        assert_eq!(after.pieces(Color::White).count(PieceKind::Pawn), 0);
    }

    #[test]
    fn king_stays_in_slot_zero_after_captures() {
        let after = play("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1", &["e1d2"]);
        assert_eq!(after.pieces(Color::White).king().square(), sq("d2"));
        assert_eq!(after.pieces(Color::Black).king().square(), sq("e8"));
    }

    #[test]
    #[should_panic(expected = "no White piece on 0x23")]
    fn empty_start_square_panics() {
        apply_move(&Position::new_game(), Move::quiet(0x23, 0x33));
    }
}
