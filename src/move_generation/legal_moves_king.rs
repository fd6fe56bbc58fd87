use crate::game_state::chess_rules::CASTLING_LANES;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::chess_move::Move;

/// King steps to squares the enemy does not attack once the king has left
/// its origin.
pub fn generate_king_moves(position: &Position, king: Piece, out: &mut Vec<Move>) {
    let side = king.color();
    let from = king.square();
    for delta in RADIALS {
        let Some(to) = offset(from, delta) else {
            continue;
        };
        let occupant = position.piece_at(to);
        if occupant.is_some_and(|p| p.color() == side) {
            continue;
        }
        if is_square_attacked(position, to, side.opposite(), Some(from)) {
            continue;
        }
        out.push(match occupant {
            Some(_) => Move::capture(from, to),
            None => Move::quiet(from, to),
        });
    }
}

/// Castling from the home square. Callers skip this while in check.
pub fn generate_castling_moves(position: &Position, king: Piece, out: &mut Vec<Move>) {
    let side = king.color();
    for lane in CASTLING_LANES.iter().filter(|lane| lane.color == side) {
        if !position.has_castling_right(lane.right) || king.square() != lane.king_from {
            continue;
        }
        let rook_home = position
            .piece_of(side, lane.rook_from)
            .is_some_and(|p| p.kind() == PieceKind::Rook);
        if !rook_home {
            continue;
        }
        if !lane.must_be_empty.iter().all(|&sq| position.is_empty(sq)) {
            continue;
        }
        if lane
            .must_be_safe
            .iter()
            .any(|&sq| is_square_attacked(position, sq, side.opposite(), None))
        {
            continue;
        }
        out.push(Move::new(lane.king_from, lane.king_to, lane.modifier));
    }
}
