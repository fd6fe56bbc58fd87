//! Full legal move generation pipeline.
//!
//! Picks a strategy from the check status of the side to move: a pin scan
//! when not in check, capture/interpose filtering under a single checker and
//! king moves only under double check. Every emitted move is legal; the list
//! is then ordered best guess first.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{
    checkers, guardian_assailant_map, squares_between, PinMap,
};
use crate::move_generation::legal_move_shared::generate_piece_moves;
use crate::move_generation::legal_moves_king::{generate_castling_moves, generate_king_moves};
use crate::move_generation::move_ordering::order_moves;
use crate::moves::chess_move::{Move, MoveModifier};

pub fn generate_legal_moves(position: &Position, killers: &[Move]) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    if position.is_in_check() {
        generate_evasions(position, &mut moves);
    } else {
        generate_unchecked(position, &mut moves);
    }
    order_moves(position, &mut moves, killers);
    moves
}

fn generate_unchecked(position: &Position, out: &mut Vec<Move>) {
    let side = position.side_to_move();
    let king = position.pieces(side).king();
    let pins = guardian_assailant_map(position, side);

    for piece in position.pieces(side).iter() {
        if piece.kind() == PieceKind::King {
            generate_king_moves(position, piece, out);
            generate_castling_moves(position, piece, out);
            continue;
        }
        let first = out.len();
        generate_piece_moves(position, piece, out);
        restrict_pinned(&pins, king.square(), piece, out, first);
    }
}

fn generate_evasions(position: &Position, out: &mut Vec<Move>) {
    let side = position.side_to_move();
    let king = position.pieces(side).king();
    generate_king_moves(position, king, out);

    let found = checkers(position, side);
    if found.count() != 1 {
        return;
    }
    let Some(checker) = found.first() else {
        return;
    };

    // Capture the checker or block a sliding check.
    let mut targets = SquareSet::EMPTY;
    targets.insert(checker.square());
    if checker.kind().is_slider() {
        targets.0 |= squares_between(king.square(), checker.square()).0;
    }

    let pins = guardian_assailant_map(position, side);
    for piece in position.pieces(side).iter() {
        if piece.kind() == PieceKind::King || pins.pin_of(piece.square()).is_some() {
            continue;
        }
        let first = out.len();
        generate_piece_moves(position, piece, out);
        retain_from(out, first, |mv| {
            // En passant was already probed against the king.
            mv.modifier == MoveModifier::EnPassant || targets.contains(mv.end)
        });
    }
}

/// Keep only moves along the pin line for a pinned `piece`.
fn restrict_pinned(pins: &PinMap, king: Square, piece: Piece, out: &mut Vec<Move>, first: usize) {
    let Some(pin) = pins.pin_of(piece.square()) else {
        return;
    };
    let line = pin.line(king);
    retain_from(out, first, |mv| {
        mv.modifier == MoveModifier::EnPassant || line.contains(mv.end)
    });
}

fn retain_from(out: &mut Vec<Move>, first: usize, keep: impl Fn(&Move) -> bool) {
    let mut write = first;
    for read in first..out.len() {
        if keep(&out[read]) {
            out[write] = out[read];
            write += 1;
        }
    }
    out.truncate(write);
}
