use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::moves::chess_move::Move;

/// Pseudo-legal moves for any non-king piece: own-piece blocking and board
/// edges are honoured, king safety is not.
pub fn generate_piece_moves(position: &Position, piece: Piece, out: &mut Vec<Move>) {
    match piece.kind() {
        PieceKind::Pawn => generate_pawn_moves(position, piece, out),
        PieceKind::Knight => generate_steps(position, piece, &KNIGHT_MOVES, false, out),
        PieceKind::Bishop => generate_steps(position, piece, &DIAGONALS, true, out),
        PieceKind::Rook => generate_steps(position, piece, &HORIZONTALS, true, out),
        PieceKind::Queen => generate_steps(position, piece, &RADIALS, true, out),
        PieceKind::King => generate_steps(position, piece, &RADIALS, false, out),
    }
}

/// Step along each delta, once for jumpers or until blocked for sliders.
pub fn generate_steps(
    position: &Position,
    piece: Piece,
    deltas: &[i8],
    sliding: bool,
    out: &mut Vec<Move>,
) {
    let from = piece.square();
    for &delta in deltas {
        let mut cursor = from;
        while let Some(to) = offset(cursor, delta) {
            match position.piece_at(to) {
                None => out.push(Move::quiet(from, to)),
                Some(other) => {
                    if other.color() != piece.color() {
                        out.push(Move::capture(from, to));
                    }
                    break;
                }
            }
            if !sliding {
                break;
            }
            cursor = to;
        }
    }
}
