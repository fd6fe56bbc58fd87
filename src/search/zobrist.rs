//! Zobrist hashing support for position identity and transposition lookups.
//!
//! The random keys are drawn once per process from a fixed seed, so hashes are
//! deterministic across runs, which keeps tests and debugging reproducible.
//! `Position::make_move` composes the incremental primitives below; the
//! invariant is that the result always equals [`compute_hash`].

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::game_state::chess_types::*;
use crate::game_state::piece_list::PieceList;

const ZOBRIST_SEED: u64 = 0x4D59_5249_4144_0088;

#[derive(Debug)]
struct ZobristTables {
    /// `[color][kind][0x88 square]`; off-board entries are never read.
    piece_square: [[[u64; 128]; 6]; 2],
    /// One key per castling-right bit.
    castling: [u64; 4],
    en_passant_file: [u64; 8],
    side_to_move: u64,
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 128]; 6]; 2];
    for color in &mut piece_square {
        for kind in color {
            for key in kind {
                *key = rng.next_u64();
            }
        }
    }

    let mut castling = [0u64; 4];
    for key in &mut castling {
        *key = rng.next_u64();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.next_u64();
    }

    let side_to_move = rng.next_u64();

    log::debug!("zobrist tables built from seed {ZOBRIST_SEED:#x}");

    ZobristTables {
        piece_square,
        castling,
        en_passant_file,
        side_to_move,
    }
}

/// Build the key tables now instead of on first use.
#[inline]
pub fn init() {
    let _ = tables();
}

/// Key for a `(color, kind, square)` occupancy term.
#[inline]
pub fn piece_key(color: Color, kind: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][kind.index()][square as usize & 0x7F]
}

/// Combined key of every castling bit set in `rights`.
#[inline]
pub fn castling_key(rights: CastlingRights) -> u64 {
    let keys = &tables().castling;
    (0..4)
        .filter(|bit| rights & (1 << bit) != 0)
        .fold(0u64, |acc, bit| acc ^ keys[bit])
}

#[inline]
pub fn en_passant_key(square: Option<Square>) -> u64 {
    match square {
        Some(sq) => tables().en_passant_file[file_of(sq) as usize],
        None => 0,
    }
}

#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// XOR a piece out of `from` and into `to`.
#[inline]
pub fn xor_relocate(hash: u64, color: Color, kind: PieceKind, from: Square, to: Square) -> u64 {
    hash ^ piece_key(color, kind, from) ^ piece_key(color, kind, to)
}

/// XOR a single piece in or out (captures, en-passant victims).
#[inline]
pub fn xor_piece(hash: u64, color: Color, kind: PieceKind, square: Square) -> u64 {
    hash ^ piece_key(color, kind, square)
}

/// XOR only the castling bits that differ between `old` and `new`.
#[inline]
pub fn xor_castling_diff(hash: u64, old: CastlingRights, new: CastlingRights) -> u64 {
    hash ^ castling_key(old ^ new)
}

/// XOR the old en-passant file out and the new one in; `None` contributes 0.
#[inline]
pub fn xor_en_passant_diff(hash: u64, old: Option<Square>, new: Option<Square>) -> u64 {
    hash ^ en_passant_key(old) ^ en_passant_key(new)
}

/// Replace the pawn code on `square` by the promoted piece's code.
#[inline]
pub fn xor_promotion(hash: u64, color: Color, square: Square, promoted: PieceKind) -> u64 {
    hash ^ piece_key(color, PieceKind::Pawn, square) ^ piece_key(color, promoted, square)
}

#[inline]
pub fn xor_side_to_move(hash: u64) -> u64 {
    hash ^ side_to_move_key()
}

/// Full recomputation over piece lists and flags.
pub fn compute_hash_from(
    pieces: &[PieceList; 2],
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    side_to_move: Color,
) -> u64 {
    let mut hash = 0u64;
    for list in pieces {
        for piece in list.iter() {
            hash ^= piece_key(piece.color(), piece.kind(), piece.square());
        }
    }
    hash ^= castling_key(castling_rights);
    hash ^= en_passant_key(en_passant);
    if side_to_move == Color::Black {
        hash ^= side_to_move_key();
    }
    hash
}

/// Full recomputation over a position's current state.
pub fn compute_hash(position: &Position) -> u64 {
    compute_hash_from(
        position.piece_lists(),
        position.castling_rights(),
        position.en_passant_square(),
        position.side_to_move(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::parse_move;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_hash_is_deterministic() {
        let a = Position::new_game();
        let b = Position::new_game();
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.hash(), compute_hash(&a));
    }

    #[test]
    fn side_to_move_changes_hash() {
        let w = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = parse_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_ne!(w.hash(), b.hash());
    }

    #[test]
    fn castling_rights_change_hash() {
        let with_rights = parse_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let without_rights = parse_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert_ne!(with_rights.hash(), without_rights.hash());
    }

    #[test]
    fn castling_diff_only_touches_changed_bits() {
        let full = castling_key(CASTLE_ALL);
        let dropped = xor_castling_diff(full, CASTLE_ALL, CASTLE_ALL & !CASTLE_WHITE_KINGSIDE);
        assert_eq!(dropped, castling_key(CASTLE_ALL & !CASTLE_WHITE_KINGSIDE));
        assert_eq!(xor_castling_diff(full, CASTLE_ALL, CASTLE_ALL), full);
    }

    #[test]
    fn en_passant_none_contributes_nothing() {
        assert_eq!(xor_en_passant_diff(42, None, None), 42);
        let with = xor_en_passant_diff(42, None, Some(0x24));
        assert_ne!(with, 42);
        assert_eq!(xor_en_passant_diff(with, Some(0x24), None), 42);
    }

    #[test]
    fn incremental_matches_recompute_after_moves() {
        let mut game = Position::new_game();
        for text in ["e2e4", "d7d5", "e4d5", "g8f6", "f1b5", "c7c6", "g1f3", "c6b5", "e1g1"] {
            let mv = parse_move(text, &game).expect("scripted move is legal");
            game = game.make_move(mv);
            assert_eq!(game.hash(), compute_hash(&game), "after {text}");
        }
    }
}
