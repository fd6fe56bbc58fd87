//! Primitive chess types shared by every subsystem.
//!
//! Squares use the 0x88 layout: `rank << 4 | file`. A square is on the board
//! iff `square & 0x88 == 0`, so stepping off any edge is one mask test.

pub use crate::game_state::piece::Piece;
pub use crate::game_state::position::Position;

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// One rank towards the opponent, as a 0x88 delta.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => UP_MOVE,
            Color::Black => DOWN_MOVE,
        }
    }

    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Pawn capture deltas for this side.
    #[inline]
    pub const fn pawn_attacks(self) -> &'static [i8; 2] {
        match self {
            Color::White => &WHITE_PAWN_ATTACK,
            Color::Black => &BLACK_PAWN_ATTACK,
        }
    }
}

/// Piece kind (color is stored separately on the piece).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Centipawn value used by move ordering. The king is effectively
    /// unbounded so king captures always sort behind other captures.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 325,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 975,
            PieceKind::King => i16::MAX as i32,
        }
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Whether a slider of this kind moves along the given radial delta.
    #[inline]
    pub const fn slides_along(self, delta: i8) -> bool {
        match self {
            PieceKind::Bishop => is_diagonal(delta),
            PieceKind::Rook => !is_diagonal(delta),
            PieceKind::Queen => true,
            _ => false,
        }
    }

    /// Lowercase letter used by coordinate notation and FEN.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// 0x88 square index (`0..=0x77`).
pub type Square = u8;

/// Castling rights bitmask. Bit order doubles as the Zobrist index.
pub type CastlingRights = u8;
pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 1;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0x0F;

#[inline]
pub const fn castling_rights_of(color: Color) -> CastlingRights {
    match color {
        Color::White => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        Color::Black => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
    }
}

// --- 0x88 deltas ---
pub const UP_MOVE: i8 = 0x10;
pub const DOWN_MOVE: i8 = -0x10;
pub const LEFT_MOVE: i8 = -0x01;
pub const RIGHT_MOVE: i8 = 0x01;
pub const LEFT_UP_MOVE: i8 = 0x0f;
pub const RIGHT_UP_MOVE: i8 = 0x11;
pub const LEFT_DOWN_MOVE: i8 = -0x11;
pub const RIGHT_DOWN_MOVE: i8 = -0x0f;

pub const KNIGHT_MOVES: [i8; 8] = [0x21, 0x1f, -0x1f, -0x21, 0x12, -0x0e, 0x0e, -0x12];
pub const DIAGONALS: [i8; 4] = [0x11, -0x11, 0x0f, -0x0f];
pub const HORIZONTALS: [i8; 4] = [0x10, -0x10, 0x01, -0x01];
/// Diagonals first (indices 0..4), then orthogonals (4..8).
pub const RADIALS: [i8; 8] = [0x11, -0x0f, 0x0f, -0x11, 0x10, -0x01, -0x10, 0x01];
pub const WHITE_PAWN_ATTACK: [i8; 2] = [0x0f, 0x11];
pub const BLACK_PAWN_ATTACK: [i8; 2] = [-0x11, -0x0f];

#[inline]
pub const fn is_diagonal(delta: i8) -> bool {
    matches!(delta, 0x11 | -0x11 | 0x0f | -0x0f)
}

#[inline]
pub const fn square_at(rank: u8, file: u8) -> Square {
    (rank << 4) | file
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square >> 4
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square & 0x07
}

#[inline]
pub const fn is_on_board(square: i16) -> bool {
    square >= 0 && square < 0x80 && (square & 0x88) == 0
}

/// Step `delta` from `square`, or `None` when that leaves the board.
#[inline]
pub const fn offset(square: Square, delta: i8) -> Option<Square> {
    let next = square as i16 + delta as i16;
    if is_on_board(next) {
        Some(next as Square)
    } else {
        None
    }
}

/// `rank * 8 + file`, the index used by 64-entry tables and square sets.
#[inline]
pub const fn to_index64(square: Square) -> usize {
    (rank_of(square) as usize) * 8 + file_of(square) as usize
}

#[inline]
pub const fn from_index64(index: usize) -> Square {
    square_at((index / 8) as u8, (index % 8) as u8)
}

/// a1 is dark; squares with odd rank+file parity are light.
#[inline]
pub const fn is_light_square(square: Square) -> bool {
    (rank_of(square) + file_of(square)) & 1 == 1
}

/// Radial direction from `from` towards `to`, if they share a line.
pub fn direction_between(from: Square, to: Square) -> Option<i8> {
    if from == to {
        return None;
    }
    let dr = rank_of(to) as i8 - rank_of(from) as i8;
    let df = file_of(to) as i8 - file_of(from) as i8;
    if dr != 0 && df != 0 && dr.abs() != df.abs() {
        return None;
    }
    Some(dr.signum() * UP_MOVE + df.signum())
}

/// Iterates all 64 on-board squares in ascending 0x88 order.
pub fn board_squares() -> impl Iterator<Item = Square> {
    (0u8..0x78).filter(|sq| sq & 0x88 == 0)
}

/// 64-bit set of squares indexed by [`to_index64`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(pub u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << to_index64(square);
    }

    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        (self.0 >> to_index64(square)) & 1 == 1
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Square> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(from_index64(index))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_rejects_every_edge() {
        assert_eq!(offset(0x00, LEFT_MOVE), None);
        assert_eq!(offset(0x07, RIGHT_MOVE), None);
        assert_eq!(offset(0x70, UP_MOVE), None);
        assert_eq!(offset(0x04, DOWN_MOVE), None);
        assert_eq!(offset(0x33, RIGHT_UP_MOVE), Some(0x44));
    }

    #[test]
    fn board_has_sixty_four_squares() {
        assert_eq!(board_squares().count(), 64);
        for (i, sq) in board_squares().enumerate() {
            assert_eq!(to_index64(sq), i);
            assert_eq!(from_index64(i), sq);
        }
    }

    #[test]
    fn direction_between_follows_lines_only() {
        assert_eq!(direction_between(0x04, 0x74), Some(UP_MOVE));
        assert_eq!(direction_between(0x00, 0x77), Some(RIGHT_UP_MOVE));
        assert_eq!(direction_between(0x07, 0x00), Some(LEFT_MOVE));
        assert_eq!(direction_between(0x00, 0x12), None);
    }

    #[test]
    fn square_colours_alternate() {
        assert!(!is_light_square(0x00));
        assert!(is_light_square(0x01));
        assert!(is_light_square(0x07));
        assert!(!is_light_square(0x77));
    }
}
