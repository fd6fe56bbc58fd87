//! Immutable piece value.
//!
//! A piece never changes in place: moving or promoting returns a new value,
//! and an empty slot is represented by `None` rather than a null piece.

use std::fmt;

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    square: Square,
    kind: PieceKind,
    color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(square: Square, kind: PieceKind, color: Color) -> Self {
        Self {
            square,
            kind,
            color,
        }
    }

    #[inline]
    pub const fn square(self) -> Square {
        self.square
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Same kind and colour, standing on `square`.
    #[inline]
    pub const fn moved_to(self, square: Square) -> Self {
        Self { square, ..self }
    }

    /// Same square and colour, replaced by `kind`.
    #[inline]
    pub const fn promoted_to(self, kind: PieceKind) -> Self {
        Self { kind, ..self }
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.kind.value()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind != PieceKind::Pawn {
            write!(f, "{}", self.kind.symbol().to_ascii_uppercase())?;
        }
        write!(f, "{}", square_to_algebraic(self.square))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_returns_a_new_value() {
        let knight = Piece::new(0x01, PieceKind::Knight, Color::White);
        let moved = knight.moved_to(0x22);
        assert_eq!(knight.square(), 0x01);
        assert_eq!(moved.square(), 0x22);
        assert_eq!(moved.kind(), PieceKind::Knight);
        assert_eq!(moved.to_string(), "Nc3");
    }

    #[test]
    fn promotion_keeps_square_and_colour() {
        let pawn = Piece::new(0x74, PieceKind::Pawn, Color::White);
        let queen = pawn.promoted_to(PieceKind::Queen);
        assert_eq!(queen.square(), 0x74);
        assert_eq!(queen.color(), Color::White);
        assert_eq!(pawn.to_string(), "e8");
        assert_eq!(queen.to_string(), "Qe8");
    }
}
