//! Move value and its special-move taxonomy.
//!
//! `MoveModifier` keeps the integer codes collaborators exchange, so a move
//! can travel as `(start, end, code)` and be rebuilt with `from_code`.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveModifier {
    Quiet = 0,
    WhiteKingside = 1,
    BlackKingside = 2,
    WhiteQueenside = 3,
    BlackQueenside = 4,
    EnPassant = 5,
    PromoteRook = 6,
    PromoteKnight = 7,
    PromoteBishop = 8,
    PromoteQueen = 9,
    Capture = 10,
    CapturePromoteRook = 16,
    CapturePromoteKnight = 17,
    CapturePromoteBishop = 18,
    CapturePromoteQueen = 19,
    DoublePawnPush = 20,
}

impl MoveModifier {
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => MoveModifier::Quiet,
            1 => MoveModifier::WhiteKingside,
            2 => MoveModifier::BlackKingside,
            3 => MoveModifier::WhiteQueenside,
            4 => MoveModifier::BlackQueenside,
            5 => MoveModifier::EnPassant,
            6 => MoveModifier::PromoteRook,
            7 => MoveModifier::PromoteKnight,
            8 => MoveModifier::PromoteBishop,
            9 => MoveModifier::PromoteQueen,
            10 => MoveModifier::Capture,
            16 => MoveModifier::CapturePromoteRook,
            17 => MoveModifier::CapturePromoteKnight,
            18 => MoveModifier::CapturePromoteBishop,
            19 => MoveModifier::CapturePromoteQueen,
            20 => MoveModifier::DoublePawnPush,
            _ => return None,
        })
    }

    /// Promotion modifier for `kind`, with or without a capture.
    pub const fn promotion(kind: PieceKind, capture: bool) -> Option<Self> {
        Some(match (kind, capture) {
            (PieceKind::Rook, false) => MoveModifier::PromoteRook,
            (PieceKind::Knight, false) => MoveModifier::PromoteKnight,
            (PieceKind::Bishop, false) => MoveModifier::PromoteBishop,
            (PieceKind::Queen, false) => MoveModifier::PromoteQueen,
            (PieceKind::Rook, true) => MoveModifier::CapturePromoteRook,
            (PieceKind::Knight, true) => MoveModifier::CapturePromoteKnight,
            (PieceKind::Bishop, true) => MoveModifier::CapturePromoteBishop,
            (PieceKind::Queen, true) => MoveModifier::CapturePromoteQueen,
            _ => return None,
        })
    }

    /// Lands on an occupied enemy square (en passant lands on an empty one).
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            MoveModifier::Capture
                | MoveModifier::CapturePromoteRook
                | MoveModifier::CapturePromoteKnight
                | MoveModifier::CapturePromoteBishop
                | MoveModifier::CapturePromoteQueen
        )
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(
            self,
            MoveModifier::WhiteKingside
                | MoveModifier::BlackKingside
                | MoveModifier::WhiteQueenside
                | MoveModifier::BlackQueenside
        )
    }

    #[inline]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        match self {
            MoveModifier::PromoteRook | MoveModifier::CapturePromoteRook => Some(PieceKind::Rook),
            MoveModifier::PromoteKnight | MoveModifier::CapturePromoteKnight => {
                Some(PieceKind::Knight)
            }
            MoveModifier::PromoteBishop | MoveModifier::CapturePromoteBishop => {
                Some(PieceKind::Bishop)
            }
            MoveModifier::PromoteQueen | MoveModifier::CapturePromoteQueen => {
                Some(PieceKind::Queen)
            }
            _ => None,
        }
    }
}

/// Promotion targets in generation order.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub modifier: MoveModifier,
}

impl Move {
    #[inline]
    pub const fn new(start: Square, end: Square, modifier: MoveModifier) -> Self {
        Self {
            start,
            end,
            modifier,
        }
    }

    #[inline]
    pub const fn quiet(start: Square, end: Square) -> Self {
        Self::new(start, end, MoveModifier::Quiet)
    }

    #[inline]
    pub const fn capture(start: Square, end: Square) -> Self {
        Self::new(start, end, MoveModifier::Capture)
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.modifier.is_capture() || matches!(self.modifier, MoveModifier::EnPassant)
    }

    #[inline]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        self.modifier.promotion_kind()
    }
}

/// Coordinate notation: `e2e4`, `e7e8q`, `e1g1`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            square_to_algebraic(self.start),
            square_to_algebraic(self.end)
        )?;
        if let Some(kind) = self.promotion_kind() {
            write!(f, "{}", kind.symbol())?;
        }
        Ok(())
    }
}
