//! Fixed 16-slot piece array for one side.
//!
//! Slot 0 always holds the king. Active pieces occupy a contiguous prefix;
//! removing a piece swaps the last active piece into its slot and clears the
//! last slot, so nothing is shifted and nothing is allocated.

use crate::game_state::chess_types::{PieceKind, Square};
use crate::game_state::piece::Piece;

pub const MAX_PIECES_PER_SIDE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceList {
    slots: [Option<Piece>; MAX_PIECES_PER_SIDE],
    len: u8,
}

impl PieceList {
    pub const fn empty() -> Self {
        Self {
            slots: [None; MAX_PIECES_PER_SIDE],
            len: 0,
        }
    }

    /// Builds a list from `pieces`, moving the first king to slot 0.
    ///
    /// Callers validate counts beforehand; extra pieces beyond sixteen are
    /// ignored.
    pub fn from_pieces(pieces: &[Piece]) -> Self {
        let mut list = Self::empty();
        for piece in pieces.iter().take(MAX_PIECES_PER_SIDE) {
            list.slots[list.len as usize] = Some(*piece);
            list.len += 1;
        }
        let king_slot = list.iter().position(|p| p.kind() == PieceKind::King);
        if let Some(king_slot) = king_slot {
            list.slots.swap(0, king_slot);
        }
        list
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The king in slot 0.
    #[inline]
    pub fn king(&self) -> Piece {
        match self.slots[0] {
            Some(king) => king,
            None => unreachable!("a validated position always has a king in slot 0"),
        }
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<Piece> {
        self.slots.get(slot).copied().flatten()
    }

    /// Active pieces in slot order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        self.slots[..self.len()].iter().filter_map(|slot| *slot)
    }

    /// All sixteen slots, including cleared ones.
    #[inline]
    pub fn slots(&self) -> &[Option<Piece>; MAX_PIECES_PER_SIDE] {
        &self.slots
    }

    #[inline]
    pub fn slot_of(&self, square: Square) -> Option<usize> {
        self.iter().position(|p| p.square() == square)
    }

    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.iter().find(|p| p.square() == square)
    }

    #[inline]
    pub fn count(&self, kind: PieceKind) -> usize {
        self.iter().filter(|p| p.kind() == kind).count()
    }

    #[inline]
    pub fn replace(&mut self, slot: usize, piece: Piece) {
        debug_assert!(slot < self.len());
        self.slots[slot] = Some(piece);
    }

    /// Swap-with-last compaction. Returns the removed piece.
    pub fn remove(&mut self, slot: usize) -> Option<Piece> {
        if slot >= self.len() {
            return None;
        }
        let last = self.len() - 1;
        let removed = self.slots[slot];
        self.slots[slot] = self.slots[last];
        self.slots[last] = None;
        self.len -= 1;
        removed
    }
}

impl Default for PieceList {
    fn default() -> Self {
        Self::empty()
    }
}
