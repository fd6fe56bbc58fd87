use std::thread;

use crate::errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::{Move, MoveModifier};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf count at `depth`.
pub fn perft(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = position.generate_all_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| perft(&position.make_move(*mv), depth - 1))
        .sum()
}

pub fn perft_fen(fen: &str, depth: u8) -> ChessResult<u64> {
    Ok(perft(&Position::from_fen(fen)?, depth))
}

/// Leaf count per root move, in generation order.
pub fn perft_divide(position: &Position, depth: u8) -> Vec<(Move, u64)> {
    let child_depth = depth.saturating_sub(1);
    let divide: Vec<(Move, u64)> = position
        .generate_all_moves()
        .iter()
        .map(|mv| (*mv, perft(&position.make_move(*mv), child_depth)))
        .collect();
    for (mv, nodes) in &divide {
        log::debug!("{mv}: {nodes}");
    }
    divide
}

/// Leaf count plus move-kind statistics gathered at the leaves.
pub fn perft_counts(position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }
    let mut total = PerftCounts::default();
    for mv in position.generate_all_moves() {
        perft_recurse(position, *mv, depth, 1, &mut total);
    }
    total
}

/// Splits the root moves over `threads` scoped workers.
pub fn perft_multi_threaded(position: &Position, depth: u8, threads: usize) -> u64 {
    if depth <= 1 || threads <= 1 {
        return perft(position, depth);
    }
    let root_moves = position.generate_all_moves();
    let chunk_size = root_moves.len().div_ceil(threads).max(1);

    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|mv| perft(&position.make_move(*mv), depth - 1))
                        .sum::<u64>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(nodes) => nodes,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .sum()
    })
}

fn perft_recurse(
    parent: &Position,
    mv: Move,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    let child = parent.make_move(mv);
    if current_depth == search_depth {
        counts.nodes += 1;

        if mv.is_capture() {
            counts.captures += 1;
        }
        if mv.modifier == MoveModifier::EnPassant {
            counts.en_passant += 1;
        }
        if mv.modifier.is_castling() {
            counts.castles += 1;
        }
        if mv.promotion_kind().is_some() {
            counts.promotions += 1;
        }
        if child.is_in_check() {
            counts.checks += 1;
            if child.generate_all_moves().is_empty() {
                counts.checkmates += 1;
            }
        }
        return;
    }

    let mut local = PerftCounts::default();
    for next in child.generate_all_moves() {
        perft_recurse(&child, *next, search_depth, current_depth + 1, &mut local);
    }
    counts.merge(local);
}
