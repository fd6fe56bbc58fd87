//! Crate root module declarations for the Myriad chess core.
//!
//! This file exposes the rules core (immutable 0x88 positions, legal move
//! generation and game results), Zobrist hashing, the transposition slot
//! store, evaluation features and the FEN/coordinate helpers used by tests
//! and the perft tool.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod piece;
    pub mod piece_list;
    pub mod position;
}

pub mod moves {
    pub mod chess_move;
}

pub mod move_generation {
    pub mod game_result;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod move_ordering;
    pub mod perft;
}

pub mod search {
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod eval {
    pub mod features;
    pub mod sentinels;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
}
