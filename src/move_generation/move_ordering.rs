//! Best-guess-first ordering of a legal move list.
//!
//! Lower scores sort first. Killers lead, then captures by victim value
//! (cheapest attacker first among equal victims), then checks, then quiet moves
//! landing on squares the opponent controls, then everything else.

use crate::eval::features::FeatureExtractor;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

pub const KILLER_SCORE: i32 = -15_000;
pub const CAPTURE_BASE_SCORE: i32 = -10_000;
pub const CHECK_SCORE: i32 = -8_000;
pub const SENTINEL_SCORE: i32 = -1_000;

/// Upper bound on legal moves in any reachable position is 218.
const MAX_SCORED_MOVES: usize = 256;

pub fn order_moves(position: &Position, moves: &mut [Move], killers: &[Move]) {
    if moves.len() < 2 {
        return;
    }
    let enemy_squares = FeatureExtractor::new(position)
        .sentinel_squares()
        .controlled_by(position.side_to_move().opposite());

    let count = moves.len().min(MAX_SCORED_MOVES);
    let mut scores = [0i32; MAX_SCORED_MOVES];
    for (score, mv) in scores.iter_mut().zip(moves.iter()) {
        *score = score_move(position, *mv, killers, enemy_squares);
    }
    quick_sort(&mut scores[..count], &mut moves[..count], 0, count - 1);
}

pub fn score_move(position: &Position, mv: Move, killers: &[Move], enemy_squares: SquareSet) -> i32 {
    if killers.contains(&mv) {
        return KILLER_SCORE;
    }
    if mv.modifier.is_capture() {
        let attacker = position.piece_at(mv.start).map_or(0, Piece::value);
        let victim = position.piece_at(mv.end).map_or(0, Piece::value);
        return attacker - victim + CAPTURE_BASE_SCORE;
    }
    if position.make_move(mv).is_in_check() {
        return CHECK_SCORE;
    }
    if enemy_squares.contains(mv.end) {
        return SENTINEL_SCORE;
    }
    0
}

/// Hoare partition-exchange sort of `scores[left..=right]`, moving `moves`
/// in lockstep.
fn quick_sort(scores: &mut [i32], moves: &mut [Move], left: usize, right: usize) {
    let index = partition(scores, moves, left, right);
    if left + 1 < index {
        quick_sort(scores, moves, left, index - 1);
    }
    if index < right {
        quick_sort(scores, moves, index, right);
    }
}

fn partition(scores: &mut [i32], moves: &mut [Move], left: usize, right: usize) -> usize {
    let pivot = scores[(left + right) / 2];
    let mut i = left as isize;
    let mut j = right as isize;
    while i <= j {
        while scores[i as usize] < pivot {
            i += 1;
        }
        while scores[j as usize] > pivot {
            j -= 1;
        }
        if i <= j {
            scores.swap(i as usize, j as usize);
            moves.swap(i as usize, j as usize);
            i += 1;
            j -= 1;
        }
    }
    i as usize
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::moves::chess_move::MoveModifier;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn quick_sort_orders_scores_and_keeps_pairs() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in 1..40usize {
            let mut scores: Vec<i32> = (0..len).map(|_| rng.random_range(-20..20)).collect();
            let mut moves: Vec<Move> = scores
                .iter()
                .map(|&s| Move::quiet((s + 20) as Square, 0))
                .collect();
            quick_sort(&mut scores, &mut moves, 0, len - 1);
            assert!(scores.windows(2).all(|w| w[0] <= w[1]));
            assert!(scores
                .iter()
                .zip(moves.iter())
                .all(|(&s, mv)| mv.start == (s + 20) as Square));
        }
    }

    #[test]
    fn cheaper_attacker_on_bigger_victim_comes_first() {
        // Pawn and queen can both take the rook on d5.
        let position = parse_fen("4k3/p7/8/3r4/2P5/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        let moves = position.generate_all_moves();
        let pawn_takes_rook = Move::capture(0x32, 0x43);
        let queen_takes_rook = Move::capture(0x03, 0x43);
        assert_eq!(moves[0], pawn_takes_rook);
        assert_eq!(moves[1], queen_takes_rook);
    }

    #[test]
    fn killers_lead_and_checks_follow_captures() {
        let position = parse_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        // Build the killer by hand: resolving it from text would fix the order.
        let killer = Move::quiet(0x04, 0x13);
        let ordered = position.generate_all_moves_with_killers(&[killer]);
        assert_eq!(ordered[0], killer);

        let checking = Move::quiet(0x00, 0x70);
        let check_rank = ordered.iter().position(|mv| *mv == checking).expect("a1a8 is legal");
        assert_eq!(check_rank, 1);
        assert_eq!(
            score_move(&position, checking, &[], SquareSet::EMPTY),
            CHECK_SCORE
        );
    }

    #[test]
    fn landing_on_enemy_controlled_square_sorts_between_checks_and_quiet_moves() {
        let position = parse_fen("7k/8/8/8/5p2/8/4P3/K5R1 w - - 0 1").expect("FEN should parse");
        let enemy_squares = FeatureExtractor::new(&position)
            .sentinel_squares()
            .controlled_by(Color::Black);
        let score = |mv: Move| score_move(&position, mv, &[], enemy_squares);

        // e3 is covered only by the f4 pawn, e4 by nobody.
        let guarded = Move::quiet(0x14, 0x24);
        let plain = Move::new(0x14, 0x34, MoveModifier::DoublePawnPush);
        let check = Move::quiet(0x06, 0x76);
        assert!(enemy_squares.contains(0x24));
        assert!(!enemy_squares.contains(0x34));
        assert_eq!(score(guarded), SENTINEL_SCORE);
        assert_eq!(score(plain), 0);
        assert_eq!(score(check), CHECK_SCORE);

        let ordered = position.generate_all_moves();
        let rank = |mv: Move| ordered.iter().position(|m| *m == mv).expect("move is legal");
        assert!(rank(check) < rank(guarded));
        assert!(rank(guarded) < rank(plain));
    }

    #[test]
    fn capture_score_is_attacker_minus_victim() {
        let position = parse_fen("4k3/8/8/3r4/2P5/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = Move::new(0x32, 0x43, MoveModifier::Capture);
        assert_eq!(
            score_move(&position, mv, &[], SquareSet::EMPTY),
            100 - 500 - 10_000
        );
    }
}
