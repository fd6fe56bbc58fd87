//! Static control estimate for empty squares.
//!
//! Each side's attackers of a square are collected as weights (pawn 1, minor
//! 3, rook 5, queen 9, king unbounded) and an alternating exchange, cheapest
//! attacker first and the side to move leading, decides who holds it.

use crate::game_state::chess_types::*;

/// Exchange weight of a king: it may only take last.
const KING_WEIGHT: u32 = u32::MAX;

/// Weight classes in ascending order.
const WEIGHT_CLASSES: [u32; 5] = [1, 3, 5, 9, KING_WEIGHT];

#[inline]
fn weight_class(kind: PieceKind) -> usize {
    match kind {
        PieceKind::Pawn => 0,
        PieceKind::Knight | PieceKind::Bishop => 1,
        PieceKind::Rook => 2,
        PieceKind::Queen => 3,
        PieceKind::King => 4,
    }
}

/// Who holds a square after the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    White,
    Black,
    Contested,
}

impl Control {
    #[inline]
    fn favouring(color: Color) -> Self {
        match color {
            Color::White => Control::White,
            Color::Black => Control::Black,
        }
    }
}

/// Empty squares each side controls; a square in neither set is contested
/// or unattacked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentinelSquares {
    pub white: SquareSet,
    pub black: SquareSet,
}

impl SentinelSquares {
    #[inline]
    pub fn controlled_by(&self, color: Color) -> SquareSet {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn control_of(&self, square: Square) -> Control {
        if self.white.contains(square) {
            Control::White
        } else if self.black.contains(square) {
            Control::Black
        } else {
            Control::Contested
        }
    }
}

/// Attackers of one square, counted per weight class.
#[derive(Debug, Clone, Copy, Default)]
struct Attackers {
    counts: [u8; 5],
}

impl Attackers {
    #[inline]
    fn add(&mut self, kind: PieceKind) {
        self.counts[weight_class(kind)] += 1;
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Cheapest remaining attacker's weight.
    fn pop_cheapest(&mut self) -> Option<u32> {
        let class = self.counts.iter().position(|&c| c > 0)?;
        self.counts[class] -= 1;
        Some(WEIGHT_CLASSES[class])
    }
}

pub fn sentinel_squares(position: &Position) -> SentinelSquares {
    let mut maps = [[Attackers::default(); 128]; 2];
    for color in [Color::White, Color::Black] {
        for piece in position.pieces(color).iter() {
            trace_attacks(position, piece, &mut maps[color.index()]);
        }
    }

    let mut result = SentinelSquares::default();
    for square in board_squares().filter(|&sq| position.is_empty(sq)) {
        let white = maps[Color::White.index()][square as usize];
        let black = maps[Color::Black.index()][square as usize];
        match exchange(white, black, position.side_to_move()) {
            Control::White => result.white.insert(square),
            Control::Black => result.black.insert(square),
            Control::Contested => {}
        }
    }
    result
}

/// Record every empty square `piece` reaches, stopping sliders at the first
/// occupied square.
fn trace_attacks(position: &Position, piece: Piece, map: &mut [Attackers; 128]) {
    let from = piece.square();
    let (deltas, sliding): (&[i8], bool) = match piece.kind() {
        PieceKind::Pawn => (piece.color().pawn_attacks(), false),
        PieceKind::Knight => (&KNIGHT_MOVES, false),
        PieceKind::Bishop => (&DIAGONALS, true),
        PieceKind::Rook => (&HORIZONTALS, true),
        PieceKind::Queen => (&RADIALS, true),
        PieceKind::King => (&RADIALS, false),
    };

    for &delta in deltas {
        let mut cursor = from;
        while let Some(to) = offset(cursor, delta) {
            if !position.is_empty(to) {
                break;
            }
            map[to as usize].add(piece.kind());
            if !sliding {
                break;
            }
            cursor = to;
        }
    }
}

/// Alternate cheapest captures with `to_move` leading, tracking the material
/// each side commits.
fn exchange(white: Attackers, black: Attackers, to_move: Color) -> Control {
    match (white.is_empty(), black.is_empty()) {
        (true, true) => return Control::Contested,
        (true, false) => return Control::Black,
        (false, true) => return Control::White,
        (false, false) => {}
    }

    let mut sides = [white, black];
    let mut spent = [0u32; 2];
    let leader = to_move.index();
    let follower = to_move.opposite().index();

    while !sides[leader].is_empty() && !sides[follower].is_empty() {
        if let Some(weight) = sides[leader].pop_cheapest() {
            spent[leader] = spent[leader].saturating_add(weight);
        }
        if spent[leader] < spent[follower] {
            return Control::favouring(to_move);
        }
        if let Some(weight) = sides[follower].pop_cheapest() {
            spent[follower] = spent[follower].saturating_add(weight);
        }
        if spent[leader] > spent[follower] {
            return Control::favouring(to_move.opposite());
        }
    }

    let (white_spent, black_spent) = (spent[0], spent[1]);
    if white_spent < black_spent {
        Control::White
    } else if black_spent < white_spent {
        Control::Black
    } else if sides[0].is_empty() && !sides[1].is_empty() {
        Control::Black
    } else if sides[1].is_empty() && !sides[0].is_empty() {
        Control::White
    } else {
        Control::Contested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("valid square")
    }

    fn attackers(kinds: &[PieceKind]) -> Attackers {
        let mut list = Attackers::default();
        for &kind in kinds {
            list.add(kind);
        }
        list
    }

    #[test]
    fn lone_attacker_controls_the_square() {
        let w = attackers(&[PieceKind::Rook]);
        assert_eq!(exchange(w, Attackers::default(), Color::Black), Control::White);
        assert_eq!(
            exchange(Attackers::default(), Attackers::default(), Color::White),
            Control::Contested
        );
    }

    #[test]
    fn cheaper_defender_wins_the_exchange() {
        // White queen steps in, black pawn recaptures.
        let w = attackers(&[PieceKind::Queen]);
        let b = attackers(&[PieceKind::Pawn]);
        assert_eq!(exchange(w, b, Color::White), Control::Black);
    }

    #[test]
    fn extra_attacker_breaks_a_tie() {
        let w = attackers(&[PieceKind::Knight, PieceKind::Rook]);
        let b = attackers(&[PieceKind::Bishop]);
        assert_eq!(exchange(w, b, Color::White), Control::White);
    }

    #[test]
    fn kings_only_step_in_last() {
        let w = attackers(&[PieceKind::King]);
        let b = attackers(&[PieceKind::Pawn]);
        assert_eq!(exchange(w, b, Color::White), Control::Black);
    }

    #[test]
    fn pawns_hold_their_diagonals_in_the_opening() {
        let position = Position::new_game();
        let squares = sentinel_squares(&position);
        assert_eq!(squares.control_of(sq("d3")), Control::White);
        assert_eq!(squares.control_of(sq("f6")), Control::Black);
        assert_eq!(squares.control_of(sq("e4")), Control::Contested);
        assert!(squares.white.iter().all(|s| rank_of(s) < 4));
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let position = parse_fen("4k3/8/8/8/8/8/8/R1N1K3 w - - 0 1").expect("FEN should parse");
        let squares = sentinel_squares(&position);
        assert!(squares.white.contains(sq("b1")));
        assert!(squares.white.contains(sq("a8")));
        assert!(!squares.white.contains(sq("h1")));
    }
}
