//! Immutable board snapshot.
//!
//! `Position` is the central model of the crate. It owns one 16-slot
//! [`PieceList`] per side, the castling/en-passant/clock flags and the Zobrist
//! hash. It is never mutated after construction: `make_move` builds a new
//! value. The legal move list and the check flag are derived lazily and
//! memoized once per instance, so a `Position` can be shared read-only across
//! threads.

use std::fmt;
use std::sync::OnceLock;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{GameResult, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::game_state::piece_list::{PieceList, MAX_PIECES_PER_SIDE};
use crate::move_generation::game_result::game_result;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::Move;
use crate::search::zobrist::compute_hash_from;
use crate::utils::fen_parser::parse_fen;

/// Raw construction input, as produced by FEN parsing or a board editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionParts {
    pub white: Vec<Piece>,
    pub black: Vec<Piece>,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub fifty_move_clock: u8,
    pub half_moves: u16,
    pub side_to_move: Option<Color>,
}

#[derive(Debug, Clone)]
pub struct Position {
    // [color] -> 16 slots, king in slot 0.
    pieces: [PieceList; 2],

    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
    fifty_move_clock: u8,
    half_moves: u16,
    side_to_move: Color,

    hash: u64,
    prior_move: Option<Move>,

    // Memoized on first access.
    legal_moves: OnceLock<Vec<Move>>,
    in_check: OnceLock<bool>,
}

impl Position {
    /// Standard starting position.
    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    /// Validates `parts` and builds the position, computing the hash from
    /// scratch.
    pub fn from_parts(parts: PositionParts) -> ChessResult<Self> {
        let side_to_move = parts.side_to_move.unwrap_or(Color::White);
        if let Err(err) = validate_parts(&parts, side_to_move) {
            log::debug!("rejected position: {err}");
            return Err(err);
        }

        let pieces = [
            PieceList::from_pieces(&parts.white),
            PieceList::from_pieces(&parts.black),
        ];
        let castling_rights = parts.castling_rights & CASTLE_ALL;
        let hash = compute_hash_from(
            &pieces,
            castling_rights,
            parts.en_passant_square,
            side_to_move,
        );

        let position = Self {
            pieces,
            castling_rights,
            en_passant_square: parts.en_passant_square,
            fifty_move_clock: parts.fifty_move_clock,
            half_moves: parts.half_moves,
            side_to_move,
            hash,
            prior_move: None,
            legal_moves: OnceLock::new(),
            in_check: OnceLock::new(),
        };

        // A king left en prise would be captured by the first generated move.
        let waiting = side_to_move.opposite();
        if king_in_check(&position, waiting) {
            let err = ChessError::OpponentInCheck(waiting);
            log::debug!("rejected position: {err}");
            return Err(err);
        }
        Ok(position)
    }

    /// Successor built by move application with an incrementally updated hash.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_transition(
        pieces: [PieceList; 2],
        castling_rights: CastlingRights,
        en_passant_square: Option<Square>,
        fifty_move_clock: u8,
        half_moves: u16,
        side_to_move: Color,
        hash: u64,
        prior_move: Move,
    ) -> Self {
        Self {
            pieces,
            castling_rights,
            en_passant_square,
            fifty_move_clock,
            half_moves,
            side_to_move,
            hash,
            prior_move: Some(prior_move),
            legal_moves: OnceLock::new(),
            in_check: OnceLock::new(),
        }
    }

    // --- Flags and cached values ---

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn is_white_to_move(&self) -> bool {
        self.side_to_move == Color::White
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    /// Half-moves since the last pawn move or capture.
    #[inline]
    pub fn fifty_move_clock(&self) -> u8 {
        self.fifty_move_clock
    }

    /// Half-moves played since construction from parts.
    #[inline]
    pub fn half_moves(&self) -> u16 {
        self.half_moves
    }

    #[inline]
    pub fn prior_move(&self) -> Option<Move> {
        self.prior_move
    }

    // --- Pieces ---

    #[inline]
    pub fn piece_lists(&self) -> &[PieceList; 2] {
        &self.pieces
    }

    #[inline]
    pub fn pieces(&self, color: Color) -> &PieceList {
        &self.pieces[color.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces[color.index()].king().square()
    }

    /// Occupant of `square`, searching white then black.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces[0]
            .piece_on(square)
            .or_else(|| self.pieces[1].piece_on(square))
    }

    /// Occupant of `square` if it belongs to `color`.
    #[inline]
    pub fn piece_of(&self, color: Color, square: Square) -> Option<Piece> {
        self.pieces[color.index()].piece_on(square)
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    // --- Rules interface ---

    /// Whether the side to move is in check. Memoized.
    pub fn is_in_check(&self) -> bool {
        *self
            .in_check
            .get_or_init(|| king_in_check(self, self.side_to_move))
    }

    /// Every legal move, best guess first. Memoized.
    pub fn generate_all_moves(&self) -> &[Move] {
        self.generate_all_moves_with_killers(&[])
    }

    /// Same as [`generate_all_moves`](Self::generate_all_moves), ranking
    /// `killers` first. Only the first call on an instance decides the order.
    pub fn generate_all_moves_with_killers(&self, killers: &[Move]) -> &[Move] {
        self.legal_moves
            .get_or_init(|| generate_legal_moves(self, killers))
    }

    /// Whether `mv` equality-matches a generated legal move.
    pub fn is_legal(&self, mv: Move) -> bool {
        self.generate_all_moves().contains(&mv)
    }

    /// Successor position after `mv`.
    ///
    /// `mv` must come from [`generate_all_moves`](Self::generate_all_moves);
    /// use [`try_make_move`](Self::try_make_move) for unchecked input.
    ///
    /// # Panics
    ///
    /// Panics when no piece of the side to move stands on `mv.start`.
    #[inline]
    pub fn make_move(&self, mv: Move) -> Position {
        apply_move(self, mv)
    }

    /// Checked move application for untrusted input.
    pub fn try_make_move(&self, mv: Move) -> ChessResult<Position> {
        if !self.is_legal(mv) {
            log::debug!("rejected illegal move {mv} in position {:#018x}", self.hash);
            return Err(ChessError::IllegalMove(mv));
        }
        Ok(apply_move(self, mv))
    }

    pub fn get_result(&self) -> GameResult {
        game_result(self)
    }
}

impl PartialEq for Position {
    /// Board and flags only; memoized caches and the prior move are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.castling_rights == other.castling_rights
            && self.en_passant_square == other.en_passant_square
            && self.fifty_move_clock == other.fifty_move_clock
            && self.side_to_move == other.side_to_move
            && self.hash == other.hash
    }
}

impl Eq for Position {}

/// Board diagram, rank 8 first, uppercase for white.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let symbol = match self.piece_at(square_at(rank, file)) {
                    Some(piece) if piece.color() == Color::White => {
                        piece.kind().symbol().to_ascii_uppercase()
                    }
                    Some(piece) => piece.kind().symbol(),
                    None => '.',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

fn validate_parts(parts: &PositionParts, side_to_move: Color) -> ChessResult<()> {
    let mut occupied = [false; 128];
    for (color, pieces) in [(Color::White, &parts.white), (Color::Black, &parts.black)] {
        if pieces.len() > MAX_PIECES_PER_SIDE {
            return Err(ChessError::TooManyPieces {
                color,
                count: pieces.len(),
            });
        }

        let kings = pieces.iter().filter(|p| p.kind() == PieceKind::King).count();
        match kings {
            0 => return Err(ChessError::MissingKing(color)),
            1 => {}
            _ => return Err(ChessError::DuplicateKing(color)),
        }

        for piece in pieces.iter() {
            let square = piece.square();
            if !is_on_board(square as i16) {
                return Err(ChessError::SquareOffBoard(square));
            }
            if occupied[square as usize] {
                return Err(ChessError::SquareOccupiedTwice(square));
            }
            occupied[square as usize] = true;
            if piece.kind() == PieceKind::Pawn && matches!(rank_of(square), 0 | 7) {
                return Err(ChessError::PawnOnBackRank(square));
            }
        }
    }

    if let Some(square) = parts.en_passant_square {
        if !is_on_board(square as i16) {
            return Err(ChessError::SquareOffBoard(square));
        }
        let expected_rank = match side_to_move {
            Color::White => 5,
            Color::Black => 2,
        };
        if rank_of(square) != expected_rank {
            return Err(ChessError::InvalidEnPassantSquare(square));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::search::zobrist::compute_hash;

    fn piece(square: Square, kind: PieceKind, color: Color) -> Piece {
        Piece::new(square, kind, color)
    }

    fn bare_kings() -> PositionParts {
        PositionParts {
            white: vec![piece(0x04, PieceKind::King, Color::White)],
            black: vec![piece(0x74, PieceKind::King, Color::Black)],
            ..PositionParts::default()
        }
    }

    #[test]
    fn new_game_has_kings_in_slot_zero() {
        let game = Position::new_game();
        assert_eq!(game.pieces(Color::White).king().square(), 0x04);
        assert_eq!(game.pieces(Color::Black).king().square(), 0x74);
        assert_eq!(game.pieces(Color::White).len(), 16);
        assert_eq!(game.castling_rights(), CASTLE_ALL);
        assert_eq!(game.hash(), compute_hash(&game));
        assert!(!game.is_in_check());
    }

    #[test]
    fn from_parts_rejects_missing_king() {
        let mut parts = bare_kings();
        parts.black.clear();
        assert_eq!(
            Position::from_parts(parts),
            Err(ChessError::MissingKing(Color::Black))
        );
    }

    #[test]
    fn from_parts_rejects_shared_square() {
        let mut parts = bare_kings();
        parts.white.push(piece(0x74, PieceKind::Rook, Color::White));
        assert_eq!(
            Position::from_parts(parts),
            Err(ChessError::SquareOccupiedTwice(0x74))
        );
    }

    #[test]
    fn from_parts_rejects_back_rank_pawn_and_bad_en_passant() {
        let mut parts = bare_kings();
        parts.white.push(piece(0x70, PieceKind::Pawn, Color::White));
        assert_eq!(
            Position::from_parts(parts),
            Err(ChessError::PawnOnBackRank(0x70))
        );

        let mut parts = bare_kings();
        parts.en_passant_square = Some(0x23);
        assert_eq!(
            Position::from_parts(parts),
            Err(ChessError::InvalidEnPassantSquare(0x23))
        );
    }

    #[test]
    fn from_parts_rejects_off_board_square() {
        let mut parts = bare_kings();
        parts.white.push(piece(0x08, PieceKind::Knight, Color::White));
        assert_eq!(
            Position::from_parts(parts),
            Err(ChessError::SquareOffBoard(0x08))
        );
    }

    #[test]
    fn from_parts_rejects_king_capturable_by_mover() {
        let mut parts = bare_kings();
        parts.black.push(piece(0x07, PieceKind::Rook, Color::Black));
        parts.side_to_move = Some(Color::Black);
        assert_eq!(
            Position::from_parts(parts.clone()),
            Err(ChessError::OpponentInCheck(Color::White))
        );

        // The same board is fine with White to move out of check.
        parts.side_to_move = Some(Color::White);
        let position = Position::from_parts(parts).expect("mover may be in check");
        assert!(position.is_in_check());
        assert!(position
            .generate_all_moves()
            .iter()
            .all(|mv| position.make_move(*mv).pieces(Color::White).count(PieceKind::King) == 1));
    }

    #[test]
    fn from_fen_rejects_waiting_side_in_check() {
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K2r b - - 0 1"),
            Err(ChessError::OpponentInCheck(Color::White))
        );
    }

    #[test]
    fn make_move_leaves_parent_untouched() {
        let game = Position::new_game();
        let before = game.clone();
        let mv = game.generate_all_moves()[0];
        let next = game.make_move(mv);
        assert_eq!(game, before);
        assert_ne!(next, game);
        assert_eq!(next.prior_move(), Some(mv));
        assert_eq!(next.side_to_move(), Color::Black);
    }

    #[test]
    fn try_make_move_rejects_non_members() {
        let game = Position::new_game();
        let bogus = Move::quiet(0x14, 0x44);
        assert_eq!(game.try_make_move(bogus), Err(ChessError::IllegalMove(bogus)));
    }

    #[test]
    fn display_draws_the_board() {
        let text = Position::new_game().to_string();
        let first = text.lines().next().expect("diagram has lines");
        assert_eq!(first, "8 rnbqkbnr");
    }
}
