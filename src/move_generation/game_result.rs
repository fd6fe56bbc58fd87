use crate::game_state::chess_rules::{DrawReason, GameResult, FIFTY_MOVE_LIMIT};
use crate::game_state::chess_types::*;
use crate::game_state::piece_list::PieceList;

/// Decide whether the game is over in `position`.
pub fn game_result(position: &Position) -> GameResult {
    if position.generate_all_moves().is_empty() {
        return if position.is_in_check() {
            GameResult::win_for(position.side_to_move().opposite())
        } else {
            GameResult::Draw(DrawReason::Stalemate)
        };
    }
    if position.fifty_move_clock() >= FIFTY_MOVE_LIMIT {
        return GameResult::Draw(DrawReason::FiftyMoveRule);
    }
    if is_insufficient_material(position) {
        return GameResult::Draw(DrawReason::InsufficientMaterial);
    }
    GameResult::Ongoing
}

/// K v K, K+N v K, K+N+N v K, and K+B v K+B with same-coloured bishops.
/// Anything else is left to play on.
pub fn is_insufficient_material(position: &Position) -> bool {
    let white = position.pieces(Color::White);
    let black = position.pieces(Color::Black);
    match (white.len(), black.len()) {
        (1, 1) => true,
        (1, _) => only_knights(black),
        (_, 1) => only_knights(white),
        (2, 2) => match (lone_bishop(white), lone_bishop(black)) {
            (Some(w), Some(b)) => is_light_square(w) == is_light_square(b),
            _ => false,
        },
        _ => false,
    }
}

/// One or two knights beside the king.
fn only_knights(list: &PieceList) -> bool {
    matches!(list.len(), 2 | 3)
        && list
            .iter()
            .filter(|p| p.kind() != PieceKind::King)
            .all(|p| p.kind() == PieceKind::Knight)
}

fn lone_bishop(list: &PieceList) -> Option<Square> {
    list.iter()
        .find(|p| p.kind() == PieceKind::Bishop)
        .map(Piece::square)
}
