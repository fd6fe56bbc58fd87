use crate::game_state::chess_types::*;

/// Whether `color`'s king is attacked by the other side.
#[inline]
pub fn king_in_check(position: &Position, color: Color) -> bool {
    is_square_attacked(position, position.king_square(color), color.opposite(), None)
}

/// Whether any `attacker` piece hits `target`.
///
/// `vacated` is treated as empty, which lets a king probe a destination while
/// still standing on its origin square.
pub fn is_square_attacked(
    position: &Position,
    target: Square,
    attacker: Color,
    vacated: Option<Square>,
) -> bool {
    for delta in RADIALS {
        if let Some(piece) = first_piece_along(position, target, delta, vacated) {
            if piece.color() == attacker && attacks_along(piece, target, delta) {
                return true;
            }
        }
    }

    KNIGHT_MOVES.iter().any(|&delta| {
        offset(target, delta)
            .and_then(|sq| position.piece_of(attacker, sq))
            .is_some_and(|p| p.kind() == PieceKind::Knight)
    })
}

/// Pieces giving check to the side to move. Only the first two are kept;
/// `count` reports the full number.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkers {
    pieces: [Option<Piece>; 2],
    count: usize,
}

impl Checkers {
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn first(&self) -> Option<Piece> {
        self.pieces[0]
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        self.pieces.iter().filter_map(|p| *p)
    }

    fn push(&mut self, piece: Piece) {
        if self.count < self.pieces.len() {
            self.pieces[self.count] = Some(piece);
        }
        self.count += 1;
    }
}

pub fn checkers(position: &Position, color: Color) -> Checkers {
    let king = position.king_square(color);
    let enemy = color.opposite();
    let mut found = Checkers::default();

    for delta in RADIALS {
        if let Some(piece) = first_piece_along(position, king, delta, None) {
            if piece.color() == enemy && attacks_along(piece, king, delta) {
                found.push(piece);
            }
        }
    }
    for delta in KNIGHT_MOVES {
        if let Some(piece) = offset(king, delta).and_then(|sq| position.piece_of(enemy, sq)) {
            if piece.kind() == PieceKind::Knight {
                found.push(piece);
            }
        }
    }
    found
}

/// A friendly piece that shields its king from a slider on the same ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub guardian: Square,
    pub assailant: Square,
    /// Radial delta pointing from the king towards the assailant.
    pub direction: i8,
}

/// Guardian/assailant pairs around one king, at most one per radial.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinMap {
    pins: [Option<Pin>; 8],
}

impl PinMap {
    #[inline]
    pub fn pin_of(&self, square: Square) -> Option<Pin> {
        self.pins.iter().flatten().find(|pin| pin.guardian == square).copied()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Pin> + '_ {
        self.pins.iter().flatten().copied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pins.iter().all(Option::is_none)
    }
}

impl Pin {
    /// Squares a pinned piece may still reach: the ray from the square next to
    /// the king up to and including the assailant.
    pub fn line(&self, king: Square) -> SquareSet {
        let mut line = SquareSet::EMPTY;
        let mut cursor = king;
        while let Some(next) = offset(cursor, self.direction) {
            line.insert(next);
            if next == self.assailant {
                break;
            }
            cursor = next;
        }
        line
    }
}

/// Scan the eight radials out of `color`'s king for pinned guardians.
pub fn guardian_assailant_map(position: &Position, color: Color) -> PinMap {
    let king = position.king_square(color);
    let mut map = PinMap::default();

    for (index, delta) in RADIALS.into_iter().enumerate() {
        let Some(guardian) = first_piece_along(position, king, delta, None) else {
            continue;
        };
        if guardian.color() != color {
            continue;
        }
        let Some(assailant) = first_piece_along(position, guardian.square(), delta, None) else {
            continue;
        };
        if assailant.color() != color && assailant.kind().slides_along(delta) {
            map.pins[index] = Some(Pin {
                guardian: guardian.square(),
                assailant: assailant.square(),
                direction: delta,
            });
        }
    }
    map
}

/// Squares strictly between `from` and `to` along their shared line.
pub fn squares_between(from: Square, to: Square) -> SquareSet {
    let mut between = SquareSet::EMPTY;
    let Some(delta) = direction_between(from, to) else {
        return between;
    };
    let mut cursor = from;
    while let Some(next) = offset(cursor, delta) {
        if next == to {
            break;
        }
        between.insert(next);
        cursor = next;
    }
    between
}

fn first_piece_along(
    position: &Position,
    from: Square,
    delta: i8,
    vacated: Option<Square>,
) -> Option<Piece> {
    let mut cursor = from;
    while let Some(next) = offset(cursor, delta) {
        if Some(next) != vacated {
            if let Some(piece) = position.piece_at(next) {
                return Some(piece);
            }
        }
        cursor = next;
    }
    None
}

/// Whether `piece`, found by stepping `delta` away from `target`, attacks it.
fn attacks_along(piece: Piece, target: Square, delta: i8) -> bool {
    let adjacent = offset(target, delta) == Some(piece.square());
    match piece.kind() {
        PieceKind::King => adjacent,
        // A pawn hits `target` when `target` is one of its own capture steps.
        PieceKind::Pawn => adjacent && piece.color().pawn_attacks().contains(&-delta),
        kind => kind.slides_along(delta),
    }
}
