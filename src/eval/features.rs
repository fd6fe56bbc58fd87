//! Positional feature extraction for evaluation.
//!
//! A `FeatureExtractor` borrows one position and computes feature groups on
//! demand. Each group is memoized, and groups that build on others (bishop
//! features on material, pawn-shape features on the pawn file table) compute
//! their prerequisites first. Nothing here scores a position; the values are
//! raw inputs for an evaluator.

use crate::eval::sentinels::{sentinel_squares, SentinelSquares};
use crate::game_state::chess_types::*;

/// Centipawn values used for the material totals.
pub const PAWN_VALUE: u32 = 100;
pub const KNIGHT_VALUE: u32 = 325;
pub const BISHOP_VALUE: u32 = 340;
pub const ROOK_VALUE: u32 = 500;
pub const QUEEN_VALUE: u32 = 975;

const MATERIAL_VALUES: [u32; 5] = [
    PAWN_VALUE,
    KNIGHT_VALUE,
    BISHOP_VALUE,
    ROOK_VALUE,
    QUEEN_VALUE,
];

/// Storm weight by `[rank][file]`, seen from the defending king's side:
/// rank 1 is the defender's second rank.
const PAWN_STORM: [[u8; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [6, 6, 6, 6, 6, 6, 6, 6],
    [8, 8, 8, 5, 4, 8, 8, 8],
    [2, 3, 3, 1, 1, 3, 3, 1],
    [0, 1, 1, 0, 0, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Material {
    /// `[color][kind]`, king included.
    pub counts: [[u8; 6]; 2],
    /// Centipawns per side, king excluded.
    pub totals: [u32; 2],
    /// White minus black for pawn, knight, bishop, rook and queen.
    pub difference: [i8; 5],
}

impl Material {
    #[inline]
    pub fn count(&self, color: Color, kind: PieceKind) -> u8 {
        self.counts[color.index()][kind.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BishopVsKnight {
    /// White has the bishop surplus while black has the knight surplus.
    WhiteBishops,
    /// Black has the bishop surplus while white has the knight surplus.
    BlackBishops,
    Neither,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BishopColors {
    Same,
    Opposite,
    /// Either side has other than exactly one bishop.
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BishopFeatures {
    pub versus_knight: BishopVsKnight,
    /// Per side: two or more bishops.
    pub pair: [bool; 2],
    pub colors: BishopColors,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PawnStructure {
    /// `[color][file]` pawn squares; an empty set is an empty file.
    pub files: [[SquareSet; 8]; 2],
    pub islands: [u8; 2],
    /// `[color][file]` pawn count where two or more, else 0.
    pub doubled: [[u8; 8]; 2],
    pub isolated: [SquareSet; 2],
    pub backward: [SquareSet; 2],
    pub passed: [SquareSet; 2],
}

impl PawnStructure {
    #[inline]
    fn has_pawns_on(&self, color: Color, file: i8) -> bool {
        (0..8).contains(&file) && !self.files[color.index()][file as usize].is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KingSafety {
    /// Squared distance of each side's pieces to the enemy king.
    pub tropism: [u32; 2],
    /// Pawn cover in front of each side's own king.
    pub shield: [u32; 2],
    /// Pawns each side has advanced against the enemy king's flank.
    pub storm: [u32; 2],
}

/// Every feature group at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSet {
    pub material: Material,
    pub bishops: BishopFeatures,
    pub pawns: PawnStructure,
    pub king_safety: KingSafety,
    pub space: [u32; 2],
    pub sentinels: SentinelSquares,
}

pub struct FeatureExtractor<'a> {
    position: &'a Position,
    /// Per side pawn squares, iterated in ascending square order.
    pawns: [SquareSet; 2],

    material: Option<Material>,
    bishops: Option<BishopFeatures>,
    pawn_structure: Option<PawnStructure>,
    king_safety: Option<KingSafety>,
    space: Option<[u32; 2]>,
    sentinels: Option<SentinelSquares>,
}

impl<'a> FeatureExtractor<'a> {
    pub fn new(position: &'a Position) -> Self {
        let mut pawns = [SquareSet::EMPTY; 2];
        for color in [Color::White, Color::Black] {
            for piece in position.pieces(color).iter() {
                if piece.kind() == PieceKind::Pawn {
                    pawns[color.index()].insert(piece.square());
                }
            }
        }
        Self {
            position,
            pawns,
            material: None,
            bishops: None,
            pawn_structure: None,
            king_safety: None,
            space: None,
            sentinels: None,
        }
    }

    #[inline]
    pub fn position(&self) -> &'a Position {
        self.position
    }

    pub fn extract_all(&mut self) -> FeatureSet {
        FeatureSet {
            material: self.material(),
            bishops: self.bishops(),
            pawns: self.pawn_structure(),
            king_safety: self.king_safety(),
            space: self.space(),
            sentinels: self.sentinel_squares(),
        }
    }

    pub fn material(&mut self) -> Material {
        if let Some(material) = self.material {
            return material;
        }
        let mut material = Material::default();
        for color in [Color::White, Color::Black] {
            for piece in self.position.pieces(color).iter() {
                material.counts[color.index()][piece.kind().index()] += 1;
            }
            material.totals[color.index()] = MATERIAL_VALUES
                .iter()
                .enumerate()
                .map(|(kind, value)| value * material.counts[color.index()][kind] as u32)
                .sum();
        }
        for kind in 0..5 {
            material.difference[kind] = material.counts[0][kind] as i8 - material.counts[1][kind] as i8;
        }
        self.material = Some(material);
        material
    }

    pub fn bishops(&mut self) -> BishopFeatures {
        if let Some(bishops) = self.bishops {
            return bishops;
        }
        let material = self.material();
        let bishop_diff = material.difference[PieceKind::Bishop.index()];
        let knight_diff = material.difference[PieceKind::Knight.index()];

        let versus_knight = if bishop_diff > 0 && knight_diff < 0 {
            BishopVsKnight::WhiteBishops
        } else if bishop_diff < 0 && knight_diff > 0 {
            BishopVsKnight::BlackBishops
        } else {
            BishopVsKnight::Neither
        };

        let pair = [
            material.count(Color::White, PieceKind::Bishop) >= 2,
            material.count(Color::Black, PieceKind::Bishop) >= 2,
        ];

        let colors = match (self.lone_bishop(Color::White), self.lone_bishop(Color::Black)) {
            (Some(white), Some(black)) if is_light_square(white) == is_light_square(black) => {
                BishopColors::Same
            }
            (Some(_), Some(_)) => BishopColors::Opposite,
            _ => BishopColors::NotApplicable,
        };

        let bishops = BishopFeatures {
            versus_knight,
            pair,
            colors,
        };
        self.bishops = Some(bishops);
        bishops
    }

    fn lone_bishop(&self, color: Color) -> Option<Square> {
        let mut bishops = self
            .position
            .pieces(color)
            .iter()
            .filter(|p| p.kind() == PieceKind::Bishop);
        match (bishops.next(), bishops.next()) {
            (Some(bishop), None) => Some(bishop.square()),
            _ => None,
        }
    }

    pub fn pawn_structure(&mut self) -> PawnStructure {
        if let Some(structure) = self.pawn_structure {
            return structure;
        }
        let mut structure = PawnStructure::default();
        for color in [Color::White, Color::Black] {
            for square in self.pawns[color.index()].iter() {
                structure.files[color.index()][file_of(square) as usize].insert(square);
            }
        }

        for color in [Color::White, Color::Black] {
            let side = color.index();
            let mut in_island = false;
            for file in 0..8 {
                let occupied = !structure.files[side][file].is_empty();
                if occupied && !in_island {
                    structure.islands[side] += 1;
                }
                in_island = occupied;

                let count = structure.files[side][file].len() as u8;
                if count >= 2 {
                    structure.doubled[side][file] = count;
                }
            }

            for square in self.pawns[side].iter() {
                let file = file_of(square) as i8;
                let rank = rank_of(square);

                if !structure.has_pawns_on(color, file - 1) && !structure.has_pawns_on(color, file + 1) {
                    structure.isolated[side].insert(square);
                } else if self.neighbours_all_ahead(color, file, rank, &structure) {
                    structure.backward[side].insert(square);
                }

                if self.is_passed(color, file, rank) {
                    structure.passed[side].insert(square);
                }
            }
        }

        self.pawn_structure = Some(structure);
        structure
    }

    /// Every friendly pawn on the adjacent files is strictly more advanced.
    fn neighbours_all_ahead(&self, color: Color, file: i8, rank: u8, structure: &PawnStructure) -> bool {
        [file - 1, file + 1]
            .into_iter()
            .filter(|f| (0..8).contains(f))
            .flat_map(|f| structure.files[color.index()][f as usize].iter())
            .all(|neighbour| is_ahead(color, rank_of(neighbour), rank))
    }

    /// No enemy pawn ahead on the same or an adjacent file.
    fn is_passed(&self, color: Color, file: i8, rank: u8) -> bool {
        !self.pawns[color.opposite().index()].iter().any(|enemy| {
            (file_of(enemy) as i8 - file).abs() <= 1 && is_ahead(color, rank_of(enemy), rank)
        })
    }

    pub fn king_safety(&mut self) -> KingSafety {
        if let Some(safety) = self.king_safety {
            return safety;
        }
        let mut safety = KingSafety::default();
        for color in [Color::White, Color::Black] {
            let side = color.index();
            safety.tropism[side] = self.tropism(color);
            safety.shield[side] = self.shield(color);
            safety.storm[side] = self.storm(color);
        }
        self.king_safety = Some(safety);
        safety
    }

    fn tropism(&self, color: Color) -> u32 {
        let enemy_king = self.position.king_square(color.opposite());
        self.position
            .pieces(color)
            .iter()
            .filter(|p| p.kind() != PieceKind::Pawn)
            .map(|p| {
                let dr = rank_of(p.square()).abs_diff(rank_of(enemy_king)) as u32;
                let df = file_of(p.square()).abs_diff(file_of(enemy_king)) as u32;
                dr * dr + df * df
            })
            .sum()
    }

    fn shield(&self, color: Color) -> u32 {
        let king = self.position.king_square(color);
        let home = color.home_rank();
        if rank_of(king).abs_diff(home) > 1 {
            return 0;
        }

        let forward = color.forward();
        let pawns = self.pawns[color.index()];
        let pawn_on = |delta: i16| -> bool {
            let target = king as i16 + delta;
            is_on_board(target) && pawns.contains(target as Square)
        };

        let forward16 = forward as i16;
        let mut cover = 0;
        for side_step in [-1i16, 0, 1] {
            if pawn_on(forward16 + side_step) {
                cover += 2;
            }
        }
        for jump in [2 * forward16 - 1, 2 * forward16 + 1, forward16 - 2, forward16 + 2] {
            if pawn_on(jump) {
                cover += 1;
            }
        }
        if pawn_on(2 * forward16) {
            cover += 1;
        }
        cover
    }

    /// Storm by `color`'s pawns against the enemy king's half of the board.
    fn storm(&self, color: Color) -> u32 {
        let enemy_king = self.position.king_square(color.opposite());
        let queenside = file_of(enemy_king) < 4;
        self.pawns[color.index()]
            .iter()
            .filter(|&pawn| (file_of(pawn) < 4) == queenside)
            .map(|pawn| {
                let rank_from_defender = rank_of(pawn).abs_diff(color.opposite().home_rank());
                PAWN_STORM[rank_from_defender as usize][file_of(pawn) as usize] as u32
            })
            .sum()
    }

    /// Per side, total pawn advancement in ranks from the own back rank.
    pub fn space(&mut self) -> [u32; 2] {
        if let Some(space) = self.space {
            return space;
        }
        let mut space = [0u32; 2];
        for color in [Color::White, Color::Black] {
            space[color.index()] = self.pawns[color.index()]
                .iter()
                .map(|pawn| rank_of(pawn).abs_diff(color.home_rank()) as u32)
                .sum();
        }
        self.space = Some(space);
        space
    }

    pub fn sentinel_squares(&mut self) -> SentinelSquares {
        if let Some(sentinels) = self.sentinels {
            return sentinels;
        }
        let sentinels = sentinel_squares(self.position);
        self.sentinels = Some(sentinels);
        sentinels
    }
}

/// Whether `rank` is further up the board than `than` from `color`'s view.
#[inline]
fn is_ahead(color: Color, rank: u8, than: u8) -> bool {
    match color {
        Color::White => rank > than,
        Color::Black => rank < than,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("valid square")
    }

    fn extractor_for(fen: &str) -> Position {
        parse_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn opening_material_is_balanced() {
        let position = Position::new_game();
        let mut features = FeatureExtractor::new(&position);
        let material = features.material();
        assert_eq!(material.totals, [4105, 4105]);
        assert_eq!(material.difference, [0; 5]);
        assert_eq!(material.count(Color::Black, PieceKind::Knight), 2);
        assert_eq!(features.bishops().pair, [true, true]);
        assert_eq!(features.bishops().colors, BishopColors::NotApplicable);
    }

    #[test]
    fn bishop_against_knight_is_detected() {
        let position = extractor_for("4k3/8/3n4/8/8/3B4/8/4K3 w - - 0 1");
        let mut features = FeatureExtractor::new(&position);
        assert_eq!(features.bishops().versus_knight, BishopVsKnight::WhiteBishops);
        assert_eq!(features.material().difference[PieceKind::Knight.index()], -1);
    }

    #[test]
    fn bishop_colours_compare_square_parity() {
        // c1 and f8 are both dark.
        let same = extractor_for("5bk1/8/8/8/8/8/8/2B1K3 w - - 0 1");
        assert_eq!(FeatureExtractor::new(&same).bishops().colors, BishopColors::Same);

        let opposite = extractor_for("4k1b1/8/8/8/8/8/8/2B1K3 w - - 0 1");
        assert_eq!(
            FeatureExtractor::new(&opposite).bishops().colors,
            BishopColors::Opposite
        );
    }

    #[test]
    fn pawn_shape_features() {
        // White: a2 b3 b4 e4 g2 h3. Black: a7 d5 h7.
        let position = extractor_for("4k3/p6p/8/3p4/1P2P3/1P5P/P5P1/4K3 w - - 0 1");
        let mut features = FeatureExtractor::new(&position);
        let pawns = features.pawn_structure();
        let white = Color::White.index();
        let black = Color::Black.index();

        assert_eq!(pawns.islands, [3, 3]);
        assert_eq!(pawns.doubled[white][1], 2);
        assert_eq!(pawns.doubled[white][0], 0);
        assert!(pawns.files[white][2].is_empty());
        assert_eq!(pawns.files[white][1].len(), 2);

        assert!(pawns.isolated[white].contains(sq("e4")));
        assert!(pawns.isolated[black].contains(sq("d5")));
        assert!(!pawns.isolated[white].contains(sq("a2")));

        // a2 sees both b-pawns ahead of it; g2 sees h3 ahead.
        assert!(pawns.backward[white].contains(sq("a2")));
        assert!(pawns.backward[white].contains(sq("g2")));
        assert!(!pawns.backward[white].contains(sq("h3")));

        // Every pawn here has an enemy pawn ahead on a neighbouring file.
        assert!(pawns.passed[white].is_empty());
        assert!(pawns.passed[black].is_empty());
    }

    #[test]
    fn passed_pawns_ignore_distant_files() {
        let position = extractor_for("4k3/p7/8/2P5/8/8/6p1/4K3 w - - 0 1");
        let pawns = FeatureExtractor::new(&position).pawn_structure();
        assert_eq!(pawns.passed[Color::White.index()].iter().collect::<Vec<_>>(), vec![sq("c5")]);
        assert_eq!(pawns.passed[Color::Black.index()].len(), 2);
        assert!(pawns.passed[Color::Black.index()].contains(sq("g2")));
    }

    #[test]
    fn castled_king_shield_and_space() {
        let position = extractor_for("6k1/5ppp/8/8/8/6P1/5P1P/6K1 w - - 0 1");
        let mut features = FeatureExtractor::new(&position);
        let safety = features.king_safety();
        // White: f2 h2 in front (2 each), g3 two squares ahead (1).
        assert_eq!(safety.shield[Color::White.index()], 5);
        // Black: f7 g7 h7 in front.
        assert_eq!(safety.shield[Color::Black.index()], 6);
        assert_eq!(features.space(), [1 + 2 + 1, 1 + 1 + 1]);
    }

    #[test]
    fn tropism_uses_squared_distance() {
        let position = extractor_for("7k/8/8/8/8/8/8/K6R b - - 0 1");
        let mut features = FeatureExtractor::new(&position);
        let safety = features.king_safety();
        // Rook h1 to h8 is 49, king a1 to h8 is 49 + 49.
        assert_eq!(safety.tropism[Color::White.index()], 49 + 98);
        assert_eq!(safety.tropism[Color::Black.index()], 98);
    }

    #[test]
    fn pawn_storm_counts_flank_pawns() {
        let position = extractor_for("4k3/8/8/8/8/6p1/8/6K1 w - - 0 1");
        let mut features = FeatureExtractor::new(&position);
        // Black g3 pawn is on the defender's third rank, file g.
        assert_eq!(features.king_safety().storm[Color::Black.index()], 8);
        assert_eq!(features.king_safety().storm[Color::White.index()], 0);
    }

    #[test]
    fn groups_are_memoized() {
        let position = Position::new_game();
        let mut features = FeatureExtractor::new(&position);
        let first = features.extract_all();
        let second = features.extract_all();
        assert_eq!(first, second);
        assert!(features.material.is_some());
        assert!(features.sentinels.is_some());
    }
}
