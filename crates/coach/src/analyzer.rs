/// Positional metrics for a single position, pure functions only.
/// Every field is recomputed from the position on each call.

use chess_core::board_utils::{center_squares, offset_square, piece_value};
use chess_core::{ChessMove, Color, Piece, Position, Square};
use serde::Serialize;

/// Legal-move multipliers for piece coordination
const QUEEN_COORDINATION: f64 = 0.8;
const ROOK_COORDINATION: f64 = 0.7;
const BISHOP_COORDINATION: f64 = 0.6;
const KNIGHT_COORDINATION: f64 = 0.5;
const PAWN_COORDINATION: f64 = 0.3;
const KING_COORDINATION: f64 = 0.4;

/// Center control weights
const CENTER_OCCUPANT: f64 = 1.0;
const CENTER_ATTACK: f64 = 0.5;

/// A piece with more destinations than this, making a capture, counts as a fork
const FORK_MIN_DESTINATIONS: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaterialCount {
    pub white: i32,
    pub black: i32,
    /// white - black
    pub diff: i32,
}

impl MaterialCount {
    pub fn total(&self) -> i32 {
        self.white + self.black
    }

    /// Material lead of `color` (negative when behind)
    pub fn lead_for(&self, color: Color) -> i32 {
        match color {
            Color::White => self.diff,
            Color::Black => -self.diff,
        }
    }
}

/// Friendly pawns directly or diagonally in front of each king
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KingSafety {
    pub white: u32,
    pub black: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PawnCounts {
    pub total: u32,
    pub doubled: u32,
    pub isolated: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PawnStructure {
    pub white: PawnCounts,
    pub black: PawnCounts,
}

impl PawnStructure {
    pub fn for_side(&self, color: Color) -> PawnCounts {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CenterControl {
    pub white: f64,
    pub black: f64,
}

impl CenterControl {
    pub fn for_side(&self, color: Color) -> f64 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PieceCoordination {
    pub white: f64,
    pub black: f64,
}

/// Tactical motif counts. Pins and skewers are not detected yet and stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TacticalPatterns {
    pub forks: u32,
    pub pins: u32,
    pub skewers: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub material: MaterialCount,
    /// Legal-move count for the side to move
    pub piece_activity: usize,
    pub king_safety: KingSafety,
    pub pawn_structure: PawnStructure,
    pub center_control: CenterControl,
    pub piece_coordination: PieceCoordination,
    pub tactical_patterns: TacticalPatterns,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_draw: bool,
}

/// Compute every metric for `position`
pub fn analyze(position: &Position) -> Analysis {
    let white_moves = position.moves_for(Color::White, None);
    let black_moves = position.moves_for(Color::Black, None);
    let legal = position.legal_moves(None);

    Analysis {
        material: material(position),
        piece_activity: legal.len(),
        king_safety: KingSafety {
            white: king_shield(position, Color::White),
            black: king_shield(position, Color::Black),
        },
        pawn_structure: PawnStructure {
            white: pawn_counts(position, Color::White),
            black: pawn_counts(position, Color::Black),
        },
        center_control: CenterControl {
            white: center_control(position, Color::White, &white_moves),
            black: center_control(position, Color::Black, &black_moves),
        },
        piece_coordination: PieceCoordination {
            white: coordination(position, Color::White, &white_moves),
            black: coordination(position, Color::Black, &black_moves),
        },
        tactical_patterns: tactical_patterns(position, &legal),
        is_check: position.is_check(),
        is_checkmate: position.is_checkmate(),
        is_draw: position.is_draw(),
    }
}

pub fn material(position: &Position) -> MaterialCount {
    let mut white = 0;
    let mut black = 0;
    for p in position.pieces() {
        match p.color {
            Color::White => white += piece_value(p.piece),
            Color::Black => black += piece_value(p.piece),
        }
    }
    MaterialCount {
        white,
        black,
        diff: white - black,
    }
}

/// Friendly pawns on the three squares in front of the king
fn king_shield(position: &Position, color: Color) -> u32 {
    let king = position
        .pieces()
        .into_iter()
        .find(|p| p.piece == Piece::King && p.color == color);
    let king_sq = match king {
        Some(k) => k.square,
        None => return 0,
    };

    let forward = match color {
        Color::White => 1,
        Color::Black => -1,
    };

    (-1..=1)
        .filter_map(|df| offset_square(king_sq, df, forward))
        .filter(|&sq| {
            position
                .piece_at(sq)
                .is_some_and(|p| p.piece == Piece::Pawn && p.color == color)
        })
        .count() as u32
}

fn pawn_counts(position: &Position, color: Color) -> PawnCounts {
    let mut per_file = [0u32; 8];
    for p in position.pieces() {
        if p.piece == Piece::Pawn && p.color == color {
            per_file[p.square.get_file().to_index()] += 1;
        }
    }

    let total = per_file.iter().sum();
    let doubled = per_file.iter().map(|&n| n.saturating_sub(1)).sum();

    let mut isolated = 0;
    for file in 0..8 {
        if per_file[file] == 0 {
            continue;
        }
        let left = if file > 0 { per_file[file - 1] } else { 0 };
        let right = if file < 7 { per_file[file + 1] } else { 0 };
        if left == 0 && right == 0 {
            isolated += per_file[file];
        }
    }

    PawnCounts {
        total,
        doubled,
        isolated,
    }
}

/// Occupancy plus half a point per move landing on each center square
fn center_control(position: &Position, color: Color, moves: &[ChessMove]) -> f64 {
    let mut score = 0.0;
    for sq in center_squares() {
        if position.piece_at(sq).is_some_and(|p| p.color == color) {
            score += CENTER_OCCUPANT;
        }
        let attacks = moves.iter().filter(|m| m.get_dest() == sq).count();
        score += CENTER_ATTACK * attacks as f64;
    }
    score
}

fn coordination_weight(piece: Piece) -> f64 {
    match piece {
        Piece::Queen => QUEEN_COORDINATION,
        Piece::Rook => ROOK_COORDINATION,
        Piece::Bishop => BISHOP_COORDINATION,
        Piece::Knight => KNIGHT_COORDINATION,
        Piece::Pawn => PAWN_COORDINATION,
        Piece::King => KING_COORDINATION,
    }
}

fn moves_from(moves: &[ChessMove], square: Square) -> usize {
    moves.iter().filter(|m| m.get_source() == square).count()
}

/// Mobility of each piece, weighted by its type
fn coordination(position: &Position, color: Color, moves: &[ChessMove]) -> f64 {
    position
        .pieces()
        .into_iter()
        .filter(|p| p.color == color)
        .map(|p| coordination_weight(p.piece) * moves_from(moves, p.square) as f64)
        .sum()
}

/// A capture by a piece that has more than two destinations counts as a
/// fork. The extra destinations are not checked for targets.
fn tactical_patterns(position: &Position, legal: &[ChessMove]) -> TacticalPatterns {
    let forks = legal
        .iter()
        .filter(|&&m| position.is_capture(m))
        .filter(|m| moves_from(legal, m.get_source()) > FORK_MIN_DESTINATIONS)
        .count() as u32;

    TacticalPatterns {
        forks,
        pins: 0,
        skewers: 0,
    }
}
