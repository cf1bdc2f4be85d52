/// Move quality labels from material and positional deltas, pure functions only.
/// The label picks a template pool; it is not a score.

use chess_core::board_utils::{is_center_square, piece_value};
use chess_core::{MoveDescriptor, Piece, Position};
use serde::{Deserialize, Serialize};

/// Minimum rank distance for a minor-piece move to count as development
const DEVELOPMENT_DISTANCE: u32 = 2;

/// Minimum rank distance for a double pawn push
const PAWN_PUSH_DISTANCE: u32 = 2;

/// Ordered from least to most desirable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveQuality {
    Normal,
    Acceptable,
    Good,
    Excellent,
}

/// Classify `mv` as played from `position` (the position before the move).
///
/// Captures are judged on the trade alone, before any development or
/// center heuristic gets a say.
pub fn classify(position: &Position, mv: &MoveDescriptor) -> MoveQuality {
    if let Some(target) = position.piece_at(mv.to) {
        let captured = piece_value(target.piece);
        let moving = piece_value(mv.piece);
        return if captured > moving {
            MoveQuality::Excellent
        } else if captured == moving {
            MoveQuality::Good
        } else {
            MoveQuality::Acceptable
        };
    }

    match mv.piece {
        Piece::Knight | Piece::Bishop if mv.rank_distance() >= DEVELOPMENT_DISTANCE => {
            MoveQuality::Good
        }
        Piece::Pawn if is_center_square(mv.to) => MoveQuality::Good,
        Piece::Pawn if mv.rank_distance() >= PAWN_PUSH_DISTANCE => MoveQuality::Acceptable,
        _ => MoveQuality::Normal,
    }
}
