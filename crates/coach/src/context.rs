//! Strategic context: game phase, initiative and threats layered on top of
//! the raw [`Analysis`].

use chess_core::board_utils::{color_name, piece_name, square_name};
use chess_core::{Piece, Position};
use serde::{Deserialize, Serialize};

use crate::analyzer::{analyze, Analysis};

/// Total non-king material above which the game is still in the opening
const OPENING_MATERIAL: i32 = 60;
/// Total non-king material above which the game is in the middlegame
const MIDDLEGAME_MATERIAL: i32 = 30;
/// Material lead (points) that hands one side the initiative
const MATERIAL_INITIATIVE: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

impl GamePhase {
    /// Phase from the combined material of both sides (kings excluded)
    pub fn from_material(total: i32) -> Self {
        if total > OPENING_MATERIAL {
            GamePhase::Opening
        } else if total > MIDDLEGAME_MATERIAL {
            GamePhase::Middlegame
        } else {
            GamePhase::Endgame
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initiative {
    Attacking,
    MaterialAdvantage,
    PositionalAdvantage,
    Balanced,
}

impl Initiative {
    /// First matching rule wins: check, material lead, pawn islands, nothing.
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let white_isolated = analysis.pawn_structure.white.isolated;
        let black_isolated = analysis.pawn_structure.black.isolated;

        if analysis.is_check {
            Initiative::Attacking
        } else if analysis.material.diff.abs() > MATERIAL_INITIATIVE {
            Initiative::MaterialAdvantage
        } else if white_isolated != black_isolated {
            Initiative::PositionalAdvantage
        } else {
            Initiative::Balanced
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategicContext {
    pub analysis: Analysis,
    pub phase: GamePhase,
    pub initiative: Initiative,
    /// In move-generator order
    pub threats: Vec<String>,
}

pub fn build_context(position: &Position) -> StrategicContext {
    let analysis = analyze(position);
    let phase = GamePhase::from_material(analysis.material.total());
    let initiative = Initiative::from_analysis(&analysis);
    let threats = threats(position);

    StrategicContext {
        analysis,
        phase,
        initiative,
        threats,
    }
}

/// One sentence per legal move that lands on an enemy queen or king
fn threats(position: &Position) -> Vec<String> {
    let mover = position.side_to_move();
    position
        .legal_moves(None)
        .into_iter()
        .filter_map(|m| position.piece_at(m.get_dest()))
        .filter(|target| {
            target.color != mover && matches!(target.piece, Piece::Queen | Piece::King)
        })
        .map(|target| {
            format!(
                "The {} {} on {} is under attack",
                color_name(target.color),
                piece_name(target.piece),
                square_name(target.square)
            )
        })
        .collect()
}
