//! Coach error types

use std::time::Duration;

use chess_core::RulesError;
use thiserror::Error;

use crate::context::GamePhase;
use crate::feedback::Perspective;
use crate::quality::MoveQuality;

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("Illegal move: {from}{to}")]
    IllegalMove { from: String, to: String },

    #[error("Game is over, no legal moves in {0}")]
    GameOver(String),

    #[error("Engine bridge already has a request in flight")]
    BridgeBusy,

    #[error("Engine did not answer within {0:?}")]
    UnresponsiveEngine(Duration),

    #[error("Engine connection closed")]
    EngineClosed,

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("No feedback templates for {phase:?}/{quality:?}/{perspective:?}")]
    EmptyTemplatePool {
        phase: GamePhase,
        quality: MoveQuality,
        perspective: Perspective,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
