pub use chess_core;

pub mod analyzer;
pub mod coach;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod quality;

pub use coach::{Coach, MoveFeedback};
pub use context::{build_context, GamePhase, Initiative, StrategicContext};
pub use engine::{Difficulty, EngineBridge, PendingMove};
pub use error::CoachError;
pub use feedback::{FeedbackSelector, Perspective};
pub use quality::{classify, MoveQuality};
