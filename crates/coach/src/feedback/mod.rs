//! Feedback template selection.
//!
//! The pool for a move is its (phase, quality, perspective) base pool
//! plus every situational pool the position triggers. One template is
//! drawn from the combined pool with an injectable chooser and returned
//! with its placeholders filled in.

pub mod templates;

use std::fmt;
use std::str::FromStr;

use chess_core::board_utils::{piece_name, square_name};
use chess_core::MoveDescriptor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::context::StrategicContext;
use crate::error::CoachError;
use crate::quality::MoveQuality;

/// Material lead (points) before the material templates kick in
const MATERIAL_REMARK_THRESHOLD: i32 = 2;

/// Who the message speaks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    /// The human player's own move ("your")
    Player,
    /// A move made by the bot ("my")
    Engine,
    /// A suggested move ("would")
    Hint,
}

impl FromStr for Perspective {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "player" | "your" => Ok(Perspective::Player),
            "engine" | "bot" | "my" => Ok(Perspective::Engine),
            "hint" | "would" => Ok(Perspective::Hint),
            other => Err(CoachError::Config(format!("unknown perspective: {other}"))),
        }
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Perspective::Player => "player",
            Perspective::Engine => "engine",
            Perspective::Hint => "hint",
        };
        f.write_str(name)
    }
}

/// Every template eligible for this move, placeholders substituted, base
/// pool first and situational pools after it in a fixed order.
pub fn candidate_pool(
    context: &StrategicContext,
    quality: MoveQuality,
    mv: &MoveDescriptor,
    perspective: Perspective,
) -> Result<Vec<String>, CoachError> {
    let analysis = &context.analysis;
    let lead = analysis.material.lead_for(mv.color);

    let mut raw: Vec<&'static str> =
        templates::base_pool(context.phase, quality, perspective).to_vec();

    if analysis.is_check {
        raw.extend_from_slice(templates::check_pool(perspective));
    }
    if analysis.material.diff.abs() > MATERIAL_REMARK_THRESHOLD {
        if lead > 0 {
            raw.extend_from_slice(templates::material_ahead_pool(perspective));
        } else {
            raw.extend_from_slice(templates::material_behind_pool(perspective));
        }
    }
    let center = &analysis.center_control;
    if center.for_side(mv.color) > center.for_side(!mv.color) {
        raw.extend_from_slice(templates::center_pool(perspective));
    }
    if analysis.tactical_patterns.forks > 0 {
        raw.extend_from_slice(templates::tactical_pool(perspective));
    }
    let first_threat = context.threats.first();
    if first_threat.is_some() {
        raw.extend_from_slice(templates::threat_pool(perspective));
    }

    if raw.is_empty() {
        return Err(CoachError::EmptyTemplatePool {
            phase: context.phase,
            quality,
            perspective,
        });
    }

    let piece = piece_name(mv.piece);
    let square = square_name(mv.to);
    let lead = lead.abs().to_string();
    let threat = first_threat.map(String::as_str).unwrap_or_default();

    Ok(raw
        .into_iter()
        .map(|t| {
            t.replace("{piece}", piece)
                .replace("{square}", &square)
                .replace("{lead}", &lead)
                .replace("{threat}", threat)
        })
        .collect())
}

type Chooser = Box<dyn FnMut(usize) -> usize + Send>;

/// Draws one message from the candidate pool
pub struct FeedbackSelector {
    chooser: Chooser,
}

impl Default for FeedbackSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FeedbackSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackSelector").finish_non_exhaustive()
    }
}

impl FeedbackSelector {
    /// Uniform draw from the thread-local RNG
    pub fn new() -> Self {
        Self::with_chooser(|len| rand::rng().random_range(0..len))
    }

    /// Uniform draw from a seeded RNG, for reproducible output
    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::with_chooser(move |len| rng.random_range(0..len))
    }

    /// `chooser` receives the pool length (always >= 1) and returns an index.
    /// Out-of-range answers are clamped to the last entry.
    pub fn with_chooser(chooser: impl FnMut(usize) -> usize + Send + 'static) -> Self {
        Self {
            chooser: Box::new(chooser),
        }
    }

    pub fn select_message(
        &mut self,
        context: &StrategicContext,
        quality: MoveQuality,
        mv: &MoveDescriptor,
        perspective: Perspective,
    ) -> Result<String, CoachError> {
        let mut pool = candidate_pool(context, quality, mv, perspective)?;
        let index = (self.chooser)(pool.len()).min(pool.len() - 1);
        Ok(pool.swap_remove(index))
    }
}
