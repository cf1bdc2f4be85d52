//! Glue between a game controller and the analysis pipeline:
//! rules -> classifier -> context -> message.

use chess_core::board_utils::square_name;
use chess_core::{MoveDescriptor, Piece, Position, Square};
use serde::Serialize;
use tracing::{debug, warn};

use crate::context::{build_context, StrategicContext};
use crate::engine::EngineBridge;
use crate::error::CoachError;
use crate::feedback::{FeedbackSelector, Perspective};
use crate::quality::{classify, MoveQuality};

/// Everything produced for one reviewed move
#[derive(Debug, Clone, Serialize)]
pub struct MoveFeedback {
    #[serde(rename = "move")]
    pub mv: MoveDescriptor,
    pub uci: String,
    pub fen_before: String,
    pub fen_after: String,
    pub perspective: Perspective,
    pub quality: MoveQuality,
    pub context: StrategicContext,
    pub message: String,
    #[serde(skip)]
    pub after: Position,
}

#[derive(Debug, Default)]
pub struct Coach {
    selector: FeedbackSelector,
}

impl Coach {
    pub fn new(selector: FeedbackSelector) -> Self {
        Self { selector }
    }

    /// Review the ply `from -> to` played from `before`. An illegal ply is
    /// reported as [`CoachError::IllegalMove`] and changes nothing.
    pub fn review_move(
        &mut self,
        before: &Position,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
        perspective: Perspective,
    ) -> Result<MoveFeedback, CoachError> {
        let illegal = || CoachError::IllegalMove {
            from: square_name(from),
            to: square_name(to),
        };
        let mv = MoveDescriptor::from_position(before, from, to, promotion).ok_or_else(illegal)?;
        self.review(before, mv, perspective)
    }

    /// Review an already-described ply
    pub fn review(
        &mut self,
        before: &Position,
        mv: MoveDescriptor,
        perspective: Perspective,
    ) -> Result<MoveFeedback, CoachError> {
        let after = match mv.apply(before) {
            Some(after) => after,
            None => {
                warn!(uci = %mv.to_uci(), fen = %before, "Illegal move attempt");
                return Err(CoachError::IllegalMove {
                    from: square_name(mv.from),
                    to: square_name(mv.to),
                });
            }
        };

        let quality = classify(before, &mv);
        let context = build_context(&after);
        let message = self
            .selector
            .select_message(&context, quality, &mv, perspective)?;
        debug!(uci = %mv.to_uci(), ?quality, phase = ?context.phase, "Feedback selected");

        Ok(MoveFeedback {
            mv,
            uci: mv.to_uci(),
            fen_before: before.to_fen(),
            fen_after: after.to_fen(),
            perspective,
            quality,
            context,
            message,
            after,
        })
    }

    /// Let the engine move and comment on it in the first person
    pub async fn bot_move(
        &mut self,
        position: &Position,
        bridge: &EngineBridge,
    ) -> Result<MoveFeedback, CoachError> {
        ensure_playable(position)?;
        let mv = bridge.request_move(position)?.response().await?;
        self.review(position, mv, Perspective::Engine)
    }

    /// Ask the engine what the side to move should play and phrase it as a
    /// suggestion. The returned `after` is where the hint would lead; the
    /// caller's position is unchanged.
    pub async fn hint(
        &mut self,
        position: &Position,
        bridge: &EngineBridge,
    ) -> Result<MoveFeedback, CoachError> {
        ensure_playable(position)?;
        let mv = bridge.request_move(position)?.response().await?;
        self.review(position, mv, Perspective::Hint)
    }
}

/// Refuse positions with no legal moves; the engine would only answer
/// `bestmove (none)`.
fn ensure_playable(position: &Position) -> Result<(), CoachError> {
    if position.legal_moves(None).is_empty() {
        warn!(fen = %position, "Engine move requested in a finished game");
        return Err(CoachError::GameOver(position.to_fen()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::board_utils::parse_square;

    use crate::context::GamePhase;

    fn sq(name: &str) -> Square {
        parse_square(name).unwrap()
    }

    #[test]
    fn test_review_opening_move() {
        let mut coach = Coach::new(FeedbackSelector::with_chooser(|_| 0));
        let start = Position::starting();
        let feedback = coach
            .review_move(&start, sq("e2"), sq("e4"), None, Perspective::Player)
            .unwrap();
        assert_eq!(feedback.quality, MoveQuality::Good);
        assert_eq!(feedback.context.phase, GamePhase::Opening);
        assert_eq!(feedback.uci, "e2e4");
        assert_eq!(feedback.message, "Good move! Your pawn to e4 helps your development.");
        assert_eq!(feedback.fen_after, feedback.after.to_fen());
    }

    #[test]
    fn test_illegal_move_is_a_no_op() {
        let mut coach = Coach::default();
        let start = Position::starting();
        let err = coach
            .review_move(&start, sq("e2"), sq("e5"), None, Perspective::Player)
            .unwrap_err();
        assert!(matches!(err, CoachError::IllegalMove { .. }));
        assert_eq!(start, Position::starting());

        let err = coach
            .review_move(&start, sq("e4"), sq("e5"), None, Perspective::Player)
            .unwrap_err();
        assert!(matches!(err, CoachError::IllegalMove { .. }));
    }

    #[test]
    fn test_feedback_serializes() {
        let mut coach = Coach::new(FeedbackSelector::seeded(1));
        let feedback = coach
            .review_move(&Position::starting(), sq("g1"), sq("f3"), None, Perspective::Engine)
            .unwrap();
        let json = serde_json::to_value(&feedback).unwrap();
        assert_eq!(json["move"]["from"], "g1");
        assert_eq!(json["move"]["piece"], "knight");
        assert_eq!(json["quality"], "good");
        assert_eq!(json["perspective"], "engine");
        assert_eq!(json["context"]["phase"], "opening");
        assert!(json.get("after").is_none());
    }
}
