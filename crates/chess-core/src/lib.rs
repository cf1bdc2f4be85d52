//! Chess rules collaborator for the coaching layer.
//!
//! Wraps the `chess` crate's move generator behind an immutable
//! [`Position`] snapshot: every operation takes a position and returns a
//! fresh one, nothing is mutated in place.

pub mod board_utils;
pub mod error;
pub mod moves;
pub mod position;

pub use chess::{ChessMove, Color, File, Piece, Rank, Square};

pub use error::RulesError;
pub use moves::MoveDescriptor;
pub use position::{PieceRef, Position};
