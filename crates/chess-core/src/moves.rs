//! Move descriptors exchanged between the controller, the analyzers and
//! the engine bridge.

use chess::{Color, Piece, Square};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::board_utils::{
    color_name, parse_promotion, parse_square, piece_name, promotion_char, rank_distance,
    square_name,
};
use crate::error::RulesError;
use crate::position::Position;

/// A ply described by its endpoints and the piece that makes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDescriptor {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub color: Color,
    pub promotion: Option<Piece>,
}

impl MoveDescriptor {
    /// Describe the ply `from -> to` in `position`. Returns `None` when
    /// there is no piece on `from`; legality is not checked here.
    pub fn from_position(
        position: &Position,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Option<Self> {
        let mover = position.piece_at(from)?;
        Some(Self {
            from,
            to,
            piece: mover.piece,
            color: mover.color,
            promotion: position.promotion_for(from, to, promotion),
        })
    }

    /// Parse coordinate notation (`e2e4`, `e7e8q`) against a position
    pub fn parse_uci(position: &Position, uci: &str) -> Result<Self, RulesError> {
        let uci = uci.trim();
        if uci.len() < 4 || uci.len() > 5 || !uci.is_ascii() {
            return Err(RulesError::InvalidMove(uci.to_string()));
        }
        let from = parse_square(&uci[0..2])?;
        let to = parse_square(&uci[2..4])?;
        let promotion = match uci[4..].chars().next() {
            Some(c) => Some(
                parse_promotion(c).ok_or_else(|| RulesError::InvalidMove(uci.to_string()))?,
            ),
            None => None,
        };
        Self::from_position(position, from, to, promotion).ok_or_else(|| {
            RulesError::InvalidMove(format!("{uci}: no piece on {}", square_name(from)))
        })
    }

    pub fn to_uci(&self) -> String {
        match self.promotion {
            Some(p) => format!(
                "{}{}{}",
                square_name(self.from),
                square_name(self.to),
                promotion_char(p)
            ),
            None => format!("{}{}", square_name(self.from), square_name(self.to)),
        }
    }

    pub fn rank_distance(&self) -> u32 {
        rank_distance(self.from, self.to)
    }

    /// Apply this ply to `position` through the rules collaborator
    pub fn apply(&self, position: &Position) -> Option<Position> {
        position.apply_move(self.from, self.to, self.promotion)
    }
}

impl Serialize for MoveDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MoveDescriptor", 5)?;
        state.serialize_field("from", &square_name(self.from))?;
        state.serialize_field("to", &square_name(self.to))?;
        state.serialize_field("piece", piece_name(self.piece))?;
        state.serialize_field("color", color_name(self.color))?;
        state.serialize_field("promotion", &self.promotion.map(piece_name))?;
        state.end()
    }
}
