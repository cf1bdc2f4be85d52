//! Immutable position snapshot and the rules queries the coach relies on.

use std::fmt;
use std::str::FromStr;

use chess::{Board, BoardStatus, ChessMove, Color, MoveGen, Piece, Square, ALL_SQUARES};

use crate::board_utils::is_last_rank;
use crate::error::RulesError;

/// A piece standing on a square of some position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceRef {
    pub piece: Piece,
    pub color: Color,
    pub square: Square,
}

/// Board plus side to move, castling rights, en passant target and move
/// counters. The `chess` board does not keep the counters, so they live
/// alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl Position {
    pub fn starting() -> Self {
        Self {
            board: Board::default(),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Parse a FEN string. Missing counter fields default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len())
            || !is_valid_placement(fields[0])
            || !is_valid_en_passant(fields[3])
        {
            return Err(RulesError::InvalidFen(fen.to_string()));
        }

        let board = Board::from_str(&fields[..4].join(" "))
            .map_err(|_| RulesError::InvalidFen(fen.to_string()))?;

        let halfmove_clock = match fields.get(4) {
            Some(v) => v.parse().map_err(|_| RulesError::InvalidFen(fen.to_string()))?,
            None => 0,
        };
        let fullmove_number = match fields.get(5) {
            Some(v) => v.parse().map_err(|_| RulesError::InvalidFen(fen.to_string()))?,
            None => 1,
        };

        Ok(Self {
            board,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Canonical six-field FEN
    pub fn to_fen(&self) -> String {
        let board_fen = self.board.to_string();
        let head: Vec<&str> = board_fen.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            head.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn piece_at(&self, square: Square) -> Option<PieceRef> {
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some(PieceRef {
            piece,
            color,
            square,
        })
    }

    /// Every piece on the board, a1 through h8
    pub fn pieces(&self) -> Vec<PieceRef> {
        ALL_SQUARES
            .iter()
            .filter_map(|&sq| self.piece_at(sq))
            .collect()
    }

    /// Resolve the promotion piece for a ply: pawns reaching the last rank
    /// promote to the hinted piece (queen when no hint is given), every
    /// other ply drops the hint.
    pub fn promotion_for(&self, from: Square, to: Square, hint: Option<Piece>) -> Option<Piece> {
        let mover = self.piece_at(from)?;
        if mover.piece == Piece::Pawn && is_last_rank(to, mover.color) {
            Some(hint.unwrap_or(Piece::Queen))
        } else {
            None
        }
    }

    /// Play a ply and return the resulting position, or `None` if it is
    /// illegal. `self` is left untouched either way.
    pub fn apply_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Option<Position> {
        let mover = self.piece_at(from)?;
        if mover.color != self.side_to_move() {
            return None;
        }

        let mv = ChessMove::new(from, to, self.promotion_for(from, to, promotion));
        if !self.board.legal(mv) {
            return None;
        }

        let is_capture = self.is_capture(mv);
        let halfmove_clock = if mover.piece == Piece::Pawn || is_capture {
            0
        } else {
            self.halfmove_clock + 1
        };
        let fullmove_number = match mover.color {
            Color::Black => self.fullmove_number + 1,
            Color::White => self.fullmove_number,
        };

        Some(Position {
            board: self.board.make_move_new(mv),
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Does this ply take something? En passant counts.
    pub fn is_capture(&self, mv: ChessMove) -> bool {
        if self.board.piece_on(mv.get_dest()).is_some() {
            return true;
        }
        self.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            && mv.get_source().get_file() != mv.get_dest().get_file()
    }

    /// Legal plies for the side to move, optionally only those leaving
    /// `filter`. Order is the move generator's.
    pub fn legal_moves(&self, filter: Option<Square>) -> Vec<ChessMove> {
        collect_moves(&self.board, filter)
    }

    /// Legal plies for either color. The side not to move is evaluated as
    /// if it had the move; that is impossible while the side to move is in
    /// check, so it gets no moves then.
    pub fn moves_for(&self, color: Color, filter: Option<Square>) -> Vec<ChessMove> {
        if color == self.side_to_move() {
            return self.legal_moves(filter);
        }
        match self.board.null_move() {
            Some(flipped) => collect_moves(&flipped, filter),
            None => Vec::new(),
        }
    }

    pub fn is_check(&self) -> bool {
        self.board.checkers().popcnt() > 0
    }

    pub fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.board.status() == BoardStatus::Stalemate
    }

    /// Stalemate, bare kings / a lone minor piece, or the fifty-move rule
    pub fn is_draw(&self) -> bool {
        self.is_stalemate() || self.has_insufficient_material() || self.halfmove_clock >= 100
    }

    fn has_insufficient_material(&self) -> bool {
        let others: Vec<Piece> = self
            .pieces()
            .into_iter()
            .map(|p| p.piece)
            .filter(|&p| p != Piece::King)
            .collect();
        match others.as_slice() {
            [] => true,
            [single] => matches!(single, Piece::Knight | Piece::Bishop),
            _ => false,
        }
    }
}

/// Exactly eight ranks, each covering exactly eight squares
fn is_valid_placement(placement: &str) -> bool {
    let ranks: Vec<&str> = placement.split('/').collect();
    ranks.len() == 8
        && ranks.iter().all(|rank| {
            let mut squares = 0;
            for c in rank.chars() {
                match c {
                    '1'..='8' => squares += c as u32 - '0' as u32,
                    'p' | 'n' | 'b' | 'r' | 'q' | 'k' | 'P' | 'N' | 'B' | 'R' | 'Q' | 'K' => {
                        squares += 1
                    }
                    _ => return false,
                }
            }
            squares == 8
        })
}

/// `-` or a third/sixth-rank target square
fn is_valid_en_passant(field: &str) -> bool {
    match field.as_bytes() {
        [b'-'] => true,
        [file, rank] => (b'a'..=b'h').contains(file) && matches!(*rank, b'3' | b'6'),
        _ => false,
    }
}

fn collect_moves(board: &Board, filter: Option<Square>) -> Vec<ChessMove> {
    MoveGen::new_legal(board)
        .filter(|m| filter.map_or(true, |sq| m.get_source() == sq))
        .collect()
}

impl FromStr for Position {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_utils::parse_square;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn sq(name: &str) -> Square {
        parse_square(name).unwrap()
    }

    #[test]
    fn test_starting_fen() {
        assert_eq!(Position::starting().to_fen(), START_FEN);
        assert_eq!(Position::from_fen(START_FEN).unwrap(), Position::starting());
    }

    #[test]
    fn test_invalid_fen_rejected() {
        assert!(Position::from_fen("not a fen").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn test_malformed_fen_fields_rejected() {
        let cases = [
            // Nine squares on the back rank
            "rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            // Seven squares on the back rank
            "rnbqkbn/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            // Nine ranks
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/8 w KQkq - 0 1",
            // Seven ranks
            "rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            // Unknown piece letter
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
            // En passant target off the board
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1",
            // En passant target on a rank a pawn cannot skip
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
            // Trailing fields
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 trailing junk",
            // Missing castling and en passant fields
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
        ];
        for fen in cases {
            assert!(
                matches!(Position::from_fen(fen), Err(RulesError::InvalidFen(_))),
                "accepted malformed FEN: {fen}"
            );
        }
    }

    #[test]
    fn test_short_fen_defaults_counters() {
        let position = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");
        assert_eq!(position.unwrap(), Position::starting());

        let after_e4 = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        assert!(Position::from_fen(after_e4).is_ok());
    }

    #[test]
    fn test_apply_move_returns_new_position() {
        let start = Position::starting();
        let after = start.apply_move(sq("e2"), sq("e4"), None).unwrap();
        assert_eq!(start, Position::starting());
        assert_eq!(after.side_to_move(), Color::Black);
        assert_eq!(after.piece_at(sq("e4")).map(|p| p.piece), Some(Piece::Pawn));
        assert!(after.piece_at(sq("e2")).is_none());
    }

    #[test]
    fn test_illegal_move_is_none() {
        let start = Position::starting();
        assert!(start.apply_move(sq("e2"), sq("e5"), None).is_none());
        // Wrong side to move
        assert!(start.apply_move(sq("e7"), sq("e5"), None).is_none());
        // Empty square
        assert!(start.apply_move(sq("e4"), sq("e5"), None).is_none());
    }

    #[test]
    fn test_move_counters() {
        let pos = Position::starting()
            .apply_move(sq("g1"), sq("f3"), None)
            .unwrap();
        assert_eq!(pos.halfmove_clock(), 1);
        assert_eq!(pos.fullmove_number(), 1);

        let pos = pos.apply_move(sq("e7"), sq("e5"), None).unwrap();
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 2);
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let pos = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let after = pos.apply_move(sq("e7"), sq("e8"), None).unwrap();
        assert_eq!(after.piece_at(sq("e8")).map(|p| p.piece), Some(Piece::Queen));

        let under = pos.apply_move(sq("e7"), sq("e8"), Some(Piece::Knight)).unwrap();
        assert_eq!(under.piece_at(sq("e8")).map(|p| p.piece), Some(Piece::Knight));
    }

    #[test]
    fn test_legal_moves_filter() {
        let start = Position::starting();
        assert_eq!(start.legal_moves(None).len(), 20);
        assert_eq!(start.legal_moves(Some(sq("g1"))).len(), 2);
        assert!(start.legal_moves(Some(sq("e1"))).is_empty());
    }

    #[test]
    fn test_moves_for_side_not_to_move() {
        let start = Position::starting();
        assert_eq!(start.moves_for(Color::Black, None).len(), 20);
        assert_eq!(start.moves_for(Color::Black, Some(sq("b8"))).len(), 2);
    }

    #[test]
    fn test_checkmate_and_check() {
        // Fool's mate
        let mate =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(mate.is_check());
        assert!(mate.is_checkmate());
        assert!(!mate.is_draw());
    }

    #[test]
    fn test_draw_detection() {
        let stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(stalemate.is_stalemate());
        assert!(stalemate.is_draw());

        let bare_kings = Position::from_fen("8/8/4k3/8/8/4K3/8/8 w - - 0 1").unwrap();
        assert!(bare_kings.is_draw());

        let lone_knight = Position::from_fen("8/8/4k3/8/8/4KN2/8/8 w - - 0 1").unwrap();
        assert!(lone_knight.is_draw());

        let fifty = Position::from_fen("8/8/4k3/8/8/4KR2/8/8 w - - 100 80").unwrap();
        assert!(fifty.is_draw());

        let rook = Position::from_fen("8/8/4k3/8/8/4KR2/8/8 w - - 10 80").unwrap();
        assert!(!rook.is_draw());
    }
}
