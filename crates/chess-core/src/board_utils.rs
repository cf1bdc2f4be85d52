/// Board utility functions shared by the analyzers: piece values,
/// square naming, and a few geometric helpers.

use chess::{Color, File, Piece, Rank, Square};

use crate::error::RulesError;

// Piece values for material calculation
pub const PAWN_VALUE: i32 = 1;
pub const KNIGHT_VALUE: i32 = 3;
pub const BISHOP_VALUE: i32 = 3;
pub const ROOK_VALUE: i32 = 5;
pub const QUEEN_VALUE: i32 = 9;

/// Piece value (king counts as zero)
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => 0,
    }
}

/// Lowercase English name of a piece type
pub fn piece_name(piece: Piece) -> &'static str {
    match piece {
        Piece::Pawn => "pawn",
        Piece::Knight => "knight",
        Piece::Bishop => "bishop",
        Piece::Rook => "rook",
        Piece::Queen => "queen",
        Piece::King => "king",
    }
}

pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

/// Parse a promotion suffix (`q`, `r`, `b`, `n`, either case)
pub fn parse_promotion(c: char) -> Option<Piece> {
    match c.to_ascii_lowercase() {
        'q' => Some(Piece::Queen),
        'r' => Some(Piece::Rook),
        'b' => Some(Piece::Bishop),
        'n' => Some(Piece::Knight),
        _ => None,
    }
}

pub fn promotion_char(piece: Piece) -> char {
    match piece {
        Piece::Queen => 'q',
        Piece::Rook => 'r',
        Piece::Bishop => 'b',
        Piece::Knight => 'n',
        Piece::Pawn => 'p',
        Piece::King => 'k',
    }
}

/// Canonical square name: file letter then rank digit ("e4")
pub fn square_name(square: Square) -> String {
    let file = (b'a' + square.get_file().to_index() as u8) as char;
    let rank = (b'1' + square.get_rank().to_index() as u8) as char;
    format!("{file}{rank}")
}

/// Parse a square name. The file letter may be upper or lower case.
pub fn parse_square(name: &str) -> Result<Square, RulesError> {
    let bytes = name.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(RulesError::InvalidSquare(name.to_string()));
    }
    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(RulesError::InvalidSquare(name.to_string()));
    }
    Ok(Square::make_square(
        Rank::from_index((rank - b'1') as usize),
        File::from_index((file - b'a') as usize),
    ))
}

/// The four center squares: d4, e4, d5, e5
pub fn center_squares() -> [Square; 4] {
    [
        Square::make_square(Rank::Fourth, File::D),
        Square::make_square(Rank::Fourth, File::E),
        Square::make_square(Rank::Fifth, File::D),
        Square::make_square(Rank::Fifth, File::E),
    ]
}

pub fn is_center_square(square: Square) -> bool {
    center_squares().contains(&square)
}

/// Number of ranks between two squares
pub fn rank_distance(s1: Square, s2: Square) -> u32 {
    let r1 = s1.get_rank().to_index() as i32;
    let r2 = s2.get_rank().to_index() as i32;
    (r1 - r2).unsigned_abs()
}

/// Is this the promotion rank for a pawn of `color`?
pub fn is_last_rank(square: Square, color: Color) -> bool {
    match color {
        Color::White => square.get_rank() == Rank::Eighth,
        Color::Black => square.get_rank() == Rank::First,
    }
}

/// Square offset by (file, rank) deltas, if it stays on the board
pub fn offset_square(square: Square, file_delta: i32, rank_delta: i32) -> Option<Square> {
    let file = square.get_file().to_index() as i32 + file_delta;
    let rank = square.get_rank().to_index() as i32 + rank_delta;
    if !(0..8).contains(&file) || !(0..8).contains(&rank) {
        return None;
    }
    Some(Square::make_square(
        Rank::from_index(rank as usize),
        File::from_index(file as usize),
    ))
}
