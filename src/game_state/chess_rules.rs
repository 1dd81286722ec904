//! Canonical chess-rule constants.
//!
//! Starting position plus the fixed squares that castling depends on.

use crate::game_state::chess_types::{Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingPath {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Every square strictly between king and rook; all must be empty.
    pub must_be_empty: &'static [Square],
    /// Squares the king crosses or lands on; none may be attacked.
    pub king_path: [Square; 2],
}

const WHITE_KINGSIDE: CastlingPath = CastlingPath {
    king_from: Square::E1,
    king_to: Square::G1,
    rook_from: Square::H1,
    rook_to: Square::F1,
    must_be_empty: &[Square::F1, Square::G1],
    king_path: [Square::F1, Square::G1],
};

const WHITE_QUEENSIDE: CastlingPath = CastlingPath {
    king_from: Square::E1,
    king_to: Square::C1,
    rook_from: Square::A1,
    rook_to: Square::D1,
    must_be_empty: &[Square::B1, Square::C1, Square::D1],
    king_path: [Square::D1, Square::C1],
};

const BLACK_KINGSIDE: CastlingPath = CastlingPath {
    king_from: Square::E8,
    king_to: Square::G8,
    rook_from: Square::H8,
    rook_to: Square::F8,
    must_be_empty: &[Square::F8, Square::G8],
    king_path: [Square::F8, Square::G8],
};

const BLACK_QUEENSIDE: CastlingPath = CastlingPath {
    king_from: Square::E8,
    king_to: Square::C8,
    rook_from: Square::A8,
    rook_to: Square::D8,
    must_be_empty: &[Square::B8, Square::C8, Square::D8],
    king_path: [Square::D8, Square::C8],
};

pub const fn kingside_path(color: Color) -> &'static CastlingPath {
    match color {
        Color::White => &WHITE_KINGSIDE,
        Color::Black => &BLACK_KINGSIDE,
    }
}

pub const fn queenside_path(color: Color) -> &'static CastlingPath {
    match color {
        Color::White => &WHITE_QUEENSIDE,
        Color::Black => &BLACK_QUEENSIDE,
    }
}

/// Rank a pawn of `color` starts on (and may double-advance from).
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

/// Rank on which a pawn of `color` promotes.
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Rank direction a pawn of `color` advances in.
pub const fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}
