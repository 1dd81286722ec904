//! Value types shared by every layer of the engine.
//!
//! Squares use the little-endian rank-file mapping: `a1 == 0`, `h1 == 7`,
//! `a8 == 56`, `h8 == 63`.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::game_state::board::Board;
pub use crate::game_state::game_state::GameState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lower-case letter used by FEN and the move wire format.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN letter: upper case for white, lower case for black.
    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };
        PieceKind::from_letter(ch).map(|kind| Piece::new(color, kind))
    }
}

/// A board coordinate, stored as its linear index `0..=63`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Builds a square from an index already known to be in range, such as a
    /// bit position taken from a non-empty bitboard.
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Self {
        Square(index & 63)
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub const fn mask(self) -> u64 {
        1u64 << self.0
    }

    /// Shifts by whole files/ranks, returning `None` off the board.
    #[inline]
    pub const fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        let file = self.file() as i8 + d_file;
        let rank = self.rank() as i8 + d_rank;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Some(Square((rank * 8 + file) as u8))
        }
    }

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.file());
        let rank = char::from(b'1' + self.rank());
        write!(f, "{file}{rank}")
    }
}

/// Iterates the set bits of a bitboard as squares, lowest index first.
pub fn squares_of(mut bitboard: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if bitboard == 0 {
            return None;
        }
        let index = bitboard.trailing_zeros() as u8;
        bitboard &= bitboard - 1;
        Some(Square::from_index_unchecked(index))
    })
}

/// The four independent castling permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    #[inline]
    pub const fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    #[inline]
    pub const fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    /// Drops both rights of `color`.
    pub fn clear_color(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }

    /// Drops the right tied to a rook home square, if `square` is one.
    pub fn clear_rook_square(&mut self, square: Square) {
        match square {
            Square::A1 => self.white_queenside = false,
            Square::H1 => self.white_kingside = false,
            Square::A8 => self.black_queenside = false,
            Square::H8 => self.black_kingside = false,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_coordinates_follow_rank_file_layout() {
        let e4 = Square::from_file_rank(4, 3).expect("e4 is on the board");
        assert_eq!(e4.index(), 28);
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(Square::H8.to_string(), "h8");
        assert!(Square::new(64).is_none());
        assert!(Square::from_file_rank(8, 0).is_none());
    }

    #[test]
    fn square_offset_stops_at_edges() {
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::E1.offset(1, 1).map(|s| s.to_string()), Some("f2".to_owned()));
    }

    #[test]
    fn squares_of_walks_bits_in_ascending_order() {
        let squares: Vec<u8> = squares_of((1 << 3) | (1 << 40) | 1).map(Square::index).collect();
        assert_eq!(squares, vec![0, 3, 40]);
    }

    #[test]
    fn rook_square_clears_only_matching_right() {
        let mut rights = CastlingRights::ALL;
        rights.clear_rook_square(Square::H8);
        assert!(!rights.black_kingside);
        assert!(rights.black_queenside && rights.white_kingside && rights.white_queenside);
        rights.clear_rook_square(Square::E1);
        assert!(rights.white_kingside);
    }

    #[test]
    fn fen_letters_encode_color_by_case() {
        let knight = Piece::new(Color::White, PieceKind::Knight);
        assert_eq!(knight.fen_char(), 'N');
        assert_eq!(Piece::from_fen_char('q'), Some(Piece::new(Color::Black, PieceKind::Queen)));
        assert_eq!(Piece::from_fen_char('x'), None);
    }
}
