//! Piece placement storage.
//!
//! `Board` keeps one bitboard per (color, kind) pair plus occupancy caches.
//! It is a small `Copy` value: every editing helper returns a new board, so a
//! caller can preview a move on a scratch copy without touching the original.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{squares_of, Color, Piece, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    // [color][piece_kind]
    pieces: [[u64; 6]; 2],
    occupancy_by_color: [u64; 2],
    occupancy_all: u64,
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
        }
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        if self.occupancy_all & square.mask() == 0 {
            return None;
        }
        for color in Color::ALL {
            if self.occupancy_by_color[color.index()] & square.mask() == 0 {
                continue;
            }
            for kind in PieceKind::ALL {
                if self.pieces[color.index()][kind.index()] & square.mask() != 0 {
                    return Some(Piece::new(color, kind));
                }
            }
        }
        None
    }

    /// Returns a copy of the board with `square` holding `piece` (or emptied).
    #[must_use]
    pub fn set(&self, square: Square, piece: Option<Piece>) -> Board {
        let mut next = *self;
        next.put(square, piece);
        next
    }

    /// Returns a copy with the piece on `from` relocated to `to`, replacing
    /// whatever stood there.
    #[must_use]
    pub fn relocate(&self, from: Square, to: Square) -> Board {
        let moving = self.get(from);
        let mut next = *self;
        next.put(from, None);
        next.put(to, moving);
        next
    }

    // Only used on boards this module owns exclusively (fresh copies).
    fn put(&mut self, square: Square, piece: Option<Piece>) {
        let clear = !square.mask();
        for color in Color::ALL {
            for bitboard in self.pieces[color.index()].iter_mut() {
                *bitboard &= clear;
            }
        }
        if let Some(piece) = piece {
            self.pieces[piece.color.index()][piece.kind.index()] |= square.mask();
        }
        self.recalc_occupancy();
    }

    fn recalc_occupancy(&mut self) {
        for color in Color::ALL {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[0] | self.occupancy_by_color[1];
    }

    /// Locates the single king of `color`.
    pub fn find_king(&self, color: Color) -> ChessResult<Square> {
        let kings = self.pieces_of(color, PieceKind::King);
        match kings.count_ones() {
            1 => Ok(Square::from_index_unchecked(kings.trailing_zeros() as u8)),
            0 => Err(ChessError::InvariantViolation(format!("no {color} king on the board"))),
            n => Err(ChessError::InvariantViolation(format!("{n} {color} kings on the board"))),
        }
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> u64 {
        self.occupancy_all
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.occupancy_all & square.mask() == 0
    }

    /// Occupied squares with their pieces, a1 first. Each call starts over.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        squares_of(self.occupancy_all)
            .filter_map(move |square| self.get(square).map(|piece| (square, piece)))
    }
}
