//! Attack sets for every piece kind.
//!
//! Leapers (knight, king, pawn captures) use tables built at compile time.
//! Sliders walk their rays against the current occupancy and include the
//! first blocker, whichever side it belongs to; callers mask out their own
//! pieces.

use crate::game_state::chess_types::{Color, Square};

const KNIGHT_STEPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const WHITE_PAWN_CAPTURES: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_CAPTURES: [(i32, i32); 2] = [(-1, -1), (1, -1)];

pub const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_STEPS);
pub const KING_ATTACKS: [u64; 64] = leaper_table(&KING_STEPS);
const PAWN_ATTACKS: [[u64; 64]; 2] = [
    leaper_table(&WHITE_PAWN_CAPTURES),
    leaper_table(&BLACK_PAWN_CAPTURES),
];

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square.index() as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square.index() as usize]
}

/// Squares a pawn of `color` on `square` attacks, occupied or not.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    PAWN_ATTACKS[color.index()][square.index() as usize]
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    slide(square, &ORTHOGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    slide(square, &DIAGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

fn slide(square: Square, directions: &[(i32, i32)], occupancy: u64) -> u64 {
    let mut attacks = 0u64;
    for &(file_step, rank_step) in directions {
        let mut file = square.file() as i32 + file_step;
        let mut rank = square.rank() as i32 + rank_step;
        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            file += file_step;
            rank += rank_step;
        }
    }
    attacks
}

const fn leaper_table(steps: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut i = 0usize;
        while i < steps.len() {
            let (df, dr) = steps[i];
            let (f, r) = (file + df, rank + dr);
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                table[sq] |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn knight_in_centre_and_corner() {
        assert_eq!(knight_attacks(sq("d4")).count_ones(), 8);
        assert_eq!(knight_attacks(sq("a1")), sq("b3").mask() | sq("c2").mask());
    }

    #[test]
    fn king_in_corner_has_three_targets() {
        assert_eq!(king_attacks(sq("a1")).count_ones(), 3);
        assert_eq!(king_attacks(sq("e4")).count_ones(), 8);
    }

    #[test]
    fn pawn_attacks_point_forward_for_each_color() {
        assert_eq!(pawn_attacks(Color::White, sq("e2")), sq("d3").mask() | sq("f3").mask());
        assert_eq!(pawn_attacks(Color::Black, sq("e7")), sq("d6").mask() | sq("f6").mask());
        assert_eq!(pawn_attacks(Color::White, sq("a2")), sq("b3").mask());
        assert_eq!(pawn_attacks(Color::White, sq("c8")), 0);
    }

    #[test]
    fn sliders_stop_on_first_blocker() {
        let blocker = sq("a4").mask();
        let rook = rook_attacks(sq("a1"), blocker);
        assert_ne!(rook & sq("a4").mask(), 0);
        assert_eq!(rook & sq("a5").mask(), 0);
        assert_eq!(rook_attacks(sq("d4"), 0).count_ones(), 14);

        let bishop = bishop_attacks(sq("c1"), sq("e3").mask());
        assert_ne!(bishop & sq("e3").mask(), 0);
        assert_eq!(bishop & sq("f4").mask(), 0);
        assert_eq!(bishop_attacks(sq("d4"), 0).count_ones(), 13);

        assert_eq!(queen_attacks(sq("d4"), 0).count_ones(), 27);
    }
}
