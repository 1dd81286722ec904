//! Pseudo-legal destinations per piece kind.
//!
//! `destinations` is a pure function of (kind, position, square): it answers
//! where the piece standing on `square` could go by its movement rules alone,
//! respecting blockers and board edges but ignoring whether the move would
//! expose its own king. Castling is generated separately in
//! `legal_moves_king` because it depends on attack information.

use crate::game_state::chess_rules::{pawn_direction, pawn_start_rank};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};

/// Destination bitboard for a `color` piece of `kind` on `from`.
pub fn destinations(state: &GameState, kind: PieceKind, color: Color, from: Square) -> u64 {
    let board = &state.board;
    let own = board.occupancy(color);
    let occupancy = board.occupancy_all();

    match kind {
        PieceKind::Pawn => pawn_destinations(state, color, from),
        PieceKind::Knight => knight_attacks(from) & !own,
        PieceKind::Bishop => bishop_attacks(from, occupancy) & !own,
        PieceKind::Rook => rook_attacks(from, occupancy) & !own,
        PieceKind::Queen => queen_attacks(from, occupancy) & !own,
        PieceKind::King => king_attacks(from) & !own,
    }
}

fn pawn_destinations(state: &GameState, color: Color, from: Square) -> u64 {
    let board = &state.board;
    let direction = pawn_direction(color);
    let mut out = 0u64;

    if let Some(one_step) = from.offset(0, direction) {
        if board.is_empty(one_step) {
            out |= one_step.mask();

            if from.rank() == pawn_start_rank(color) {
                if let Some(two_step) = one_step.offset(0, direction) {
                    if board.is_empty(two_step) {
                        out |= two_step.mask();
                    }
                }
            }
        }
    }

    let mut capturable = board.occupancy(color.opposite());
    if let Some(target) = state.en_passant_target {
        // The pawn being taken stands beside `from`, level with it.
        let victim = Square::from_file_rank(target.file(), from.rank()).and_then(|s| board.get(s));
        if board.is_empty(target) && victim == Some(Piece::new(color.opposite(), PieceKind::Pawn)) {
            capturable |= target.mask();
        }
    }
    out |= pawn_attacks(color, from) & capturable;

    out
}
