//! Attack and check detection.
//!
//! Attacks are computed from the target square outwards: a square is attacked
//! by a knight if a knight stands a knight's jump away, by a slider if the
//! first piece along the ray is one, and so on. Pawns attack diagonally
//! whether or not anything stands there.

use crate::errors::ChessResult;
use crate::game_state::{board::Board, chess_types::*, game_state::GameState};
use crate::moves::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};

pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    attackers_to_square(board, square, by_color) != 0
}

/// Bitboard of every `by_color` piece attacking `square`.
pub fn attackers_to_square(board: &Board, square: Square, by_color: Color) -> u64 {
    let occupancy = board.occupancy_all();
    let pieces = |kind| board.pieces_of(by_color, kind);

    // A pawn of `by_color` attacks `square` exactly when a pawn of the other
    // color on `square` would attack it back.
    let pawns = pawn_attacks(by_color.opposite(), square) & pieces(PieceKind::Pawn);
    let knights = knight_attacks(square) & pieces(PieceKind::Knight);
    let kings = king_attacks(square) & pieces(PieceKind::King);
    let diagonal = bishop_attacks(square, occupancy) & (pieces(PieceKind::Bishop) | pieces(PieceKind::Queen));
    let orthogonal = rook_attacks(square, occupancy) & (pieces(PieceKind::Rook) | pieces(PieceKind::Queen));

    pawns | knights | kings | diagonal | orthogonal
}

/// Whether `color`'s king is attacked on `board`.
pub fn is_king_attacked(board: &Board, color: Color) -> ChessResult<bool> {
    let king = board.find_king(color)?;
    Ok(is_square_attacked(board, king, color.opposite()))
}

/// Whether the side to move is in check.
pub fn is_in_check(state: &GameState) -> ChessResult<bool> {
    is_king_attacked(&state.board, state.turn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ChessError;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn pawns_attack_diagonally_even_onto_empty_squares() {
        let game = state("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert!(is_square_attacked(&game.board, sq("d3"), Color::White));
        assert!(is_square_attacked(&game.board, sq("f3"), Color::White));
        assert!(!is_square_attacked(&game.board, sq("e3"), Color::White));
    }

    #[test]
    fn sliders_are_blocked_by_any_piece() {
        let game = state("4k3/8/8/8/8/8/8/R2NK3 w - - 0 1");
        assert!(is_square_attacked(&game.board, sq("d1"), Color::White));
        assert!(is_square_attacked(&game.board, sq("a8"), Color::White));
        assert!(!is_square_attacked(&game.board, sq("e1"), Color::Black));
        // The knight on d1 shields e1 from the rook's ray.
        assert_eq!(attackers_to_square(&game.board, sq("c1"), Color::White).count_ones(), 1);
    }

    #[test]
    fn check_is_seen_from_the_side_to_move() {
        let checked = state("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert_eq!(is_in_check(&checked), Ok(true));
        assert_eq!(is_in_check(&GameState::new_game()), Ok(false));
    }

    #[test]
    fn missing_king_is_an_invariant_violation() {
        let mut broken = GameState::new_game();
        broken.board = broken.board.set(sq("e1"), None);
        assert!(matches!(is_in_check(&broken), Err(ChessError::InvariantViolation(_))));
    }
}
