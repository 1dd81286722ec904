//! Castling generation.
//!
//! Ordinary king steps come from `piece_destinations`; this module adds the
//! two compound king+rook moves when every castling condition holds.

use crate::game_state::chess_rules::{kingside_path, queenside_path, CastlingPath};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::chess_move::{Move, MoveKind};

pub fn generate_castling_moves(state: &GameState, out: &mut Vec<Move>) {
    let side = state.turn;
    let rights = state.castling_rights;

    if rights.kingside(side) && can_castle(state, kingside_path(side)) {
        let path = kingside_path(side);
        out.push(Move::new(path.king_from, path.king_to, MoveKind::CastleKingside));
    }
    if rights.queenside(side) && can_castle(state, queenside_path(side)) {
        let path = queenside_path(side);
        out.push(Move::new(path.king_from, path.king_to, MoveKind::CastleQueenside));
    }
}

fn can_castle(state: &GameState, path: &CastlingPath) -> bool {
    let side = state.turn;
    let enemy = side.opposite();
    let board = &state.board;

    if board.get(path.king_from) != Some(Piece::new(side, PieceKind::King))
        || board.get(path.rook_from) != Some(Piece::new(side, PieceKind::Rook))
    {
        return false;
    }

    if path.must_be_empty.iter().any(|sq| !board.is_empty(*sq)) {
        return false;
    }

    // Cannot castle out of, through, or into check.
    !is_square_attacked(board, path.king_from, enemy)
        && path.king_path.iter().all(|sq| !is_square_attacked(board, *sq, enemy))
}
