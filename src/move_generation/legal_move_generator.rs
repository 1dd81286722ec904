//! Legal move generation.
//!
//! Pseudo-legal candidates come from `piece_destinations` and the castling
//! generator; each one is then played on a scratch copy of the position and
//! dropped if the mover's king is left attacked.

use crate::errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks::is_king_attacked;
use crate::move_generation::legal_moves_king::generate_castling_moves;
use crate::move_generation::piece_destinations::destinations;
use crate::moves::chess_move::{classify_kind, Move, MoveKind};

/// Every legal move for the side to move, in a stable order.
pub fn legal_moves(state: &GameState) -> ChessResult<Vec<Move>> {
    let mover = state.turn;
    state.board.find_king(mover)?;

    let mut candidates = Vec::with_capacity(64);
    for (from, piece) in state.board.pieces().filter(|(_, p)| p.color == mover) {
        push_piece_moves(state, from, piece, &mut candidates);
    }
    generate_castling_moves(state, &mut candidates);

    let mut legal = Vec::with_capacity(candidates.len());
    for mv in candidates {
        let next = make_move(state, mv)?;
        if !is_king_attacked(&next.board, mover)? {
            legal.push(mv);
        }
    }
    legal.sort_unstable();
    Ok(legal)
}

/// Legal moves of the piece standing on `from`; empty if it is not the
/// mover's piece.
pub fn legal_moves_from(state: &GameState, from: Square) -> ChessResult<Vec<Move>> {
    Ok(legal_moves(state)?.into_iter().filter(|mv| mv.from == from).collect())
}

fn push_piece_moves(state: &GameState, from: Square, piece: Piece, out: &mut Vec<Move>) {
    for to in squares_of(destinations(state, piece.kind, piece.color, from)) {
        match classify_kind(state, from, to) {
            MoveKind::Promotion => {
                out.extend(PieceKind::PROMOTIONS.iter().map(|kind| Move::promoting(from, to, *kind)));
            }
            // Two-file king steps are never produced by the king's step table.
            kind => out.push(Move::new(from, to, kind)),
        }
    }
}
