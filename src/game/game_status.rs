//! Status detection and the stateless move-proposal entry point.

use std::fmt;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress { in_check: bool },
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress { in_check: false } => f.write_str("in progress"),
            GameStatus::InProgress { in_check: true } => f.write_str("check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => f.write_str("stalemate"),
        }
    }
}

pub fn status(state: &GameState) -> ChessResult<GameStatus> {
    let in_check = is_in_check(state)?;
    let has_moves = !legal_moves(state)?.is_empty();
    Ok(match (has_moves, in_check) {
        (true, _) => GameStatus::InProgress { in_check },
        (false, true) => GameStatus::Checkmate {
            winner: state.turn.opposite(),
        },
        (false, false) => GameStatus::Stalemate,
    })
}

#[inline]
pub fn current_turn(state: &GameState) -> Color {
    state.turn
}

/// Applies `mv` unless the game has already ended.
pub fn propose_move(state: &GameState, mv: Move) -> ChessResult<GameState> {
    let current = status(state)?;
    if current.is_terminal() {
        return Err(ChessError::illegal(mv, format!("the game is over ({current})")));
    }
    apply_move(state, mv)
}
