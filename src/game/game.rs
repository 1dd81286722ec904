//! A running game: the current position plus the moves that led to it.

use crate::errors::ChessResult;
use crate::game::game_status::{self, GameStatus};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone)]
pub struct Game {
    initial: GameState,
    current: GameState,
    /// Each entry is the position before the move and the move played.
    history: Vec<(GameState, Move)>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_state(GameState::new_game())
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            initial: state,
            current: state,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.current
    }

    pub fn status(&self) -> ChessResult<GameStatus> {
        game_status::status(&self.current)
    }

    pub fn turn(&self) -> Color {
        game_status::current_turn(&self.current)
    }

    pub fn is_over(&self) -> ChessResult<bool> {
        Ok(self.status()?.is_terminal())
    }

    /// Parses wire text against the current position and plays it.
    pub fn propose(&mut self, text: &str) -> ChessResult<Move> {
        let mv = Move::parse(text, &self.current)?;
        self.propose_move(mv)
    }

    /// Plays `mv`, returning it with any default promotion filled in.
    pub fn propose_move(&mut self, mv: Move) -> ChessResult<Move> {
        let mv = mv.with_default_promotion();
        let next = game_status::propose_move(&self.current, mv)?;
        self.history.push((self.current, mv));
        self.current = next;
        Ok(mv)
    }

    pub fn legal_moves(&self) -> ChessResult<Vec<Move>> {
        legal_move_generator::legal_moves(&self.current)
    }

    pub fn legal_moves_from(&self, square: Square) -> ChessResult<Vec<Move>> {
        legal_move_generator::legal_moves_from(&self.current, square)
    }

    /// Takes back the last move; `None` at the starting position.
    pub fn undo(&mut self) -> Option<Move> {
        let (previous, mv) = self.history.pop()?;
        self.current = previous;
        Some(mv)
    }

    /// Returns to the position the game started from.
    pub fn reset(&mut self) {
        self.current = self.initial;
        self.history.clear();
    }

    pub fn history(&self) -> &[(GameState, Move)] {
        &self.history
    }

    pub fn moves_played(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|(_, mv)| *mv)
    }

    pub fn initial_state(&self) -> &GameState {
        &self.initial
    }
}
