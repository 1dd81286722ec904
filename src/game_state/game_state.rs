//! Complete position snapshot.
//!
//! `GameState` bundles the board with every piece of mutable rule state
//! (turn, castling rights, en-passant target, clocks). It is a `Copy` value:
//! applying a move yields a new snapshot and never edits the old one, which is
//! what history, undo and the networked peers rely on.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            turn: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    /// The standard initial position, White to move.
    pub fn new_game() -> Self {
        // The constant is covered by tests; falling back keeps this infallible.
        parse_fen(STARTING_POSITION_FEN).unwrap_or_default()
    }

    /// Parses and validates a caller-supplied position.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    /// Checks the structural invariants the rules engine depends on.
    ///
    /// Positions built by applying legal moves always pass; this guards the
    /// entry points that accept positions from outside (FEN, the network).
    pub fn validate(&self) -> ChessResult<()> {
        let white_king = self.board.find_king(Color::White)?;
        let black_king = self.board.find_king(Color::Black)?;

        let back_ranks = 0xFF00_0000_0000_00FFu64;
        for color in Color::ALL {
            if self.board.pieces_of(color, PieceKind::Pawn) & back_ranks != 0 {
                return Err(ChessError::InvariantViolation(format!(
                    "{color} pawn on the first or last rank"
                )));
            }
        }

        let waiting_king = match self.turn {
            Color::White => black_king,
            Color::Black => white_king,
        };
        if is_square_attacked(&self.board, waiting_king, self.turn) {
            return Err(ChessError::InvariantViolation(format!(
                "{} king is in check while {} is to move",
                self.turn.opposite(),
                self.turn
            )));
        }

        Ok(())
    }
}
