//! Crate root module declarations for the Plum Duel two-player chess program.
//!
//! The rules engine (game state, move generation, game status) is pure and
//! synchronous. The session layer on top of it routes moves between the
//! console and a network peer, and owns configuration, logging and the move
//! log.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod attacks;
    pub mod chess_move;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_king;
    pub mod perft;
    pub mod piece_destinations;
}

pub mod game {
    pub mod game;
    pub mod game_status;
}

pub mod session {
    pub mod config;
    pub mod console;
    pub mod coordinator;
    pub mod move_log;
    pub mod protocol;
    pub mod transport;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}
