//! Error types shared by the rules engine and the session layer.
//!
//! `ChessError` covers everything the engine can report about a position or a
//! move. `SessionError` wraps it together with transport, protocol and
//! configuration failures raised at the coordinator boundary.
//!
//! Recovery policy:
//! - `MalformedMove` and `IllegalMove` are recoverable; the caller asks for a
//!   different move (or rejects the peer).
//! - `InvalidFen` is recoverable at load time; nothing was constructed.
//! - `InvariantViolation` means the position itself cannot be reasoned about
//!   (for example a missing king) and ends the session.

use std::io;

use thiserror::Error;

/// Failures reported by the rules engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Wire or console text that does not describe a move at all.
    #[error("malformed move '{0}'")]
    MalformedMove(String),

    /// A well-formed move that the current rules do not allow.
    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: String, reason: String },

    /// The position breaks a structural invariant (king count, pawn rank, ...).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A FEN string that could not be parsed into a position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

impl ChessError {
    pub fn illegal(mv: impl ToString, reason: impl Into<String>) -> Self {
        ChessError::IllegalMove {
            mv: mv.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the session may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ChessError::InvariantViolation(_))
    }
}

pub type ChessResult<T> = Result<T, ChessError>;

/// Failures raised while running a local or networked session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Chess(#[from] ChessError),

    #[error("transport error: {0}")]
    Io(#[from] io::Error),

    #[error("could not encode or decode peer message: {0}")]
    Codec(#[from] serde_json::Error),

    /// The move was entered for a color this side does not control.
    #[error("it is not your turn ({0} to move)")]
    NotYourTurn(crate::game_state::chess_types::Color),

    #[error("the game is already over")]
    GameOver,

    /// The peer broke the protocol (bad frame order, illegal move, ...).
    #[error("protocol violation: {0}")]
    Protocol(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl SessionError {
    /// Whether the user can simply retry with different input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SessionError::Chess(err) => err.is_recoverable(),
            SessionError::NotYourTurn(_) | SessionError::GameOver => true,
            _ => false,
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
