//! Peer messages.
//!
//! Each message travels as one line of JSON. Moves are carried as wire text
//! and re-validated by the receiver; the protocol itself knows nothing about
//! chess rules.

use serde::{Deserialize, Serialize};

use crate::errors::{SessionError, SessionResult};
use crate::game_state::chess_types::Color;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PeerMessage {
    /// Server → client, once, right after accepting. `color` is the server's.
    Hello { color: Color, fen: String },
    /// A move the sender has already applied to its own game.
    Move { mv: String },
    /// Reply to a move the receiver could not accept.
    Reject { reason: String },
    Goodbye,
}

impl PeerMessage {
    /// One frame, newline included.
    pub fn encode(&self) -> SessionResult<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }

    pub fn decode(line: &str) -> SessionResult<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(SessionError::Protocol("empty frame".to_owned()));
        }
        Ok(serde_json::from_str(trimmed)?)
    }
}
