//! Routes local input and peer messages into a single `Game`.
//!
//! The coordinator owns the game and decides who may move. In local mode
//! both colors are entered at this keyboard; in networked mode one color is
//! local and the other arrives as `PeerMessage::Move` frames, each of which is
//! parsed and validated exactly like local input.

use tracing::{debug, info, warn};

use crate::errors::{ChessError, SessionError, SessionResult};
use crate::game::game::Game;
use crate::game::game_status::GameStatus;
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::moves::chess_move::Move;
use crate::session::config::SessionConfig;
use crate::session::move_log::MoveLog;
use crate::session::protocol::PeerMessage;

/// Result of a locally entered move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub mv: Move,
    pub status: GameStatus,
    /// Frame to send to the peer; `None` in local mode.
    pub outbound: Option<PeerMessage>,
}

/// Result of handling one frame from the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    Applied { mv: Move, status: GameStatus },
    /// The peer's move was refused. `reply` must be sent before the session
    /// is torn down.
    Rejected { reason: String, reply: PeerMessage },
    /// The peer said goodbye.
    Closed,
}

#[derive(Debug)]
pub struct SessionCoordinator {
    game: Game,
    local_color: Option<Color>,
    move_log: Option<MoveLog>,
}

impl SessionCoordinator {
    /// Both colors are played at this keyboard.
    pub fn local(config: &SessionConfig) -> SessionResult<Self> {
        Self::build(config, None)
    }

    /// This side plays `local_color`; the peer plays the other.
    pub fn networked(config: &SessionConfig, local_color: Color) -> SessionResult<Self> {
        Self::build(config, Some(local_color))
    }

    /// Client side of the handshake: takes the color the server left free
    /// and the position it announced.
    pub fn from_hello(config: &SessionConfig, hello: &PeerMessage) -> SessionResult<Self> {
        match hello {
            PeerMessage::Hello { color, fen } => {
                let config = SessionConfig {
                    start_fen: Some(fen.clone()),
                    ..config.clone()
                };
                Self::networked(&config, color.opposite())
            }
            other => Err(SessionError::Protocol(format!("expected hello, got {other:?}"))),
        }
    }

    fn build(config: &SessionConfig, local_color: Option<Color>) -> SessionResult<Self> {
        let start = match &config.start_fen {
            Some(fen) => GameState::from_fen(fen)?,
            None => GameState::new_game(),
        };
        let move_log = match &config.move_log_dir {
            Some(dir) => {
                let log = MoveLog::create(dir, &start.to_fen())?;
                info!(path = %log.path().display(), "recording moves");
                Some(log)
            }
            None => None,
        };
        Ok(Self {
            game: Game::from_state(start),
            local_color,
            move_log,
        })
    }

    /// Handshake frame the server sends right after accepting.
    pub fn hello(&self) -> SessionResult<PeerMessage> {
        let color = self
            .local_color
            .ok_or_else(|| SessionError::Protocol("a local session has no peer to greet".to_owned()))?;
        Ok(PeerMessage::Hello {
            color,
            fen: self.game.initial_state().to_fen(),
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn local_color(&self) -> Option<Color> {
        self.local_color
    }

    pub fn is_networked(&self) -> bool {
        self.local_color.is_some()
    }

    /// Whether the side to move is entered at this keyboard.
    pub fn is_local_turn(&self) -> bool {
        self.local_color.map_or(true, |color| color == self.game.turn())
    }

    pub fn status(&self) -> SessionResult<GameStatus> {
        Ok(self.game.status()?)
    }

    /// Plays a move typed at this keyboard.
    pub fn submit_local(&mut self, text: &str) -> SessionResult<Outcome> {
        if self.game.is_over()? {
            return Err(SessionError::GameOver);
        }
        if !self.is_local_turn() {
            return Err(SessionError::NotYourTurn(self.game.turn()));
        }

        let (mv, status) = self.play(text)?;
        let outbound = self.is_networked().then(|| PeerMessage::Move { mv: mv.to_string() });
        Ok(Outcome { mv, status, outbound })
    }

    /// Handles one frame from the peer.
    pub fn receive_remote(&mut self, message: PeerMessage) -> SessionResult<RemoteOutcome> {
        let remote_color = match self.local_color {
            Some(local) => local.opposite(),
            None => return Err(SessionError::Protocol("local session received a peer message".to_owned())),
        };

        match message {
            PeerMessage::Move { mv } => {
                if self.game.is_over()? {
                    return Ok(self.reject(&mv, "the game is already over".to_owned()));
                }
                if self.game.turn() != remote_color {
                    return Ok(self.reject(&mv, format!("it is {}'s turn", self.game.turn())));
                }
                match self.play(&mv) {
                    Ok((mv, status)) => Ok(RemoteOutcome::Applied { mv, status }),
                    Err(SessionError::Chess(err)) if err.is_recoverable() => Ok(self.reject(&mv, err.to_string())),
                    Err(err) => Err(err),
                }
            }
            PeerMessage::Reject { reason } => {
                warn!(%reason, "peer rejected our move");
                Err(SessionError::Protocol(format!("peer rejected our move: {reason}")))
            }
            PeerMessage::Goodbye => {
                info!("peer said goodbye");
                Ok(RemoteOutcome::Closed)
            }
            PeerMessage::Hello { .. } => Err(SessionError::Protocol("unexpected hello mid-game".to_owned())),
        }
    }

    /// Takes back the last move. Only local games allow it; a networked peer
    /// would be left on a different position.
    pub fn undo(&mut self) -> SessionResult<Option<Move>> {
        if self.is_networked() {
            return Err(SessionError::Protocol("undo is only available in local games".to_owned()));
        }
        let undone = self.game.undo();
        if let Some(mv) = undone {
            info!(%mv, "move taken back");
            if let Some(log) = self.move_log.as_mut() {
                log.note(&format!("undo {mv}"))?;
            }
        }
        Ok(undone)
    }

    fn play(&mut self, text: &str) -> SessionResult<(Move, GameStatus)> {
        let mover = self.game.turn();
        let move_number = self.game.state().fullmove_number;

        let mv = self.game.propose(text).inspect_err(|err| {
            if let ChessError::InvariantViolation(_) = err {
                warn!(%err, "position is corrupt");
            } else {
                debug!(%err, text, "move refused");
            }
        })?;
        let status = self.game.status()?;
        info!(%mover, %mv, %status, "move applied");

        if let Some(log) = self.move_log.as_mut() {
            log.record(move_number, mover, mv, status)?;
        }
        if status.is_terminal() {
            info!(%status, "game over");
        }
        Ok((mv, status))
    }

    fn reject(&self, text: &str, reason: String) -> RemoteOutcome {
        warn!(text, %reason, "rejecting peer move");
        RemoteOutcome::Rejected {
            reply: PeerMessage::Reject { reason: reason.clone() },
            reason,
        }
    }
}
