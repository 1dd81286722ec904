//! Line-oriented console front-end.
//!
//! Reads commands from an async line source, drives a `SessionCoordinator`
//! and writes the board and messages to `out`. In networked mode the same
//! loop also services the peer connection.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::errors::{SessionError, SessionResult};
use crate::game::game_status::GameStatus;
use crate::game_state::chess_types::{Color, Square};
use crate::session::config::{Mode, SessionConfig};
use crate::session::coordinator::{RemoteOutcome, SessionCoordinator};
use crate::session::protocol::PeerMessage;
use crate::session::transport::PeerConnection;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::render_game_state::render_for;

const HELP: &str = "\
commands:
  <move>        play a move in coordinate notation, e.g. e2e4 or e7e8q
  moves [sq]    list legal moves, optionally only those from one square
  board         redraw the board
  fen           print the current position as FEN
  undo          take back the last move (local games only)
  help          show this text
  quit          leave the game";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Play(String),
    Moves(Option<Square>),
    Board,
    Fen,
    Undo,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            return ConsoleCommand::Empty;
        };
        match cmd.to_ascii_lowercase().as_str() {
            "quit" | "exit" => ConsoleCommand::Quit,
            "help" | "?" => ConsoleCommand::Help,
            "board" => ConsoleCommand::Board,
            "fen" => ConsoleCommand::Fen,
            "undo" => ConsoleCommand::Undo,
            "moves" => match parts.next() {
                None => ConsoleCommand::Moves(None),
                Some(square) => match algebraic_to_square(square) {
                    Ok(square) => ConsoleCommand::Moves(Some(square)),
                    Err(_) => ConsoleCommand::Unknown(line.trim().to_owned()),
                },
            },
            _ if parts.next().is_none() => ConsoleCommand::Play(cmd.to_owned()),
            _ => ConsoleCommand::Unknown(line.trim().to_owned()),
        }
    }
}

/// Runs the session selected by `config.mode` on stdin and stdout.
pub async fn run(config: &SessionConfig) -> SessionResult<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    match config.mode {
        Mode::Local => {
            let mut session = SessionCoordinator::local(config)?;
            run_local(&mut session, stdin, &mut stdout).await
        }
        Mode::Server => {
            let mut conn = PeerConnection::listen(config.address()).await?;
            writeln!(stdout, "opponent connected from {}", conn.peer_addr())?;
            let color = config.color.resolve();
            let mut session = SessionCoordinator::networked(config, color)?;
            info!(%color, "playing as server");
            conn.send(&session.hello()?).await?;
            run_networked(&mut session, &mut conn, stdin, &mut stdout).await
        }
        Mode::Client => {
            let mut conn = PeerConnection::connect(config.address()).await?;
            writeln!(stdout, "connected to {}", conn.peer_addr())?;
            let hello = conn
                .recv()
                .await?
                .ok_or_else(|| SessionError::Protocol("server closed before greeting".to_owned()))?;
            let mut session = SessionCoordinator::from_hello(config, &hello)?;
            info!(color = ?session.local_color(), "playing as client");
            run_networked(&mut session, &mut conn, stdin, &mut stdout).await
        }
    }
}

/// Both colors from one input; ends on `quit`, end of input or game over.
pub async fn run_local<R, W>(session: &mut SessionCoordinator, input: R, out: &mut W) -> SessionResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    show(session, out)?;
    if session.game().is_over()? {
        return Ok(());
    }

    while let Some(line) = lines.next_line().await? {
        match ConsoleCommand::parse(&line) {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Play(text) => match session.submit_local(&text) {
                Ok(outcome) => {
                    show(session, out)?;
                    if outcome.status.is_terminal() {
                        break;
                    }
                }
                Err(err) if err.is_recoverable() => writeln!(out, "{err}")?,
                Err(err) => return Err(err),
            },
            ConsoleCommand::Undo => match session.undo()? {
                Some(mv) => {
                    writeln!(out, "took back {mv}")?;
                    show(session, out)?;
                }
                None => writeln!(out, "nothing to undo")?,
            },
            other => answer(session, other, out)?,
        }
    }
    Ok(())
}

/// One local color against a peer.
pub async fn run_networked<R, W>(
    session: &mut SessionCoordinator,
    conn: &mut PeerConnection,
    input: R,
    out: &mut W,
) -> SessionResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    show(session, out)?;
    if session.game().is_over()? {
        say_goodbye(conn).await;
        return Ok(());
    }

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    say_goodbye(conn).await;
                    return Ok(());
                };
                match ConsoleCommand::parse(&line) {
                    ConsoleCommand::Quit => {
                        say_goodbye(conn).await;
                        return Ok(());
                    }
                    ConsoleCommand::Play(text) => match session.submit_local(&text) {
                        Ok(outcome) => {
                            if let Some(frame) = &outcome.outbound {
                                conn.send(frame).await?;
                            }
                            show(session, out)?;
                            if outcome.status.is_terminal() {
                                say_goodbye(conn).await;
                                return Ok(());
                            }
                        }
                        Err(err) if err.is_recoverable() => writeln!(out, "{err}")?,
                        Err(err) => return Err(err),
                    },
                    ConsoleCommand::Undo => writeln!(out, "undo is not available in networked games")?,
                    other => answer(session, other, out)?,
                }
            }
            frame = conn.recv() => {
                let Some(message) = frame? else {
                    if session.game().is_over()? {
                        return Ok(());
                    }
                    return Err(SessionError::Protocol("peer disconnected mid-game".to_owned()));
                };
                match session.receive_remote(message)? {
                    RemoteOutcome::Applied { mv, status } => {
                        writeln!(out, "opponent played {mv}")?;
                        show(session, out)?;
                        if status.is_terminal() {
                            say_goodbye(conn).await;
                            return Ok(());
                        }
                    }
                    RemoteOutcome::Rejected { reason, reply } => {
                        conn.send(&reply).await?;
                        return Err(SessionError::Protocol(format!("peer sent a bad move: {reason}")));
                    }
                    RemoteOutcome::Closed => {
                        writeln!(out, "opponent left the game")?;
                        return Ok(());
                    }
                }
            }
        }
    }
}

async fn say_goodbye(conn: &mut PeerConnection) {
    // The peer may already be gone once the game has ended.
    if let Err(err) = conn.send(&PeerMessage::Goodbye).await {
        debug!(%err, "goodbye not delivered");
    }
}

fn answer<W: Write>(session: &SessionCoordinator, command: ConsoleCommand, out: &mut W) -> SessionResult<()> {
    match command {
        ConsoleCommand::Moves(from) => {
            let moves = match from {
                Some(square) => session.game().legal_moves_from(square)?,
                None => session.game().legal_moves()?,
            };
            let texts: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
            if texts.is_empty() {
                writeln!(out, "no legal moves")?;
            } else {
                writeln!(out, "{}", texts.join(" "))?;
            }
        }
        ConsoleCommand::Board => show(session, out)?,
        ConsoleCommand::Fen => writeln!(out, "{}", session.game().state().to_fen())?,
        ConsoleCommand::Help => writeln!(out, "{HELP}")?,
        ConsoleCommand::Unknown(text) => writeln!(out, "unknown command '{text}' (try 'help')")?,
        ConsoleCommand::Empty => {}
        ConsoleCommand::Play(_) | ConsoleCommand::Undo | ConsoleCommand::Quit => {}
    }
    Ok(())
}

fn show<W: Write>(session: &SessionCoordinator, out: &mut W) -> SessionResult<()> {
    let game = session.game();
    let perspective = session.local_color().unwrap_or(Color::White);
    writeln!(out, "{}", render_for(game.state(), perspective))?;

    let turn = game.turn();
    match game.status()? {
        GameStatus::InProgress { in_check } => {
            let check = if in_check { ", in check" } else { "" };
            let whose = match session.local_color() {
                Some(color) if color == turn => " (you)",
                Some(_) => " (opponent)",
                None => "",
            };
            writeln!(out, "{turn} to move{whose}{check}")?;
        }
        finished => writeln!(out, "game over: {finished}")?,
    }
    out.flush()?;
    Ok(())
}
