//! Plain-text record of a game, one line per applied move.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::game::game_status::GameStatus;
use crate::game_state::chess_types::Color;
use crate::moves::chess_move::Move;

#[derive(Debug)]
pub struct MoveLog {
    path: PathBuf,
    file: File,
}

impl MoveLog {
    /// Creates `<dir>/game-<timestamp>.log` and writes the header.
    pub fn create(dir: &Path, start_fen: &str) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let now = Local::now();
        let path = dir.join(format!("game-{}.log", now.format("%Y%m%d-%H%M%S%.3f")));
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "# started {}", now.to_rfc3339())?;
        writeln!(file, "# fen {start_fen}")?;
        Ok(Self { path, file })
    }

    pub fn record(&mut self, move_number: u16, color: Color, mv: Move, status: GameStatus) -> io::Result<()> {
        writeln!(self.file, "{move_number}. {color} {mv} ({status})")?;
        self.file.flush()
    }

    /// Free-form comment line, e.g. a take-back.
    pub fn note(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.file, "# {text}")?;
        self.file.flush()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
