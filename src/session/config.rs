//! Session configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional JSON file, then command-line flags. The result is handed to the
//! coordinator explicitly; nothing here is global.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{SessionError, SessionResult};
use crate::game_state::chess_types::Color;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5555;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Both colors at one keyboard.
    #[default]
    Local,
    /// Listen for a peer and play the configured color.
    Server,
    /// Connect to a server and play whatever color it leaves.
    Client,
}

impl std::str::FromStr for Mode {
    type Err = SessionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Mode::Local),
            "server" => Ok(Mode::Server),
            "client" => Ok(Mode::Client),
            other => Err(SessionError::Config(format!("unknown mode '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    White,
    Black,
    Random,
}

impl ColorChoice {
    pub fn resolve(self) -> Color {
        self.resolve_with(&mut rand::rng())
    }

    pub fn resolve_with<R: Rng + ?Sized>(self, rng: &mut R) -> Color {
        match self {
            ColorChoice::White => Color::White,
            ColorChoice::Black => Color::Black,
            ColorChoice::Random => {
                if rng.random_bool(0.5) {
                    Color::White
                } else {
                    Color::Black
                }
            }
        }
    }
}

impl std::str::FromStr for ColorChoice {
    type Err = SessionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(ColorChoice::White),
            "black" | "b" => Ok(ColorChoice::Black),
            "random" => Ok(ColorChoice::Random),
            other => Err(SessionError::Config(format!("unknown color '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: Mode,
    pub host: String,
    pub port: u16,
    pub color: ColorChoice,
    /// Directory for per-game move logs; no log when unset.
    pub move_log_dir: Option<PathBuf>,
    /// Starting position; the standard one when unset.
    pub start_fen: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Local,
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            color: ColorChoice::White,
            move_log_dir: None,
            start_fen: None,
        }
    }
}

impl SessionConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn from_json(text: &str) -> SessionResult<Self> {
        serde_json::from_str(text).map_err(|err| SessionError::Config(format!("bad config file: {err}")))
    }

    pub fn load(path: &Path) -> SessionResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|err| SessionError::Config(format!("cannot read {}: {err}", path.display())))?;
        Self::from_json(&text)
    }

    /// Builds a config from command-line arguments (program name excluded).
    ///
    /// `--config FILE` is read first wherever it appears, so the remaining
    /// flags always override the file.
    pub fn from_args<I, S>(args: I) -> SessionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        let mut config = match flag_value(&args, "--config")? {
            Some(path) => Self::load(Path::new(path))?,
            None => Self::default(),
        };

        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            let mut value = || {
                iter.next()
                    .cloned()
                    .ok_or_else(|| SessionError::Config(format!("{flag} needs a value")))
            };
            match flag.as_str() {
                "--config" => {
                    value()?;
                }
                "--mode" => config.mode = value()?.parse()?,
                "--host" => config.host = value()?,
                "--port" => {
                    let raw = value()?;
                    config.port = raw
                        .parse()
                        .map_err(|_| SessionError::Config(format!("bad port '{raw}'")))?;
                }
                "--color" => config.color = value()?.parse()?,
                "--move-log" => config.move_log_dir = Some(PathBuf::from(value()?)),
                "--fen" => config.start_fen = Some(value()?),
                other => return Err(SessionError::Config(format!("unknown argument '{other}'"))),
            }
        }
        Ok(config)
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> SessionResult<Option<&'a str>> {
    match args.iter().position(|arg| arg == flag) {
        None => Ok(None),
        Some(index) => args
            .get(index + 1)
            .map(|value| Some(value.as_str()))
            .ok_or_else(|| SessionError::Config(format!("{flag} needs a value"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn defaults_match_documented_values() {
        let config = SessionConfig::default();
        assert_eq!(config.address(), "127.0.0.1:5555");
        assert_eq!(config.mode, Mode::Local);
        assert_eq!(config.color, ColorChoice::White);
        assert_eq!(SessionConfig::from_args(Vec::<String>::new()).ok(), Some(config));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = SessionConfig::from_json(r#"{ "mode": "server", "port": 6000, "color": "random" }"#)
            .expect("partial config should load");
        assert_eq!(config.mode, Mode::Server);
        assert_eq!(config.port, 6000);
        assert_eq!(config.color, ColorChoice::Random);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.move_log_dir, None);
    }

    #[test]
    fn bad_json_is_a_config_error() {
        assert!(matches!(SessionConfig::from_json("{ mode: "), Err(SessionError::Config(_))));
        assert!(matches!(
            SessionConfig::from_json(r#"{ "mode": "carrier-pigeon" }"#),
            Err(SessionError::Config(_))
        ));
    }

    #[test]
    fn flags_are_parsed() {
        let config = SessionConfig::from_args([
            "--mode", "client", "--host", "10.0.0.2", "--port", "7000", "--color", "black", "--move-log", "logs",
        ])
        .expect("flags should parse");
        assert_eq!(config.mode, Mode::Client);
        assert_eq!(config.address(), "10.0.0.2:7000");
        assert_eq!(config.color, ColorChoice::Black);
        assert_eq!(config.move_log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn bad_flags_are_rejected() {
        assert!(matches!(SessionConfig::from_args(["--port", "http"]), Err(SessionError::Config(_))));
        assert!(matches!(SessionConfig::from_args(["--mode"]), Err(SessionError::Config(_))));
        assert!(matches!(SessionConfig::from_args(["--volume", "11"]), Err(SessionError::Config(_))));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = std::env::temp_dir().join(format!("plum_duel_config_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("session.json");
        fs::write(&path, r#"{ "mode": "server", "port": 6001 }"#).expect("write config");

        let path_arg = path.to_string_lossy().into_owned();
        let config = SessionConfig::from_args(["--port", "6002", "--config", path_arg.as_str()])
            .expect("config should load");
        assert_eq!(config.mode, Mode::Server);
        assert_eq!(config.port, 6002);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn random_color_uses_the_supplied_rng() {
        let mut rng = StdRng::seed_from_u64(7);
        let picks: Vec<Color> = (0..32).map(|_| ColorChoice::Random.resolve_with(&mut rng)).collect();
        assert!(picks.contains(&Color::White));
        assert!(picks.contains(&Color::Black));
        assert_eq!(ColorChoice::Black.resolve(), Color::Black);
    }
}
