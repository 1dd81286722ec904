use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use plum_duel::session::config::SessionConfig;
use plum_duel::session::console;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match SessionConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            eprintln!(
                "usage: plum_duel [--mode local|server|client] [--host H] [--port P] \
                 [--color white|black|random] [--config FILE] [--move-log DIR] [--fen FEN]"
            );
            return ExitCode::from(2);
        }
    };

    match console::run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "session ended with an error");
            ExitCode::FAILURE
        }
    }
}
