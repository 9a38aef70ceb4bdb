//! Terminal shell for the backgammon engine.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod command;
mod config;
mod render;
mod session;
mod shell;

use config::Config;
use session::Session;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the board on stdout
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    info!(seed = ?config.seed, json = config.json_output, "Starting backgammon shell...");

    let mut session = Session::new(config.seed);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    shell::run(&mut session, &config, stdin.lock(), &mut stdout)
}
