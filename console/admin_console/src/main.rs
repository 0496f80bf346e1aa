//! Blue carbon registry admin console: entry point.
//!
//! Reads operator commands from stdin, one per line, and prints a JSON
//! snapshot of the console after each one. The satellite map runs on the
//! headless substrate; logs go to stderr so stdout stays machine-readable.

mod badge;
mod config;
mod errors;
mod events;
mod headless;
mod input;
mod modal;
mod overlay;
mod runtime;
mod screens;
mod shell;
mod surface;

#[cfg(test)]
mod test_overlay;
#[cfg(test)]
mod test_runtime;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::Config;
use runtime::{Console, ConsoleEvent};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    if config.map_access_token.is_none() {
        info!("MAP_ACCESS_TOKEN not set, the satellite map will show its placeholder");
    }

    let (tx, rx) = mpsc::unbounded_channel();

    // ─── Operator input ───────────────────────────────────
    let input = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if input.send(ConsoleEvent::Input(line)).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    let _ = input.send(ConsoleEvent::InputClosed);
                    break;
                }
                Err(e) => {
                    error!("Failed to read input: {e}");
                    let _ = input.send(ConsoleEvent::InputClosed);
                    break;
                }
            }
        }
    });

    // ─── Console ──────────────────────────────────────────
    let mut console = Console::new(&config, tx);
    console.navigate(config.initial_view);
    info!(view = config.initial_view.as_str(), "Console ready");

    let mut stdout = std::io::stdout().lock();
    runtime::run(console, rx, &mut stdout).await?;

    Ok(())
}
