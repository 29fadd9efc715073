#[macro_use]
mod logging;

mod api;
mod app;
mod emoji;
mod store;
mod terminal;
mod text_wrapper;
mod ui;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};

use api::ApiClient;
use app::App;
use store::{ActionLogger, Store};

/// murmur - a keyboard-driven client for a decentralized social feed
#[derive(Parser)]
#[command(name = "murmur")]
#[command(about = "A terminal client for a web3 social feed")]
#[command(version)]
struct Cli {
    /// Relay URL to connect to
    #[arg(long, short, env = "MURMUR_RELAY_URL")]
    relay: Option<String>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,

    /// Wallet session token
    #[arg(long, env = "MURMUR_SESSION_TOKEN")]
    session_token: Option<String>,
}

// Load environment variables from .env file
// This allows MURMUR_RELAY_URL and other config to be set without command-line args
fn load_env() {
    let _ = dotenv::dotenv();
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be in the process environment before clap parses, or the
    // env-fallback attributes on Cli never see it
    load_env();

    let cli = Cli::parse();

    let log_config = if cli.verbose {
        logging::LogConfig::verbose()
    } else {
        logging::LogConfig::default()
    };
    logging::init_logging(&log_config)?;

    let relay_url = cli
        .relay
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    log::info!("Connecting to relay at {}", relay_url);

    let mut client = ApiClient::new(relay_url);
    client.set_session_token(cli.session_token);

    let store = if cli.verbose {
        Store::with_logger(ActionLogger::new())
    } else {
        Store::new()
    };

    let mut app = App::with_store(Box::new(client), store);
    app.log_config = log_config;

    let mut tui = terminal::init()?;

    app.connect_session().await?;
    app.load_feed().await?;

    let run_result = run(&mut tui, &mut app).await;

    terminal::restore()?;
    run_result
}

async fn run(tui: &mut terminal::Tui, app: &mut App) -> Result<()> {
    while app.running {
        tui.draw(|frame| ui::render(app, frame))?;

        // Handle events with timeout so the status message can expire
        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;

            // Filter out mouse events - keyboard-only navigation
            if matches!(event, Event::Mouse(_)) {
                continue;
            }

            if let Event::Key(key) = event {
                app::handlers::handle_key_event(app, key).await?;
            }
        }

        app.tick();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_falls_back_to_process_env() {
        // Vars already in the environment when parsing starts (the point
        // of loading .env first) must reach the CLI.
        std::env::set_var("MURMUR_RELAY_URL", "http://relay.test:9999");
        std::env::set_var("MURMUR_SESSION_TOKEN", "tok-123");

        let cli = Cli::try_parse_from(["murmur"]).unwrap();
        assert_eq!(cli.relay.as_deref(), Some("http://relay.test:9999"));
        assert_eq!(cli.session_token.as_deref(), Some("tok-123"));

        // Explicit flags still win over the environment.
        let cli = Cli::try_parse_from(["murmur", "--relay", "http://other:1"]).unwrap();
        assert_eq!(cli.relay.as_deref(), Some("http://other:1"));

        std::env::remove_var("MURMUR_RELAY_URL");
        std::env::remove_var("MURMUR_SESSION_TOKEN");
    }
}
