pub mod api;
pub mod app;
pub mod common;
pub mod config;
pub mod event;
pub mod pages;
pub mod tui;
pub mod ui;

use anyhow::{Context, Result};
use api::axcient::AxcientClient;
use app::App;
use config::Config;
use event::EventHandler;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE: &str = "recover-tui.log";

#[tokio::main]
async fn main() -> Result<()> {
    // The terminal belongs to ratatui, so diagnostics go to a file.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("Failed to open {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Arc::new(log_file)).with_ansi(false))
        .with(filter)
        .init();

    // Load config; without credentials there is nothing to show.
    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}", e);
        std::process::exit(1);
    });

    // Initialize API client
    let client = AxcientClient::new(config.axcient).context("Failed to create API client")?;

    // Setup terminal
    let mut terminal = tui::init()?;
    tui::install_panic_hook();

    // Create app and event handler including tick rate
    let mut app = App::new(Some(client));

    let tick_rate = Duration::from_millis(250);
    let mut events = EventHandler::new(tick_rate);

    // Run the app (async)
    let res = app.run(&mut terminal, &mut events).await;

    // Restore terminal
    tui::restore()?;

    // Print error if any
    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}
