mod app;
mod handler;
mod tui;
mod ui;

use std::path::Path;

use anyhow::{Context, Result};
use portfolio_core::Config;
use tracing::info;

use crate::app::App;
use crate::tui::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_file_logging(&Config::config_dir()?)?;

    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let mut events = EventHandler::new();
    let mut app = App::new(&config, events.sender());
    info!(relay = app.client.endpoint(), "terminal started");

    let result = run(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    info!("terminal closed");
    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }
    }
    Ok(())
}

/// Log to a file; stdout and stderr belong to the terminal UI.
fn init_file_logging(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory '{}'", dir.display()))?;

    let log_path = dir.join("terminal.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file '{}'", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    Ok(())
}
