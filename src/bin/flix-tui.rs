//! Flix TUI Application
//!
//! A terminal user interface for browsing the Flix demo catalog.

use crossterm::event;
use std::env;
use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use flix_client::tui::terminal::FlixTerminal;
use flix_client::tui::{
    handle_event, process_state, render, restore_terminal, setup_terminal, AppState,
};
use flix_client::ClientConfig;

/// Send logs to `FLIX_LOG_FILE` when set; the terminal itself belongs to
/// the UI.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(path) = env::var("FLIX_LOG_FILE") else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env("FLIX_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let config = ClientConfig::from_env();
    tracing::info!(backend = %config.backend_url, "starting flix-tui");
    let mut state = AppState::new(&config)?;

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut state);
    restore_terminal(&mut terminal)?;
    result
}

fn run(
    terminal: &mut FlixTerminal,
    state: &mut AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| render(f, &*state))?;

        process_state(state);

        if state.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            handle_event(event, state);
        }
    }
}
