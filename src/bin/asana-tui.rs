//! Asana board sections TUI
//!
//! A terminal user interface for viewing and rearranging the sections of a
//! project. Reads its connection settings from `ASANA_*` environment
//! variables; set `ASANA_TUI_LOG` to a file path to capture debug logs.

use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::event;
use tracing_subscriber::EnvFilter;

use asana_client::tui::{handle_event, process_state, AppState, TerminalSession};

fn setup_logging() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(path) = std::env::var("ASANA_TUI_LOG") else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("asana_client=debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging()?;

    let mut terminal = TerminalSession::start()?;
    let mut state = AppState::new();

    loop {
        terminal.draw(&state)?;

        // Process any state transitions (e.g., loading -> loaded)
        process_state(&mut state);

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            handle_event(event, &mut state);
        }
    }

    terminal.finish()?;
    Ok(())
}
