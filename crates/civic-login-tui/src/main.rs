//! Civic Login TUI - municipal portal sign-in in the terminal
//!
//! Drives the two-step login flow (credentials, then a six-digit one-time
//! token) against the stub authenticators shipped with `civic-login`.
//!
//! Logs go to stderr; redirect them to keep the screen clean:
//! `civic-login-tui 2>login.log`

use std::io;
use std::panic;

use anyhow::Result;
use civic_login::LoginConfig;
use civic_login_tui::{logging, App};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::{fmt, prelude::*};

/// Application entry point with panic handling for terminal restoration
#[tokio::main]
async fn main() -> Result<()> {
    // Set up panic hook to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
        original_hook(panic_info);
    }));

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(logging::env_filter())
        .init();

    let config = LoginConfig::load();

    let result = run_app(config).await;

    if let Err(e) = &result {
        tracing::error!("Application error: {}", e);
    }

    result
}

/// Main application runner
async fn run_app(config: LoginConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run event loop
    let mut app = App::new(config);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}
