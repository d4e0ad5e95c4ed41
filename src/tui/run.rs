//! TUI entry point and terminal setup.

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::info;

use crate::auth::AuthGate;
use crate::error::Result;
use crate::store::Store;
use crate::tui::app::App;

/// Initialise the terminal, run the dashboard until the user quits and
/// restore the terminal even when the loop fails.
pub fn run_tui(store: Store, auth: AuthGate) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("Dashboard started");
    let mut app = App::new(store, auth);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    info!(version = app.store().version(), "Dashboard closed");

    result?;
    Ok(())
}
