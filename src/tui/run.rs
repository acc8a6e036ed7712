//! TUI entry point and terminal setup.

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mockable::DefaultClock;
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::{info, warn};

use crate::state::TodoState;
use crate::tui::app::App;

/// Initialise the terminal, run the task list until the user quits, and
/// restore the terminal even when setup or the loop fails.
pub fn run_tui(state: TodoState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut terminal = match enter_terminal() {
        Ok(terminal) => terminal,
        Err(err) => {
            if let Err(restore_err) = leave_terminal(&mut io::stdout()) {
                warn!(error = %restore_err, "failed to restore terminal after setup error");
            }
            return Err(err);
        }
    };

    let mut app = App::new(state, DefaultClock);
    let result = app.run(&mut terminal);
    info!(
        tasks = app.state().store().len(),
        completed = app.state().store().completed_count(),
        "ui closed"
    );

    leave_terminal(terminal.backend_mut())?;
    terminal.show_cursor()?;

    result
}

fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn leave_terminal(out: &mut impl io::Write) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, DisableMouseCapture)
}
