/// Terminal setup and teardown for the lifetime of a game session
use std::io::stdout;

use anyhow::{Context as _, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::DefaultTerminal;
use tracing::warn;

/// Raw mode, alternate screen and mouse capture, undone on drop
pub struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        let terminal = ratatui::try_init().context("failed to initialise terminal")?;
        if let Err(e) = crossterm::execute!(stdout(), EnableMouseCapture) {
            ratatui::restore();
            return Err(e).context("failed to enable mouse capture");
        }
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = crossterm::execute!(stdout(), DisableMouseCapture) {
            warn!(error = %e, "failed to disable mouse capture");
        }
        ratatui::restore();
    }
}
