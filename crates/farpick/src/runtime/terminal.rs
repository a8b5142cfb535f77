use std::io;

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::runtime::PickerTerminal;

/// Restores terminal state on all exit paths after raw mode is enabled.
///
/// The selection is written to stdout only after this guard is dropped, so
/// the caller's shell sees it on a restored terminal.
pub(crate) struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stderr = io::stderr();
        let _ = disable_raw_mode();
        let _ = execute!(stderr, LeaveAlternateScreen, Show);
    }
}

/// Enables raw mode and enters the alternate screen on stderr, leaving
/// stdout free for the selection.
pub(crate) fn setup_terminal() -> io::Result<PickerTerminal> {
    enable_raw_mode()?;

    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr);

    Terminal::new(backend)
}
