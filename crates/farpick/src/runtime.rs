//! Terminal driver embedding the [`Navigator`] in a ratatui picker page.
//!
//! The page is drawn on stderr and redrawn after every terminal event and
//! every request result. The loop never blocks on a request: key presses
//! and request results are handled as they arrive.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use crate::app::{Navigator, PickerCallbacks, PickerOutcome};
use crate::config::{Cli, ConfigError};
use crate::domain::Selection;
use crate::infra::http::HttpFilesTransport;
use crate::ui::Page;
use crate::ui::pages::picker::PickerPage;
use crate::ui::state::EntryCursor;

mod event;
mod key_handler;
mod terminal;

pub(crate) type PickerTerminal = Terminal<CrosstermBackend<io::Stderr>>;

/// Fatal failure while starting or driving the picker.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialize http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// Runs the picker configured by `cli`, then writes the selection to
/// stdout.
///
/// Exits with success after a selection and with failure after dismissal.
///
/// # Errors
/// Returns an error when the configuration is invalid, the HTTP client
/// cannot be built, or terminal I/O fails.
pub async fn launch(cli: Cli) -> Result<ExitCode, RunError> {
    let transport = HttpFilesTransport::new(cli.transport_config()?)?;
    let (callbacks, outcome_rx) = PickerCallbacks::channel();
    let navigator = Navigator::new(Arc::new(transport), cli.navigator_config(), callbacks);

    match run(navigator, outcome_rx).await? {
        PickerOutcome::Completed(selection) => {
            debug!(path = %selection.path(), "selection made");
            let mut stdout = io::stdout().lock();
            write_selection(&mut stdout, &selection)?;
            stdout.flush()?;

            Ok(ExitCode::SUCCESS)
        }
        PickerOutcome::Dismissed => Ok(ExitCode::FAILURE),
    }
}

/// Drives `navigator` on the terminal until it completes or is dismissed.
///
/// The terminal is restored before this returns.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub async fn run(
    mut navigator: Navigator,
    mut outcome_rx: mpsc::UnboundedReceiver<PickerOutcome>,
) -> io::Result<PickerOutcome> {
    let _terminal_guard = terminal::TerminalGuard;
    let mut terminal = terminal::setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let shutdown = Arc::new(AtomicBool::new(false));
    event::spawn_event_reader(event_tx, Arc::clone(&shutdown));

    navigator.initialize();
    let outcome =
        run_main_loop(&mut navigator, &mut outcome_rx, &mut terminal, &mut event_rx).await;

    shutdown.store(true, Ordering::Relaxed);
    terminal.show_cursor()?;

    outcome
}

async fn run_main_loop(
    navigator: &mut Navigator,
    outcome_rx: &mut mpsc::UnboundedReceiver<PickerOutcome>,
    terminal: &mut PickerTerminal,
    event_rx: &mut mpsc::UnboundedReceiver<crossterm::event::Event>,
) -> io::Result<PickerOutcome> {
    let mut cursor = EntryCursor::default();

    loop {
        if let Ok(outcome) = outcome_rx.try_recv() {
            return Ok(outcome);
        }

        cursor.sync(navigator.state());
        render_frame(navigator, &cursor, terminal)?;

        tokio::select! {
            biased;
            terminal_event = event_rx.recv() => match terminal_event {
                Some(terminal_event) => {
                    event::process_event(navigator, &mut cursor, terminal_event);
                }
                // The event reader stopped; nothing can be picked anymore.
                None => navigator.dismiss(),
            },
            Some(navigator_event) = navigator.next_event() => {
                navigator.apply_event(navigator_event);
            }
        }
    }
}

fn render_frame(
    navigator: &Navigator,
    cursor: &EntryCursor,
    terminal: &mut PickerTerminal,
) -> io::Result<()> {
    terminal.draw(|frame| {
        let area = frame.area();
        PickerPage::new(navigator.state(), navigator.mode(), cursor.selected_index())
            .render(frame, area);
    })?;

    Ok(())
}

/// Writes the directory path on its own line, or the file content verbatim.
fn write_selection(output: &mut impl Write, selection: &Selection) -> io::Result<()> {
    match selection {
        Selection::Directory { .. } => writeln!(output, "{}", selection.path()),
        Selection::File { content, .. } => output.write_all(content.as_bytes()),
    }
}
