use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::{Event, KeyEventKind};
use tokio::sync::mpsc;

use crate::app::Navigator;
use crate::runtime::key_handler;
use crate::ui::state::EntryCursor;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Reads terminal events on a dedicated thread until `shutdown` is set or
/// the receiver is dropped.
pub(crate) fn spawn_event_reader(
    event_tx: mpsc::UnboundedSender<Event>,
    shutdown: Arc<AtomicBool>,
) {
    std::thread::spawn(move || {
        while !shutdown.load(Ordering::Relaxed) {
            match crossterm::event::poll(EVENT_POLL_INTERVAL) {
                Ok(true) => {
                    if let Ok(event) = crossterm::event::read()
                        && event_tx.send(event).is_err()
                    {
                        break;
                    }
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });
}

/// Routes one terminal event. Only key presses act; resizes are picked up
/// by the next draw.
pub(crate) fn process_event(navigator: &mut Navigator, cursor: &mut EntryCursor, event: Event) {
    if let Event::Key(key) = event
        && key.kind == KeyEventKind::Press
    {
        key_handler::handle_key_event(navigator, cursor, key);
    }
}
