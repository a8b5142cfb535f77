//! ratatui rendering of the picker.

use ratatui::Frame;
use ratatui::layout::Rect;

pub mod pages;
pub mod state;

/// A trait for UI pages that enforces a standard rendering interface.
pub trait Page {
    /// Renders a page in the provided frame and area.
    fn render(&mut self, f: &mut Frame, area: Rect);
}
