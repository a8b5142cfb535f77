use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::NavigationState;
use crate::domain::{Entry, SelectionMode};
use crate::ui::Page;

const CONTENT_MARGIN: u16 = 1;
const CRUMB_SEPARATOR: &str = " > ";
const EMPTY_DIRECTORY_MESSAGE: &str = "Empty directory";
const HEADER_HEIGHT: u16 = 1;
const HIGHLIGHT_SYMBOL: &str = "> ";
const LOADING_MESSAGE: &str = "Loading...";
const ROOT_CRUMB_LABEL: &str = "/";
const STATUS_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 1;

/// Renders the remote directory listing with its breadcrumb trail.
pub struct PickerPage<'a> {
    pub mode: SelectionMode,
    pub selected_index: usize,
    pub state: &'a NavigationState,
}

impl<'a> PickerPage<'a> {
    /// Creates a picker page for one navigation snapshot.
    pub fn new(state: &'a NavigationState, mode: SelectionMode, selected_index: usize) -> Self {
        Self {
            mode,
            selected_index,
            state,
        }
    }

    /// Renders the title and the numbered breadcrumb trail.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let title = match self.mode {
            SelectionMode::Directory => "Pick a directory",
            SelectionMode::File => "Pick a file",
        };
        let mut spans = vec![
            Span::styled(
                title,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
        ];
        if self.state.has_listing() {
            spans.push(crumb_span(0, ROOT_CRUMB_LABEL));
            for (index, crumb) in self.state.breadcrumbs().iter().enumerate() {
                spans.push(Span::styled(
                    CRUMB_SEPARATOR,
                    Style::default().fg(Color::DarkGray),
                ));
                spans.push(crumb_span(index + 1, &crumb.name));
            }
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Renders the listing, or the error that replaces it.
    fn render_listing(&self, f: &mut Frame, area: Rect) {
        let title = if self.state.has_listing() {
            format!(" {} ", self.state.resolved_path)
        } else {
            " Remote files ".to_string()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title, Style::default().fg(Color::Yellow)));

        if let Some(error) = &self.state.error {
            let message = Paragraph::new(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            ))
            .wrap(Wrap { trim: true })
            .block(block);
            f.render_widget(message, area);

            return;
        }

        let entries = self.state.visible_entries();
        if entries.is_empty() {
            let placeholder = if self.state.has_listing() {
                EMPTY_DIRECTORY_MESSAGE
            } else {
                LOADING_MESSAGE
            };
            let message = Paragraph::new(Span::styled(
                placeholder,
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            f.render_widget(message, area);

            return;
        }

        let items: Vec<ListItem<'_>> = entries
            .iter()
            .map(|entry| ListItem::new(entry_span(entry, self.mode)))
            .collect();
        let mut list_state = ListState::default();
        list_state.select(Some(
            self.selected_index.min(entries.len().saturating_sub(1)),
        ));

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol(HIGHLIGHT_SYMBOL);
        f.render_stateful_widget(list, area, &mut list_state);
    }

    /// Renders the in-flight request indicator.
    fn render_status(&self, f: &mut Frame, area: Rect) {
        if !self.state.loading {
            return;
        }

        let status = Paragraph::new(LOADING_MESSAGE).style(Style::default().fg(Color::Yellow));
        f.render_widget(status, area);
    }
}

impl Page for PickerPage<'_> {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_HEIGHT),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .margin(CONTENT_MARGIN)
            .split(area);

        self.render_header(f, chunks[0]);
        self.render_listing(f, chunks[1]);
        self.render_status(f, chunks[2]);

        let at_root = self.state.has_listing() && self.state.parent_path.is_none();
        let help_message = Paragraph::new(footer_text(&footer_actions(self.mode, at_root)))
            .style(Style::default().fg(Color::Gray));
        f.render_widget(help_message, chunks[3]);
    }
}

/// Formats one breadcrumb as `[index] name`; the index is its number key.
fn crumb_span(index: usize, name: &str) -> Span<'static> {
    Span::raw(format!("[{index}] {name}"))
}

/// Styles one listing row. Files that cannot be picked are dimmed.
fn entry_span(entry: &Entry, mode: SelectionMode) -> Span<'static> {
    if entry.is_dir() {
        return Span::styled(
            format!("{}/", entry.name),
            Style::default().fg(Color::Yellow),
        );
    }

    let color = match mode {
        SelectionMode::Directory => Color::DarkGray,
        SelectionMode::File => Color::Cyan,
    };

    Span::styled(entry.name.clone(), Style::default().fg(color))
}

/// Returns the `(key, label)` pairs shown in the footer.
fn footer_actions(mode: SelectionMode, at_root: bool) -> Vec<(&'static str, &'static str)> {
    let mut actions = vec![("j/k", "move")];
    match mode {
        SelectionMode::Directory => {
            actions.push(("Enter", "open"));
            actions.push(("Tab", "pick this directory"));
        }
        SelectionMode::File => actions.push(("Enter", "open or pick")),
    }
    if !at_root {
        actions.push(("Backspace", "up"));
    }
    actions.push(("0-9", "crumb"));
    actions.push(("r", "reload"));
    actions.push(("Esc", "cancel"));

    actions
}

fn footer_text(actions: &[(&str, &str)]) -> String {
    actions
        .iter()
        .map(|(key, label)| format!("{key}: {label}"))
        .collect::<Vec<_>>()
        .join(" | ")
}
