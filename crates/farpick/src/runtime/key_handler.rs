use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Navigator;
use crate::ui::state::EntryCursor;

/// Handles key input while the picker is open.
///
/// `Enter` activates the highlighted row, `Tab` picks the listed directory
/// in directory mode, and `Esc`, `q` or `Ctrl+C` dismiss the picker. Digit
/// keys jump to the breadcrumb with that number, `0` being the root.
pub(crate) fn handle_key_event(navigator: &mut Navigator, cursor: &mut EntryCursor, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        navigator.dismiss();

        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => navigator.dismiss(),
        KeyCode::Char('j') if is_plain_char_key(key, 'j') => cursor.move_by(navigator.state(), 1),
        KeyCode::Down => cursor.move_by(navigator.state(), 1),
        KeyCode::Char('k') if is_plain_char_key(key, 'k') => cursor.move_by(navigator.state(), -1),
        KeyCode::Up => cursor.move_by(navigator.state(), -1),
        KeyCode::Char('g') | KeyCode::Home => cursor.move_to_first(),
        KeyCode::Char('G') | KeyCode::End => cursor.move_to_last(navigator.state()),
        KeyCode::Char('l') | KeyCode::Enter | KeyCode::Right => {
            activate_selected_entry(navigator, cursor);
        }
        KeyCode::Char('h') | KeyCode::Backspace | KeyCode::Left => navigator.browse_parent(),
        KeyCode::Tab => navigator.confirm(),
        KeyCode::Char('/') => navigator.browse_root(),
        KeyCode::Char('r') => navigator.refresh(),
        KeyCode::Char(digit) if digit.is_ascii_digit() => browse_numbered_crumb(navigator, digit),
        _ => {}
    }
}

fn activate_selected_entry(navigator: &mut Navigator, cursor: &EntryCursor) {
    let Some(entry) = cursor.selected_entry(navigator.state()).cloned() else {
        return;
    };

    navigator.select_entry(&entry);
}

/// Browses the crumb shown as `[digit]`.
fn browse_numbered_crumb(navigator: &mut Navigator, digit: char) {
    let Some(number) = digit
        .to_digit(10)
        .and_then(|number| usize::try_from(number).ok())
    else {
        return;
    };

    match number.checked_sub(1) {
        Some(crumb_index) => navigator.browse_breadcrumb(crumb_index),
        None => navigator.browse_root(),
    }
}

fn is_plain_char_key(key: KeyEvent, character: char) -> bool {
    key.code == KeyCode::Char(character) && key.modifiers == KeyModifiers::NONE
}
