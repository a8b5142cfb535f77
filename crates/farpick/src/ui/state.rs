use crate::app::NavigationState;
use crate::domain::Entry;

/// Highlighted row of the visible listing.
///
/// Listing a different directory moves the cursor to the directory that was
/// just left when it is part of the new listing, and to the first row
/// otherwise.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EntryCursor {
    listed_path: String,
    selected_index: usize,
}

impl EntryCursor {
    /// Returns the highlighted row index.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Follows a state change, keeping the cursor on a visible row.
    pub fn sync(&mut self, state: &NavigationState) {
        if state.resolved_path != self.listed_path {
            let previous_path =
                std::mem::replace(&mut self.listed_path, state.resolved_path.clone());
            self.selected_index = state
                .visible_entries()
                .iter()
                .position(|entry| entry.path == previous_path)
                .unwrap_or_default();
        }

        self.selected_index = self.selected_index.min(last_index(state));
    }

    /// Moves by `offset` rows, stopping at the first and last visible entry.
    pub fn move_by(&mut self, state: &NavigationState, offset: isize) {
        self.selected_index = self
            .selected_index
            .saturating_add_signed(offset)
            .min(last_index(state));
    }

    pub fn move_to_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn move_to_last(&mut self, state: &NavigationState) {
        self.selected_index = last_index(state);
    }

    /// Returns the highlighted entry, if any entry is visible.
    pub fn selected_entry<'a>(&self, state: &'a NavigationState) -> Option<&'a Entry> {
        state.visible_entries().get(self.selected_index)
    }
}

fn last_index(state: &NavigationState) -> usize {
    state.visible_entries().len().saturating_sub(1)
}
