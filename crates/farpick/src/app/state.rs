use crate::domain::{Breadcrumb, Entry, NavigationError, breadcrumbs};

/// Snapshot of the picker's navigation state.
///
/// Breadcrumbs are derived from `resolved_path` on demand and never stored.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NavigationState {
    /// Path of the last successful browse, as the caller asked for it.
    pub requested_path: String,
    /// Server-canonicalized path of the last successful browse.
    pub resolved_path: String,
    /// Children of `resolved_path` in server order.
    pub entries: Vec<Entry>,
    /// Parent of `resolved_path`, `None` at the filesystem root.
    pub parent_path: Option<String>,
    /// Whether the authoritative request is still outstanding.
    pub loading: bool,
    /// Failure of the last attempt, shown in place of the listing.
    pub error: Option<NavigationError>,
}

impl NavigationState {
    /// Returns the breadcrumb trail for `resolved_path`.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        breadcrumbs(&self.resolved_path)
    }

    /// Returns the entries that may be shown and activated.
    ///
    /// While an error is set the retained listing is no longer trustworthy,
    /// so nothing is visible.
    pub fn visible_entries(&self) -> &[Entry] {
        if self.error.is_some() {
            return &[];
        }

        &self.entries
    }

    /// Returns whether at least one browse has succeeded.
    pub fn has_listing(&self) -> bool {
        !self.resolved_path.is_empty()
    }
}
