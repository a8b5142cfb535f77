//! Plain data types shared by the navigator, the transport, and the terminal
//! driver.

/// Breadcrumb derivation from resolved remote paths.
pub mod breadcrumb;
pub mod entry;
/// User-facing navigation failures.
pub mod error;
pub mod selection;

pub use breadcrumb::{Breadcrumb, breadcrumbs};
pub use entry::{Entry, EntryKind, FileContent, Listing};
pub use error::NavigationError;
pub use selection::{ParseSelectionModeError, Selection, SelectionMode};
