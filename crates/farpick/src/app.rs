//! Navigation state machine and the types it publishes.
//!
//! [`Navigator`] owns the single mutable [`NavigationState`]; request tasks
//! report back through [`NavigatorEvent`] messages, and the final outcome is
//! delivered once through [`PickerCallbacks`].

pub mod callback;
pub mod event;
pub mod navigator;
pub mod state;

pub use callback::{PickerCallbacks, PickerOutcome};
pub use event::NavigatorEvent;
pub use navigator::{DEFAULT_INITIAL_PATH, Navigator, NavigatorConfig};
pub use state::NavigationState;
