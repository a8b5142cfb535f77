use tokio::sync::mpsc;

use crate::domain::Selection;

/// Boxed completion callback receiving the final selection.
pub type CompletionCallback = Box<dyn FnOnce(Selection) + Send>;

/// Boxed dismissal callback.
pub type DismissalCallback = Box<dyn FnOnce() + Send>;

/// How a picker lifetime ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PickerOutcome {
    Completed(Selection),
    Dismissed,
}

/// The two exits of a picker: completion and dismissal.
///
/// At most one of them ever fires; firing either drops the other.
pub struct PickerCallbacks {
    on_complete: Option<CompletionCallback>,
    on_dismiss: Option<DismissalCallback>,
}

impl PickerCallbacks {
    /// Wraps the caller-provided completion and dismissal closures.
    pub fn new(
        on_complete: impl FnOnce(Selection) + Send + 'static,
        on_dismiss: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            on_complete: Some(Box::new(on_complete)),
            on_dismiss: Some(Box::new(on_dismiss)),
        }
    }

    /// Returns callbacks that report the outcome through a channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PickerOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let dismiss_tx = outcome_tx.clone();
        let callbacks = Self::new(
            move |selection| {
                let _ = outcome_tx.send(PickerOutcome::Completed(selection));
            },
            move || {
                let _ = dismiss_tx.send(PickerOutcome::Dismissed);
            },
        );

        (callbacks, outcome_rx)
    }

    /// Returns whether one of the callbacks already fired.
    pub fn is_spent(&self) -> bool {
        self.on_complete.is_none()
    }

    /// Fires the completion callback. Returns `false` when already spent.
    pub(crate) fn complete(&mut self, selection: Selection) -> bool {
        let Some(on_complete) = self.on_complete.take() else {
            return false;
        };
        self.on_dismiss = None;
        on_complete(selection);

        true
    }

    /// Fires the dismissal callback. Returns `false` when already spent.
    pub(crate) fn dismiss(&mut self) -> bool {
        let Some(on_dismiss) = self.on_dismiss.take() else {
            return false;
        };
        self.on_complete = None;
        on_dismiss();

        true
    }
}
