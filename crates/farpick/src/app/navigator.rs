//! Remote directory navigation with last-requested-wins reconciliation.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::app::callback::PickerCallbacks;
use crate::app::event::NavigatorEvent;
use crate::app::state::NavigationState;
use crate::domain::{
    Breadcrumb, Entry, EntryKind, FileContent, Listing, NavigationError, Selection, SelectionMode,
};
use crate::infra::transport::{FilesTransport, TransportError};

/// Path browsed by [`Navigator::initialize`] unless configured otherwise.
pub const DEFAULT_INITIAL_PATH: &str = "~";

const ROOT_PATH: &str = "/";

/// Fixed inputs of one picker lifetime.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NavigatorConfig {
    /// What the caller wants to pick.
    pub mode: SelectionMode,
    /// First path browsed by [`Navigator::initialize`].
    pub initial_path: String,
}

impl NavigatorConfig {
    /// Creates a config starting at [`DEFAULT_INITIAL_PATH`].
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            initial_path: DEFAULT_INITIAL_PATH.to_string(),
        }
    }

    /// Replaces the initial path.
    #[must_use]
    pub fn with_initial_path(mut self, initial_path: impl Into<String>) -> Self {
        self.initial_path = initial_path.into();

        self
    }
}

/// Navigation state machine for one picker lifetime.
///
/// Every navigation call allocates a new request id and spawns the transport
/// call as its own task. Finished tasks report back through
/// [`NavigatorEvent`]s, and [`Navigator::apply_event`] discards any event
/// whose request is no longer the latest. After completion or dismissal the
/// navigator is finished: navigation calls become no-ops and late events are
/// dropped without touching state or callbacks.
///
/// Navigation methods spawn tokio tasks and must be called from within a
/// tokio runtime.
pub struct Navigator {
    callbacks: PickerCallbacks,
    config: NavigatorConfig,
    event_rx: mpsc::UnboundedReceiver<NavigatorEvent>,
    event_tx: mpsc::UnboundedSender<NavigatorEvent>,
    initialized: bool,
    latest_request_id: u64,
    state: NavigationState,
    state_tx: watch::Sender<NavigationState>,
    transport: Arc<dyn FilesTransport>,
}

impl Navigator {
    /// Creates an idle navigator. Call [`Navigator::initialize`] to load the
    /// first listing.
    pub fn new(
        transport: Arc<dyn FilesTransport>,
        config: NavigatorConfig,
        callbacks: PickerCallbacks,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let state = NavigationState::default();
        let (state_tx, _) = watch::channel(state.clone());

        Self {
            callbacks,
            config,
            event_rx,
            event_tx,
            initialized: false,
            latest_request_id: 0,
            state,
            state_tx,
            transport,
        }
    }

    /// Returns the selection mode fixed at construction.
    pub fn mode(&self) -> SelectionMode {
        self.config.mode
    }

    /// Returns the current navigation state.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Returns the breadcrumb trail of the current resolved path.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.state.breadcrumbs()
    }

    /// Returns a receiver notified with a fresh snapshot on every state
    /// change.
    pub fn subscribe(&self) -> watch::Receiver<NavigationState> {
        self.state_tx.subscribe()
    }

    /// Returns whether the picker already completed or was dismissed.
    pub fn is_finished(&self) -> bool {
        self.callbacks.is_spent()
    }

    /// Loads the initial path. Only the first call has an effect.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let initial_path = self.config.initial_path.clone();

        self.browse(initial_path);
    }

    /// Starts listing `path`, superseding any request still in flight.
    pub fn browse(&mut self, path: impl Into<String>) {
        if self.is_finished() {
            return;
        }
        let path = path.into();
        let request_id = self.begin_request();
        debug!(request_id, path = %path, "browse requested");

        let request = self.transport.browse(path.clone());
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = request.await;
            let _ = event_tx.send(NavigatorEvent::BrowseFinished {
                request_id,
                requested_path: path,
                result,
            });
        });
    }

    /// Browses the filesystem root.
    pub fn browse_root(&mut self) {
        self.browse(ROOT_PATH);
    }

    /// Browses the breadcrumb at `index`. Out-of-range indexes are ignored.
    pub fn browse_breadcrumb(&mut self, index: usize) {
        let Some(crumb) = self.state.breadcrumbs().into_iter().nth(index) else {
            return;
        };

        self.browse(crumb.path);
    }

    /// Browses the parent directory. Does nothing at the filesystem root.
    pub fn browse_parent(&mut self) {
        let Some(parent_path) = self.state.parent_path.clone() else {
            return;
        };

        self.browse(parent_path);
    }

    /// Browses the current directory again, or the initial path when nothing
    /// has been listed yet.
    pub fn refresh(&mut self) {
        let path = if self.state.has_listing() {
            self.state.resolved_path.clone()
        } else {
            self.config.initial_path.clone()
        };

        self.browse(path);
    }

    /// Activates one entry of the visible listing.
    ///
    /// Directories are entered in both modes. Files are read and returned in
    /// [`SelectionMode::File`] and ignored in [`SelectionMode::Directory`].
    /// Entries that are not part of the visible listing are ignored.
    pub fn select_entry(&mut self, entry: &Entry) {
        if self.is_finished() || !self.state.visible_entries().contains(entry) {
            return;
        }

        match (entry.kind, self.config.mode) {
            (EntryKind::Directory, _) => self.browse(entry.path.clone()),
            (EntryKind::File, SelectionMode::File) => self.read_file(entry.path.clone()),
            (EntryKind::File, SelectionMode::Directory) => {}
        }
    }

    /// Confirms the current resolved directory in
    /// [`SelectionMode::Directory`].
    ///
    /// Does nothing in file mode or before the first successful listing.
    pub fn confirm(&mut self) {
        if self.config.mode != SelectionMode::Directory
            || self.is_finished()
            || !self.state.has_listing()
        {
            return;
        }

        let path = self.state.resolved_path.clone();
        debug!(path = %path, "directory confirmed");
        self.callbacks.complete(Selection::Directory { path });
    }

    /// Dismisses the picker without a selection.
    ///
    /// In-flight requests keep running; their results are discarded.
    pub fn dismiss(&mut self) {
        if self.callbacks.dismiss() {
            debug!("picker dismissed");
        }
    }

    /// Applies one request result if it belongs to the latest request.
    pub fn apply_event(&mut self, event: NavigatorEvent) {
        let request_id = event.request_id();
        if self.is_finished() {
            debug!(request_id, "discarding response after picker finished");

            return;
        }
        if request_id != self.latest_request_id {
            debug!(
                request_id,
                latest_request_id = self.latest_request_id,
                "discarding superseded response"
            );

            return;
        }

        match event {
            NavigatorEvent::BrowseFinished {
                requested_path,
                result,
                ..
            } => self.finish_browse(requested_path, result),
            NavigatorEvent::FileReadFinished { path, result, .. } => {
                self.finish_read_file(path, result);
            }
        }
    }

    /// Applies every request result that is already available.
    pub fn process_pending_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// Waits for the next request result.
    pub async fn next_event(&mut self) -> Option<NavigatorEvent> {
        self.event_rx.recv().await
    }

    /// Applies request results until the latest request has finished.
    ///
    /// Without a transport timeout this waits as long as the request hangs.
    pub async fn settle(&mut self) {
        while self.state.loading && !self.is_finished() {
            let Some(event) = self.event_rx.recv().await else {
                return;
            };

            self.apply_event(event);
        }
    }

    fn read_file(&mut self, path: String) {
        let request_id = self.begin_request();
        debug!(request_id, path = %path, "file read requested");

        let request = self.transport.read_file(path.clone());
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = request.await;
            let _ = event_tx.send(NavigatorEvent::FileReadFinished {
                request_id,
                path,
                result,
            });
        });
    }

    /// Marks a new authoritative request and enters the loading state.
    fn begin_request(&mut self) -> u64 {
        self.latest_request_id += 1;
        self.state.loading = true;
        self.state.error = None;
        self.publish();

        self.latest_request_id
    }

    fn finish_browse(&mut self, requested_path: String, result: Result<Listing, TransportError>) {
        self.state.loading = false;
        match result {
            Ok(listing) => {
                self.state.requested_path = requested_path;
                self.state.resolved_path = listing.resolved_path;
                self.state.parent_path = listing.parent_path;
                self.state.entries = listing.entries;
                self.state.error = None;
            }
            Err(error) => {
                warn!(path = %requested_path, %error, "browse failed");
                self.state.error = Some(browse_failure(error));
            }
        }

        self.publish();
    }

    fn finish_read_file(&mut self, path: String, result: Result<FileContent, TransportError>) {
        self.state.loading = false;
        match result {
            Ok(file) => {
                self.publish();
                debug!(path = %path, "file selected");
                self.callbacks.complete(Selection::File {
                    path,
                    content: file.content,
                });
            }
            Err(error) => {
                warn!(path = %path, %error, "file read failed");
                self.state.error = Some(read_failure(error));
                self.publish();
            }
        }
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.state.clone());
    }
}

/// Maps a browse failure to its user-facing message.
fn browse_failure(error: TransportError) -> NavigationError {
    match error {
        TransportError::Connectivity(_) => NavigationError::Connectivity,
        TransportError::Http { status, .. } => NavigationError::Http { status },
        TransportError::Application(message) => NavigationError::Application(message),
    }
}

/// Maps a file read failure to its user-facing message.
fn read_failure(error: TransportError) -> NavigationError {
    match error {
        TransportError::Connectivity(_) => NavigationError::ReadConnectivity,
        TransportError::Http { detail, .. } | TransportError::Application(detail) => {
            NavigationError::Read(detail)
        }
    }
}
