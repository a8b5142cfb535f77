use crate::domain::{FileContent, Listing};
use crate::infra::transport::TransportError;

/// Result of one request task, sent back to the owning [`Navigator`].
///
/// Producers only emit events; state mutation is centralized in
/// [`Navigator::apply_event`].
///
/// [`Navigator`]: super::Navigator
/// [`Navigator::apply_event`]: super::Navigator::apply_event
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NavigatorEvent {
    /// A directory listing request finished.
    BrowseFinished {
        request_id: u64,
        requested_path: String,
        result: Result<Listing, TransportError>,
    },
    /// A file read request finished.
    FileReadFinished {
        request_id: u64,
        path: String,
        result: Result<FileContent, TransportError>,
    },
}

impl NavigatorEvent {
    /// Returns the id of the request that produced this event.
    pub fn request_id(&self) -> u64 {
        match self {
            Self::BrowseFinished { request_id, .. } | Self::FileReadFinished { request_id, .. } => {
                *request_id
            }
        }
    }
}
