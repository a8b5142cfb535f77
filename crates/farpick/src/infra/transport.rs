use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::domain::{FileContent, Listing};

/// Boxed async result used by [`FilesTransport`] trait methods.
pub type TransportFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Failure classes reported by a [`FilesTransport`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TransportError {
    /// The call never reached the server, timed out, or returned a body that
    /// could not be read or parsed.
    #[error("request failed: {0}")]
    Connectivity(String),
    /// The server answered with a non-success status.
    #[error("server responded with status {status}: {detail}")]
    Http {
        /// Numeric HTTP status code.
        status: u16,
        /// Plain-text response body, or the canonical reason phrase when the
        /// body is empty.
        detail: String,
    },
    /// The server answered successfully but reported a semantic failure.
    #[error("server reported an error: {0}")]
    Application(String),
}

impl TransportError {
    /// Wraps any displayable failure as [`TransportError::Connectivity`].
    pub fn connectivity(error: impl std::fmt::Display) -> Self {
        Self::Connectivity(error.to_string())
    }
}

/// Read-only boundary to the remote file-serving API.
///
/// Production uses [`HttpFilesTransport`](super::http::HttpFilesTransport),
/// while tests inject `MockFilesTransport` to control response timing.
/// Both calls are idempotent and never retried.
#[cfg_attr(test, mockall::automock)]
pub trait FilesTransport: Send + Sync {
    /// Lists every child of the directory at `path`, directories and files
    /// alike.
    ///
    /// # Errors
    /// Returns [`TransportError::Connectivity`] when the server cannot be
    /// reached, [`TransportError::Http`] for non-success statuses, and
    /// [`TransportError::Application`] when the server reports that the path
    /// cannot be listed.
    fn browse(&self, path: String) -> TransportFuture<Result<Listing, TransportError>>;

    /// Reads the full content of the file at `path`.
    ///
    /// # Errors
    /// Returns [`TransportError::Connectivity`] when the server cannot be
    /// reached and [`TransportError::Http`] when the server refuses the read.
    fn read_file(&self, path: String) -> TransportFuture<Result<FileContent, TransportError>>;
}
