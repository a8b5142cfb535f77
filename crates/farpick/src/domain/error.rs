use thiserror::Error;

/// Failure shown in place of the listing after one navigation attempt.
///
/// Every variant is terminal for its attempt and non-fatal for the picker:
/// the user can still navigate elsewhere or dismiss. The `Display` output is
/// the exact message presented to the user.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum NavigationError {
    /// A browse call never reached the server or its response was unreadable.
    #[error("Failed to connect to server")]
    Connectivity,
    /// The server answered a browse call with a non-success status.
    #[error("Failed to browse: {status}")]
    Http { status: u16 },
    /// The server could not satisfy a browse call and said why.
    #[error("{0}")]
    Application(String),
    /// The server refused a file read.
    #[error("Failed to read file: {0}")]
    Read(String),
    /// A file read never reached the server or its response was unreadable.
    #[error("Failed to read file")]
    ReadConnectivity,
}
