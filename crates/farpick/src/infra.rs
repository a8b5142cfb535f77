//! Infrastructure adapters for the remote file-serving API.

/// reqwest-backed implementation of the file-serving API.
pub mod http;
/// Transport trait boundary and its error taxonomy.
pub mod transport;
