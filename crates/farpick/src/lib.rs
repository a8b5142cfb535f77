//! Navigate a remote filesystem over HTTP and pick a directory or a file.
//!
//! The [`app::Navigator`] state machine talks to the server through the
//! [`infra::transport::FilesTransport`] boundary and reports its single
//! outcome through [`app::PickerCallbacks`]. The [`runtime`] module embeds it
//! in a terminal picker drawn by [`ui`].

pub mod app;
pub mod config;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod runtime;
pub mod ui;
