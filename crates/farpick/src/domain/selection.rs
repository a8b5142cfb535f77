//! Selection mode and the completion payload handed back to the caller.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// What the caller wants to pick. Fixed for the picker's lifetime.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectionMode {
    /// The caller wants a folder, chosen through an explicit confirm action.
    Directory,
    /// The caller wants the content of one file.
    File,
}

impl SelectionMode {
    /// Returns the lowercase name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned when a selection mode name is not recognized.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown selection mode `{0}` (expected `directory` or `file`)")]
pub struct ParseSelectionModeError(String);

impl FromStr for SelectionMode {
    type Err = ParseSelectionModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "directory" | "dir" => Ok(Self::Directory),
            "file" => Ok(Self::File),
            _ => Err(ParseSelectionModeError(value.to_string())),
        }
    }
}

/// Final result delivered through the completion callback.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Selection {
    /// A confirmed directory, as resolved by the server.
    Directory { path: String },
    /// A picked file together with its content.
    File { path: String, content: String },
}

impl Selection {
    /// Returns the remote path of the selection.
    pub fn path(&self) -> &str {
        match self {
            Self::Directory { path } | Self::File { path, .. } => path,
        }
    }
}
