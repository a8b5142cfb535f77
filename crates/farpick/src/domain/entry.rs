//! Directory listing entries as reported by the remote file server.

/// Filesystem kind of one listed child.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A single child of a remote directory.
///
/// Entries are received fresh on every listing fetch and are never carried
/// across navigations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    /// Display name of the child (last path segment).
    pub name: String,
    /// Whether the child is a directory or a file.
    pub kind: EntryKind,
    /// Absolute remote path of the child.
    pub path: String,
}

impl Entry {
    /// Builds a directory entry.
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            path: path.into(),
        }
    }

    /// Builds a file entry.
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            path: path.into(),
        }
    }

    /// Returns whether this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Result of one successful `browse` call.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Listing {
    /// Children in server order.
    pub entries: Vec<Entry>,
    /// Server-canonicalized path of the listed directory.
    pub resolved_path: String,
    /// Parent of `resolved_path`, `None` at the filesystem root.
    pub parent_path: Option<String>,
}

/// Content of one remote file returned by `read-file`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileContent {
    pub path: String,
    pub name: String,
    pub content: String,
}
