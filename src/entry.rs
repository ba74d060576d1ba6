use std::path::PathBuf;

/// A single node produced by a [`Source`](crate::traits::Source).
///
/// Intentionally generic, not filesystem-specific. `logical_path` is the
/// slash-separated, source-relative path used for display and for matching;
/// `identity` is whatever the owning source needs to find the node again
/// (an absolute path on disk, an API path, a URL). Purely logical sources
/// may leave it empty.
///
/// Entries are values: the engine never mutates one after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Slash-separated path relative to the source root. Empty for the root.
    pub logical_path: String,

    /// Last path segment.
    pub name: String,

    /// What kind of node this is.
    pub kind: EntryKind,

    /// Opaque handle the owning source uses to re-locate the node.
    pub identity: Option<PathBuf>,

    /// True when the caller named this node directly instead of it being
    /// discovered during descent. Explicit entries skip exclusion, extension,
    /// emptiness and depth filtering, but never the budget.
    pub explicit: bool,
}

impl Entry {
    /// Build a discovered (non-explicit) entry. `name` is derived from the
    /// last segment of `logical_path`.
    pub fn new(logical_path: impl Into<String>, kind: EntryKind) -> Self {
        let logical_path = normalize_logical(&logical_path.into());
        let name = logical_path
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            logical_path,
            name,
            kind,
            identity: None,
            explicit: false,
        }
    }

    pub fn file(logical_path: impl Into<String>) -> Self {
        Self::new(logical_path, EntryKind::File)
    }

    pub fn dir(logical_path: impl Into<String>) -> Self {
        Self::new(logical_path, EntryKind::Directory)
    }

    /// Attach the source-specific identity.
    pub fn with_identity(mut self, identity: impl Into<PathBuf>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// A copy of this entry flagged as named directly by the caller.
    pub fn into_explicit(mut self) -> Self {
        self.explicit = true;
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Key used for de-duplication: the identity when the source provides
    /// one, else the logical path.
    pub fn key(&self) -> PathBuf {
        self.identity
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.logical_path))
    }
}

/// The kind of a traversed node.
///
/// Kept generic so non-filesystem sources map cleanly: symlinks, devices and
/// anything else a source cannot classify are `Other` and are never visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A directory (or any listable container).
    Directory,

    /// A readable leaf.
    File,

    /// Anything else (symlinks, device files, pipes, sockets, etc.).
    Other,
}

/// Normalize a user- or source-supplied path to logical form: forward slashes,
/// no `./` prefix, no repeated or trailing separators. `.` becomes the empty
/// root path.
pub fn normalize_logical(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');
    let parts: Vec<&str> = unified
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect();
    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Join two logical path fragments.
pub fn join_logical(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Parent of a logical path; the root's parent is `None`.
pub fn parent_logical(path: &str) -> Option<&str> {
    if path.is_empty() || path == "/" {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some("/"),
        Some(i) => Some(&path[..i]),
        None => Some(""),
    }
}
