//! An in-memory [`Source`] for tests, demos and embedding callers that already
//! hold their tree in memory.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::FilterConfig;
use crate::emptiness::is_semantically_empty;
use crate::entry::{normalize_logical, parent_logical, Entry, EntryKind};
use crate::error::PrinError;
use crate::traits::Source;

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// A tree of files and directories keyed by logical path.
///
/// Parent directories are created implicitly. `deny` and `unreadable` mark
/// nodes whose listing or reading fails, for exercising error paths.
///
/// ```rust
/// use prin::{MemorySource, Source};
///
/// let src = MemorySource::new()
///     .file("src/main.rs", "fn main() {}\n")
///     .dir("empty");
/// let root = src.resolve(".").unwrap();
/// let names: Vec<_> = src.list_dir(&root).unwrap().into_iter().map(|e| e.name).collect();
/// assert_eq!(names, ["empty", "src"]);
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource {
    nodes:      BTreeMap<String, Node>,
    denied:     BTreeSet<String>,
    unreadable: BTreeSet<String>,
    config:     Option<FilterConfig>,
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySource {
    /// An empty tree holding only the root directory.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(String::new(), Node::Dir);
        Self {
            nodes,
            denied: BTreeSet::new(),
            unreadable: BTreeSet::new(),
            config: None,
        }
    }

    // ── Builder methods ───────────────────────────────────────────────────────

    /// Add a file, creating missing parent directories.
    pub fn file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        let path = normalize_logical(path);
        self.add_parents(&path);
        self.nodes.insert(path, Node::File(contents.into()));
        self
    }

    /// Add a directory, creating missing parents.
    pub fn dir(mut self, path: &str) -> Self {
        let path = normalize_logical(path);
        self.add_parents(&path);
        self.nodes.insert(path, Node::Dir);
        self
    }

    /// Listing this directory fails with `PermissionDenied`.
    pub fn deny(mut self, path: &str) -> Self {
        self.denied.insert(normalize_logical(path));
        self
    }

    /// Reading this file fails with `PermissionDenied`.
    pub fn unreadable(mut self, path: &str) -> Self {
        self.unreadable.insert(normalize_logical(path));
        self
    }

    /// The configuration last handed over by a walker.
    pub fn configured(&self) -> Option<&FilterConfig> {
        self.config.as_ref()
    }

    fn add_parents(&mut self, path: &str) {
        let mut parent = parent_logical(path);
        while let Some(p) = parent {
            self.nodes.entry(p.to_string()).or_insert(Node::Dir);
            parent = parent_logical(p);
        }
    }

    fn entry_for(&self, path: &str) -> Option<Entry> {
        let kind = match self.nodes.get(path)? {
            Node::Dir => EntryKind::Directory,
            Node::File(_) => EntryKind::File,
        };
        Some(Entry::new(path, kind))
    }
}

impl Source for MemorySource {
    fn resolve(&self, token: &str) -> Result<Entry, PrinError> {
        let path = normalize_logical(token);
        self.entry_for(&path)
            .ok_or_else(|| PrinError::NotFound(token.to_string()))
    }

    fn list_dir(&self, dir: &Entry) -> Result<Vec<Entry>, PrinError> {
        let path = dir.logical_path.as_str();
        if self.denied.contains(path) {
            return Err(PrinError::PermissionDenied(path.to_string()));
        }
        match self.nodes.get(path) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => return Err(PrinError::NotADirectory(path.to_string())),
            None => return Err(PrinError::NotFound(path.to_string())),
        }
        Ok(self
            .nodes
            .keys()
            .filter(|key| !key.is_empty() && parent_logical(key) == Some(path))
            .filter_map(|key| self.entry_for(key))
            .collect())
    }

    fn read_file_bytes(&self, file: &Entry) -> Result<Vec<u8>, PrinError> {
        let path = file.logical_path.as_str();
        if self.unreadable.contains(path) {
            return Err(PrinError::PermissionDenied(path.to_string()));
        }
        match self.nodes.get(path) {
            Some(Node::File(bytes)) => Ok(bytes.clone()),
            Some(Node::Dir) => Err(PrinError::Source(format!("{path} is a directory"))),
            None => Err(PrinError::NotFound(path.to_string())),
        }
    }

    fn is_empty(&self, file: &Entry) -> bool {
        match self.nodes.get(&file.logical_path) {
            Some(Node::File(bytes)) => is_semantically_empty(bytes, &file.name),
            _ => false,
        }
    }

    fn configure(&mut self, config: &FilterConfig) {
        self.config = Some(config.clone());
    }
}
