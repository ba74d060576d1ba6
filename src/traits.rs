use crate::config::FilterConfig;
use crate::content::Body;
use crate::entry::Entry;
use crate::error::PrinError;

/// A hierarchical source of readable items.
///
/// Implement this to make prin walk anything: a local directory, a remote
/// repository API, a manifest of URLs, an in-memory map. The engine is written
/// only against this contract and never inspects concrete source types.
///
/// Logical paths round-trip: any `logical_path` a source hands out must
/// resolve back to the same node through [`resolve`](Source::resolve).
///
/// # Blocking
///
/// All calls are synchronous and may be slow (network, disk). The engine
/// imposes no timeout or retry policy; that belongs to the implementation.
///
/// # Error Handling
///
/// Return [`PrinError::NotFound`] from `resolve` for tokens that name nothing;
/// the engine drops such tokens silently. Any error from `list_dir` skips that
/// subtree; any error from `read_file_bytes` is surfaced to the sink as
/// [`Body::Unreadable`]. Neither halts the walk.
///
/// # Example
///
/// ```rust
/// use prin::{Entry, EntryKind, PrinError, Source};
///
/// struct Single;
///
/// impl Source for Single {
///     fn resolve(&self, token: &str) -> Result<Entry, PrinError> {
///         match token {
///             "" | "." => Ok(Entry::dir("")),
///             "hello.txt" => Ok(Entry::file("hello.txt")),
///             other => Err(PrinError::NotFound(other.into())),
///         }
///     }
///     fn list_dir(&self, _dir: &Entry) -> Result<Vec<Entry>, PrinError> {
///         Ok(vec![Entry::file("hello.txt")])
///     }
///     fn read_file_bytes(&self, _file: &Entry) -> Result<Vec<u8>, PrinError> {
///         Ok(b"hi\n".to_vec())
///     }
///     fn is_empty(&self, _file: &Entry) -> bool {
///         false
///     }
/// }
/// ```
pub trait Source {
    /// Resolve a user token to a node. A `File` result makes the token an
    /// explicit single-file entry point; a `Directory` result is walked.
    fn resolve(&self, token: &str) -> Result<Entry, PrinError>;

    /// Children of a directory entry, in any order.
    fn list_dir(&self, dir: &Entry) -> Result<Vec<Entry>, PrinError>;

    /// Raw bytes of a file entry.
    fn read_file_bytes(&self, file: &Entry) -> Result<Vec<u8>, PrinError>;

    /// Source-defined emptiness. Text sources usually layer
    /// [`is_semantically_empty`](crate::emptiness::is_semantically_empty) on
    /// top of byte-emptiness. Errors should read as "not empty".
    fn is_empty(&self, file: &Entry) -> bool;

    /// Receive the resolved filter configuration once per run.
    fn configure(&mut self, _config: &FilterConfig) {}
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn resolve(&self, token: &str) -> Result<Entry, PrinError> {
        (**self).resolve(token)
    }

    fn list_dir(&self, dir: &Entry) -> Result<Vec<Entry>, PrinError> {
        (**self).list_dir(dir)
    }

    fn read_file_bytes(&self, file: &Entry) -> Result<Vec<u8>, PrinError> {
        (**self).read_file_bytes(file)
    }

    fn is_empty(&self, file: &Entry) -> bool {
        (**self).is_empty(file)
    }

    fn configure(&mut self, config: &FilterConfig) {
        (**self).configure(config)
    }
}

/// Receives each emitted item.
///
/// The engine does not format anything: it hands over the display path and
/// the body, and the sink decides how to render them (XML tags, Markdown
/// sections, a plain path list).
///
/// Any `FnMut(&str, Body)` closure is a sink.
///
/// # Example
///
/// ```rust
/// use prin::{Body, Sink};
///
/// let mut seen = Vec::new();
/// let mut sink = |path: &str, _body: Body| seen.push(path.to_string());
/// sink.emit("src/lib.rs", Body::Omitted);
/// assert_eq!(seen, ["src/lib.rs"]);
/// ```
pub trait Sink {
    fn emit(&mut self, display_path: &str, body: Body);
}

impl<F: FnMut(&str, Body)> Sink for F {
    fn emit(&mut self, display_path: &str, body: Body) {
        self(display_path, body)
    }
}

/// A sink that keeps every emission in order.
#[derive(Debug, Default, Clone)]
pub struct CollectSink {
    pub items: Vec<(String, Body)>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitted display paths, in emission order.
    pub fn paths(&self) -> Vec<&str> {
        self.items.iter().map(|(p, _)| p.as_str()).collect()
    }

    /// Body emitted for `path`, if any.
    pub fn body(&self, path: &str) -> Option<&Body> {
        self.items.iter().find(|(p, _)| p == path).map(|(_, b)| b)
    }
}

impl Sink for CollectSink {
    fn emit(&mut self, display_path: &str, body: Body) {
        self.items.push((display_path.to_string(), body));
    }
}
