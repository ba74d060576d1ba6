use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrinError {
    // Resolution
    #[error("path not found: {0}")]
    NotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    // Config
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("extension cannot be empty or contain a path separator: {0:?}")]
    InvalidExtension(String),

    #[error("invalid source: {0}")]
    InvalidSource(String),

    #[error("invalid config")]
    Config(#[from] serde_json::Error),

    // Runtime
    #[error("IO error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Third-party extensibility
    #[error("source error: {0}")]
    Source(String),
}

impl PrinError {
    /// Map an `io::Error` for `path`, promoting the kinds the engine
    /// treats specially (not found, permission denied) to their own variants.
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_string_lossy().into_owned()),
            std::io::ErrorKind::PermissionDenied => {
                Self::PermissionDenied(path.to_string_lossy().into_owned())
            }
            _ => Self::Io { path, source: err },
        }
    }

    /// The logical path this error occurred at, if applicable.
    /// Callers use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<String> {
        match self {
            Self::NotFound(p) | Self::NotADirectory(p) | Self::PermissionDenied(p) => {
                Some(p.clone())
            }
            Self::Io { path, .. } => Some(path.to_string_lossy().into_owned()),
            _ => None,
        }
    }

    /// Whether a walk can continue after this error.
    ///
    /// Everything a source raises while listing or reading is recoverable: the
    /// affected subtree or body is skipped and the walk keeps going. Config
    /// errors are raised before a walk starts and halt the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::NotADirectory(_)
                | Self::PermissionDenied(_)
                | Self::InvalidPattern { .. }
                | Self::Io { .. }
                | Self::Source(_)
        )
    }
}
