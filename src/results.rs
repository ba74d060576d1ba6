use std::time::Duration;

use crate::error::PrinError;

/// The output of a completed walk.
///
/// Bodies go to the [`Sink`](crate::Sink); this only records what happened.
/// `paths` and `errors` are both opt-in, disabled by default to avoid
/// allocation overhead in the common case. Enable them on the builder:
/// `.collect_paths(true)` and `.collect_errors(true)`.
#[derive(Debug, Default)]
pub struct Results {
    /// Number of items handed to the sink.
    pub emitted: usize,

    /// Display paths of emitted items, in emission order.
    /// Only populated if `.collect_paths(true)` was set on the builder.
    pub paths: Vec<String>,

    /// Traversal statistics.
    pub stats: ScanStats,

    /// Non-fatal errors encountered during the walk (permission denied, etc.).
    /// Only populated if `.collect_errors(true)` was set on the builder.
    /// Use [`PrinError::is_recoverable`] to distinguish warnings from failures.
    pub errors: Vec<PrinError>,
}

/// Statistics for a completed walk.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanStats {
    /// Files seen in listings or named explicitly, emitted or not.
    pub files: usize,

    /// Directories listed.
    pub dirs: usize,

    /// Files rejected by a filter (ignore, exclusion, extension, depth,
    /// emptiness or query).
    pub filtered: usize,

    /// Directories never descended into because they were ignored, excluded
    /// or beyond the depth limit.
    pub pruned: usize,

    /// Wall-clock time from walk start to completion.
    pub duration: Duration,

    /// Entries seen per second. Equals `(files + dirs) / duration`, clamped
    /// to 0 on zero-duration runs.
    pub entries_per_sec: usize,
}

impl ScanStats {
    /// Compute `entries_per_sec` from raw counts and duration.
    pub(crate) fn compute(
        files: usize,
        dirs: usize,
        filtered: usize,
        pruned: usize,
        duration: Duration,
    ) -> Self {
        let total = files + dirs;
        let eps = if duration.as_secs_f64() > 0.0 {
            (total as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            files,
            dirs,
            filtered,
            pruned,
            duration,
            entries_per_sec: eps,
        }
    }
}
