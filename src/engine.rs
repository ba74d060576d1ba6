use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::budget::Budget;
use crate::content::{body_from_bytes, Body, TextPredicate};
use crate::entry::{parent_logical, Entry, EntryKind};
use crate::error::PrinError;
use crate::ignore_tree::{IgnoreSpec, IgnoreTree};
use crate::matcher::Matcher;
use crate::pattern::Pattern;
use crate::results::{Results, ScanStats};
use crate::traits::{Sink, Source};

// ---------------------------------------------------------------------------
// DepthGate
// ---------------------------------------------------------------------------

/// Min/max depth filter for discovered files.
///
/// Depth counts from the entry-point directory: its direct files are at
/// depth 1, files one directory down at depth 2. An exact depth replaces both
/// bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthGate {
    min: Option<usize>,
    max: Option<usize>,
}

impl DepthGate {
    pub fn new(min: Option<usize>, max: Option<usize>, exact: Option<usize>) -> Self {
        match exact {
            Some(d) => Self { min: Some(d), max: Some(d) },
            None    => Self { min, max },
        }
    }

    /// Whether a file at `depth` may be emitted.
    pub fn admits(&self, depth: usize) -> bool {
        self.min.map_or(true, |m| depth >= m) && self.max.map_or(true, |m| depth <= m)
    }

    /// Whether a directory at `depth` can contain an admissible file. Its
    /// files sit at `depth + 1`.
    pub fn may_descend(&self, depth: usize) -> bool {
        self.max.map_or(true, |m| depth < m)
    }
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to the walker.
pub(crate) struct EngineOptions {
    pub source:         Box<dyn Source>,
    pub matcher:        Matcher,
    pub depth:          DepthGate,
    pub include_empty:  bool,
    pub only_headers:   bool,
    pub use_ignore:     bool,
    pub global_rules:   String,
    pub text_predicate: TextPredicate,
    pub collect_paths:  bool,
    pub collect_errors: bool,
}

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

/// A configured traversal over one [`Source`].
///
/// Built by [`WalkBuilder`](crate::WalkBuilder). Each call to
/// [`run`](Walker::run) or [`search`](Walker::search) is an independent walk
/// with its own de-duplication set and ignore cache; only the [`Budget`] is
/// shared, so several walkers can draw from one cap in sequence.
///
/// The walk is single-threaded and uses an explicit stack, so arbitrarily
/// deep trees cannot overflow the call stack.
pub struct Walker {
    opts: EngineOptions,
}

impl std::fmt::Debug for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("matcher", &self.opts.matcher)
            .field("depth", &self.opts.depth)
            .field("include_empty", &self.opts.include_empty)
            .field("only_headers", &self.opts.only_headers)
            .field("use_ignore", &self.opts.use_ignore)
            .finish_non_exhaustive()
    }
}

impl Walker {
    pub(crate) fn new(opts: EngineOptions) -> Self {
        Self { opts }
    }

    /// Walk every entry point in order, emitting admissible files to `sink`.
    ///
    /// An empty `entry_points` walks the source root. Tokens naming a file
    /// are explicit: they bypass every filter except de-duplication and the
    /// budget. Tokens the source cannot find produce nothing.
    pub fn run<S: AsRef<str>>(
        &self,
        entry_points: &[S],
        sink: &mut dyn Sink,
        budget: &mut Budget,
    ) -> Results {
        let mut walk = Walk::new(&self.opts, sink, budget, None);
        walk.visit_all(entry_points, true);
        walk.finish()
    }

    /// Query mode: emit files under `bases` whose path matches `pattern`.
    ///
    /// The pattern is classified once. Globs match the path or the file
    /// name; anything else is a regex searched within the path. An empty
    /// pattern matches every file and an invalid one matches nothing. Files
    /// named as bases are not explicit here: they must match like any other.
    /// A directory whose path (with a trailing `/`) matches is emitted as a
    /// `dir/` header with [`Body::Omitted`], drawing on the budget.
    pub fn search<S: AsRef<str>>(
        &self,
        pattern: &str,
        bases: &[S],
        sink: &mut dyn Sink,
        budget: &mut Budget,
    ) -> Results {
        let query = if pattern.is_empty() {
            None
        } else {
            match Pattern::query(pattern) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!("search pattern rejected, nothing to emit: {e}");
                    return Results::default();
                }
            }
        };
        let mut walk = Walk::new(&self.opts, sink, budget, query);
        walk.visit_all(bases, false);
        walk.finish()
    }
}

// ---------------------------------------------------------------------------
// Walk (per-run state)
// ---------------------------------------------------------------------------

struct Frame {
    entry: Entry,
    depth: usize,
}

struct Walk<'a> {
    opts:    &'a EngineOptions,
    sink:    &'a mut dyn Sink,
    budget:  &'a mut Budget,
    query:   Option<Pattern>,
    ignore:  IgnoreTree,
    emitted: HashSet<PathBuf>,

    // Stats
    start:    Instant,
    count:    usize,
    files:    usize,
    dirs:     usize,
    filtered: usize,
    pruned:   usize,
    paths:    Vec<String>,
    errors:   Vec<PrinError>,
}

impl<'a> Walk<'a> {
    fn new(
        opts: &'a EngineOptions,
        sink: &'a mut dyn Sink,
        budget: &'a mut Budget,
        query: Option<Pattern>,
    ) -> Self {
        let ignore = if opts.use_ignore {
            IgnoreTree::new("", &opts.global_rules)
        } else {
            IgnoreTree::disabled()
        };
        Self {
            opts,
            sink,
            budget,
            query,
            ignore,
            emitted:  HashSet::new(),
            start:    Instant::now(),
            count:    0,
            files:    0,
            dirs:     0,
            filtered: 0,
            pruned:   0,
            paths:    Vec::new(),
            errors:   Vec::new(),
        }
    }

    fn visit_all<S: AsRef<str>>(&mut self, tokens: &[S], files_are_explicit: bool) {
        if tokens.is_empty() {
            self.visit(".", files_are_explicit);
            return;
        }
        for token in tokens {
            if self.budget.spent() {
                tracing::debug!("budget spent, skipping remaining entry points");
                break;
            }
            self.visit(token.as_ref(), files_are_explicit);
        }
    }

    fn visit(&mut self, token: &str, files_are_explicit: bool) {
        let entry = match self.opts.source.resolve(token) {
            Ok(entry) => entry,
            Err(PrinError::NotFound(_)) => {
                tracing::debug!("entry point {token:?} not found, skipping");
                return;
            }
            Err(PrinError::NotADirectory(_)) => {
                self.visit_file(Entry::file(token), files_are_explicit);
                return;
            }
            Err(e) => {
                tracing::debug!("entry point {token:?} unresolvable: {e}");
                self.record(e);
                return;
            }
        };

        match entry.kind {
            EntryKind::File => self.visit_file(entry, files_are_explicit),
            EntryKind::Directory => self.descend(entry, files_are_explicit),
            EntryKind::Other => tracing::debug!("entry point {token:?} is neither file nor directory"),
        }
    }

    /// An entry point that names a single file.
    fn visit_file(&mut self, entry: Entry, explicit: bool) {
        self.files += 1;
        // A lone file is matched by its name, as if rooted at its parent.
        let base = parent_logical(&entry.logical_path).unwrap_or("").to_string();
        let entry = if explicit { entry.into_explicit() } else { entry };
        self.attempt(entry, 1, &base, None);
    }

    /// Depth-first walk of one entry-point directory.
    fn descend(&mut self, root: Entry, files_are_explicit: bool) {
        let base = root.logical_path.clone();
        let mut stack = vec![Frame { entry: root, depth: 0 }];

        loop {
            if self.budget.spent() {
                break;
            }
            let Some(frame) = stack.pop() else {
                break;
            };
            let children = match self.opts.source.list_dir(&frame.entry) {
                Ok(children) => children,
                // The entry point turned out to be a file after all.
                Err(PrinError::NotADirectory(_)) if frame.depth == 0 => {
                    let file = Entry::file(frame.entry.logical_path.clone());
                    let file = match frame.entry.identity {
                        Some(id) => file.with_identity(id),
                        None => file,
                    };
                    self.visit_file(file, files_are_explicit);
                    continue;
                }
                Err(e) => {
                    tracing::debug!("not descending into {:?}: {e}", frame.entry.logical_path);
                    self.record(e);
                    continue;
                }
            };
            self.dirs += 1;

            let spec = self.ignore.spec_for(&frame.entry.logical_path, &*self.opts.source);

            let (mut dirs, mut files): (Vec<Entry>, Vec<Entry>) = children
                .into_iter()
                .filter(|c| c.kind != EntryKind::Other)
                .partition(Entry::is_dir);
            sort_by_name(&mut dirs);
            sort_by_name(&mut files);

            let child_depth = frame.depth + 1;
            let mut headers = Vec::new();
            for dir in dirs.into_iter().rev() {
                if !self.opts.depth.may_descend(child_depth) {
                    self.pruned += 1;
                    continue;
                }
                if spec.is_ignored(&dir.logical_path, true)
                    || self.opts.matcher.is_excluded(relative(&base, &dir.logical_path))
                {
                    tracing::trace!("pruned {}", dir.logical_path);
                    self.pruned += 1;
                    continue;
                }
                if self.header_matches(&base, &dir) {
                    headers.push(dir.clone());
                }
                stack.push(Frame { entry: dir, depth: child_depth });
            }

            for dir in headers.into_iter().rev() {
                self.emit_header(dir);
            }

            for file in files {
                if self.budget.spent() {
                    break;
                }
                self.files += 1;
                self.attempt(file, child_depth, &base, Some(&spec));
            }
        }
    }

    /// One emission attempt: de-dup, budget, filters, then read and emit.
    fn attempt(&mut self, entry: Entry, depth: usize, base: &str, spec: Option<&Arc<IgnoreSpec>>) {
        let key = entry.key();
        if self.emitted.contains(&key) {
            return;
        }
        if !self.budget.available() {
            return;
        }
        if !entry.explicit && !self.admissible(&entry, depth, base, spec) {
            self.filtered += 1;
            return;
        }

        let body = if self.opts.only_headers {
            Body::Omitted
        } else {
            match self.opts.source.read_file_bytes(&entry) {
                Ok(bytes) => body_from_bytes(bytes, self.opts.text_predicate),
                Err(e) => {
                    tracing::warn!("could not read {}: {e}", entry.logical_path);
                    self.record(e);
                    Body::Unreadable
                }
            }
        };

        tracing::trace!("emit {}", entry.logical_path);
        self.sink.emit(&entry.logical_path, body);
        self.budget.consume();
        self.count += 1;
        if self.opts.collect_paths {
            self.paths.push(entry.logical_path.clone());
        }
        self.emitted.insert(key);
    }

    /// In query mode, whether a directory's `rel/` path matches the query.
    fn header_matches(&self, base: &str, dir: &Entry) -> bool {
        self.query
            .as_ref()
            .is_some_and(|q| q.matches(&format!("{}/", relative(base, &dir.logical_path))))
    }

    /// Emit a matching directory as a `dir/` header with no body.
    fn emit_header(&mut self, dir: Entry) {
        let key = dir.key();
        if self.emitted.contains(&key) || !self.budget.available() {
            return;
        }
        let header = format!("{}/", dir.logical_path);
        tracing::trace!("emit header {}", header);
        self.sink.emit(&header, Body::Omitted);
        self.budget.consume();
        self.count += 1;
        if self.opts.collect_paths {
            self.paths.push(header);
        }
        self.emitted.insert(key);
    }

    fn admissible(
        &self,
        entry: &Entry,
        depth: usize,
        base: &str,
        spec: Option<&Arc<IgnoreSpec>>,
    ) -> bool {
        let rel = relative(base, &entry.logical_path);
        let ignored = match spec {
            Some(spec) => spec.is_ignored(&entry.logical_path, false),
            None => self.ignore.is_ignored(&entry.logical_path, false),
        };
        if ignored
            || self.opts.matcher.is_excluded(rel)
            || !self.opts.matcher.extension_matches(&entry.name)
            || !self.opts.depth.admits(depth)
        {
            return false;
        }
        if let Some(query) = &self.query {
            if !query.matches(rel) {
                return false;
            }
        }
        // Emptiness may hit the source, so it goes last.
        self.opts.include_empty || !self.opts.source.is_empty(entry)
    }

    fn record(&mut self, err: PrinError) {
        if self.opts.collect_errors {
            self.errors.push(err);
        }
    }

    fn finish(self) -> Results {
        let stats = ScanStats::compute(
            self.files,
            self.dirs,
            self.filtered,
            self.pruned,
            self.start.elapsed(),
        );
        tracing::info!(
            "walk finished: {} emitted, {} files seen, {} filtered, {} pruned in {:?}",
            self.count,
            stats.files,
            stats.filtered,
            stats.pruned,
            stats.duration
        );
        Results {
            emitted: self.count,
            paths: self.paths,
            stats,
            errors: self.errors,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Case-insensitive name order, ties broken by the exact name so the order
/// is total.
fn sort_by_name(entries: &mut [Entry]) {
    entries.sort_by_cached_key(|e| (e.name.to_lowercase(), e.name.clone()));
}

/// `path` relative to the entry-point directory `base`, used for rule
/// matching so that where the tree is rooted does not change what matches.
fn relative<'p>(base: &str, path: &'p str) -> &'p str {
    if base.is_empty() {
        return path;
    }
    match path.strip_prefix(base) {
        Some(rest) if rest.starts_with('/') => &rest[1..],
        Some(rest) if base.ends_with('/') => rest,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;
    use crate::memory::MemorySource;
    use crate::traits::CollectSink;
    use crate::walk;

    fn walker(src: MemorySource, config: FilterConfig) -> Walker {
        walk().source(src).config(config).global_ignore("").build().unwrap()
    }

    fn emitted(w: &Walker, tokens: &[&str]) -> Vec<String> {
        let mut sink = CollectSink::new();
        w.run(tokens, &mut sink, &mut Budget::Unbounded);
        sink.items.into_iter().map(|(p, _)| p).collect()
    }

    #[test]
    fn depth_gate_bounds() {
        let gate = DepthGate::new(Some(2), Some(3), None);
        assert!(!gate.admits(1));
        assert!(gate.admits(2));
        assert!(gate.admits(3));
        assert!(!gate.admits(4));
        assert!(gate.may_descend(2));
        assert!(!gate.may_descend(3));
    }

    #[test]
    fn exact_depth_overrides_bounds() {
        let gate = DepthGate::new(Some(1), Some(5), Some(2));
        assert!(!gate.admits(1));
        assert!(gate.admits(2));
        assert!(!gate.admits(3));
    }

    #[test]
    fn files_before_subdirectories_case_insensitive() {
        let src = MemorySource::new()
            .file("B.txt", "b")
            .file("a.txt", "a")
            .file("sub/z.txt", "z")
            .file("Alpha/y.txt", "y");
        let w = walker(src, FilterConfig::default());
        assert_eq!(emitted(&w, &[]), ["a.txt", "B.txt", "Alpha/y.txt", "sub/z.txt"]);
    }

    #[test]
    fn explicit_file_bypasses_filters() {
        let src = MemorySource::new().file("Cargo.lock", "# lock\n").file("empty.txt", "");
        let w = walker(src, FilterConfig::default());
        assert!(emitted(&w, &[]).is_empty());
        assert_eq!(emitted(&w, &["Cargo.lock", "empty.txt"]), ["Cargo.lock", "empty.txt"]);
    }

    #[test]
    fn duplicates_emit_once() {
        let src = MemorySource::new().file("src/a.rs", "a").file("src/b.rs", "b");
        let w = walker(src, FilterConfig::default());
        assert_eq!(emitted(&w, &["src/a.rs", "src", "."]), ["src/a.rs", "src/b.rs"]);
    }

    #[test]
    fn not_found_is_silent_and_collected_errors_stay_empty() {
        let src = MemorySource::new().file("a.rs", "a");
        let w = walk().source(src).global_ignore("").collect_errors(true).build().unwrap();
        let mut sink = CollectSink::new();
        let results = w.run(&["missing", "a.rs"], &mut sink, &mut Budget::Unbounded);
        assert_eq!(sink.paths(), ["a.rs"]);
        assert!(results.errors.is_empty());
    }

    #[test]
    fn denied_directory_is_skipped_and_recorded() {
        let src = MemorySource::new()
            .file("open/a.rs", "a")
            .file("closed/b.rs", "b")
            .deny("closed");
        let w = walk().source(src).global_ignore("").collect_errors(true).build().unwrap();
        let mut sink = CollectSink::new();
        let results = w.run(&["."], &mut sink, &mut Budget::Unbounded);
        assert_eq!(sink.paths(), ["open/a.rs"]);
        assert_eq!(results.errors.len(), 1);
        assert!(results.errors[0].is_recoverable());
    }

    #[test]
    fn unreadable_file_is_emitted_as_marker() {
        let src = MemorySource::new().file("a.rs", "a").unreadable("a.rs");
        let w = walker(src, FilterConfig::default());
        let mut sink = CollectSink::new();
        w.run(&["."], &mut sink, &mut Budget::Unbounded);
        assert_eq!(sink.body("a.rs"), Some(&Body::Unreadable));
    }

    #[test]
    fn binary_bodies_use_the_marker() {
        let src = MemorySource::new().file("blob.raw", vec![0u8, 1, 2, 3]);
        let w = walker(src, FilterConfig::default());
        let mut sink = CollectSink::new();
        w.run(&["."], &mut sink, &mut Budget::Unbounded);
        assert_eq!(sink.body("blob.raw"), Some(&Body::Binary));
    }

    #[test]
    fn budget_stops_the_walk() {
        let src = MemorySource::new()
            .file("a.rs", "a")
            .file("b.rs", "b")
            .file("c/d.rs", "d");
        let w = walker(src, FilterConfig::default());
        let mut sink = CollectSink::new();
        let mut budget = Budget::Remaining(2);
        let results = w.run(&["."], &mut sink, &mut budget);
        assert_eq!(sink.paths(), ["a.rs", "b.rs"]);
        assert_eq!(results.emitted, 2);
        assert!(budget.spent());
        // The subdirectory is never listed once the budget is gone.
        assert_eq!(results.stats.dirs, 1);
    }

    #[test]
    fn max_depth_prunes_directories() {
        let src = MemorySource::new()
            .file("top.rs", "t")
            .file("one/mid.rs", "m")
            .file("one/two/deep.rs", "d");
        let config = FilterConfig {
            max_depth: Some(2),
            ..Default::default()
        };
        let w = walker(src, config);
        let mut sink = CollectSink::new();
        let results = w.run(&["."], &mut sink, &mut Budget::Unbounded);
        assert_eq!(sink.paths(), ["top.rs", "one/mid.rs"]);
        assert_eq!(results.stats.pruned, 1);
    }

    #[test]
    fn depth_counts_from_the_entry_point() {
        let src = MemorySource::new()
            .file("pkg/a.rs", "a")
            .file("pkg/inner/b.rs", "b");
        let config = FilterConfig {
            exact_depth: Some(1),
            ..Default::default()
        };
        let w = walker(src, config);
        assert_eq!(emitted(&w, &["pkg"]), ["pkg/a.rs"]);
    }

    #[test]
    fn rules_match_relative_to_the_entry_point() {
        // `gen/*.rs` is anchored at the entry point, wherever it sits.
        let src = MemorySource::new()
            .file("proj/gen/t.rs", "t")
            .file("proj/src/lib.rs", "l");
        let config = FilterConfig {
            exclusions: vec!["gen/*.rs".into()],
            ..Default::default()
        };
        let w = walker(src, config);
        assert_eq!(emitted(&w, &["proj"]), ["proj/src/lib.rs"]);
    }

    #[test]
    fn semantically_empty_files_are_skipped_unless_included() {
        let src = MemorySource::new()
            .file("pkg/__init__.py", "from .core import run\n")
            .file("pkg/core.py", "def run():\n    pass\n");
        let w = walker(src.clone(), FilterConfig::default());
        assert_eq!(emitted(&w, &[]), ["pkg/core.py"]);

        let config = FilterConfig {
            include_empty: true,
            ..Default::default()
        };
        let w = walker(src, config);
        assert_eq!(emitted(&w, &[]), ["pkg/__init__.py", "pkg/core.py"]);
    }

    #[test]
    fn only_headers_never_reads() {
        let src = MemorySource::new().file("a.rs", "a").unreadable("a.rs");
        let config = FilterConfig {
            only_headers: true,
            ..Default::default()
        };
        let w = walker(src, config);
        let mut sink = CollectSink::new();
        w.run(&["."], &mut sink, &mut Budget::Unbounded);
        assert_eq!(sink.body("a.rs"), Some(&Body::Omitted));
    }

    #[test]
    fn ignore_files_prune_and_negate() {
        let src = MemorySource::new()
            .file(".gitignore", "gen/\n*.out\n!keep.out\n")
            .file("gen/x.rs", "x")
            .file("a.out", "a")
            .file("keep.out", "k")
            .file("main.rs", "m");
        let w = walker(src.clone(), FilterConfig::default());
        assert_eq!(emitted(&w, &[]), ["keep.out", "main.rs"]);

        let config = FilterConfig {
            no_ignore: true,
            ..Default::default()
        };
        let w = walker(src, config);
        assert_eq!(emitted(&w, &[]), ["a.out", "keep.out", "main.rs", "gen/x.rs"]);
    }

    #[test]
    fn search_matches_regex_and_glob() {
        let src = MemorySource::new()
            .file("src/engine.rs", "e")
            .file("src/budget.rs", "b")
            .file("docs/engine.txt", "d");
        let w = walker(src, FilterConfig::default());

        let mut sink = CollectSink::new();
        w.search("engine", &["."], &mut sink, &mut Budget::Unbounded);
        assert_eq!(sink.paths(), ["docs/engine.txt", "src/engine.rs"]);

        let mut sink = CollectSink::new();
        w.search("*.rs", &["src"], &mut sink, &mut Budget::Unbounded);
        assert_eq!(sink.paths(), ["src/budget.rs", "src/engine.rs"]);

        let mut sink = CollectSink::new();
        w.search("", &[] as &[&str], &mut sink, &mut Budget::Unbounded);
        assert_eq!(sink.paths().len(), 3);
    }

    #[test]
    fn search_emits_matching_directory_headers() {
        let src = MemorySource::new()
            .file("engine/mod.rs", "m")
            .file("src/engine.rs", "e")
            .file("src/lib.rs", "l");
        let w = walker(src, FilterConfig::default());

        let mut sink = CollectSink::new();
        let results = w.search("engine", &["."], &mut sink, &mut Budget::Unbounded);
        assert_eq!(sink.paths(), ["engine/", "engine/mod.rs", "src/engine.rs"]);
        assert_eq!(sink.body("engine/"), Some(&Body::Omitted));
        assert_eq!(results.emitted, 3);

        // Headers draw on the budget like files do.
        let mut sink = CollectSink::new();
        w.search("engine", &["."], &mut sink, &mut Budget::Remaining(1));
        assert_eq!(sink.paths(), ["engine/"]);

        // Plain runs never emit headers.
        let mut sink = CollectSink::new();
        w.run(&["."], &mut sink, &mut Budget::Unbounded);
        assert!(!sink.paths().contains(&"engine/"));
    }

    #[test]
    fn invalid_search_pattern_emits_nothing() {
        let src = MemorySource::new().file("a.rs", "a");
        let w = walker(src, FilterConfig::default());
        let mut sink = CollectSink::new();
        let results = w.search("(unclosed", &["."], &mut sink, &mut Budget::Unbounded);
        assert!(sink.items.is_empty());
        assert_eq!(results.emitted, 0);
    }

    #[test]
    fn deep_chains_do_not_recurse() {
        let mut path = String::new();
        for _ in 0..500 {
            path.push_str("d/");
        }
        path.push_str("leaf.rs");
        let src = MemorySource::new().file(&path, "leaf");
        let w = walker(src, FilterConfig::default());
        assert_eq!(emitted(&w, &[]), [path]);
    }

    /// Reports files the way a source without a stat call might: `resolve`
    /// fails with `NotADirectory`, or claims a directory and `list_dir` fails.
    struct StatlessSource {
        inner:        MemorySource,
        fail_resolve: bool,
    }

    impl Source for StatlessSource {
        fn resolve(&self, token: &str) -> Result<Entry, PrinError> {
            let entry = self.inner.resolve(token)?;
            match (entry.is_file(), self.fail_resolve) {
                (true, true) => Err(PrinError::NotADirectory(token.to_string())),
                (true, false) => Ok(Entry::dir(entry.logical_path)),
                _ => Ok(entry),
            }
        }

        fn list_dir(&self, dir: &Entry) -> Result<Vec<Entry>, PrinError> {
            if self.inner.resolve(&dir.logical_path)?.is_file() {
                return Err(PrinError::NotADirectory(dir.logical_path.clone()));
            }
            self.inner.list_dir(dir)
        }

        fn read_file_bytes(&self, file: &Entry) -> Result<Vec<u8>, PrinError> {
            self.inner.read_file_bytes(file)
        }

        fn is_empty(&self, file: &Entry) -> bool {
            self.inner.is_empty(file)
        }
    }

    #[test]
    fn not_a_directory_token_is_an_explicit_file() {
        for fail_resolve in [true, false] {
            let src = StatlessSource {
                inner: MemorySource::new()
                    .file("Cargo.lock", "# lock\n")
                    .file("src/a.rs", "a"),
                fail_resolve,
            };
            let w = walk().source(src).global_ignore("").collect_errors(true).build().unwrap();
            let mut sink = CollectSink::new();
            let results = w.run(&["./Cargo.lock", "src"], &mut sink, &mut Budget::Unbounded);
            assert_eq!(sink.paths(), ["Cargo.lock", "src/a.rs"], "fail_resolve={fail_resolve}");
            assert_eq!(sink.body("Cargo.lock"), Some(&Body::Text("# lock\n".into())));
            assert!(results.errors.is_empty());
        }
    }

    #[test]
    fn relative_paths() {
        assert_eq!(relative("", "a/b"), "a/b");
        assert_eq!(relative("a", "a/b"), "b");
        assert_eq!(relative("ab", "a/b"), "a/b");
    }
}
