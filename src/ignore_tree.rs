//! Directory-scoped ignore rules with gitignore semantics.
//!
//! Each directory's rule set is its parent's set extended by the directory's own
//! ignore files. Rules are evaluated against the candidate path relative to
//! the directory whose file declared them, so a deeper ignore file only has
//! authority over its own subtree. Across layers the deepest match wins;
//! within a layer the last matching line wins. Negations (`!pattern`) are
//! first-class: they re-include, and a later plain rule can exclude again.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;

use crate::defaults::IGNORE_FILENAMES;
use crate::entry::{join_logical, normalize_logical, parent_logical};
use crate::traits::Source;

#[derive(Debug, Clone)]
struct Layer {
    /// Logical directory the rules were declared in.
    dir: String,
    rules: Arc<Gitignore>,
}

/// The ordered union of every ignore layer from the root down to one
/// directory.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSpec {
    layers: Vec<Layer>,
}

impl IgnoreSpec {
    /// Evaluate `path` (logical, slash-separated) against every layer, deepest
    /// first. The first layer with an opinion decides.
    pub fn is_ignored(&self, path: &str, is_dir: bool) -> bool {
        for layer in self.layers.iter().rev() {
            let Some(rel) = relative_to(&layer.dir, path) else {
                continue;
            };
            match layer.rules.matched(Path::new(rel), is_dir) {
                Match::Ignore(_) => return true,
                Match::Whitelist(_) => return false,
                Match::None => {}
            }
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn extended(&self, layer: Option<Layer>) -> Self {
        let mut layers = self.layers.clone();
        layers.extend(layer);
        Self { layers }
    }
}

/// Builds and caches one [`IgnoreSpec`] per directory for the lifetime of a
/// walk. Specs are never invalidated: the tree is assumed stable for a run.
#[derive(Debug)]
pub struct IgnoreTree {
    root: String,
    filenames: Vec<String>,
    base: Arc<IgnoreSpec>,
    cache: HashMap<String, Arc<IgnoreSpec>>,
    enabled: bool,
}

impl IgnoreTree {
    /// A tree rooted at logical path `root`, seeded with the user-wide
    /// `global_rules` (gitignore syntax).
    pub fn new(root: &str, global_rules: &str) -> Self {
        let root = normalize_logical(root);
        let base = IgnoreSpec::default().extended(compile_layer(&root, [global_rules]));
        Self {
            root,
            filenames: IGNORE_FILENAMES.iter().map(|s| s.to_string()).collect(),
            base: Arc::new(base),
            cache: HashMap::new(),
            enabled: true,
        }
    }

    /// A tree that ignores nothing and reads no files.
    pub fn disabled() -> Self {
        let mut tree = Self::new("", "");
        tree.enabled = false;
        tree
    }

    /// Replace the per-directory ignore filenames (lowest precedence first).
    pub fn with_filenames<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filenames = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The rules in force for the children of `dir`, building them (and any
    /// missing ancestor specs) on first request.
    pub fn spec_for(&mut self, dir: &str, source: &dyn Source) -> Arc<IgnoreSpec> {
        let dir = normalize_logical(dir);
        if !self.enabled || !contains(&self.root, &dir) {
            return Arc::clone(&self.base);
        }
        if let Some(spec) = self.cache.get(&dir) {
            return Arc::clone(spec);
        }

        // Collect uncached directories from `dir` up towards the root, then
        // build them top-down so each extends its parent.
        let mut pending = vec![dir.clone()];
        let mut current = dir.as_str();
        while current != self.root {
            let Some(parent) = parent_logical(current) else {
                break;
            };
            if self.cache.contains_key(parent) {
                break;
            }
            pending.push(parent.to_string());
            current = parent;
        }

        let mut spec = Arc::clone(&self.base);
        for path in pending.iter().rev() {
            if let Some(cached) = self.cache.get(path) {
                spec = Arc::clone(cached);
                continue;
            }
            let parent_spec = parent_logical(path)
                .filter(|_| *path != self.root)
                .and_then(|p| self.cache.get(p))
                .cloned()
                .unwrap_or_else(|| Arc::clone(&spec));
            let texts = self.read_ignore_files(path, source);
            let built = Arc::new(parent_spec.extended(compile_layer(path, texts.iter())));
            self.cache.insert(path.clone(), Arc::clone(&built));
            spec = built;
        }
        spec
    }

    /// Whether `path` is ignored, judged by the cached spec of its nearest
    /// known ancestor. Paths outside the root are never ignored.
    pub fn is_ignored(&self, path: &str, is_dir: bool) -> bool {
        let path = normalize_logical(path);
        if !self.enabled || !contains(&self.root, &path) || path == self.root {
            return false;
        }
        let mut dir = parent_logical(&path);
        while let Some(d) = dir {
            if let Some(spec) = self.cache.get(d) {
                return spec.is_ignored(&path, is_dir);
            }
            if d == self.root {
                break;
            }
            dir = parent_logical(d);
        }
        self.base.is_ignored(&path, is_dir)
    }

    /// Number of directories with a cached spec.
    pub fn cached_dirs(&self) -> usize {
        self.cache.len()
    }

    fn read_ignore_files(&self, dir: &str, source: &dyn Source) -> Vec<String> {
        let mut texts = Vec::new();
        for name in &self.filenames {
            let token = join_logical(dir, name);
            let Ok(entry) = source.resolve(&token) else {
                continue;
            };
            if !entry.is_file() {
                continue;
            }
            match source.read_file_bytes(&entry) {
                Ok(bytes) => texts.push(String::from_utf8_lossy(&bytes).into_owned()),
                Err(e) => tracing::debug!("treating unreadable {token} as empty: {e}"),
            }
        }
        texts
    }
}

/// Compile the lines of one directory's ignore files into a layer. Returns
/// `None` when there are no usable lines.
fn compile_layer<I, S>(dir: &str, texts: I) -> Option<Layer>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // Rooted at "." so candidates are matched exactly as given: callers pass
    // paths already made relative to `dir`.
    let mut builder = GitignoreBuilder::new(".");
    let mut lines = 0usize;
    for text in texts {
        for line in text.as_ref().lines() {
            let trimmed = line.trim_end();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match builder.add_line(None, trimmed) {
                Ok(_) => lines += 1,
                Err(e) => tracing::warn!("skipping ignore line {trimmed:?} in {dir:?}: {e}"),
            }
        }
    }
    if lines == 0 {
        return None;
    }
    match builder.build() {
        Ok(rules) => Some(Layer {
            dir: dir.to_string(),
            rules: Arc::new(rules),
        }),
        Err(e) => {
            tracing::warn!("ignore rules in {dir:?} failed to compile: {e}");
            None
        }
    }
}

fn contains(root: &str, path: &str) -> bool {
    if root.is_empty() {
        return !path.starts_with('/');
    }
    if root == "/" {
        return path.starts_with('/');
    }
    path == root
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// `path` relative to `dir`, or `None` if it is not strictly below it.
fn relative_to<'a>(dir: &str, path: &'a str) -> Option<&'a str> {
    if path == dir {
        return None;
    }
    if dir.is_empty() {
        return (!path.starts_with('/')).then_some(path);
    }
    let rest = path.strip_prefix(dir)?;
    if dir.ends_with('/') {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}
