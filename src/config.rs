use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::budget::Budget;
use crate::defaults;
use crate::error::PrinError;

/// The filter configuration consumed by the engine and handed to sources.
///
/// Produced from command-line flags or a JSON file. Exclusion and extension
/// entries are raw tokens; they are classified and compiled once when a
/// [`Walker`](crate::Walker) is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    /// Extra exclusion tokens, added on top of the defaults.
    pub exclusions: Vec<String>,
    /// Only emit files with one of these extensions (`rs`, `.rs`, `*.rs`).
    pub extensions: Vec<String>,
    pub include_hidden: bool,
    pub include_empty: bool,
    pub include_binary: bool,
    pub include_tests: bool,
    pub include_lock: bool,
    /// Exclude documentation files (`*.md`, `*.rst`, `*.mdx`).
    pub no_docs: bool,
    /// Drop every exclusion, default or user supplied.
    pub no_exclude: bool,
    /// Disable ignore-file processing.
    pub no_ignore: bool,
    /// Emit paths only; never read file bodies.
    pub only_headers: bool,
    pub min_depth: Option<usize>,
    pub max_depth: Option<usize>,
    /// Overrides `min_depth` and `max_depth` when set.
    pub exact_depth: Option<usize>,
    pub max_files: Option<usize>,
    /// User-wide ignore file. `None` means `~/.config/git/ignore`.
    pub global_ignore_file: Option<PathBuf>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exclusions: Vec::new(),
            extensions: Vec::new(),
            include_hidden: false,
            include_empty: false,
            include_binary: false,
            include_tests: false,
            include_lock: false,
            no_docs: false,
            no_exclude: false,
            no_ignore: false,
            only_headers: false,
            min_depth: None,
            max_depth: None,
            exact_depth: None,
            max_files: None,
            global_ignore_file: None,
        }
    }
}

impl FilterConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, PrinError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, PrinError> {
        let text = fs::read_to_string(path).map_err(|e| PrinError::from_io(path, e))?;
        let config = Self::from_json(&text)?;
        tracing::debug!("loaded filter config from {}", path.display());
        Ok(config)
    }

    /// The final exclusion token list.
    ///
    /// Defaults plus user exclusions, plus each category whose include switch
    /// is off, plus doc extensions under `no_docs`. `no_exclude` wins over
    /// everything and yields an empty list.
    pub fn resolved_exclusions(&self) -> Vec<String> {
        if self.no_exclude {
            return Vec::new();
        }

        let mut tokens: Vec<String> = defaults::EXCLUSIONS.iter().map(|s| s.to_string()).collect();
        tokens.extend(self.exclusions.iter().cloned());

        let mut extend = |set: &[&str]| tokens.extend(set.iter().map(|s| s.to_string()));
        if !self.include_hidden {
            extend(defaults::HIDDEN);
        }
        if !self.include_tests {
            extend(defaults::TEST_EXCLUSIONS);
        }
        if !self.include_lock {
            extend(defaults::LOCK_EXCLUSIONS);
        }
        if !self.include_binary {
            extend(defaults::BINARY_EXCLUSIONS);
        }
        if self.no_docs {
            extend(defaults::DOC_EXTENSIONS);
        }
        tokens
    }

    /// A fresh budget seeded from `max_files`.
    pub fn budget(&self) -> Budget {
        Budget::from_max_files(self.max_files)
    }

    /// Where the user-wide ignore file lives.
    pub fn global_ignore_path(&self) -> Option<PathBuf> {
        self.global_ignore_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config").join("git").join("ignore")))
    }

    /// Contents of the user-wide ignore file. Missing or unreadable reads as
    /// empty.
    pub fn global_ignore_rules(&self) -> String {
        if self.no_ignore {
            return String::new();
        }
        let Some(path) = self.global_ignore_path() else {
            return String::new();
        };
        match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("no global ignore rules at {}: {e}", path.display());
                String::new()
            }
        }
    }
}
