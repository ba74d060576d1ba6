use crate::config::FilterConfig;
use crate::content::{looks_like_text, TextPredicate};
use crate::engine::{DepthGate, EngineOptions, Walker};
use crate::error::PrinError;
use crate::matcher::{compile_extensions, compile_rules, Matcher};
use crate::traits::Source;

// ---------------------------------------------------------------------------
// WalkBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring a prin [`Walker`].
///
/// Created via [`prin::walk()`](crate::walk). Configure with chained
/// builder methods, then call [`build()`](WalkBuilder::build) to compile the
/// rules once and get a reusable walker.
///
/// # Example
///
/// ```rust,ignore
/// let walker = prin::walk()
///     .source(my_source)
///     .config(FilterConfig::load(path)?)
///     .collect_paths(true)
///     .build()?;
/// let results = walker.run(&["src", "README.md"], &mut sink, &mut budget);
/// ```
pub struct WalkBuilder {
    source:         Option<Box<dyn Source>>,
    config:         FilterConfig,
    global_ignore:  Option<String>,
    text_predicate: TextPredicate,
    collect_paths:  bool,
    collect_errors: bool,
}

impl Default for WalkBuilder {
    fn default() -> Self {
        Self {
            source:         None,
            config:         FilterConfig::default(),
            global_ignore:  None,
            text_predicate: looks_like_text,
            collect_paths:  false,
            collect_errors: false,
        }
    }
}

impl WalkBuilder {
    // ── Source ────────────────────────────────────────────────────────────

    /// Set the source to walk.
    ///
    /// Any type implementing [`Source`] is accepted: a directory on disk, a
    /// remote repository, an in-memory tree.
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Some(Box::new(s));
        self
    }

    // ── Filters ───────────────────────────────────────────────────────────

    /// Set the filter configuration. Defaults to [`FilterConfig::default`].
    pub fn config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `rules` (gitignore syntax) as the user-wide ignore rules instead
    /// of reading the global ignore file.
    pub fn global_ignore(mut self, rules: impl Into<String>) -> Self {
        self.global_ignore = Some(rules.into());
        self
    }

    /// Replace the predicate that decides whether bytes are emitted as text
    /// or as the binary marker.
    pub fn text_predicate(mut self, predicate: TextPredicate) -> Self {
        self.text_predicate = predicate;
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Collect emitted display paths into [`Results::paths`](crate::Results::paths).
    ///
    /// Disabled by default to avoid allocation overhead when paths aren't needed.
    pub fn collect_paths(mut self, yes: bool) -> Self {
        self.collect_paths = yes;
        self
    }

    /// Collect non-fatal errors into [`Results::errors`](crate::Results::errors).
    ///
    /// Disabled by default. When enabled, recoverable errors (permission denied,
    /// failed reads) are stored rather than only logged.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Compile the rules and hand the configuration to the source.
    ///
    /// # Errors
    ///
    /// Returns `Err` for fatal configuration errors: no source provided, or an
    /// extension token that cannot be normalized or compiled. Invalid
    /// exclusion tokens are logged and dropped instead.
    pub fn build(self) -> Result<Walker, PrinError> {
        let mut source = self.source.ok_or_else(|| {
            PrinError::InvalidSource("no source provided".into())
        })?;

        let config = self.config;
        let matcher = Matcher::new(
            compile_rules(config.resolved_exclusions()),
            compile_extensions(&config.extensions)?,
        );
        source.configure(&config);

        let global_rules = match self.global_ignore {
            Some(rules) => rules,
            None        => config.global_ignore_rules(),
        };

        tracing::debug!(
            "walker built with {} exclusion rules, {} extension rules",
            matcher.exclusions().len(),
            matcher.extensions().len()
        );

        Ok(Walker::new(EngineOptions {
            source,
            matcher,
            depth:          DepthGate::new(config.min_depth, config.max_depth, config.exact_depth),
            include_empty:  config.include_empty,
            only_headers:   config.only_headers,
            use_ignore:     !config.no_ignore,
            global_rules,
            text_predicate: self.text_predicate,
            collect_paths:  self.collect_paths,
            collect_errors: self.collect_errors,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;

    #[test]
    fn missing_source_is_rejected() {
        let err = WalkBuilder::default().build().unwrap_err();
        assert!(matches!(err, PrinError::InvalidSource(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn bad_extension_is_rejected() {
        let config = FilterConfig {
            extensions: vec!["a/b".into()],
            ..Default::default()
        };
        let err = WalkBuilder::default()
            .source(MemorySource::new())
            .config(config)
            .build()
            .unwrap_err();
        assert!(matches!(err, PrinError::InvalidExtension(_)));
    }

    #[test]
    fn invalid_exclusion_is_dropped_not_fatal() {
        let config = FilterConfig {
            exclusions: vec!["(?<bad".into()],
            ..Default::default()
        };
        assert!(WalkBuilder::default()
            .source(MemorySource::new())
            .config(config)
            .build()
            .is_ok());
    }
}
