use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;

use crate::classify::{classify, PatternKind};
use crate::error::PrinError;

/// A rule token, classified and compiled once.
///
/// All downstream matching switches on the variant; nothing is re-classified
/// per path. Patterns are immutable and shared read-only for a whole run.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Exact path-segment sequence, e.g. `node_modules` or `Carthage/Build`.
    LiteralPath { raw: String, segments: Vec<String> },

    /// Shell-style wildcard.
    Glob { raw: String, matcher: GlobMatcher },

    /// Unanchored regex search.
    Regex { raw: String, regex: Regex },
}

impl Pattern {
    /// Compile an exclusion rule. Text tokens become literal segment rules so
    /// that `out` excludes an `out/` directory without excluding `layout.rs`.
    pub fn rule(token: &str) -> Result<Self, PrinError> {
        match classify(token) {
            PatternKind::Glob => Self::glob(token),
            PatternKind::Regex => Self::regex(token),
            PatternKind::Text => Ok(Self::literal(token)),
        }
    }

    /// Compile a search query. Text tokens are compiled as regexes: plain
    /// substrings are valid regexes, so text is regex-by-default here.
    pub fn query(token: &str) -> Result<Self, PrinError> {
        match classify(token) {
            PatternKind::Glob => Self::glob(token),
            PatternKind::Regex | PatternKind::Text => Self::regex(token),
        }
    }

    pub fn literal(token: &str) -> Self {
        let segments = token
            .split(['/', '\\'])
            .filter(|seg| !seg.is_empty())
            .map(str::to_string)
            .collect();
        Self::LiteralPath {
            raw: token.to_string(),
            segments,
        }
    }

    pub fn glob(token: &str) -> Result<Self, PrinError> {
        // fnmatch semantics: `*` crosses separators.
        let glob = GlobBuilder::new(token)
            .literal_separator(false)
            .backslash_escape(true)
            .build()
            .map_err(|e| PrinError::InvalidPattern {
                pattern: token.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::Glob {
            raw: token.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    pub fn regex(token: &str) -> Result<Self, PrinError> {
        let regex = Regex::new(token).map_err(|e| PrinError::InvalidPattern {
            pattern: token.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::Regex {
            raw: token.to_string(),
            regex,
        })
    }

    /// The token this pattern was compiled from.
    pub fn raw(&self) -> &str {
        match self {
            Self::LiteralPath { raw, .. } | Self::Glob { raw, .. } | Self::Regex { raw, .. } => raw,
        }
    }

    pub fn kind(&self) -> PatternKind {
        match self {
            Self::LiteralPath { .. } => PatternKind::Text,
            Self::Glob { .. } => PatternKind::Glob,
            Self::Regex { .. } => PatternKind::Regex,
        }
    }

    /// Match against a slash-joined logical path.
    ///
    /// Globs are tried against the full path and against the last segment, so
    /// `test_*` catches `src/test_io.py`. Regexes search the full path.
    /// Literal rules match any contiguous run of whole segments.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::LiteralPath { segments, .. } => {
                if segments.is_empty() {
                    return false;
                }
                let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
                parts
                    .windows(segments.len())
                    .any(|w| w.iter().zip(segments).all(|(a, b)| *a == b.as_str()))
            }
            Self::Glob { matcher, .. } => {
                if matcher.is_match(path) {
                    return true;
                }
                let name = path.rsplit('/').next().unwrap_or(path);
                name != path && matcher.is_match(name)
            }
            Self::Regex { regex, .. } => regex.is_match(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_kinds_follow_classification() {
        assert!(matches!(Pattern::rule("*.log").unwrap(), Pattern::Glob { .. }));
        assert!(matches!(Pattern::rule("^a$").unwrap(), Pattern::Regex { .. }));
        assert!(matches!(Pattern::rule("build").unwrap(), Pattern::LiteralPath { .. }));
        assert!(matches!(Pattern::query("build").unwrap(), Pattern::Regex { .. }));
    }

    #[test]
    fn kind_reports_the_compiled_variant() {
        assert_eq!(Pattern::rule("*.log").unwrap().kind(), PatternKind::Glob);
        assert_eq!(Pattern::rule("(?i)cache").unwrap().kind(), PatternKind::Regex);
        assert_eq!(Pattern::rule("target").unwrap().kind(), PatternKind::Text);
        assert_eq!(Pattern::query("target").unwrap().kind(), PatternKind::Regex);
    }

    #[test]
    fn literal_matches_whole_segments() {
        let p = Pattern::literal("build");
        assert!(p.matches("build"));
        assert!(p.matches("build/out.o"));
        assert!(p.matches("crates/x/build/gen.rs"));
        assert!(!p.matches("src/rebuild.rs"));
        assert!(!p.matches("builder/mod.rs"));

        let p = Pattern::literal("Carthage/Build");
        assert!(p.matches("ios/Carthage/Build/x"));
        assert!(!p.matches("Carthage/Other/Build"));
    }

    #[test]
    fn literal_accepts_backslash_separators() {
        let p = Pattern::literal(r"foo\bar");
        assert!(p.matches("x/foo/bar/y"));
    }

    #[test]
    fn glob_matches_full_path_or_name() {
        let p = Pattern::rule("*.log").unwrap();
        assert!(p.matches("a/b/c.log"));
        assert!(!p.matches("a/b/c.log.txt"));

        let p = Pattern::rule("test_*").unwrap();
        assert!(p.matches("src/test_io.py"));
        assert!(!p.matches("src/io_test.py"));

        let p = Pattern::rule("tests*").unwrap();
        assert!(p.matches("tests"));
        assert!(p.matches("tests/test_c.py"));
    }

    #[test]
    fn glob_star_crosses_separators() {
        let p = Pattern::rule("src/*.rs").unwrap();
        assert!(p.matches("src/a/b.rs"));
    }

    #[test]
    fn regex_is_a_search() {
        let p = Pattern::rule(r"_test\.py$").unwrap();
        assert!(p.matches("pkg/main_test.py"));
        assert!(!p.matches("pkg/main_test.pyc"));
        let p = Pattern::query("ain").unwrap();
        assert!(p.matches("src/main.rs"));
    }

    #[test]
    fn invalid_regex_is_an_error() {
        let err = Pattern::regex("(unclosed|").unwrap_err();
        assert!(matches!(err, PrinError::InvalidPattern { .. }));
    }

    #[test]
    fn raw_round_trips() {
        for tok in ["*.md", "^x", "vendor"] {
            assert_eq!(Pattern::rule(tok).unwrap().raw(), tok);
        }
    }
}
