//! Token classification: glob, regex, or plain text.
//!
//! Every rule token is classified exactly once, before any path is matched.
//! Regex signals take priority over glob metacharacters because glob syntax
//! cannot express anchors or alternation.

use std::sync::LazyLock;

use regex::Regex;

/// The syntax a raw token is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Shell-style wildcard (`*`, `?`, `[...]`).
    Glob,

    /// Carries at least one regex-only signal.
    Regex,

    /// Neither. Plain substrings are valid regexes, so query matching treats
    /// these as regex-by-default.
    Text,
}

// Each entry is one signal that says "this is a regex, not a glob". The
// `(?:^|[^\\])` prefix stands in for "not preceded by a backslash".
const REGEX_SIGNALS: &[&str] = &[
    // ^ anchor at the start
    r"^\^",
    // $ anchor at the end
    r"\$$",
    // unescaped alternation bar
    r"(?:^|[^\\])\|",
    // quantifiers {m} {m,} {,m} {m,n}
    r"(?:^|[^\\])\{\d+\}",
    r"(?:^|[^\\])\{\d+,\}",
    r"(?:^|[^\\])\{,\d+\}",
    r"(?:^|[^\\])\{\d+,\d+\}",
    // lookarounds, non-capturing groups, inline flags
    r"\(\?",
    // backreferences \1, \2, ... \12
    r"\\[1-9]\d*",
    // shorthand classes and anchors
    r"\\[dDsSwWbBAzZ]",
    // unicode property classes
    r"\\[pP]\{[^}]+\}",
    // escaped metacharacters
    r"\\[.^$|?*+()\[\]{}]",
    // unescaped parens wrapping an unescaped alternation
    r"(?:^|[^\\])\((?:\\.|[^\\)|])*\|(?:\\.|[^\\)])*\)",
];

static REGEX_SIGNS: LazyLock<Regex> = LazyLock::new(|| {
    let joined = REGEX_SIGNALS
        .iter()
        .map(|s| format!("(?:{s})"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&joined).expect("regex signal table is a valid regex")
});

const GLOB_METACHARS: &[char] = &['*', '?', '['];

/// Classify a raw token. First match wins: regex signals, then glob
/// metacharacters, then text. The empty token is text.
pub fn classify(token: &str) -> PatternKind {
    if token.is_empty() {
        return PatternKind::Text;
    }
    if looks_like_regex(token) {
        return PatternKind::Regex;
    }
    if token.contains(GLOB_METACHARS) {
        return PatternKind::Glob;
    }
    PatternKind::Text
}

/// True if the token carries any regex-only signal.
pub fn looks_like_regex(token: &str) -> bool {
    REGEX_SIGNS.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn documented_examples() {
        assert_eq!(classify("*.py"), PatternKind::Glob);
        assert_eq!(classify(r"^test_.*\.py$"), PatternKind::Regex);
        assert_eq!(classify("foo(bar|baz)qux"), PatternKind::Regex);
        assert_eq!(classify("Report (final).pdf"), PatternKind::Text);
    }

    #[test]
    fn anchors() {
        assert_eq!(classify("^foo"), PatternKind::Regex);
        assert_eq!(classify("foo$"), PatternKind::Regex);
        assert_eq!(classify("fo^o"), PatternKind::Text);
    }

    #[test]
    fn alternation() {
        assert_eq!(classify("foo|bar"), PatternKind::Regex);
        assert_eq!(classify("|bar"), PatternKind::Regex);
    }

    #[test]
    fn quantifiers() {
        for tok in ["a{2}", "a{2,}", "a{,3}", "a{2,4}", "{3}"] {
            assert_eq!(classify(tok), PatternKind::Regex, "{tok}");
        }
        // Brace expansion without digits is not a quantifier.
        assert_eq!(classify("{a,b}"), PatternKind::Text);
    }

    #[test]
    fn groups_and_backreferences() {
        assert_eq!(classify("(?=foo)"), PatternKind::Regex);
        assert_eq!(classify("(?i)readme"), PatternKind::Regex);
        assert_eq!(classify(r"(a)\1"), PatternKind::Regex);
        assert_eq!(classify(r"(abc)\12"), PatternKind::Regex);
    }

    #[test]
    fn shorthands_and_properties() {
        for tok in [
            r"\d", r"\D", r"\s", r"\S", r"\w", r"\W", r"\b", r"\B", r"\A", r"\Z",
        ] {
            assert_eq!(classify(tok), PatternKind::Regex, "{tok}");
        }
        assert_eq!(classify(r"\p{L}"), PatternKind::Regex);
        assert_eq!(classify(r"\P{Greek}"), PatternKind::Regex);
    }

    #[test]
    fn escaped_metacharacters() {
        assert_eq!(classify(r"file\.txt"), PatternKind::Regex);
        assert_eq!(classify(r"a\(b\)c"), PatternKind::Regex);
        assert_eq!(classify(r"foo\|bar"), PatternKind::Regex);
        assert_eq!(classify(r"\[data\]"), PatternKind::Regex);
        assert_eq!(classify(r"foo(bar\|baz)qux"), PatternKind::Regex);
    }

    #[test]
    fn regex_signals_beat_glob_metachars() {
        assert_eq!(classify("*(a|b)"), PatternKind::Regex);
        assert_eq!(classify(r"^src/.*\.rs$"), PatternKind::Regex);
    }

    #[test]
    fn common_globs() {
        for tok in [
            "*.py",
            "src/*/test?.txt",
            "[0-9].csv",
            "**/*.md",
            "foo.*",
            "**/foo*bar.txt",
            ".*",
        ] {
            assert_eq!(classify(tok), PatternKind::Glob, "{tok}");
        }
    }

    #[test]
    fn plain_text() {
        for tok in ["", "Report (final).pdf", "C++/a+b.txt", "node_modules", "Carthage/Build"] {
            assert_eq!(classify(tok), PatternKind::Text, "{tok:?}");
        }
    }

    proptest! {
        // Tokens made only of word characters, dots, dashes and slashes never
        // carry a signal or a glob metacharacter.
        #[test]
        fn plain_names_are_text(tok in "[a-zA-Z0-9_./-]{0,24}") {
            prop_assert_eq!(classify(&tok), PatternKind::Text);
        }

        // Prefixing any token with a caret always makes it a regex.
        #[test]
        fn caret_prefix_is_regex(tok in "[a-z*?.]{0,12}") {
            let anchored = format!("^{tok}");
            prop_assert_eq!(classify(&anchored), PatternKind::Regex);
        }
    }
}
