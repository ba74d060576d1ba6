//! Exclusion and extension matching over compiled [`Pattern`]s.

use crate::error::PrinError;
use crate::pattern::Pattern;

/// True if any rule matches `path`. Short-circuits on the first hit.
pub fn is_excluded(path: &str, rules: &[Pattern]) -> bool {
    rules.iter().any(|rule| rule.matches(path))
}

/// True if `name` carries one of `extensions`. An empty list matches all.
///
/// Extensions arrive as `*.ext` globs. Anything else falls back to a suffix
/// comparison against `"." + ext`, with any leading dot on the token dropped.
pub fn extension_matches(name: &str, extensions: &[Pattern]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    extensions.iter().any(|ext| match ext {
        Pattern::Glob { matcher, .. } => matcher.is_match(name),
        other => {
            let bare = other.raw().trim_start_matches('.');
            !bare.is_empty() && name.ends_with(&format!(".{bare}"))
        }
    })
}

/// Normalize an extension token to `*.ext` form.
///
/// `rs`, `.rs` and `*.rs` all become `*.rs`. Empty tokens and tokens with a
/// path separator are rejected.
pub fn normalize_extension(token: &str) -> Result<String, PrinError> {
    let token = token.trim();
    if token.is_empty() || token.contains(['/', '\\']) {
        return Err(PrinError::InvalidExtension(token.to_string()));
    }
    if token.starts_with("*.") {
        Ok(token.to_string())
    } else if let Some(bare) = token.strip_prefix('.') {
        Ok(format!("*.{bare}"))
    } else {
        Ok(format!("*.{token}"))
    }
}

/// Compile rule tokens, dropping (and warning about) any that do not compile.
/// A dropped rule never matches.
pub fn compile_rules<I, S>(tokens: I) -> Vec<Pattern>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .filter_map(|tok| match Pattern::rule(tok.as_ref()) {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!("ignoring rule: {e}");
                None
            }
        })
        .collect()
}

/// Normalize and compile extension tokens. Malformed tokens are rejected
/// up front: an extension filter that silently drops an entry would widen
/// the output instead of narrowing it.
pub fn compile_extensions<I, S>(tokens: I) -> Result<Vec<Pattern>, PrinError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|tok| normalize_extension(tok.as_ref()).and_then(|glob| Pattern::glob(&glob)))
        .collect()
}

/// The compiled exclusion and extension rules for one walk.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    exclusions: Vec<Pattern>,
    extensions: Vec<Pattern>,
}

impl Matcher {
    pub fn new(exclusions: Vec<Pattern>, extensions: Vec<Pattern>) -> Self {
        Self {
            exclusions,
            extensions,
        }
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        is_excluded(path, &self.exclusions)
    }

    pub fn extension_matches(&self, name: &str) -> bool {
        extension_matches(name, &self.extensions)
    }

    pub fn exclusions(&self) -> &[Pattern] {
        &self.exclusions
    }

    pub fn extensions(&self) -> &[Pattern] {
        &self.extensions
    }
}
