//! What the engine hands to a sink, and how bytes become text.

/// The body of one emitted item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Decoded text.
    Text(String),

    /// The bytes failed the text predicate.
    Binary,

    /// The source could not read the bytes.
    Unreadable,

    /// Headers-only mode: the body was never read.
    Omitted,
}

impl Body {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary)
    }
}

/// Predicate deciding whether a blob is text. Injected so callers can plug in
/// a signature sniffer; [`looks_like_text`] is the default.
pub type TextPredicate = fn(&[u8]) -> bool;

/// Text when there is no NUL byte and the bytes are valid UTF-8.
pub fn looks_like_text(blob: &[u8]) -> bool {
    !blob.contains(&0) && std::str::from_utf8(blob).is_ok()
}

/// Decode as UTF-8, falling back to Latin-1 (every byte maps to one char).
pub fn decode_text(blob: Vec<u8>) -> String {
    match String::from_utf8(blob) {
        Ok(text) => text,
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Turn bytes into a [`Body`] using `is_text`.
pub fn body_from_bytes(blob: Vec<u8>, is_text: TextPredicate) -> Body {
    if is_text(&blob) {
        Body::Text(decode_text(blob))
    } else {
        Body::Binary
    }
}
