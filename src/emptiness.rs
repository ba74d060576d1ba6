//! Emptiness checks sources can layer under their `is_empty`.
//!
//! A blob is empty when it is whitespace only. Python sources (`.py`, `.pyi`)
//! are additionally "semantically empty" when every top-level statement is an
//! import, an `__all__ = [...]` re-export list, a docstring or a comment:
//! package `__init__` files that only re-export carry nothing worth printing.

/// Whitespace-only (or zero-length) bytes.
pub fn is_blank(blob: &[u8]) -> bool {
    blob.iter().all(u8::is_ascii_whitespace)
}

/// Byte-emptiness plus the Python re-export notion described above.
pub fn is_semantically_empty(blob: &[u8], name: &str) -> bool {
    if is_blank(blob) {
        return true;
    }
    if !(name.ends_with(".py") || name.ends_with(".pyi")) {
        return false;
    }
    if blob.contains(&0) {
        return false;
    }
    match std::str::from_utf8(blob) {
        Ok(text) => only_declarations(text),
        Err(_) => false,
    }
}

fn only_declarations(text: &str) -> bool {
    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        // Indented code at the top level is a block body: not a declaration.
        if line.starts_with([' ', '\t']) {
            return false;
        }

        if is_import(trimmed) {
            skip_continuation(trimmed, &mut lines);
            continue;
        }
        if is_all_assignment(trimmed) {
            skip_brackets(trimmed, &mut lines);
            continue;
        }
        if let Some(quote) = docstring_opener(trimmed) {
            if !skip_docstring(trimmed, quote, &mut lines) {
                return false;
            }
            continue;
        }
        return false;
    }
    true
}

fn is_import(line: &str) -> bool {
    (line.starts_with("import ") || (line.starts_with("from ") && line.contains(" import")))
        && !code_of(line).contains(';')
}

fn is_all_assignment(line: &str) -> bool {
    line.strip_prefix("__all__")
        .map(str::trim_start)
        .is_some_and(|rest| rest.starts_with('=') && !rest.starts_with("=="))
        && !code_of(line).contains(';')
}

/// The line with string literal contents and any trailing comment removed.
/// Quote characters are kept so the shape stays visible.
fn code_of(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut quote: Option<char> = None;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                    out.push(c);
                }
            }
            None => match c {
                '#' => break,
                '"' | '\'' => {
                    quote = Some(c);
                    out.push(c);
                }
                _ => out.push(c),
            },
        }
    }
    out
}

/// Consume lines belonging to a parenthesized or backslash-continued import.
fn skip_continuation<'a>(first: &str, lines: &mut impl Iterator<Item = &'a str>) {
    if first.contains('(') && !first.contains(')') {
        for line in lines.by_ref() {
            if line.contains(')') {
                return;
            }
        }
        return;
    }
    let mut current = first.trim_end().to_string();
    while current.ends_with('\\') {
        match lines.next() {
            Some(next) => current = next.trim_end().to_string(),
            None => return,
        }
    }
}

/// Consume lines until the brackets opened on `first` are balanced.
fn skip_brackets<'a>(first: &str, lines: &mut impl Iterator<Item = &'a str>) {
    let mut depth = bracket_delta(first);
    while depth > 0 {
        match lines.next() {
            Some(line) => depth += bracket_delta(line),
            None => return,
        }
    }
}

fn bracket_delta(line: &str) -> i32 {
    code_of(line).chars().fold(0, |acc, c| match c {
        '(' | '[' | '{' => acc + 1,
        ')' | ']' | '}' => acc - 1,
        _ => acc,
    })
}

/// The quote sequence a string-literal statement opens with, if any.
/// Byte strings are not docstrings.
fn docstring_opener(line: &str) -> Option<&'static str> {
    let body = line.trim_start_matches(['r', 'R', 'u', 'U']);
    ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find(|q| body.starts_with(q))
}

/// Consume a string-literal statement. Returns false when something other
/// than a comment trails the closing quote.
fn skip_docstring<'a>(first: &str, quote: &str, lines: &mut impl Iterator<Item = &'a str>) -> bool {
    let body = first.trim_start_matches(['r', 'R', 'u', 'U']);
    let after_open = &body[quote.len()..];
    if let Some(end) = after_open.find(quote) {
        return trailing_is_inert(&after_open[end + quote.len()..]);
    }
    if quote.len() == 1 {
        // Unterminated single-line string.
        return false;
    }
    for line in lines.by_ref() {
        if let Some(end) = line.find(quote) {
            return trailing_is_inert(&line[end + quote.len()..]);
        }
    }
    false
}

fn trailing_is_inert(rest: &str) -> bool {
    let rest = rest.trim();
    rest.is_empty() || rest.starts_with('#')
}
