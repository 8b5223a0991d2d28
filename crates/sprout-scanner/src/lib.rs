//! Sprout line scanner: converts snippet text into logical lines.
//!
//! The scanner is total: it never fails, regardless of what the learner
//! typed. Blank lines and `#` comment lines disappear here; everything else
//! passes through as a [`LogicalLine`] for the matcher to classify.

use sprout_syntax::LogicalLine;

/// Number of spaces one indentation level (or one tab) is worth.
const TAB_WIDTH: usize = 4;

/// Splits snippet text into trimmed, depth-annotated logical lines.
pub struct LineScanner<'a> {
    src: &'a str,
}

impl<'a> LineScanner<'a> {
    /// Create a new scanner over the given snippet text.
    pub fn new(src: &'a str) -> Self {
        Self { src }
    }

    /// Produce the ordered logical lines of the snippet.
    ///
    /// Identical input always yields identical output; there is no hidden
    /// state between calls.
    pub fn scan(&self) -> Vec<LogicalLine> {
        let mut lines = Vec::new();
        for (idx, raw) in self.src.lines().enumerate() {
            let without_comment = strip_trailing_comment(raw);
            let text = without_comment.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            lines.push(LogicalLine {
                text: text.to_string(),
                depth: indent_depth(raw),
                line: idx + 1,
            });
        }
        lines
    }
}

/// Indentation depth of a raw line: leading whitespace width divided by the
/// tab width, with a tab counted as a full level.
fn indent_depth(raw: &str) -> usize {
    let mut width = 0usize;
    for c in raw.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += TAB_WIDTH,
            _ => break,
        }
    }
    width / TAB_WIDTH
}

/// Removes a trailing `#` comment, leaving `#` inside string literals alone.
/// A backslash inside a literal escapes the next character, so `"\""` does
/// not close the string.
fn strip_trailing_comment(raw: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match quote {
            Some(q) => match c {
                '\\' => escaped = true,
                c if c == q => quote = None,
                _ => {}
            },
            None => match c {
                '\'' | '"' => quote = Some(c),
                '#' => return &raw[..i],
                _ => {}
            },
        }
    }
    raw
}
