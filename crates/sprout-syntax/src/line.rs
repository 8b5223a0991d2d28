//! Logical lines produced by the line scanner.

/// A trimmed, non-blank, non-comment source line with its indentation depth.
///
/// Depth is derived from leading whitespace with a tab counted as four
/// spaces; the matcher uses it to detect block boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalLine {
    /// The trimmed statement text, trailing comment removed
    pub text: String,
    /// Indentation depth (leading whitespace divided by the tab width)
    pub depth: usize,
    /// 1-based line number in the original snippet
    pub line: usize,
}
