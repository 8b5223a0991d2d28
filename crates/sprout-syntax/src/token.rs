//! Token definitions for the restricted expression grammar.
//!
//! Expressions and conditions inside a snippet (`count <= 5`,
//! `score + bonus * 2`, `n % 3 == 0 and n > 0`) are evaluated by a small
//! dedicated tokenizer and evaluator rather than any general-purpose eval.
//! These tokens cover exactly the operator set the lessons teach:
//! arithmetic, comparison, and the textual boolean keywords.
//!
//! # Token Categories
//!
//! - **Literals**: integers, floats, quoted strings, `True`/`False`
//! - **Identifiers**: variable names bound earlier in the snippet
//! - **Keyword operators**: `and`, `or`, `not`
//! - **Symbolic operators**: `+ - * / // %`, `== != < <= > >=`
//! - **Grouping**: parentheses
//!
//! # Examples
//!
//! ```rust
//! use sprout_syntax::{Token, TokenKind};
//!
//! let number = Token { kind: TokenKind::Int(42), col: 1 };
//! let name = Token { kind: TokenKind::Ident("count".to_string()), col: 4 };
//! assert_ne!(number.kind, name.kind);
//! ```

/// Token kinds produced by the expression tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // === Literals ===
    /// An integer literal, e.g. `42`
    Int(i64),

    /// A float literal, e.g. `2.5`
    Float(f64),

    /// A quoted string literal (single or double quotes)
    Str(String),

    /// A variable name, e.g. `count`
    Ident(String),

    /// The `True` literal (lowercase `true` is accepted as an alias)
    True,

    /// The `False` literal (lowercase `false` is accepted as an alias)
    False,

    // === Keyword operators ===
    /// The `and` keyword
    And,

    /// The `or` keyword
    Or,

    /// The `not` keyword
    Not,

    // === Symbolic operators ===
    /// Addition operator `+`
    Plus,

    /// Subtraction / negation operator `-`
    Minus,

    /// Multiplication operator `*`
    Star,

    /// Division operator `/`
    Slash,

    /// Floor division operator `//`
    SlashSlash,

    /// Modulo operator `%`
    Percent,

    /// Equality operator `==`
    EqEq,

    /// Inequality operator `!=`
    NotEq,

    /// Less-than operator `<`
    Less,

    /// Less-than-or-equal operator `<=`
    LessEq,

    /// Greater-than operator `>`
    Greater,

    /// Greater-than-or-equal operator `>=`
    GreaterEq,

    // === Grouping ===
    /// Left parenthesis `(`
    LParen,

    /// Right parenthesis `)`
    RParen,

    /// End-of-expression marker
    Eof,
}

/// A token with the column it started at inside its expression string.
///
/// The column is 1-based and relative to the expression text, not the whole
/// snippet; it only feeds contained error messages, which are never shown to
/// the learner as raw errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind and semantic content of this token
    pub kind: TokenKind,

    /// Column inside the expression text (1-based)
    pub col: usize,
}
