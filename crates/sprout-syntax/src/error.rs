//! Error handling types shared by every Sprout component.
//!
//! Learner input is free-form text typed by a child, so almost nothing in the
//! pipeline is allowed to fail loudly: scanner output is total, unrecognized
//! statements are skipped, and expression failures collapse to a false
//! condition. The `Error` type below exists for the places that still need to
//! say *why* something could not be evaluated (the expression tokenizer and
//! evaluator, lesson file loading, the CLI), and it carries an optional
//! source line number because Sprout works line by line.
//!
//! # Examples
//!
//! ```rust
//! use sprout_syntax::error::{Error, Result, fail};
//!
//! fn parse_cap(s: &str) -> Result<u32> {
//!     s.parse().map_err(|_| Error::new(format!("Invalid iteration cap: {}", s)))
//! }
//!
//! fn bounded_cap(s: &str) -> Result<u32> {
//!     let cap = parse_cap(s)?;
//!     if cap == 0 { fail("Iteration cap must be positive") } else { Ok(cap) }
//! }
//! ```

use std::fmt;

/// An error raised while evaluating or grading a learner snippet.
///
/// Kept deliberately lightweight: a message plus an optional 1-based source
/// line. Column information is not tracked because statements are matched by
/// whole-line shape, not by a grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// Human-readable error message
    pub msg: String,

    /// Optional 1-based line number in the learner's snippet
    pub line: Option<usize>,
}

impl Error {
    /// Creates a new error without a source location.
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            line: None,
        }
    }

    /// Creates a new error attached to a snippet line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sprout_syntax::Error;
    ///
    /// let err = Error::on_line("Unknown name 'cuont'", 3);
    /// assert_eq!(format!("{}", err), "Unknown name 'cuont' on line 3");
    /// ```
    pub fn on_line(msg: impl Into<String>, line: usize) -> Self {
        Self {
            msg: msg.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(l) => write!(f, "{} on line {}", self.msg, l),
            None => write!(f, "{}", self.msg),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::new(s)
    }
}
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::new(s)
    }
}

/// A specialized `Result` type used throughout the Sprout crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to create an error result.
///
/// Shorthand for `Err(Error::new(msg))`.
pub fn fail<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::new(msg))
}

/// Convenience function to create an error result attached to a snippet line.
pub fn fail_at<T>(line: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::on_line(msg, line))
}
