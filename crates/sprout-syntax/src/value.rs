//! Runtime values produced while simulating a learner snippet.

use std::fmt;

/// A value bound to a variable or produced by an expression.
///
/// The teaching language keeps integers exact and only introduces fractions
/// through division, so `Int` and `Float` are separate variants instead of a
/// single numeric type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer value
    Int(i64),
    /// A non-integer numeric value, printed with two decimals
    Float(f64),
    /// A UTF-8 encoded string value
    Str(String),
    /// A boolean value (True or False)
    Bool(bool),
}

impl Value {
    /// Truthiness used when a condition does not evaluate to a bool.
    ///
    /// Matches the teaching language: zero, empty string and `False` are
    /// falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
        }
    }

    /// Short type name used in contained error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
        }
    }

    /// Numeric view of this value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            // Non-integer results always render with two decimals
            Value::Float(x) => write!(f, "{:.2}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_floats_with_two_decimals() {
        assert_eq!(format!("{}", Value::Float(2.5)), "2.50");
        assert_eq!(format!("{}", Value::Float(1.0 / 3.0)), "0.33");
        assert_eq!(format!("{}", Value::Int(7)), "7");
        assert_eq!(format!("{}", Value::Bool(true)), "True");
    }

    #[test]
    fn truthiness_follows_teaching_language() {
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(!Value::Str(String::new()).is_truthy());
        assert!(Value::Str("x".to_string()).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
    }
}
