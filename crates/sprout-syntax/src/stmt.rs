//! Statement shapes recognized by the matcher.
//!
//! One authoritative tagged-variant list replaces the per-lesson pattern
//! checks the curriculum originally duplicated. Conditions, range bounds and
//! print arguments stay as raw text: they are evaluated against the current
//! variable bindings at execution time, which is what lets a `while`
//! condition observe updates made inside its own body.

/// Operators accepted in augmented assignments (`score += 10`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AugOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl AugOp {
    /// The surface spelling, used in diagnostics.
    pub fn symbol(&self) -> &'static str {
        match self {
            AugOp::Add => "+=",
            AugOp::Sub => "-=",
            AugOp::Mul => "*=",
            AugOp::Div => "/=",
        }
    }
}

/// One branch of an `if`/`elif`/`else` chain.
///
/// `cond` is `Some` for `if` and `elif` branches and `None` for `else`.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub cond: Option<String>,
    pub body: Vec<Stmt>,
}

/// A recognized statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `name = expression`
    Assign { name: String, expr: String },
    /// `name op= expression`
    AugAssign {
        name: String,
        op: AugOp,
        expr: String,
    },
    /// `print(arg, arg, ...)` with raw argument texts
    Print { args: Vec<String> },
    /// A full `if`/`elif`/`else` chain; exactly one branch body may run
    IfChain { branches: Vec<Branch> },
    /// `while condition:` with its indented body
    While { cond: String, body: Vec<Stmt> },
    /// `for var in range(...):` with raw bound expressions
    For {
        var: String,
        start: Option<String>,
        end: String,
        step: Option<String>,
        body: Vec<Stmt>,
    },
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// A line matching no known shape; skipped silently at execution
    Unrecognized { text: String },
}

/// A matched learner snippet, ready for execution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snippet {
    pub stmts: Vec<Stmt>,
}
