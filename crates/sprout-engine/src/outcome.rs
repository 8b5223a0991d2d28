//! Expected outcomes, structural checks and the graded result of a run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    /// The snippet ran to completion and printed something
    Ok,
    /// The shared loop budget ran out; the learner likely forgot an update
    IterationCapExceeded,
    /// The snippet completed but printed nothing
    NoOutput,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Ok => "ok",
            RunStatus::IterationCapExceeded => "iteration-cap-exceeded",
            RunStatus::NoOutput => "no-output",
        };
        write!(f, "{}", s)
    }
}

/// A pass/fail check on the raw snippet text, used as a proxy for "did the
/// learner use the required construct".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCheck {
    /// The source contains this substring verbatim
    Contains(String),
    /// The source uses a `while` or `for` loop
    UsesLoop,
    /// The source uses an `if`
    UsesConditional,
    /// The source uses `break`
    UsesBreak,
    /// The source uses `continue`
    UsesContinue,
    /// The source checks divisibility by this number (`% n`),
    /// whitespace-insensitively
    ChecksModulo(i64),
}

impl SourceCheck {
    /// Whether the raw snippet text satisfies this check.
    pub fn matches(&self, source: &str) -> bool {
        match self {
            SourceCheck::Contains(needle) => source.contains(needle),
            SourceCheck::UsesLoop => source.contains("while ") || source.contains("for "),
            SourceCheck::UsesConditional => source.contains("if "),
            SourceCheck::UsesBreak => source.contains("break"),
            SourceCheck::UsesContinue => source.contains("continue"),
            SourceCheck::ChecksModulo(n) => {
                let squashed: String = source.chars().filter(|c| !c.is_whitespace()).collect();
                let needle = format!("%{}", n);
                squashed.match_indices(&needle).any(|(i, _)| {
                    // `% 7` must not be satisfied by `% 70`.
                    squashed[i + needle.len()..]
                        .chars()
                        .next()
                        .map_or(true, |c| !c.is_ascii_digit())
                })
            }
        }
    }
}

/// What a correct solution must produce, owned by lesson configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedOutcome {
    /// The exact ordered sequence of output lines
    Exact(Vec<String>),
    /// Structural checks on the source, with an optional output requirement
    Checks {
        predicates: Vec<SourceCheck>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output: Option<Vec<String>>,
    },
}

impl ExpectedOutcome {
    /// Grade a finished run. A run that hit the iteration cap never passes,
    /// whatever it managed to print first.
    pub fn grade(&self, source: &str, output: &[String], status: RunStatus) -> bool {
        if status == RunStatus::IterationCapExceeded {
            return false;
        }
        match self {
            ExpectedOutcome::Exact(expected) => output == expected.as_slice(),
            ExpectedOutcome::Checks { predicates, output: expected } => {
                predicates.iter().all(|p| p.matches(source))
                    && expected.as_ref().map_or(true, |e| output == e.as_slice())
            }
        }
    }
}

/// The result of one evaluation pass, consumed by the surrounding product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Output lines in execution order, for display
    pub output: Vec<String>,
    /// Terminal status of the run
    pub status: RunStatus,
    /// Whether the run satisfied the lesson's expected outcome
    pub success: bool,
}
