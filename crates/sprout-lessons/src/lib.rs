//! Lesson documents and the one-call checking entry point.
//!
//! A [`Lesson`] is the unit of configuration the surrounding product feeds
//! the engine: what the learner is asked to do, what a correct solution must
//! produce, how many loop iterations it may spend, and what reward passing
//! earns. The engine itself never reads lessons; [`check`] wires the
//! pipeline together and hands back one [`EvaluationResult`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use sprout_engine::{EvaluationResult, ExpectedOutcome, RunConfig, RunStatus, Runner};
use sprout_matcher::Matcher;
use sprout_scanner::LineScanner;
use sprout_syntax::error::{Error, Result};

/// XP and coins granted when the lesson's check passes.
///
/// Sprout only reports these; persisting them is the product's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reward {
    pub xp: u32,
    pub coins: u32,
}

/// One lesson challenge, loaded from a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// Stable identifier, e.g. `loops-03`
    pub id: String,
    /// Display title
    pub title: String,
    /// The flow-control concept this lesson teaches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    /// Code pre-filled in the entry widget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter_code: Option<String>,
    /// Per-lesson override of the loop-iteration budget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration_cap: Option<u32>,
    /// Reward granted on success
    #[serde(default)]
    pub reward: Reward,
    /// What a correct solution must produce
    pub expected: ExpectedOutcome,
}

impl Lesson {
    /// Parse a lesson from JSON text.
    pub fn from_json(json: &str) -> Result<Lesson> {
        serde_json::from_str(json).map_err(|e| Error::new(format!("Invalid lesson: {}", e)))
    }

    /// Load a lesson document from disk.
    pub fn load(path: &Path) -> Result<Lesson> {
        let json = fs::read_to_string(path)
            .map_err(|e| Error::new(format!("Failed to read {}: {}", path.display(), e)))?;
        Lesson::from_json(&json)
    }

    /// Execution limits for this lesson.
    pub fn run_config(&self) -> RunConfig {
        match self.iteration_cap {
            Some(cap) => RunConfig { iteration_cap: cap },
            None => RunConfig::default(),
        }
    }
}

/// Simulate a snippet without grading it.
///
/// Used by the CLI `run` command and the playground, where there is no
/// lesson to check against.
pub fn simulate(source: &str, config: RunConfig) -> (Vec<String>, RunStatus) {
    let lines = LineScanner::new(source).scan();
    let snippet = Matcher::new(lines).match_snippet();
    let mut runner = Runner::new(config);
    let status = runner.run(&snippet);
    (runner.output().to_vec(), status)
}

/// Check a learner snippet against a lesson.
///
/// This is the whole contract the surrounding product consumes: one source
/// text and one lesson in, one result out. Each call is independent; no
/// bindings or budget carry over between calls.
pub fn check(source: &str, lesson: &Lesson) -> EvaluationResult {
    let (output, status) = simulate(source, lesson.run_config());
    let success = lesson.expected.grade(source, &output, status);
    EvaluationResult {
        output,
        status,
        success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_engine::SourceCheck;

    const COUNTDOWN: &str = r#"{
        "id": "loops-03",
        "title": "Countdown",
        "concept": "while loops",
        "iteration_cap": 100,
        "reward": { "xp": 50, "coins": 10 },
        "expected": { "exact": ["3", "2", "1", "GO!"] }
    }"#;

    #[test]
    fn parses_a_lesson_document() {
        let lesson = Lesson::from_json(COUNTDOWN).unwrap();
        assert_eq!(lesson.id, "loops-03");
        assert_eq!(lesson.reward, Reward { xp: 50, coins: 10 });
        assert_eq!(lesson.run_config().iteration_cap, 100);
        assert!(matches!(lesson.expected, ExpectedOutcome::Exact(_)));
    }

    #[test]
    fn missing_optional_fields_default() {
        let lesson = Lesson::from_json(
            r#"{ "id": "x", "title": "X", "expected": { "exact": [] } }"#,
        )
        .unwrap();
        assert_eq!(lesson.reward, Reward::default());
        assert_eq!(
            lesson.run_config().iteration_cap,
            sprout_engine::DEFAULT_ITERATION_CAP
        );
    }

    #[test]
    fn invalid_lesson_json_is_an_error() {
        assert!(Lesson::from_json("{ not json").is_err());
        assert!(Lesson::from_json(r#"{ "id": "x" }"#).is_err());
    }

    #[test]
    fn check_passes_a_correct_solution() {
        let lesson = Lesson::from_json(COUNTDOWN).unwrap();
        let source = "count = 3\nwhile count >= 1:\n    print(count)\n    count -= 1\nprint(\"GO!\")";
        let result = check(source, &lesson);
        assert!(result.success);
        assert_eq!(result.status, RunStatus::Ok);
        assert_eq!(result.output, vec!["3", "2", "1", "GO!"]);
    }

    #[test]
    fn check_fails_a_wrong_solution() {
        let lesson = Lesson::from_json(COUNTDOWN).unwrap();
        let result = check("print(\"GO!\")", &lesson);
        assert!(!result.success);
        assert_eq!(result.output, vec!["GO!"]);
    }

    #[test]
    fn check_fails_a_runaway_loop_with_the_cap_status() {
        let lesson = Lesson::from_json(COUNTDOWN).unwrap();
        let result = check("count = 3\nwhile count >= 1:\n    print(count)", &lesson);
        assert!(!result.success);
        assert_eq!(result.status, RunStatus::IterationCapExceeded);
    }

    #[test]
    fn structural_lesson_checks_the_source() {
        let lesson = Lesson {
            id: "loops-07".to_string(),
            title: "Find the multiple".to_string(),
            concept: None,
            starter_code: None,
            iteration_cap: None,
            reward: Reward::default(),
            expected: ExpectedOutcome::Checks {
                predicates: vec![
                    SourceCheck::UsesLoop,
                    SourceCheck::UsesBreak,
                    SourceCheck::ChecksModulo(7),
                ],
                output: None,
            },
        };
        let good = "for i in range(1, 51):\n    if i % 7 == 0:\n        print(i)\n        break";
        assert!(check(good, &lesson).success);

        let no_break = "for i in range(1, 51):\n    if i % 7 == 0:\n        print(i)";
        assert!(!check(no_break, &lesson).success);
    }

    #[test]
    fn identical_checks_yield_identical_results() {
        let lesson = Lesson::from_json(COUNTDOWN).unwrap();
        let source = "count = 3\nwhile count >= 1:\n    print(count)\n    count -= 1\nprint(\"GO!\")";
        assert_eq!(check(source, &lesson), check(source, &lesson));
    }
}
