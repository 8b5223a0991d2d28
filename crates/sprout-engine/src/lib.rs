//! Sprout engine: executes matched snippets and grades them against lesson
//! outcomes.
//!
//! This crate is the consolidated core that every lesson shares: one block
//! executor with a per-run iteration budget, one output collector, and one
//! grading path over expected outcomes. The scanner and matcher feed it; the
//! lesson layer and CLI consume it.

pub mod bindings;
pub mod engine;
mod flow;
pub mod outcome;

pub use bindings::Bindings;
pub use engine::{RunConfig, Runner, DEFAULT_ITERATION_CAP};
pub use outcome::{EvaluationResult, ExpectedOutcome, RunStatus, SourceCheck};

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_matcher::Matcher;
    use sprout_scanner::LineScanner;

    fn run(input: &str) -> (Vec<String>, RunStatus) {
        run_with_cap(input, DEFAULT_ITERATION_CAP)
    }

    fn run_with_cap(input: &str, cap: u32) -> (Vec<String>, RunStatus) {
        let lines = LineScanner::new(input).scan();
        let snippet = Matcher::new(lines).match_snippet();
        let mut runner = Runner::new(RunConfig { iteration_cap: cap });
        let status = runner.run(&snippet);
        (runner.output().to_vec(), status)
    }

    fn expect_output(input: &str, expected: &[&str]) {
        let (output, status) = run(input);
        assert_eq!(output, expected, "Snippet: {}", input);
        assert_eq!(status, RunStatus::Ok);
    }

    #[test]
    fn counts_up_through_a_while_loop() {
        expect_output(
            "count = 1\nwhile count <= 5:\n    print(count)\n    count += 1",
            &["1", "2", "3", "4", "5"],
        );
    }

    #[test]
    fn countdown_then_statement_after_the_loop() {
        expect_output(
            "count = 10\nwhile count >= 1:\n    print(count)\n    count -= 1\nprint(\"GO!\")",
            &["10", "9", "8", "7", "6", "5", "4", "3", "2", "1", "GO!"],
        );
    }

    #[test]
    fn infinite_loop_halts_at_the_cap() {
        let (_, status) = run_with_cap("x = 5\nwhile x > 0:\n    print(x)", 50);
        assert_eq!(status, RunStatus::IterationCapExceeded);
    }

    #[test]
    fn cap_is_shared_across_loops() {
        // Two loops of 30 iterations each overflow a cap of 50 together.
        let src = "for i in range(30):\n    x = 1\nfor j in range(30):\n    y = 1";
        let (_, status) = run_with_cap(src, 50);
        assert_eq!(status, RunStatus::IterationCapExceeded);
        let (_, status) = run_with_cap(src, 60);
        assert_eq!(status, RunStatus::NoOutput);
    }

    #[test]
    fn exactly_one_branch_of_a_chain_runs() {
        let src = "n = 0\nif n > 0:\n    print(\"pos\")\nelif n == 0:\n    print(\"zero\")\nelif n >= 0:\n    print(\"never\")\nelse:\n    print(\"neg\")";
        expect_output(src, &["zero"]);
    }

    #[test]
    fn else_runs_when_no_condition_holds() {
        expect_output(
            "n = -3\nif n > 0:\n    print(\"pos\")\nelse:\n    print(\"neg\")",
            &["neg"],
        );
    }

    #[test]
    fn no_branch_runs_without_an_else() {
        let (output, status) = run("n = -3\nif n > 0:\n    print(\"pos\")");
        assert!(output.is_empty());
        assert_eq!(status, RunStatus::NoOutput);
    }

    #[test]
    fn break_exits_only_the_innermost_loop() {
        let src = "for i in range(1, 3):\n    for j in range(1, 10):\n        if j == 2:\n            break\n        print(f\"{i}-{j}\")\nprint(\"done\")";
        expect_output(src, &["1-1", "2-1", "done"]);
    }

    #[test]
    fn continue_skips_the_rest_of_the_iteration() {
        let src = "for i in range(1, 6):\n    if i % 2 == 0:\n        continue\n    print(i)";
        expect_output(src, &["1", "3", "5"]);
    }

    #[test]
    fn continue_in_while_still_reaches_the_condition() {
        let src = "n = 0\nwhile n < 5:\n    n += 1\n    if n == 3:\n        continue\n    print(n)";
        expect_output(src, &["1", "2", "4", "5"]);
    }

    #[test]
    fn positive_check_scenario() {
        let src = "number = 5\nif number > 0:\n    print(\"Positive!\")";
        let (output, status) = run(src);
        assert_eq!(output, vec!["Positive!"]);
        let expected = ExpectedOutcome::Checks {
            predicates: vec![SourceCheck::Contains("Positive".to_string())],
            output: None,
        };
        assert!(expected.grade(src, &output, status));
    }

    #[test]
    fn first_multiple_of_seven_scenario() {
        let src = "for i in range(1, 51):\n    if i % 7 == 0:\n        print(i)\n        print(f\"Found it! First number divisible by 7 is: {i}\")\n        break";
        let (output, status) = run(src);
        assert_eq!(
            output,
            vec!["7", "Found it! First number divisible by 7 is: 7"]
        );
        let expected = ExpectedOutcome::Checks {
            predicates: vec![
                SourceCheck::UsesLoop,
                SourceCheck::UsesBreak,
                SourceCheck::ChecksModulo(7),
            ],
            output: Some(output.clone()),
        };
        assert!(expected.grade(src, &output, status));
    }

    #[test]
    fn reruns_are_identical() {
        let src = "total = 0\nfor i in range(1, 4):\n    total += i\nprint(total)";
        assert_eq!(run(src), run(src));
        expect_output(src, &["6"]);
    }

    #[test]
    fn unrecognized_lines_are_skipped_not_fatal() {
        expect_output(
            "x = 1\nthis is not a statement\nprint(x)",
            &["1"],
        );
    }

    #[test]
    fn unbound_condition_is_false() {
        let (output, status) = run("if missing > 0:\n    print(\"yes\")\nprint(\"after\")");
        assert_eq!(output, vec!["after"]);
        assert_eq!(status, RunStatus::Ok);
    }

    #[test]
    fn failed_print_expression_prints_the_raw_text() {
        expect_output("print(missing + 1)", &["missing + 1"]);
    }

    #[test]
    fn print_shapes() {
        expect_output("print(\"hi\")", &["hi"]);
        expect_output("print('hi')", &["hi"]);
        expect_output("x = 3\nprint(x)", &["3"]);
        expect_output("print(2 + 3 * 4)", &["14"]);
        expect_output("x = 3\nprint(\"x is\", x)", &["x is 3"]);
        expect_output("print()", &[""]);
    }

    #[test]
    fn fstring_interpolation() {
        expect_output(
            "name = \"Ada\"\nprint(f\"Hello, {name}!\")",
            &["Hello, Ada!"],
        );
        expect_output(
            "a = 2\nb = 3\nprint(f\"{a} + {b} = {a + b}\")",
            &["2 + 3 = 5"],
        );
        // Unresolved interpolations keep their braces.
        expect_output("print(f\"value: {missing}\")", &["value: {missing}"]);
    }

    #[test]
    fn division_prints_two_decimals() {
        expect_output("print(5 / 2)", &["2.50"]);
        expect_output("print(8 / 2)", &["4"]);
        expect_output("x = 10\nx /= 4\nprint(x)", &["2.50"]);
    }

    #[test]
    fn augmented_assignment_variants() {
        expect_output("x = 2\nx += 3\nx *= 4\nx -= 10\nprint(x)", &["10"]);
    }

    #[test]
    fn augmented_assignment_on_unbound_name_is_skipped() {
        let (output, status) = run("ghost += 1\nprint(\"ok\")");
        assert_eq!(output, vec!["ok"]);
        assert_eq!(status, RunStatus::Ok);
    }

    #[test]
    fn for_range_variants() {
        expect_output("for i in range(3):\n    print(i)", &["0", "1", "2"]);
        expect_output("for i in range(1, 4):\n    print(i)", &["1", "2", "3"]);
        expect_output(
            "for i in range(3, 0, -1):\n    print(i)",
            &["3", "2", "1"],
        );
    }

    #[test]
    fn negating_the_smallest_int_prints_the_raw_text() {
        // -x cannot be represented, so the print falls back to its argument.
        let (output, status) = run("x = -9223372036854775807 - 1\nprint(-x)");
        assert_eq!(output, vec!["-x"]);
        assert_eq!(status, RunStatus::Ok);
    }

    #[test]
    fn for_step_overflow_ends_the_loop() {
        let src =
            "for i in range(2, 9223372036854775807, 9223372036854775806):\n    print(i)";
        let (output, status) = run(src);
        assert_eq!(output, vec!["2"]);
        assert_eq!(status, RunStatus::Ok);
    }

    #[test]
    fn zero_step_range_is_skipped() {
        let (output, status) = run("for i in range(1, 5, 0):\n    print(i)\nprint(\"end\")");
        assert_eq!(output, vec!["end"]);
        assert_eq!(status, RunStatus::Ok);
    }

    #[test]
    fn for_with_bad_bounds_is_skipped() {
        let (output, status) = run("for i in range(\"x\"):\n    print(i)\nprint(\"end\")");
        assert_eq!(output, vec!["end"]);
        assert_eq!(status, RunStatus::Ok);
    }

    #[test]
    fn stray_break_is_ignored() {
        expect_output("break\nprint(\"still here\")", &["still here"]);
    }

    #[test]
    fn stray_continue_is_ignored() {
        expect_output("continue\nprint(\"still here\")", &["still here"]);
    }

    #[test]
    fn truthy_while_condition_counts_down() {
        expect_output(
            "n = 3\nwhile n:\n    print(n)\n    n -= 1",
            &["3", "2", "1"],
        );
    }

    #[test]
    fn grading_exact_output() {
        let expected = ExpectedOutcome::Exact(vec!["1".into(), "2".into()]);
        assert!(expected.grade("", &["1".to_string(), "2".to_string()], RunStatus::Ok));
        assert!(!expected.grade("", &["1".to_string()], RunStatus::Ok));
        assert!(!expected.grade(
            "",
            &["1".to_string(), "2".to_string()],
            RunStatus::IterationCapExceeded
        ));
    }

    #[test]
    fn structural_checks_match_source_text() {
        let src = "for i in range(10):\n    if i % 3 == 0:\n        continue\n    print(i)";
        assert!(SourceCheck::UsesLoop.matches(src));
        assert!(SourceCheck::UsesConditional.matches(src));
        assert!(SourceCheck::UsesContinue.matches(src));
        assert!(!SourceCheck::UsesBreak.matches(src));
        assert!(SourceCheck::ChecksModulo(3).matches(src));
        assert!(!SourceCheck::ChecksModulo(30).matches(src));
        assert!(SourceCheck::Contains("range(10)".to_string()).matches(src));
    }

    #[test]
    fn modulo_check_is_whitespace_insensitive_and_digit_exact() {
        assert!(SourceCheck::ChecksModulo(7).matches("if n%7==0:"));
        assert!(SourceCheck::ChecksModulo(7).matches("if n % 7 == 0:"));
        assert!(!SourceCheck::ChecksModulo(7).matches("if n % 70 == 0:"));
    }

    #[test]
    fn expected_outcome_round_trips_through_json() {
        let expected = ExpectedOutcome::Checks {
            predicates: vec![
                SourceCheck::UsesLoop,
                SourceCheck::Contains("% 7".to_string()),
                SourceCheck::ChecksModulo(7),
            ],
            output: Some(vec!["7".to_string()]),
        };
        let json = serde_json::to_string(&expected).unwrap();
        let back: ExpectedOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expected);

        let literal = r#"{ "exact": ["1", "2", "3"] }"#;
        let parsed: ExpectedOutcome = serde_json::from_str(literal).unwrap();
        assert_eq!(
            parsed,
            ExpectedOutcome::Exact(vec!["1".into(), "2".into(), "3".into()])
        );
    }
}
