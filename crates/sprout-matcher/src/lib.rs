pub mod matcher;

pub use matcher::Matcher;

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_scanner::LineScanner;
    use sprout_syntax::{AugOp, Snippet, Stmt};

    fn match_str(input: &str) -> Snippet {
        let lines = LineScanner::new(input).scan();
        Matcher::new(lines).match_snippet()
    }

    fn single(input: &str) -> Stmt {
        let snippet = match_str(input);
        assert_eq!(snippet.stmts.len(), 1, "Snippet: {}", input);
        snippet.stmts.into_iter().next().unwrap()
    }

    #[test]
    fn matches_assignments() {
        assert!(matches!(
            single("count = 1"),
            Stmt::Assign { name, expr } if name == "count" && expr == "1"
        ));
        assert!(matches!(
            single("greeting = \"hi there\""),
            Stmt::Assign { name, .. } if name == "greeting"
        ));
        assert!(matches!(
            single("total = a + b * 2"),
            Stmt::Assign { expr, .. } if expr == "a + b * 2"
        ));
    }

    #[test]
    fn matches_augmented_assignments() {
        assert!(matches!(
            single("score += 10"),
            Stmt::AugAssign { op: AugOp::Add, .. }
        ));
        assert!(matches!(
            single("count -= 1"),
            Stmt::AugAssign { op: AugOp::Sub, .. }
        ));
        assert!(matches!(
            single("x *= 2"),
            Stmt::AugAssign { op: AugOp::Mul, .. }
        ));
        assert!(matches!(
            single("x /= 4"),
            Stmt::AugAssign { op: AugOp::Div, .. }
        ));
    }

    #[test]
    fn comparison_is_not_an_assignment() {
        assert!(matches!(single("x == 5"), Stmt::Unrecognized { .. }));
        assert!(matches!(single("x <= 5"), Stmt::Unrecognized { .. }));
    }

    #[test]
    fn matches_print_shapes() {
        assert!(matches!(
            single("print(\"Hello!\")"),
            Stmt::Print { args } if args.len() == 1
        ));
        assert!(matches!(single("print()"), Stmt::Print { args } if args.is_empty()));
        assert!(matches!(
            single("print(\"x is\", x)"),
            Stmt::Print { args } if args.len() == 2
        ));
        // Commas inside the string literal do not split arguments.
        assert!(matches!(
            single("print(\"a, b\")"),
            Stmt::Print { args } if args.len() == 1
        ));
        // An escaped quote does not close the literal early.
        assert!(matches!(
            single("print(\"a\\\", b\")"),
            Stmt::Print { args } if args.len() == 1
        ));
    }

    #[test]
    fn matches_if_elif_else_chain() {
        let stmt = single("if x > 0:\n    print(\"pos\")\nelif x < 0:\n    print(\"neg\")\nelse:\n    print(\"zero\")");
        let Stmt::IfChain { branches } = stmt else {
            panic!("Expected IfChain")
        };
        assert_eq!(branches.len(), 3);
        assert_eq!(branches[0].cond.as_deref(), Some("x > 0"));
        assert_eq!(branches[1].cond.as_deref(), Some("x < 0"));
        assert!(branches[2].cond.is_none());
        assert_eq!(branches[0].body.len(), 1);
    }

    #[test]
    fn matches_while_with_indented_body() {
        let stmt = single("while count <= 5:\n    print(count)\n    count += 1");
        let Stmt::While { cond, body } = stmt else {
            panic!("Expected While")
        };
        assert_eq!(cond, "count <= 5");
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn matches_inline_bodies() {
        let stmt = single("while count <= 5: print(count); count += 1");
        let Stmt::While { body, .. } = stmt else {
            panic!("Expected While")
        };
        assert_eq!(body.len(), 2);
        assert!(matches!(body[0], Stmt::Print { .. }));
        assert!(matches!(body[1], Stmt::AugAssign { .. }));
    }

    #[test]
    fn matches_for_range_variants() {
        assert!(matches!(
            single("for i in range(5):\n    print(i)"),
            Stmt::For { start: None, end, step: None, .. } if end == "5"
        ));
        assert!(matches!(
            single("for i in range(1, 51):\n    print(i)"),
            Stmt::For { start: Some(s), end, .. } if s == "1" && end == "51"
        ));
        assert!(matches!(
            single("for i in range(10, 0, -1):\n    print(i)"),
            Stmt::For { step: Some(st), .. } if st == "-1"
        ));
    }

    #[test]
    fn matches_loop_control() {
        assert!(matches!(single("break"), Stmt::Break));
        assert!(matches!(single("continue"), Stmt::Continue));
    }

    #[test]
    fn elif_is_recognized_inside_loop_bodies() {
        let stmt = single(
            "for i in range(3):\n    if i == 0:\n        print(\"a\")\n    elif i == 1:\n        print(\"b\")",
        );
        let Stmt::For { body, .. } = stmt else {
            panic!("Expected For")
        };
        assert_eq!(body.len(), 1);
        assert!(matches!(
            &body[0],
            Stmt::IfChain { branches } if branches.len() == 2
        ));
    }

    #[test]
    fn nested_blocks_attach_to_the_right_header() {
        let snippet = match_str(
            "total = 0\nwhile total < 10:\n    if total > 5:\n        break\n    total += 2\nprint(total)",
        );
        assert_eq!(snippet.stmts.len(), 3);
        let Stmt::While { body, .. } = &snippet.stmts[1] else {
            panic!("Expected While")
        };
        assert_eq!(body.len(), 2);
        assert!(matches!(&body[0], Stmt::IfChain { .. }));
    }

    #[test]
    fn malformed_lines_become_unrecognized_without_stopping_the_match() {
        let snippet = match_str("x = 1\n???\nprint(x)");
        assert_eq!(snippet.stmts.len(), 3);
        assert!(matches!(&snippet.stmts[1], Stmt::Unrecognized { .. }));
        assert!(matches!(&snippet.stmts[2], Stmt::Print { .. }));
    }

    #[test]
    fn keyword_prefixed_identifiers_are_not_headers() {
        assert!(matches!(
            single("iffy = 3"),
            Stmt::Assign { name, .. } if name == "iffy"
        ));
        assert!(matches!(
            single("forks = 2"),
            Stmt::Assign { name, .. } if name == "forks"
        ));
    }
}
