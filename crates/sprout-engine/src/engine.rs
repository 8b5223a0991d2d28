//! The block executor: runs a matched snippet and collects its output.

use sprout_syntax::{Snippet, Stmt, Value};

use crate::bindings::Bindings;
use crate::flow::Flow;
use crate::outcome::RunStatus;

/// Default total loop-iteration budget for one run.
pub const DEFAULT_ITERATION_CAP: u32 = 200;

/// Per-run execution limits.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Total loop iterations allowed across every loop in the run.
    pub iteration_cap: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iteration_cap: DEFAULT_ITERATION_CAP,
        }
    }
}

/// Executes one snippet with fresh bindings and a fresh iteration budget.
pub struct Runner {
    config: RunConfig,
    vars: Bindings,
    output: Vec<String>,
    iterations: u32,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(RunConfig::default())
    }
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            vars: Bindings::new(),
            output: Vec::new(),
            iterations: 0,
        }
    }

    /// Run a snippet to completion or to the iteration cap.
    ///
    /// Always terminates: the budget is charged before every loop body, so a
    /// learner's `while x > 0:` with no update halts at the cap instead of
    /// hanging. State is reset at the start, making runs independent.
    pub fn run(&mut self, snippet: &Snippet) -> RunStatus {
        self.vars = Bindings::new();
        self.output.clear();
        self.iterations = 0;

        for stmt in &snippet.stmts {
            match self.exec_stmt(stmt) {
                Flow::CapHit => return RunStatus::IterationCapExceeded,
                // A stray break or continue outside any loop is skipped, the
                // same containment rule as an unrecognized line.
                Flow::Continue | Flow::Break | Flow::ContinueLoop => {}
            }
        }
        if self.output.is_empty() {
            RunStatus::NoOutput
        } else {
            RunStatus::Ok
        }
    }

    /// Output lines collected by the most recent run, in execution order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Variable bindings left behind by the most recent run.
    pub fn vars_snapshot(&self) -> Vec<(String, Value)> {
        self.vars.snapshot()
    }

    fn exec_block(&mut self, body: &[Stmt]) -> Flow {
        for stmt in body {
            match self.exec_stmt(stmt) {
                Flow::Continue => {}
                other => return other,
            }
        }
        Flow::Continue
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Flow {
        match stmt {
            Stmt::Assign { name, expr } => {
                // A failed right-hand side leaves the binding untouched.
                if let Ok(v) = sprout_expr::eval(expr, self.vars.map()) {
                    self.vars.set(name.clone(), v);
                }
                Flow::Continue
            }
            Stmt::AugAssign { name, op, expr } => {
                let updated = match (
                    self.vars.get(name),
                    sprout_expr::eval(expr, self.vars.map()),
                ) {
                    (Some(current), Ok(rhs)) => sprout_expr::apply_aug(*op, current, &rhs).ok(),
                    _ => None,
                };
                if let Some(v) = updated {
                    self.vars.set(name.clone(), v);
                }
                Flow::Continue
            }
            Stmt::Print { args } => {
                let rendered: Vec<String> =
                    args.iter().map(|a| self.render_print_arg(a)).collect();
                self.output.push(rendered.join(" "));
                Flow::Continue
            }
            Stmt::IfChain { branches } => {
                for branch in branches {
                    let taken = match &branch.cond {
                        Some(cond) => sprout_expr::eval_condition(cond, self.vars.map()),
                        None => true,
                    };
                    if taken {
                        // First true branch wins; the rest of the chain is
                        // skipped entirely.
                        return self.exec_block(&branch.body);
                    }
                }
                Flow::Continue
            }
            Stmt::While { cond, body } => {
                while sprout_expr::eval_condition(cond, self.vars.map()) {
                    if self.charge_iteration() {
                        return Flow::CapHit;
                    }
                    match self.exec_block(body) {
                        Flow::Continue | Flow::ContinueLoop => {}
                        Flow::Break => break,
                        Flow::CapHit => return Flow::CapHit,
                    }
                }
                Flow::Continue
            }
            Stmt::For {
                var,
                start,
                end,
                step,
                body,
            } => self.exec_for(var, start.as_deref(), end, step.as_deref(), body),
            Stmt::Break => Flow::Break,
            Stmt::Continue => Flow::ContinueLoop,
            Stmt::Unrecognized { .. } => Flow::Continue,
        }
    }

    fn exec_for(
        &mut self,
        var: &str,
        start: Option<&str>,
        end: &str,
        step: Option<&str>,
        body: &[Stmt],
    ) -> Flow {
        // Bounds are evaluated once at loop entry and must be integers;
        // anything else skips the loop, it never aborts the run.
        let Some(end) = self.int_bound(Some(end)) else {
            return Flow::Continue;
        };
        let Some(start) = start.map_or(Some(0), |s| self.int_bound(Some(s))) else {
            return Flow::Continue;
        };
        let Some(step) = step.map_or(Some(1), |s| self.int_bound(Some(s))) else {
            return Flow::Continue;
        };
        if step == 0 {
            return Flow::Continue;
        }

        let mut i = start;
        while (step > 0 && i < end) || (step < 0 && i > end) {
            if self.charge_iteration() {
                return Flow::CapHit;
            }
            self.vars.set(var.to_string(), Value::Int(i));
            match self.exec_block(body) {
                Flow::Continue | Flow::ContinueLoop => {}
                Flow::Break => break,
                Flow::CapHit => return Flow::CapHit,
            }
            // An overflowing counter can never re-enter the range.
            i = match i.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
        Flow::Continue
    }

    fn int_bound(&self, expr: Option<&str>) -> Option<i64> {
        match sprout_expr::eval(expr?, self.vars.map()) {
            Ok(Value::Int(n)) => Some(n),
            _ => None,
        }
    }

    /// Charge one loop iteration against the shared budget.
    /// Returns true once the cap is exceeded.
    fn charge_iteration(&mut self) -> bool {
        self.iterations += 1;
        self.iterations > self.config.iteration_cap
    }

    /// Render one print argument.
    ///
    /// F-strings interpolate `{expression}` parts; every other argument is
    /// evaluated as an expression, and an argument that fails to evaluate
    /// prints its original text unresolved.
    fn render_print_arg(&self, arg: &str) -> String {
        if let Some(inner) = fstring_inner(arg) {
            return self.interpolate(inner);
        }
        match sprout_expr::eval(arg, self.vars.map()) {
            Ok(v) => v.to_string(),
            Err(_) => arg.to_string(),
        }
    }

    fn interpolate(&self, inner: &str) -> String {
        let mut out = String::new();
        let chars: Vec<char> = inner.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            if chars[i] == '{' {
                if let Some(close) = chars[i + 1..].iter().position(|&c| c == '}') {
                    let expr: String = chars[i + 1..i + 1 + close].iter().collect();
                    match sprout_expr::eval(&expr, self.vars.map()) {
                        Ok(v) => out.push_str(&v.to_string()),
                        // A failed interpolation keeps the braces visible.
                        Err(_) => {
                            out.push('{');
                            out.push_str(&expr);
                            out.push('}');
                        }
                    }
                    i += close + 2;
                    continue;
                }
            }
            out.push(chars[i]);
            i += 1;
        }
        out
    }
}

/// The body of an f-string argument (`f"..."` or `f'...'`), if it is one.
fn fstring_inner(arg: &str) -> Option<&str> {
    let rest = arg.strip_prefix('f')?;
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let body = &rest[1..];
    body.strip_suffix(quote).filter(|_| !body.is_empty())
}
