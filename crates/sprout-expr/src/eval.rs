//! Evaluation of tokenized expressions against variable bindings.
//!
//! Precedence, loosest first: `or`, `and`, `not`, comparisons, `+ -`,
//! `* / // %`, unary minus. Identifiers resolve through the flat bindings
//! map; an unbound name is an evaluation failure, which callers contain.

use std::collections::HashMap;

use crate::tokenizer::Tokenizer;
use sprout_syntax::error::{fail, Result};
use sprout_syntax::stmt::AugOp;
use sprout_syntax::token::{Token, TokenKind};
use sprout_syntax::value::Value;

/// Evaluate an expression to a value using the given bindings.
pub fn eval(src: &str, vars: &HashMap<String, Value>) -> Result<Value> {
    let tokens = Tokenizer::new(src).tokenize()?;
    let mut ev = Evaluator {
        tokens,
        pos: 0,
        vars,
    };
    let value = ev.parse_or()?;
    if ev.peek() != &TokenKind::Eof {
        return fail(format!("Unexpected trailing text in '{}'", src));
    }
    Ok(value)
}

/// Evaluate a condition, treating every failure as false.
///
/// This is the containment rule for learner conditions: an unbound name, a
/// malformed expression or a type mismatch must never abort the run.
pub fn eval_condition(src: &str, vars: &HashMap<String, Value>) -> bool {
    match eval(src, vars) {
        Ok(v) => v.is_truthy(),
        Err(_) => false,
    }
}

/// Apply an augmented-assignment operator (`+=` and friends) to the bound
/// value and the evaluated right-hand side.
pub fn apply_aug(op: AugOp, current: &Value, rhs: &Value) -> Result<Value> {
    match op {
        AugOp::Add => add(current, rhs),
        AugOp::Sub => numeric(current, rhs, "subtract", |a, b| a - b, i64::checked_sub),
        AugOp::Mul => multiply(current, rhs),
        AugOp::Div => divide(current, rhs),
    }
}

struct Evaluator<'a> {
    tokens: Vec<Token>,
    pos: usize,
    vars: &'a HashMap<String, Value>,
}

impl<'a> Evaluator<'a> {
    fn peek(&self) -> &TokenKind {
        self.tokens
            .get(self.pos)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.peek().clone();
        self.pos += 1;
        kind
    }

    fn parse_or(&mut self) -> Result<Value> {
        let mut value = self.parse_and()?;
        while self.peek() == &TokenKind::Or {
            self.advance();
            // Both operands evaluate; failures are contained by the caller,
            // so there is nothing to short-circuit around.
            let rhs = self.parse_and()?;
            value = Value::Bool(value.is_truthy() || rhs.is_truthy());
        }
        Ok(value)
    }

    fn parse_and(&mut self) -> Result<Value> {
        let mut value = self.parse_not()?;
        while self.peek() == &TokenKind::And {
            self.advance();
            let rhs = self.parse_not()?;
            value = Value::Bool(value.is_truthy() && rhs.is_truthy());
        }
        Ok(value)
    }

    fn parse_not(&mut self) -> Result<Value> {
        if self.peek() == &TokenKind::Not {
            self.advance();
            let value = self.parse_not()?;
            return Ok(Value::Bool(!value.is_truthy()));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Value> {
        let mut value = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                TokenKind::EqEq => CmpOp::Eq,
                TokenKind::NotEq => CmpOp::Ne,
                TokenKind::Less => CmpOp::Lt,
                TokenKind::LessEq => CmpOp::Le,
                TokenKind::Greater => CmpOp::Gt,
                TokenKind::GreaterEq => CmpOp::Ge,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_additive()?;
            value = compare(&value, op, &rhs)?;
        }
        Ok(value)
    }

    fn parse_additive(&mut self) -> Result<Value> {
        let mut value = self.parse_multiplicative()?;
        loop {
            match self.peek() {
                TokenKind::Plus => {
                    self.advance();
                    let rhs = self.parse_multiplicative()?;
                    value = add(&value, &rhs)?;
                }
                TokenKind::Minus => {
                    self.advance();
                    let rhs = self.parse_multiplicative()?;
                    value = numeric(&value, &rhs, "subtract", |a, b| a - b, i64::checked_sub)?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_multiplicative(&mut self) -> Result<Value> {
        let mut value = self.parse_unary()?;
        loop {
            match self.peek() {
                TokenKind::Star => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    value = multiply(&value, &rhs)?;
                }
                TokenKind::Slash => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    value = divide(&value, &rhs)?;
                }
                TokenKind::SlashSlash => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    value = floor_divide(&value, &rhs)?;
                }
                TokenKind::Percent => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    value = modulo(&value, &rhs)?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_unary(&mut self) -> Result<Value> {
        match self.peek() {
            TokenKind::Minus => {
                self.advance();
                match self.parse_unary()? {
                    Value::Int(n) => match n.checked_neg() {
                        Some(n) => Ok(Value::Int(n)),
                        None => fail("Number is too large"),
                    },
                    Value::Float(x) => Ok(Value::Float(-x)),
                    other => fail(format!("Cannot negate a {}", other.type_name())),
                }
            }
            TokenKind::Plus => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Value> {
        match self.advance() {
            TokenKind::Int(n) => Ok(Value::Int(n)),
            TokenKind::Float(x) => Ok(Value::Float(x)),
            TokenKind::Str(s) => Ok(Value::Str(s)),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Ident(name) => match self.vars.get(&name) {
                Some(v) => Ok(v.clone()),
                None => fail(format!("Unknown name '{}'", name)),
            },
            TokenKind::LParen => {
                let value = self.parse_or()?;
                if self.advance() != TokenKind::RParen {
                    return fail("Expected ')'");
                }
                Ok(value)
            }
            other => fail(format!("Unexpected token {:?}", other)),
        }
    }
}

#[derive(Clone, Copy)]
enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

fn compare(a: &Value, op: CmpOp, b: &Value) -> Result<Value> {
    use std::cmp::Ordering;
    let ord = match (a, b) {
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => None,
        },
    };
    let result = match (ord, op) {
        (Some(o), CmpOp::Eq) => o == Ordering::Equal,
        (Some(o), CmpOp::Ne) => o != Ordering::Equal,
        (Some(o), CmpOp::Lt) => o == Ordering::Less,
        (Some(o), CmpOp::Le) => o != Ordering::Greater,
        (Some(o), CmpOp::Gt) => o == Ordering::Greater,
        (Some(o), CmpOp::Ge) => o != Ordering::Less,
        // Values of different kinds are never equal but cannot be ordered.
        (None, CmpOp::Eq) => false,
        (None, CmpOp::Ne) => true,
        (None, _) => {
            return fail(format!(
                "Cannot order {} and {}",
                a.type_name(),
                b.type_name()
            ))
        }
    };
    Ok(Value::Bool(result))
}

fn add(a: &Value, b: &Value) -> Result<Value> {
    if let (Value::Str(x), Value::Str(y)) = (a, b) {
        return Ok(Value::Str(format!("{}{}", x, y)));
    }
    numeric(a, b, "add", |x, y| x + y, |x, y| x.checked_add(y))
}

fn multiply(a: &Value, b: &Value) -> Result<Value> {
    match (a, b) {
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
            let count = (*n).max(0) as usize;
            Ok(Value::Str(s.repeat(count)))
        }
        _ => numeric(a, b, "multiply", |x, y| x * y, |x, y| x.checked_mul(y)),
    }
}

fn divide(a: &Value, b: &Value) -> Result<Value> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => {
            if *y == 0 {
                return fail("Division by zero");
            }
            // Exact quotients stay integers; anything else becomes a float
            // printed with two decimals.
            if x % y == 0 {
                Ok(Value::Int(x / y))
            } else {
                Ok(Value::Float(*x as f64 / *y as f64))
            }
        }
        _ => {
            let (x, y) = both_numbers(a, b, "divide")?;
            if y == 0.0 {
                return fail("Division by zero");
            }
            Ok(Value::Float(x / y))
        }
    }
}

fn floor_divide(a: &Value, b: &Value) -> Result<Value> {
    let (x, y) = both_numbers(a, b, "divide")?;
    if y == 0.0 {
        return fail("Division by zero");
    }
    let q = (x / y).floor();
    match (a, b) {
        (Value::Int(_), Value::Int(_)) => Ok(Value::Int(q as i64)),
        _ => Ok(Value::Float(q)),
    }
}

fn modulo(a: &Value, b: &Value) -> Result<Value> {
    let (x, y) = both_numbers(a, b, "take the remainder of")?;
    if y == 0.0 {
        return fail("Division by zero");
    }
    // Remainder takes the sign of the divisor, as in the teaching language.
    let r = x - y * (x / y).floor();
    match (a, b) {
        (Value::Int(_), Value::Int(_)) => Ok(Value::Int(r as i64)),
        _ => Ok(Value::Float(r)),
    }
}

fn numeric(
    a: &Value,
    b: &Value,
    verb: &str,
    float_op: fn(f64, f64) -> f64,
    int_op: fn(i64, i64) -> Option<i64>,
) -> Result<Value> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => match int_op(*x, *y) {
            Some(n) => Ok(Value::Int(n)),
            None => fail("Number is too large"),
        },
        _ => {
            let (x, y) = both_numbers(a, b, verb)?;
            Ok(Value::Float(float_op(x, y)))
        }
    }
}

fn both_numbers(a: &Value, b: &Value, verb: &str) -> Result<(f64, f64)> {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => fail(format!(
            "Cannot {} {} and {}",
            verb,
            a.type_name(),
            b.type_name()
        )),
    }
}
