//! Shape matching over logical lines.
//!
//! Each line is classified against a fixed list of statement shapes; nothing
//! here is a grammar. A line that fits no shape becomes
//! [`Stmt::Unrecognized`] and the match keeps going, because a learner's
//! half-typed snippet must still run as far as it can. Indented bodies are
//! grouped by depth, and an inline statement after a header colon
//! (`while x: x -= 1`) is accepted with `;` separating statements.

use sprout_syntax::{AugOp, Branch, LogicalLine, Snippet, Stmt};

/// Cursor over logical lines that builds a nested [`Snippet`].
pub struct Matcher {
    lines: Vec<LogicalLine>,
    pos: usize,
}

impl Matcher {
    /// Create a new matcher over scanned logical lines.
    pub fn new(lines: Vec<LogicalLine>) -> Self {
        Self { lines, pos: 0 }
    }

    /// Match the whole snippet. Infallible: malformed lines are carried as
    /// `Unrecognized` statements instead of aborting.
    pub fn match_snippet(&mut self) -> Snippet {
        let stmts = self.match_block(0);
        Snippet { stmts }
    }

    fn peek(&self) -> Option<&LogicalLine> {
        self.lines.get(self.pos)
    }

    /// Collect statements whose depth is at least `min_depth`, stopping at
    /// the first shallower line.
    fn match_block(&mut self, min_depth: usize) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while let Some(line) = self.peek() {
            if line.depth < min_depth {
                break;
            }
            stmts.push(self.match_stmt());
        }
        stmts
    }

    fn match_stmt(&mut self) -> Stmt {
        let line = self.lines[self.pos].clone();
        self.pos += 1;
        let text = line.text.as_str();

        if let Some(head) = keyword_head(text, "if") {
            return self.match_if_chain(&line, head);
        }
        if let Some(head) = keyword_head(text, "while") {
            return match split_header(head) {
                Some((cond, inline)) if !cond.is_empty() => {
                    let body = self.header_body(&line, inline);
                    Stmt::While {
                        cond: cond.to_string(),
                        body,
                    }
                }
                _ => Stmt::Unrecognized {
                    text: text.to_string(),
                },
            };
        }
        if let Some(head) = keyword_head(text, "for") {
            return self.match_for(&line, head);
        }
        classify_simple(text)
    }

    /// `if` header plus any following `elif`/`else` lines at the same depth.
    fn match_if_chain(&mut self, header: &LogicalLine, head: &str) -> Stmt {
        let (cond, inline) = match split_header(head) {
            Some((c, rest)) if !c.is_empty() => (c.to_string(), rest),
            _ => {
                return Stmt::Unrecognized {
                    text: header.text.clone(),
                }
            }
        };
        let body = self.header_body(header, inline);
        let mut branches = vec![Branch {
            cond: Some(cond),
            body,
        }];

        loop {
            let Some(next) = self.peek() else { break };
            if next.depth != header.depth {
                break;
            }
            let next = next.clone();
            if let Some(head) = keyword_head(&next.text, "elif") {
                match split_header(head) {
                    Some((cond, inline)) if !cond.is_empty() => {
                        self.pos += 1;
                        let body = self.header_body(&next, inline);
                        branches.push(Branch {
                            cond: Some(cond.to_string()),
                            body,
                        });
                        continue;
                    }
                    _ => break,
                }
            }
            if next.text.starts_with("else") {
                let after = next.text["else".len()..].trim_start();
                if let Some(rest) = after.strip_prefix(':') {
                    self.pos += 1;
                    let body = self.header_body(&next, rest.trim());
                    branches.push(Branch { cond: None, body });
                }
                // An else ends the chain whether or not it matched.
                break;
            }
            break;
        }

        Stmt::IfChain { branches }
    }

    /// `for <var> in range(<bounds>):` with one to three bound expressions.
    fn match_for(&mut self, header: &LogicalLine, head: &str) -> Stmt {
        let unrecognized = || Stmt::Unrecognized {
            text: header.text.clone(),
        };
        let Some((spec, inline)) = split_header(head) else {
            return unrecognized();
        };
        let Some((var, iter)) = spec.split_once(" in ") else {
            return unrecognized();
        };
        let var = var.trim();
        let iter = iter.trim();
        if !is_identifier(var) {
            return unrecognized();
        }
        let Some(args) = iter
            .strip_prefix("range(")
            .and_then(|r| r.strip_suffix(')'))
        else {
            return unrecognized();
        };
        let bounds = split_top_level(args, ',');
        let body = self.header_body(header, inline);
        match bounds.len() {
            1 => Stmt::For {
                var: var.to_string(),
                start: None,
                end: bounds[0].clone(),
                step: None,
                body,
            },
            2 => Stmt::For {
                var: var.to_string(),
                start: Some(bounds[0].clone()),
                end: bounds[1].clone(),
                step: None,
                body,
            },
            3 => Stmt::For {
                var: var.to_string(),
                start: Some(bounds[0].clone()),
                end: bounds[1].clone(),
                step: Some(bounds[2].clone()),
                body,
            },
            _ => unrecognized(),
        }
    }

    /// Body of a compound header: the inline remainder when present,
    /// otherwise the following lines indented one level deeper.
    fn header_body(&mut self, header: &LogicalLine, inline: &str) -> Vec<Stmt> {
        if !inline.is_empty() {
            return split_top_level(inline, ';')
                .iter()
                .map(|s| classify_simple(s))
                .collect();
        }
        self.match_block(header.depth + 1)
    }
}

/// Classify a line that cannot open a block.
fn classify_simple(text: &str) -> Stmt {
    match text {
        "break" => return Stmt::Break,
        "continue" => return Stmt::Continue,
        _ => {}
    }

    if let Some(inner) = text.strip_prefix("print(").and_then(|r| r.strip_suffix(')')) {
        return Stmt::Print {
            args: split_top_level(inner, ','),
        };
    }

    for (symbol, op) in [
        ("+=", AugOp::Add),
        ("-=", AugOp::Sub),
        ("*=", AugOp::Mul),
        ("/=", AugOp::Div),
    ] {
        if let Some(idx) = text.find(symbol) {
            let name = text[..idx].trim();
            let expr = text[idx + symbol.len()..].trim();
            if is_identifier(name) && !expr.is_empty() {
                return Stmt::AugAssign {
                    name: name.to_string(),
                    op,
                    expr: expr.to_string(),
                };
            }
        }
    }

    if let Some(idx) = find_assignment_eq(text) {
        let name = text[..idx].trim();
        let expr = text[idx + 1..].trim();
        if is_identifier(name) && !expr.is_empty() {
            return Stmt::Assign {
                name: name.to_string(),
                expr: expr.to_string(),
            };
        }
    }

    Stmt::Unrecognized {
        text: text.to_string(),
    }
}

/// Strip a leading keyword followed by whitespace, e.g. `if ` from `if x:`.
fn keyword_head<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        // No whitespace after the keyword: this is an identifier like `iffy`.
        return None;
    }
    Some(trimmed)
}

/// Split a header at its terminating colon, returning the text before it and
/// the trimmed inline remainder after it. The colon must sit outside quotes;
/// a backslash inside a literal escapes the next character.
fn split_header(head: &str) -> Option<(&str, &str)> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in head.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match quote {
            Some(q) => match c {
                '\\' => escaped = true,
                c if c == q => quote = None,
                _ => {}
            },
            None => match c {
                '\'' | '"' => quote = Some(c),
                ':' => return Some((head[..i].trim(), head[i + 1..].trim())),
                _ => {}
            },
        }
    }
    None
}

/// Position of a plain assignment `=`, ignoring `==`, `!=`, `<=` and `>=`.
fn find_assignment_eq(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 2;
                    continue;
                }
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' => quote = Some(b),
                b'=' => {
                    if i + 1 < bytes.len() && bytes[i + 1] == b'=' {
                        i += 2;
                        continue;
                    }
                    if i > 0 && matches!(bytes[i - 1], b'!' | b'<' | b'>') {
                        i += 1;
                        continue;
                    }
                    return Some(i);
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

/// Split on a separator at nesting depth zero, outside string literals.
/// Returns trimmed, non-empty pieces.
fn split_top_level(text: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match quote {
            Some(q) => match c {
                '\\' => escaped = true,
                c if c == q => quote = None,
                _ => {}
            },
            None => match c {
                '\'' | '"' => quote = Some(c),
                '(' | '[' => depth += 1,
                ')' | ']' => depth -= 1,
                c if c == sep && depth == 0 => {
                    let piece = text[start..i].trim();
                    if !piece.is_empty() {
                        parts.push(piece.to_string());
                    }
                    start = i + c.len_utf8();
                }
                _ => {}
            },
        }
    }
    let piece = text[start..].trim();
    if !piece.is_empty() {
        parts.push(piece.to_string());
    }
    parts
}

/// True when the text is a plausible variable name.
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
