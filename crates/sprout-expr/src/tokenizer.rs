//! Expression tokenizer: converts expression text into tokens.

use sprout_syntax::error::{fail, Result};
use sprout_syntax::token::{Token, TokenKind};

/// Streaming character scanner over one expression string.
pub struct Tokenizer {
    src: Vec<char>,
    pos: usize,
    col: usize,
}

impl Tokenizer {
    /// Create a new tokenizer over the given expression text.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
            self.col += 1;
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Result<Token> {
        let start_col = self.col;
        let mut s = String::new();
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.advance();
            } else if c == '.' && !seen_dot && self.peek_next().is_some_and(|n| n.is_ascii_digit())
            {
                seen_dot = true;
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = if seen_dot {
            let val: f64 = s
                .parse()
                .map_err(|_| format!("Invalid number '{}'", s))?;
            TokenKind::Float(val)
        } else {
            let val: i64 = s
                .parse()
                .map_err(|_| format!("Invalid number '{}'", s))?;
            TokenKind::Int(val)
        };
        Ok(Token {
            kind,
            col: start_col,
        })
    }

    fn read_ident_or_keyword(&mut self) -> Token {
        let start_col = self.col;
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        // Lowercase aliases of the bool literals are accepted so a typo like
        // `true` still works the way the learner expects.
        let kind = match s.as_str() {
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "True" | "true" => TokenKind::True,
            "False" | "false" => TokenKind::False,
            _ => TokenKind::Ident(s),
        };
        Token {
            kind,
            col: start_col,
        }
    }

    fn read_string(&mut self, quote: char) -> Result<Token> {
        let start_col = self.col;
        self.advance(); // opening quote
        let mut s = String::new();
        while let Some(c) = self.advance() {
            if c == quote {
                return Ok(Token {
                    kind: TokenKind::Str(s),
                    col: start_col,
                });
            }
            if c == '\\' {
                match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('\\') => s.push('\\'),
                    Some('\'') => s.push('\''),
                    Some('"') => s.push('"'),
                    Some(other) => s.push(other),
                    None => return fail("Unterminated string"),
                }
            } else {
                s.push(c);
            }
        }
        fail("Unterminated string")
    }

    /// Tokenize the entire expression into a vector ending with Eof.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let col = self.col;
            let tk = match self.peek() {
                None => {
                    tokens.push(Token {
                        kind: TokenKind::Eof,
                        col,
                    });
                    break;
                }
                Some('(') => {
                    self.advance();
                    Token {
                        kind: TokenKind::LParen,
                        col,
                    }
                }
                Some(')') => {
                    self.advance();
                    Token {
                        kind: TokenKind::RParen,
                        col,
                    }
                }
                Some('+') => {
                    self.advance();
                    Token {
                        kind: TokenKind::Plus,
                        col,
                    }
                }
                Some('-') => {
                    self.advance();
                    Token {
                        kind: TokenKind::Minus,
                        col,
                    }
                }
                Some('*') => {
                    self.advance();
                    Token {
                        kind: TokenKind::Star,
                        col,
                    }
                }
                Some('/') => {
                    self.advance();
                    if self.peek() == Some('/') {
                        self.advance();
                        Token {
                            kind: TokenKind::SlashSlash,
                            col,
                        }
                    } else {
                        Token {
                            kind: TokenKind::Slash,
                            col,
                        }
                    }
                }
                Some('%') => {
                    self.advance();
                    Token {
                        kind: TokenKind::Percent,
                        col,
                    }
                }
                Some('=') => {
                    if self.peek_next() == Some('=') {
                        self.advance();
                        self.advance();
                        Token {
                            kind: TokenKind::EqEq,
                            col,
                        }
                    } else {
                        return fail("Unexpected '=' (did you mean '=='?)");
                    }
                }
                Some('!') => {
                    if self.peek_next() == Some('=') {
                        self.advance();
                        self.advance();
                        Token {
                            kind: TokenKind::NotEq,
                            col,
                        }
                    } else {
                        return fail("Unexpected '!' (did you mean '!=' or 'not'?)");
                    }
                }
                Some('<') => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        Token {
                            kind: TokenKind::LessEq,
                            col,
                        }
                    } else {
                        Token {
                            kind: TokenKind::Less,
                            col,
                        }
                    }
                }
                Some('>') => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        Token {
                            kind: TokenKind::GreaterEq,
                            col,
                        }
                    } else {
                        Token {
                            kind: TokenKind::Greater,
                            col,
                        }
                    }
                }
                Some(q @ ('\'' | '"')) => self.read_string(q)?,
                Some(c) if c.is_ascii_digit() => self.read_number()?,
                Some(c) if c.is_ascii_alphabetic() || c == '_' => self.read_ident_or_keyword(),
                Some(other) => {
                    return fail(format!("Unexpected character '{}'", other));
                }
            };
            tokens.push(tk);
        }
        Ok(tokens)
    }
}
