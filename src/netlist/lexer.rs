//! Lexer (tokenizer) for a single netlist line.

use crate::error::{DpgenError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the netlist language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Declaration keyword (`input`, `output`, `wire`, `register`)
    Keyword,
    /// Integer type with width suffix (`Int8`, `UInt32`)
    Type,
    /// Signal name
    Identifier,
    /// Unsigned decimal literal
    Number,
    /// Operator symbol (`+`, `==`, `>>`, ...)
    Operator,
    /// Assignment `=`
    Assign,
    /// Mux select `?`
    Question,
    /// Mux alternative `:`
    Colon,
    /// Name separator `,`
    Comma,
    /// End of line
    Eof,
}

const KEYWORDS: [&str; 4] = ["input", "output", "wire", "register"];

fn is_operator_char(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/' | '%' | '<' | '>' | '=' | '!' | '&' | '|' | '^' | '~')
}

/// Whether `text` has the shape of a type token: `Int` or `UInt` followed by digits.
pub fn is_type_name(text: &str) -> bool {
    let digits = text
        .strip_prefix("UInt")
        .or_else(|| text.strip_prefix("Int"));
    matches!(digits, Some(d) if !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()))
}

/// Lexer for tokenizing one netlist line.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the text of source line `line`.
    pub fn new(input: &'a str, line: usize) -> Self {
        Self {
            chars: input.chars().peekable(),
            line,
            column: 1,
        }
    }

    /// The source line this lexer reads.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    column: self.column,
                });
            }
        };

        let column = self.column;

        let (kind, text) = match ch {
            '?' => {
                self.advance();
                (TokenKind::Question, "?".to_string())
            }
            ':' => {
                self.advance();
                (TokenKind::Colon, ":".to_string())
            }
            ',' => {
                self.advance();
                (TokenKind::Comma, ",".to_string())
            }
            '0'..='9' => (TokenKind::Number, self.read_while(|c| c.is_ascii_alphanumeric())),
            _ if is_operator_char(ch) => {
                let text = self.read_while(is_operator_char);
                if text == "=" {
                    (TokenKind::Assign, text)
                } else {
                    (TokenKind::Operator, text)
                }
            }
            _ if ch.is_alphabetic() || ch == '_' => {
                let text = self.read_while(|c| c.is_alphanumeric() || c == '_');
                let kind = if KEYWORDS.contains(&text.as_str()) {
                    TokenKind::Keyword
                } else if is_type_name(&text) {
                    TokenKind::Type
                } else {
                    TokenKind::Identifier
                };
                (kind, text)
            }
            _ => {
                return Err(DpgenError::lexer(
                    self.line,
                    column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        if kind == TokenKind::Number && !text.chars().all(|c| c.is_ascii_digit()) {
            return Err(DpgenError::lexer(
                self.line,
                column,
                format!("invalid number '{}'", text),
            ));
        }

        Ok(Token { kind, text, column })
    }

    /// Tokenize the rest of the line, including the trailing [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.column += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if accept(ch) {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }
}
