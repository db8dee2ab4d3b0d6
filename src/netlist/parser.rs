//! Line parsers for declarations and operations.

use log::debug;

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use super::normalize::SourceLine;
use crate::design::Netlist;
use crate::error::{DpgenError, Result};

/// Parse a type token such as `Int8` or `UInt32` into `(signed, width)`.
///
/// The width must be 1 or a power of two. A leading `U` marks the type unsigned.
pub fn parse_type(type_name: &str, line: usize) -> Result<(bool, u32)> {
    let (signed, digits) = if let Some(rest) = type_name.strip_prefix("UInt") {
        (false, rest)
    } else if let Some(rest) = type_name.strip_prefix("Int") {
        (true, rest)
    } else {
        return Err(DpgenError::InvalidType {
            type_name: type_name.to_string(),
            line,
        });
    };

    let width: u64 = digits.parse().map_err(|_| DpgenError::InvalidType {
        type_name: type_name.to_string(),
        line,
    })?;

    if !width.is_power_of_two() || width > u64::from(u32::MAX) {
        return Err(DpgenError::InvalidWidth {
            type_name: type_name.to_string(),
            width,
            line,
        });
    }

    Ok((signed, width as u32))
}

/// Parser for a single netlist line.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Create a parser for a normalized source line.
    pub fn for_line(line: SourceLine<'a>) -> Result<Self> {
        Self::new(Lexer::new(line.text, line.number))
    }

    fn line(&self) -> usize {
        self.lexer.line()
    }

    /// Parse the line and record the result in `netlist`.
    pub fn parse_into(&mut self, netlist: &mut Netlist, wire_suffix: &str) -> Result<()> {
        match self.current.kind {
            TokenKind::Keyword => {
                let decl = self.parse_declaration()?;
                debug!(
                    "line {}: {} {} bit(s) {}: {}",
                    decl.line,
                    decl.kind,
                    decl.width,
                    if decl.signed { "signed" } else { "unsigned" },
                    decl.names.join(", ")
                );
                netlist.declare(decl)
            }
            TokenKind::Identifier => {
                let op = self.parse_operation()?;
                debug!("line {}: {} -> {}", op.line, op.operator, op.destination);
                netlist.add_operation(op, wire_suffix)
            }
            _ => Err(DpgenError::operation(
                self.line(),
                format!(
                    "expected a declaration keyword or a signal name, got '{}'",
                    self.current.text
                ),
            )),
        }
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(DpgenError::operation(
                self.line(),
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    /// Parse `<kind> <type> <name> {, <name>}`.
    pub fn parse_declaration(&mut self) -> Result<Declaration> {
        let line = self.line();
        let keyword = self.current.text.clone();
        let kind = DeclKind::from_keyword(&keyword).ok_or_else(|| {
            DpgenError::declaration(line, format!("unknown declaration keyword '{}'", keyword))
        })?;
        self.advance()?;

        let (signed, width) = match self.current.kind {
            TokenKind::Type => parse_type(&self.current.text, line)?,
            TokenKind::Identifier | TokenKind::Keyword => {
                return Err(DpgenError::InvalidType {
                    type_name: self.current.text.clone(),
                    line,
                });
            }
            _ => {
                return Err(DpgenError::declaration(
                    line,
                    format!("missing type after '{}'", keyword),
                ));
            }
        };
        self.advance()?;

        let mut names = Vec::new();
        loop {
            if self.current.kind != TokenKind::Identifier {
                return Err(DpgenError::declaration(
                    line,
                    if self.current.kind == TokenKind::Eof {
                        "expected a signal name".to_string()
                    } else {
                        format!("expected a signal name, got '{}'", self.current.text)
                    },
                ));
            }
            names.push(self.current.text.clone());
            self.advance()?;

            match self.current.kind {
                TokenKind::Comma => self.advance()?,
                TokenKind::Eof => break,
                _ => {
                    return Err(DpgenError::declaration(
                        line,
                        format!("unexpected '{}' in name list", self.current.text),
                    ));
                }
            }
        }

        Ok(Declaration::new(kind, signed, width, names, line))
    }

    /// Parse `<dest> = <rhs>` where `rhs` is a copy, a binary operation or a mux.
    pub fn parse_operation(&mut self) -> Result<Operation> {
        let line = self.line();
        let destination = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::Assign)?;

        let first = self.parse_operand()?;

        let operation = match self.current.kind {
            TokenKind::Eof => Operation::new(Operator::Reg, destination, vec![first], line),
            TokenKind::Operator => {
                let symbol = self.current.text.clone();
                let operator = Operator::from_symbol(&symbol).ok_or(DpgenError::UnknownOperator {
                    operator: symbol,
                    line,
                })?;
                self.advance()?;
                let right = self.parse_operand()?;
                Operation::new(operator, destination, vec![first, right], line)
            }
            TokenKind::Question => {
                if first.signal().is_none() {
                    return Err(DpgenError::operation(line, "mux condition must be a signal"));
                }
                self.advance()?;
                let if_true = self.parse_operand()?;
                self.expect(TokenKind::Colon)?;
                let if_false = self.parse_operand()?;
                Operation::new(Operator::Mux, destination, vec![first, if_true, if_false], line)
            }
            _ => {
                return Err(DpgenError::operation(
                    line,
                    format!("unexpected '{}' after operand", self.current.text),
                ));
            }
        };

        if self.current.kind != TokenKind::Eof {
            return Err(DpgenError::operation(
                line,
                format!("unexpected trailing '{}'", self.current.text),
            ));
        }

        Ok(operation)
    }

    fn parse_operand(&mut self) -> Result<Operand> {
        let operand = match self.current.kind {
            TokenKind::Identifier => Operand::Signal(self.current.text.clone()),
            TokenKind::Number => {
                let value = self.current.text.parse().map_err(|_| {
                    DpgenError::operation(
                        self.line(),
                        format!("literal '{}' is out of range", self.current.text),
                    )
                })?;
                Operand::Literal(value)
            }
            TokenKind::Operator => {
                return Err(DpgenError::UnknownOperator {
                    operator: self.current.text.clone(),
                    line: self.line(),
                });
            }
            _ => {
                return Err(DpgenError::operation(
                    self.line(),
                    if self.current.kind == TokenKind::Eof {
                        "missing operand".to_string()
                    } else {
                        format!("expected an operand, got '{}'", self.current.text)
                    },
                ));
            }
        };
        self.advance()?;
        Ok(operand)
    }
}
