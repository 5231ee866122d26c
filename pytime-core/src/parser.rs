// This module converts tokens (from the tokenizer) into statements
//
// GRAMMAR (the Python literal subset the interpreter understands):
//   statement  := 'import' NAME | target '=' expr_list | expr_list
//   expr_list  := expr (',' expr)* [',']           -- a comma makes a tuple
//   expr       := unary (('+' | '-') unary)*
//   unary      := ('-' | '+') unary | postfix
//   postfix    := atom ('(' args ')' | '.' NAME | '[' subscript ']')*
//   atom       := NUMBER | STRING+ | BYTES+ | NAME | '(' ... ')' | '[' ... ']' | '{' ... '}'
//
// Statements are separated by newlines. Parsing the whole program happens
// before anything executes, so a syntax error anywhere runs nothing.

use std::sync::Arc;

use num_bigint::BigInt;
use thiserror::Error;

use crate::tokenizer::{SourcePos, Token, TokenKind, tokenize};
use crate::value::{RuntimeError, Value};

// RUST CONCEPT: Error types
// Parser-specific errors, separate from RuntimeError because parsing
// happens before execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid syntax at {pos}: unexpected {found}")]
    UnexpectedToken { found: String, pos: SourcePos },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("invalid character '{ch}' at {pos}")]
    UnexpectedCharacter { ch: char, pos: SourcePos },
    #[error("invalid number literal '{text}' at {pos}")]
    InvalidNumber { text: String, pos: SourcePos },
    #[error("unterminated string literal at {0}")]
    UnterminatedString(SourcePos),
    #[error("invalid \\x escape at {0}")]
    InvalidEscape(SourcePos),
    #[error("bytes can only contain ASCII literal characters at {0}")]
    NonAsciiBytes(SourcePos),
    #[error("cannot mix bytes and nonbytes literals at {0}")]
    MixedLiterals(SourcePos),
    #[error("cannot assign to expression at {0}")]
    InvalidTarget(SourcePos),
}

// RUST CONCEPT: From trait
// The ? operator converts parse failures into the runtime's SyntaxError
impl From<ParseError> for RuntimeError {
    fn from(err: ParseError) -> Self {
        RuntimeError::Syntax(err.to_string())
    }
}

/// Binary operators (only additive ones exist in this subset)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Plus,
}

// RUST CONCEPT: Expression tree
// Literals are already evaluated into Values at parse time
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Value),
    Name(String),
    Tuple(Vec<Expr>),
    List(Vec<Expr>),
    Set(Vec<Expr>),
    Dict(Vec<(Expr, Expr)>),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Attribute {
        object: Box<Expr>,
        name: String,
    },
    Subscript {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Slice {
        start: Option<Box<Expr>>,
        stop: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Left-hand side of an assignment.
#[derive(Debug, Clone)]
pub enum Target {
    Name(String),
    Attribute { object: Expr, name: String },
    Subscript { object: Expr, index: Expr },
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Import(String),
    Assign { target: Target, value: Expr },
    Expr(Expr),
}

#[derive(Debug, Clone)]
pub struct Statement {
    pub kind: StmtKind,
    pub pos: SourcePos,
}

// Main entry point: source text to a list of statements
pub fn parse(input: &str) -> Result<Vec<Statement>, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens: &tokens, index: 0 };
    let mut statements = Vec::new();

    while !parser.at_end() {
        if parser.eat(&TokenKind::Newline) {
            continue;
        }
        statements.push(parser.statement()?);
        if !parser.at_end() {
            parser.expect(&TokenKind::Newline)?;
        }
    }

    Ok(statements)
}

struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
}

impl<'a> Parser<'a> {
    fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'a TokenKind> {
        self.tokens.get(self.index).map(|t| &t.kind)
    }

    fn peek_is(&self, kind: &TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn advance(&mut self) -> Result<&'a Token, ParseError> {
        let token = self.tokens.get(self.index).ok_or(ParseError::UnexpectedEndOfInput)?;
        self.index += 1;
        Ok(token)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_is(kind) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        let token = self.advance()?;
        if &token.kind == kind {
            Ok(())
        } else {
            Err(unexpected(token))
        }
    }

    fn current_pos(&self) -> SourcePos {
        match self.tokens.get(self.index) {
            Some(token) => token.pos.clone(),
            None => self
                .tokens
                .last()
                .map(|t| t.pos.clone())
                .unwrap_or_else(|| SourcePos::new(1, 1, 0)),
        }
    }

    fn statement(&mut self) -> Result<Statement, ParseError> {
        let pos = self.current_pos();

        if let Some(TokenKind::Name(keyword)) = self.peek()
            && keyword == "import"
        {
            self.index += 1;
            let token = self.advance()?;
            return match &token.kind {
                TokenKind::Name(module) => Ok(Statement {
                    kind: StmtKind::Import(module.clone()),
                    pos,
                }),
                _ => Err(unexpected(token)),
            };
        }

        let expr = self.expr_list()?;
        if self.eat(&TokenKind::Assign) {
            let target = to_target(expr, &pos)?;
            let value = self.expr_list()?;
            return Ok(Statement {
                kind: StmtKind::Assign { target, value },
                pos,
            });
        }

        Ok(Statement {
            kind: StmtKind::Expr(expr),
            pos,
        })
    }

    // One expression, or a bare tuple when commas follow
    fn expr_list(&mut self) -> Result<Expr, ParseError> {
        let first = self.expr()?;
        if !self.peek_is(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            if self.ends_expression() {
                break;
            }
            items.push(self.expr()?);
        }
        Ok(Expr::Tuple(items))
    }

    fn ends_expression(&self) -> bool {
        matches!(
            self.peek(),
            None | Some(
                TokenKind::Newline
                    | TokenKind::Assign
                    | TokenKind::RightParen
                    | TokenKind::RightBracket
                    | TokenKind::RightBrace
            )
        )
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.index += 1;
            let right = self.unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek() {
            Some(TokenKind::Minus) => UnaryOp::Negate,
            Some(TokenKind::Plus) => UnaryOp::Plus,
            _ => return self.postfix(),
        };
        self.index += 1;
        let operand = self.unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.atom()?;
        loop {
            match self.peek() {
                Some(TokenKind::LeftParen) => {
                    self.index += 1;
                    let args = self.sequence(&TokenKind::RightParen)?;
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                    };
                }
                Some(TokenKind::Dot) => {
                    self.index += 1;
                    let token = self.advance()?;
                    let TokenKind::Name(name) = &token.kind else {
                        return Err(unexpected(token));
                    };
                    expr = Expr::Attribute {
                        object: Box::new(expr),
                        name: name.clone(),
                    };
                }
                Some(TokenKind::LeftBracket) => {
                    self.index += 1;
                    let index = self.subscript()?;
                    self.expect(&TokenKind::RightBracket)?;
                    expr = Expr::Subscript {
                        object: Box::new(expr),
                        index: Box::new(index),
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    // Comma separated expressions up to `close`, trailing comma allowed
    fn sequence(&mut self, close: &TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.expr()?);
            if !self.eat(&TokenKind::Comma) {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }

    // index, or start:stop[:step] with every part optional
    fn subscript(&mut self) -> Result<Expr, ParseError> {
        let start = if self.peek_is(&TokenKind::Colon) {
            None
        } else {
            let index = self.expr_list()?;
            if !self.peek_is(&TokenKind::Colon) {
                return Ok(index);
            }
            Some(Box::new(index))
        };

        self.expect(&TokenKind::Colon)?;
        let stop = self.optional_slice_part()?;
        let step = if self.eat(&TokenKind::Colon) {
            self.optional_slice_part()?
        } else {
            None
        };
        Ok(Expr::Slice { start, stop, step })
    }

    fn optional_slice_part(&mut self) -> Result<Option<Box<Expr>>, ParseError> {
        if matches!(self.peek(), Some(TokenKind::Colon | TokenKind::RightBracket)) {
            Ok(None)
        } else {
            Ok(Some(Box::new(self.expr()?)))
        }
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        let token = self.advance()?;
        match &token.kind {
            TokenKind::Integer(digits) => {
                let value = digits
                    .parse::<BigInt>()
                    .map_err(|_| ParseError::InvalidNumber {
                        text: digits.clone(),
                        pos: token.pos.clone(),
                    })?;
                Ok(Expr::Literal(Value::from_bigint(value)))
            }
            TokenKind::Float(x) => Ok(Expr::Literal(Value::Float(*x))),
            TokenKind::Imaginary(x) => imaginary(*x, token),
            TokenKind::Str(text) => {
                // Adjacent literals concatenate: 'a' 'b' == 'ab'
                let mut joined = text.clone();
                while let Some(TokenKind::Str(more)) = self.peek() {
                    joined.push_str(more);
                    self.index += 1;
                }
                if matches!(self.peek(), Some(TokenKind::Bytes(_))) {
                    return Err(ParseError::MixedLiterals(self.current_pos()));
                }
                Ok(Expr::Literal(Value::str(&joined)))
            }
            TokenKind::Bytes(bytes) => {
                let mut joined = bytes.clone();
                while let Some(TokenKind::Bytes(more)) = self.peek() {
                    joined.extend_from_slice(more);
                    self.index += 1;
                }
                if matches!(self.peek(), Some(TokenKind::Str(_))) {
                    return Err(ParseError::MixedLiterals(self.current_pos()));
                }
                Ok(Expr::Literal(Value::Bytes(Arc::from(joined))))
            }
            TokenKind::Name(name) => Ok(match name.as_str() {
                "None" => Expr::Literal(Value::None),
                "True" => Expr::Literal(Value::Bool(true)),
                "False" => Expr::Literal(Value::Bool(false)),
                _ => Expr::Name(name.clone()),
            }),
            TokenKind::LeftParen => self.parenthesized(),
            TokenKind::LeftBracket => Ok(Expr::List(self.sequence(&TokenKind::RightBracket)?)),
            TokenKind::LeftBrace => self.braced(),
            _ => Err(unexpected(token)),
        }
    }

    // () is the empty tuple, (x) is x, (x,) and (x, y) are tuples
    fn parenthesized(&mut self) -> Result<Expr, ParseError> {
        if self.eat(&TokenKind::RightParen) {
            return Ok(Expr::Tuple(Vec::new()));
        }
        let expr = self.expr_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(expr)
    }

    // {} is an empty dict; {k: v, ...} a dict; {a, b} a set
    fn braced(&mut self) -> Result<Expr, ParseError> {
        if self.eat(&TokenKind::RightBrace) {
            return Ok(Expr::Dict(Vec::new()));
        }

        let first = self.expr()?;
        if !self.eat(&TokenKind::Colon) {
            let mut items = vec![first];
            if self.eat(&TokenKind::Comma) {
                items.extend(self.sequence(&TokenKind::RightBrace)?);
            } else {
                self.expect(&TokenKind::RightBrace)?;
            }
            return Ok(Expr::Set(items));
        }

        let mut pairs = vec![(first, self.expr()?)];
        while self.eat(&TokenKind::Comma) {
            if self.eat(&TokenKind::RightBrace) {
                return Ok(Expr::Dict(pairs));
            }
            let key = self.expr()?;
            self.expect(&TokenKind::Colon)?;
            pairs.push((key, self.expr()?));
        }
        self.expect(&TokenKind::RightBrace)?;
        Ok(Expr::Dict(pairs))
    }
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        found: format!("'{}'", token.kind),
        pos: token.pos.clone(),
    }
}

#[cfg(feature = "complex_numbers")]
fn imaginary(magnitude: f64, _token: &Token) -> Result<Expr, ParseError> {
    Ok(Expr::Literal(Value::Complex(num_complex::Complex64::new(0.0, magnitude))))
}

#[cfg(not(feature = "complex_numbers"))]
fn imaginary(magnitude: f64, token: &Token) -> Result<Expr, ParseError> {
    Err(ParseError::InvalidNumber {
        text: format!("{}j", magnitude),
        pos: token.pos.clone(),
    })
}

fn to_target(expr: Expr, pos: &SourcePos) -> Result<Target, ParseError> {
    match expr {
        Expr::Name(name) => Ok(Target::Name(name)),
        Expr::Attribute { object, name } => Ok(Target::Attribute {
            object: *object,
            name,
        }),
        Expr::Subscript { object, index } => Ok(Target::Subscript {
            object: *object,
            index: *index,
        }),
        _ => Err(ParseError::InvalidTarget(pos.clone())),
    }
}
