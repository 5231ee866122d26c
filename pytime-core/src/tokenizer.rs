// Tokenizer for the Python literal subset, with complete position tracking
//
// Newlines end statements except inside brackets. Indentation is not
// significant: the language has no blocks.

use std::fmt;

use crate::parser::ParseError;

// RUST CONCEPT: Source position for rich error messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
    pub offset: usize, // Byte offset from start of input
}

impl SourcePos {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

// RUST CONCEPT: Token with embedded source position
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: SourcePos,
}

impl Token {
    pub fn new(kind: TokenKind, pos: SourcePos) -> Self {
        Self { kind, pos }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Integer(String),   // Decimal digits, underscores removed
    Float(f64),        // Has a decimal point or exponent
    Imaginary(f64),    // Number with a j suffix (e.g., 1j, 2.5J)
    Str(String),
    Bytes(Vec<u8>),
    Name(String),
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Colon,
    Dot,
    Assign,
    Plus,
    Minus,
    Newline,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Integer(s) => write!(f, "{}", s),
            TokenKind::Float(x) => write!(f, "{}", x),
            TokenKind::Imaginary(x) => write!(f, "{}j", x),
            TokenKind::Str(s) => write!(f, "{:?}", s),
            TokenKind::Bytes(b) => write!(f, "b{:?}", String::from_utf8_lossy(b)),
            TokenKind::Name(s) => write!(f, "{}", s),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::LeftBracket => write!(f, "["),
            TokenKind::RightBracket => write!(f, "]"),
            TokenKind::LeftBrace => write!(f, "{{"),
            TokenKind::RightBrace => write!(f, "}}"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Assign => write!(f, "="),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Newline => write!(f, "newline"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

// RUST CONCEPT: Cursor over the source
// Keeps the char iterator and the position in lockstep so no caller can
// forget to advance one of them
struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
    column: usize,
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    fn pos(&self) -> SourcePos {
        SourcePos::new(self.line, self.column, self.offset)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn bump(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.offset += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut cursor = Cursor::new(input);
    let mut depth = 0usize; // Bracket nesting; newlines inside brackets are whitespace

    while let Some(ch) = cursor.peek() {
        let start = cursor.pos();

        let kind = match ch {
            ' ' | '\t' | '\r' => {
                cursor.bump();
                continue;
            }
            '\\' => {
                // Explicit line continuation
                cursor.bump();
                cursor.eat('\r');
                if !cursor.eat('\n') {
                    return Err(ParseError::UnexpectedCharacter { ch: '\\', pos: start });
                }
                continue;
            }
            '#' => {
                while cursor.peek().is_some_and(|c| c != '\n') {
                    cursor.bump();
                }
                continue;
            }
            '\n' => {
                cursor.bump();
                if depth > 0 || matches!(tokens.last(), None | Some(Token { kind: TokenKind::Newline, .. })) {
                    continue;
                }
                TokenKind::Newline
            }
            '(' | '[' | '{' => {
                cursor.bump();
                depth += 1;
                match ch {
                    '(' => TokenKind::LeftParen,
                    '[' => TokenKind::LeftBracket,
                    _ => TokenKind::LeftBrace,
                }
            }
            ')' | ']' | '}' => {
                cursor.bump();
                depth = depth.saturating_sub(1);
                match ch {
                    ')' => TokenKind::RightParen,
                    ']' => TokenKind::RightBracket,
                    _ => TokenKind::RightBrace,
                }
            }
            ',' => single(&mut cursor, TokenKind::Comma),
            ':' => single(&mut cursor, TokenKind::Colon),
            '=' => single(&mut cursor, TokenKind::Assign),
            '+' => single(&mut cursor, TokenKind::Plus),
            '-' => single(&mut cursor, TokenKind::Minus),
            '.' => {
                cursor.bump();
                if cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
                    read_number(&mut cursor, String::from("."), &start)?
                } else {
                    TokenKind::Dot
                }
            }
            '0'..='9' => read_number(&mut cursor, String::new(), &start)?,
            '\'' | '"' => read_string(&mut cursor, false, &start)?,
            c if c.is_alphabetic() || c == '_' => {
                let mut word = String::new();
                while let Some(c) = cursor.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        word.push(c);
                        cursor.bump();
                    } else {
                        break;
                    }
                }
                // String prefixes: b'..', r'..', rb'..', br'..'
                match (word.to_ascii_lowercase().as_str(), cursor.peek()) {
                    ("b" | "br" | "rb", Some('\'' | '"')) => {
                        let raw = word.len() == 2;
                        read_bytes(&mut cursor, raw, &start)?
                    }
                    ("r", Some('\'' | '"')) => read_string(&mut cursor, true, &start)?,
                    _ => TokenKind::Name(word),
                }
            }
            other => {
                return Err(ParseError::UnexpectedCharacter { ch: other, pos: start });
            }
        };

        tokens.push(Token::new(kind, start));
    }

    Ok(tokens)
}

fn single(cursor: &mut Cursor<'_>, kind: TokenKind) -> TokenKind {
    cursor.bump();
    kind
}

// Numbers: 123, 1_000, 1.5, .5, 1e10, 2.5e-3, 1j, 3.0J
fn read_number(cursor: &mut Cursor<'_>, mut text: String, start: &SourcePos) -> Result<TokenKind, ParseError> {
    let mut is_float = text.contains('.');

    while let Some(c) = cursor.peek() {
        match c {
            '0'..='9' => text.push(c),
            '_' => {}
            '.' if !is_float => {
                is_float = true;
                text.push(c);
            }
            'e' | 'E' => {
                is_float = true;
                text.push(c);
                cursor.bump();
                if let Some(sign @ ('+' | '-')) = cursor.peek() {
                    text.push(sign);
                } else {
                    continue;
                }
            }
            _ => break,
        }
        cursor.bump();
    }

    let invalid = || ParseError::InvalidNumber {
        text: text.clone(),
        pos: start.clone(),
    };

    if cursor.eat('j') || cursor.eat('J') {
        let magnitude = text.parse::<f64>().map_err(|_| invalid())?;
        return Ok(TokenKind::Imaginary(magnitude));
    }

    if is_float {
        let value = text.parse::<f64>().map_err(|_| invalid())?;
        Ok(TokenKind::Float(value))
    } else if text.len() > 1 && text.starts_with('0') && text.chars().any(|c| c != '0') {
        // Python forbids leading zeros on non-zero decimal integers
        Err(invalid())
    } else {
        Ok(TokenKind::Integer(text))
    }
}

// RUST CONCEPT: Shared quote handling
// String and bytes literals differ only in how decoded pieces are assembled
enum Opening {
    Empty,
    Single(char),
    Triple(char),
}

fn open_quote(cursor: &mut Cursor<'_>) -> Opening {
    let Some(quote) = cursor.bump() else {
        return Opening::Empty;
    };
    if !cursor.eat(quote) {
        return Opening::Single(quote);
    }
    if cursor.eat(quote) {
        Opening::Triple(quote)
    } else {
        Opening::Empty
    }
}

// A decoded unit of a literal: a character, or a raw value from a \x escape
enum Piece {
    Char(char),
    Byte(u8),
}

fn read_quoted(cursor: &mut Cursor<'_>, raw: bool, start: &SourcePos) -> Result<Vec<Piece>, ParseError> {
    let (quote, triple) = match open_quote(cursor) {
        Opening::Empty => return Ok(Vec::new()),
        Opening::Single(q) => (q, false),
        Opening::Triple(q) => (q, true),
    };

    let mut pieces = Vec::new();
    loop {
        let Some(c) = cursor.bump() else {
            return Err(ParseError::UnterminatedString(start.clone()));
        };
        match c {
            c if c == quote && !triple => return Ok(pieces),
            c if c == quote => {
                if cursor.eat(quote) {
                    if cursor.eat(quote) {
                        return Ok(pieces);
                    }
                    pieces.push(Piece::Char(quote));
                }
                pieces.push(Piece::Char(quote));
            }
            '\n' if !triple => return Err(ParseError::UnterminatedString(start.clone())),
            '\\' if raw => {
                pieces.push(Piece::Char('\\'));
                if let Some(next) = cursor.bump() {
                    pieces.push(Piece::Char(next));
                }
            }
            '\\' => read_escape(cursor, start, &mut pieces)?,
            other => pieces.push(Piece::Char(other)),
        }
    }
}

fn read_escape(cursor: &mut Cursor<'_>, start: &SourcePos, pieces: &mut Vec<Piece>) -> Result<(), ParseError> {
    let Some(c) = cursor.bump() else {
        return Err(ParseError::UnterminatedString(start.clone()));
    };
    let decoded = match c {
        '\n' => return Ok(()), // Escaped newline joins lines
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        'a' => '\u{7}',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        '\\' | '\'' | '"' => c,
        'x' => {
            let mut value = 0u8;
            for _ in 0..2 {
                let digit = cursor
                    .bump()
                    .and_then(|d| d.to_digit(16))
                    .ok_or_else(|| ParseError::InvalidEscape(start.clone()))?;
                value = value * 16 + digit as u8;
            }
            pieces.push(Piece::Byte(value));
            return Ok(());
        }
        other => {
            // Unknown escapes are kept verbatim
            pieces.push(Piece::Char('\\'));
            other
        }
    };
    pieces.push(Piece::Char(decoded));
    Ok(())
}

fn read_string(cursor: &mut Cursor<'_>, raw: bool, start: &SourcePos) -> Result<TokenKind, ParseError> {
    let text = read_quoted(cursor, raw, start)?
        .into_iter()
        .map(|piece| match piece {
            Piece::Char(c) => c,
            Piece::Byte(b) => char::from(b),
        })
        .collect();
    Ok(TokenKind::Str(text))
}

fn read_bytes(cursor: &mut Cursor<'_>, raw: bool, start: &SourcePos) -> Result<TokenKind, ParseError> {
    let mut bytes = Vec::new();
    for piece in read_quoted(cursor, raw, start)? {
        match piece {
            Piece::Byte(b) => bytes.push(b),
            Piece::Char(c) if c.is_ascii() => bytes.push(c as u8),
            Piece::Char(_) => return Err(ParseError::NonAsciiBytes(start.clone())),
        }
    }
    Ok(TokenKind::Bytes(bytes))
}
