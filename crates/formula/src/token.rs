//! Tokens and the lexer.

use crate::error::FormulaError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(f64),
    Str(String),
    Ident(String),

    // Keywords
    True,
    False,
    And,
    Or,
    Not,

    // Operators
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %
    Caret,   // ^
    Eq,      // = or ==
    NotEq,   // != or <>
    Lt,      // <
    LtEq,    // <=
    Gt,      // >
    GtEq,    // >=

    LParen,
    RParen,
    Comma,

    Eof,
}

impl TokenKind {
    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number(n) => format!("number `{n}`"),
            TokenKind::Str(s) => format!("string \"{s}\""),
            TokenKind::Ident(name) => format!("`{name}`"),
            TokenKind::Eof => "end of expression".to_string(),
            other => format!("{other:?}").to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

impl Token {
    pub fn new(kind: TokenKind, pos: usize) -> Self {
        Self { kind, pos }
    }
}

pub fn keyword_or_ident(word: &str) -> TokenKind {
    match word {
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        _ => TokenKind::Ident(word.to_string()),
    }
}

pub struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source: source.as_bytes(), pos: 0 }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, FormulaError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, self.pos));
                return Ok(tokens);
            }
            tokens.push(self.next_token()?);
        }
    }

    fn next_token(&mut self) -> Result<Token, FormulaError> {
        let pos = self.pos;
        let ch = self.advance();

        let kind = match ch {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'^' => TokenKind::Caret,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b'=' => {
                if self.peek() == b'=' {
                    self.advance();
                }
                TokenKind::Eq
            }
            b'!' => {
                if self.peek() == b'=' {
                    self.advance();
                    TokenKind::NotEq
                } else {
                    return Err(FormulaError::UnexpectedChar { ch: '!', pos });
                }
            }
            b'<' => {
                if self.peek() == b'=' {
                    self.advance();
                    TokenKind::LtEq
                } else if self.peek() == b'>' {
                    self.advance();
                    TokenKind::NotEq
                } else {
                    TokenKind::Lt
                }
            }
            b'>' => {
                if self.peek() == b'=' {
                    self.advance();
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            b'"' | b'\'' => return self.string(ch, pos),
            b'0'..=b'9' => return self.number(pos),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => return self.ident(pos),
            other => {
                return Err(FormulaError::UnexpectedChar { ch: other as char, pos });
            }
        };

        Ok(Token::new(kind, pos))
    }

    fn string(&mut self, quote: u8, start: usize) -> Result<Token, FormulaError> {
        let mut bytes = Vec::new();
        loop {
            if self.is_at_end() {
                return Err(FormulaError::UnterminatedString { pos: start });
            }
            let ch = self.advance();
            if ch == quote {
                break;
            }
            if ch == b'\\' {
                if self.is_at_end() {
                    return Err(FormulaError::UnterminatedString { pos: start });
                }
                let escaped = self.advance();
                match escaped {
                    b'n' => bytes.push(b'\n'),
                    b't' => bytes.push(b'\t'),
                    other => bytes.push(other),
                }
            } else {
                bytes.push(ch);
            }
        }
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Token::new(TokenKind::Str(text), start))
    }

    fn number(&mut self, start: usize) -> Result<Token, FormulaError> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap_or("");
        let value: f64 = text.parse().map_err(|_| FormulaError::UnexpectedChar {
            ch: '.',
            pos: start,
        })?;
        Ok(Token::new(TokenKind::Number(value), start))
    }

    fn ident(&mut self, start: usize) -> Result<Token, FormulaError> {
        while matches!(self.peek(), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') {
            self.advance();
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap_or("");
        Ok(Token::new(keyword_or_ident(text), start))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), b' ' | b'\t' | b'\r' | b'\n') {
            self.advance();
        }
    }

    fn advance(&mut self) -> u8 {
        let ch = self.peek();
        self.pos += 1;
        ch
    }

    fn peek(&self) -> u8 {
        self.source.get(self.pos).copied().unwrap_or(0)
    }

    fn peek_next(&self) -> u8 {
        self.source.get(self.pos + 1).copied().unwrap_or(0)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }
}
