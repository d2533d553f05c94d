//! Core Soup lexer — converts source text to a token stream.
//!
//! Features:
//! - Fused lexemes: `x'` (primed identifier) and `p:name` (named-piece
//!   reference) are single tokens when their parts are contiguous
//! - Unicode operator spellings: `∧` for `&&`, `∨` for `||`
//! - Single-line comments stripped (`//`)
//! - Fail-fast: the first invalid character aborts the scan

use soup_types::Span;

use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// UTF-8 encodings of the Unicode logical operators.
const LOGICAL_AND: &[u8] = "\u{2227}".as_bytes(); // ∧
const LOGICAL_OR: &[u8] = "\u{2228}".as_bytes(); // ∨

/// The Soup lexer.
///
/// Converts source text into a vector of [`Token`]s ending with
/// [`TokenKind::Eof`], or fails on the first invalid character.
pub struct Lexer<'src> {
    /// The full source text.
    source: &'src str,
    /// The source as bytes, for single-byte scanning.
    bytes: &'src [u8],
    /// Current byte offset into `bytes`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    col: u32,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Lex the entire source into a token stream.
    pub fn lex(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.bytes.get(self.pos).copied()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn current_span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn span_from(&self, start_line: u32, start_col: u32) -> Span {
        Span::new(
            start_line,
            start_col,
            self.line,
            self.col.saturating_sub(1).max(1),
        )
    }

    /// True when the bytes at the cursor spell the given multi-byte
    /// sequence.
    fn matches_bytes(&self, bytes: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(bytes)
    }

    /// Consume a multi-byte sequence known to be present, counting it as
    /// a single column.
    fn consume_bytes(&mut self, bytes: &[u8]) {
        self.pos += bytes.len();
        self.col += 1;
    }

    // ─────────────────────────────────────────────────────────────
    // Whitespace & comments
    // ─────────────────────────────────────────────────────────────

    /// Skip whitespace (newlines included; Soup has no line-sensitive
    /// syntax) and `//` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') => {
                    self.advance();
                }
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while let Some(ch) = self.peek() {
                        if ch == b'\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Token scanning
    // ─────────────────────────────────────────────────────────────

    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();

        if self.at_end() {
            return Ok(Token::new(TokenKind::Eof, self.current_span()));
        }

        let start_line = self.line;
        let start_col = self.col;
        let start_pos = self.pos;

        if self.matches_bytes(LOGICAL_AND) {
            self.consume_bytes(LOGICAL_AND);
            return Ok(Token::new(
                TokenKind::AndAnd,
                self.span_from(start_line, start_col),
            ));
        }
        if self.matches_bytes(LOGICAL_OR) {
            self.consume_bytes(LOGICAL_OR);
            return Ok(Token::new(
                TokenKind::OrOr,
                self.span_from(start_line, start_col),
            ));
        }

        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenKind::Eof, self.current_span())),
        };

        let kind = match ch {
            b'0'..=b'9' => return Ok(self.scan_number(start_pos, start_line, start_col)),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                return Ok(self.scan_identifier(start_pos, start_line, start_col))
            }

            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            // `//` was consumed as a comment above, so bare `/` is division
            // or the piece-effect marker; the parser decides which.
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'@' => TokenKind::At,
            b'?' => TokenKind::Question,
            b':' => TokenKind::Colon,
            b';' => TokenKind::Semicolon,
            b',' => TokenKind::Comma,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,

            b'=' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            b'!' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::BangEq
                } else {
                    TokenKind::Bang
                }
            }
            b'<' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                }
            }
            b'>' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }
            b'&' => {
                if self.peek() == Some(b'&') {
                    self.advance();
                    TokenKind::AndAnd
                } else {
                    return Err(LexError::IncompleteOperator {
                        found: '&',
                        expected: '&',
                        span: self.span_from(start_line, start_col),
                    });
                }
            }
            b'|' => {
                if self.peek() == Some(b'|') {
                    self.advance();
                    TokenKind::OrOr
                } else {
                    TokenKind::Pipe
                }
            }

            _ => {
                let ch = self.source[start_pos..]
                    .chars()
                    .next()
                    .unwrap_or(ch as char);
                // Re-sync the cursor past a multi-byte character.
                self.pos = start_pos + ch.len_utf8();
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    span: self.span_from(start_line, start_col),
                });
            }
        };

        Ok(Token::new(kind, self.span_from(start_line, start_col)))
    }

    // ─────────────────────────────────────────────────────────────
    // Number literals
    // ─────────────────────────────────────────────────────────────

    fn scan_number(&mut self, start_pos: usize, start_line: u32, start_col: u32) -> Token {
        while let Some(b'0'..=b'9') = self.peek() {
            self.advance();
        }
        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(b'0'..=b'9')) {
            self.advance();
            while let Some(b'0'..=b'9') = self.peek() {
                self.advance();
            }
        }

        let text = &self.source[start_pos..self.pos];
        let value: f64 = text.parse().unwrap_or(0.0);
        Token::new(
            TokenKind::NumberLit(value),
            self.span_from(start_line, start_col),
        )
    }

    // ─────────────────────────────────────────────────────────────
    // Identifiers, keywords & fused lexemes
    // ─────────────────────────────────────────────────────────────

    fn scan_identifier(&mut self, start_pos: usize, start_line: u32, start_col: u32) -> Token {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == b'_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.source[start_pos..self.pos];

        if let Some(kind) = TokenKind::from_keyword(text) {
            return Token::new(kind, self.span_from(start_line, start_col));
        }

        // `p:name` — only when the colon and the name touch the `p`,
        // so `c ? p : e` still parses as a conditional.
        if text == "p"
            && self.peek() == Some(b':')
            && matches!(self.peek_at(1), Some(b'a'..=b'z' | b'A'..=b'Z' | b'_'))
        {
            self.advance(); // ':'
            let name_start = self.pos;
            while let Some(ch) = self.peek() {
                if ch.is_ascii_alphanumeric() || ch == b'_' {
                    self.advance();
                } else {
                    break;
                }
            }
            let name = self.source[name_start..self.pos].to_string();
            return Token::new(
                TokenKind::PieceRef(name),
                self.span_from(start_line, start_col),
            );
        }

        // `x'` — the apostrophe must touch the identifier.
        if self.peek() == Some(b'\'') {
            self.advance();
            return Token::new(
                TokenKind::PrimedIdentifier(text.to_string()),
                self.span_from(start_line, start_col),
            );
        }

        Token::new(
            TokenKind::Identifier(text.to_string()),
            self.span_from(start_line, start_col),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
