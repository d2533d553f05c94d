//! Token types for the Soup lexer.
//!
//! Defines [`TokenKind`] covering every Soup lexeme and [`Token`], which
//! pairs a kind with a source [`Span`].

use soup_types::Span;
use std::fmt;

/// The reserved identifiers of Soup. These cannot be used as variable or
/// piece names; the lexer emits a dedicated keyword token for each.
pub const KEYWORDS: &[&str] = &["var", "if", "then", "else", "true", "false", "enabled"];

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the Soup lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the Soup language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────

    /// Numeric literal (integer or decimal): `42`, `3.14`
    NumberLit(f64),
    /// `true`
    True,
    /// `false`
    False,

    // ── Identifiers ──────────────────────────────────────────

    /// Plain identifier: `x`, `counter`
    Identifier(String),
    /// Primed identifier `x'` — the identifier immediately followed by
    /// an apostrophe, fused into one lexeme.
    PrimedIdentifier(String),
    /// Named-piece reference `p:name` — the three parts must be
    /// contiguous, which keeps `c ? p : e` a ternary.
    PieceRef(String),

    // ── Keywords ─────────────────────────────────────────────

    /// `var`
    Var,
    /// `if`
    If,
    /// `then`
    Then,
    /// `else`
    Else,
    /// `enabled`
    Enabled,

    // ── Operators ────────────────────────────────────────────

    /// `!`
    Bang,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `&&` (also written `∧`)
    AndAnd,
    /// `||` (also written `∨`)
    OrOr,
    /// `?`
    Question,
    /// `:`
    Colon,
    /// `=`
    Eq,
    /// `@`
    At,

    // ── Punctuation ──────────────────────────────────────────

    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `|` (piece separator)
    Pipe,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,

    // ── Special ──────────────────────────────────────────────

    /// End of input
    Eof,
}

impl TokenKind {
    /// Look up a reserved identifier. Returns `None` for user identifiers.
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        Some(match s {
            "var" => TokenKind::Var,
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "enabled" => TokenKind::Enabled,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::NumberLit(n) => write!(f, "{n}"),
            TokenKind::True => f.write_str("true"),
            TokenKind::False => f.write_str("false"),
            TokenKind::Identifier(s) => f.write_str(s),
            TokenKind::PrimedIdentifier(s) => write!(f, "{s}'"),
            TokenKind::PieceRef(s) => write!(f, "p:{s}"),
            TokenKind::Var => f.write_str("var"),
            TokenKind::If => f.write_str("if"),
            TokenKind::Then => f.write_str("then"),
            TokenKind::Else => f.write_str("else"),
            TokenKind::Enabled => f.write_str("enabled"),
            TokenKind::Bang => f.write_str("!"),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Percent => f.write_str("%"),
            TokenKind::EqEq => f.write_str("=="),
            TokenKind::BangEq => f.write_str("!="),
            TokenKind::Less => f.write_str("<"),
            TokenKind::LessEq => f.write_str("<="),
            TokenKind::Greater => f.write_str(">"),
            TokenKind::GreaterEq => f.write_str(">="),
            TokenKind::AndAnd => f.write_str("&&"),
            TokenKind::OrOr => f.write_str("||"),
            TokenKind::Question => f.write_str("?"),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::Eq => f.write_str("="),
            TokenKind::At => f.write_str("@"),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Pipe => f.write_str("|"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBracket => f.write_str("["),
            TokenKind::RBracket => f.write_str("]"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keyword_recognises_all() {
        for &kw in KEYWORDS {
            assert!(
                TokenKind::from_keyword(kw).is_some(),
                "from_keyword should recognise '{kw}'"
            );
        }
    }

    #[test]
    fn test_from_keyword_returns_none_for_identifiers() {
        for name in ["x", "counter", "piece", "Var", "IF", "enable"] {
            assert!(
                TokenKind::from_keyword(name).is_none(),
                "from_keyword should not recognise '{name}'"
            );
        }
    }

    #[test]
    fn test_display_roundtrip_keywords() {
        for &kw in KEYWORDS {
            let kind = TokenKind::from_keyword(kw).unwrap();
            assert_eq!(kind.to_string(), kw);
        }
    }

    #[test]
    fn test_display_operators() {
        assert_eq!(TokenKind::EqEq.to_string(), "==");
        assert_eq!(TokenKind::BangEq.to_string(), "!=");
        assert_eq!(TokenKind::AndAnd.to_string(), "&&");
        assert_eq!(TokenKind::OrOr.to_string(), "||");
        assert_eq!(TokenKind::At.to_string(), "@");
    }

    #[test]
    fn test_display_fused_lexemes() {
        assert_eq!(TokenKind::PrimedIdentifier("x".into()).to_string(), "x'");
        assert_eq!(TokenKind::PieceRef("toto".into()).to_string(), "p:toto");
    }
}
