//! Soup lexer: converts source text into a token stream.

mod error;
pub mod lexer;
pub mod token;

pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Token, TokenKind, KEYWORDS};

/// Lex an entire source string. Stops at the first invalid character.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).lex()
}
