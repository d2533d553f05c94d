use soup_lexer::LexError;
use soup_types::Span;
use thiserror::Error;

/// A parsing failure. Parsing is fail-fast: the first syntax error aborts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Expected {expected}, got '{found}' at {span}.")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
}
