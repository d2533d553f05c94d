use soup_types::Span;
use thiserror::Error;

/// A lexing failure. Lexing is fail-fast: the first invalid character
/// aborts the scan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at {span}.")]
    UnexpectedCharacter { ch: char, span: Span },

    #[error("Expected '{expected}' after '{found}' at {span}.")]
    IncompleteOperator {
        found: char,
        expected: char,
        span: Span,
    },
}
