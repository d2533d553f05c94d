//! Runtime error types for the Soup evaluator.

use soup_parser::ParseError;
use thiserror::Error;

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// Evaluation error. The message wording is stable API: drivers match on
/// it and the test suites assert it verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("The variable {0} is not defined.")]
    UndefinedVariable(String),

    #[error("The variable {0} is already defined.")]
    VariableAlreadyDefined(String),

    /// Operand type check failure. `operator` is the surface rendering of
    /// the offending construct (`Unary !`, `&&`, `If condition`,
    /// `Piece guard`, `The conditional expressions ?:`).
    #[error("{operator} expects a {expected}, got '{value}'.")]
    TypeMismatch {
        operator: String,
        expected: &'static str,
        value: String,
    },

    #[error("Division by zero.")]
    DivisionByZero,

    #[error("Assignment target expects a variable reference, got '{0}'.")]
    InvalidAssignmentTarget(String),

    /// The node kind has no meaning for the interpreter it reached, e.g.
    /// a primed reference outside step evaluation.
    #[error("The node {0} is not supported by the Soup expression interpreter.")]
    UnsupportedNode(&'static str),
}

/// Union error for the string-level convenience evaluators, which both
/// parse and evaluate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SoupError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
