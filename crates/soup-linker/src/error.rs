use std::fmt;
use thiserror::Error;

/// The two flat namespaces of a Soup program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Variable,
    Piece,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Variable => f.write_str("variable"),
            Namespace::Piece => f.write_str("piece"),
        }
    }
}

/// A name-resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("Symbol {name} is already defined in the {namespace} scope.")]
    AlreadyDefined { name: String, namespace: Namespace },

    #[error("Symbol {name} is not defined in the {namespace} scope.")]
    NotDefined { name: String, namespace: Namespace },
}
