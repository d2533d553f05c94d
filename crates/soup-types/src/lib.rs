//! Shared types for the Soup engine.
//!
//! This crate defines the syntax model (AST) for the Soup guarded-command
//! language and the source spans every node carries. Spans exist for
//! diagnostics only — structural equality and all evaluation ignore them.

mod span;
pub mod ast;

pub use span::Span;
