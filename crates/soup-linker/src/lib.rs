//! Name resolution for Soup syntax trees.
//!
//! [`link`] walks a freshly parsed [`Soup`](soup_types::ast::Soup) once
//! and annotates every
//! reference with the index of its declaring entity: plain and primed
//! references resolve to variable declarations, named-piece references to
//! pieces. Variables and pieces live in separate flat namespaces.
//!
//! Resolution order forbids forward references: a variable initializer is
//! walked before the variable itself is defined, and each piece's name is
//! defined before its guard and effect are walked.

mod error;
mod linker;

pub use error::{LinkError, Namespace};
pub use linker::link;
