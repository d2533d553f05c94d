//! The resolution pass itself: a single pre-order walk over the tree.

use std::collections::HashMap;

use soup_types::ast::{ExprKind, Expression, Reference, Soup, Statement, StmtKind};

use crate::error::{LinkError, Namespace};

/// One flat namespace: symbol name to declaration index.
struct Scope {
    namespace: Namespace,
    symbols: HashMap<String, usize>,
}

impl Scope {
    fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            symbols: HashMap::new(),
        }
    }

    fn define(&mut self, name: String, index: usize) -> Result<(), LinkError> {
        if self.symbols.contains_key(&name) {
            return Err(LinkError::AlreadyDefined {
                name,
                namespace: self.namespace,
            });
        }
        self.symbols.insert(name, index);
        Ok(())
    }

    /// Annotate the reference that was actually passed in.
    fn resolve(&self, reference: &mut Reference) -> Result<(), LinkError> {
        match self.symbols.get(&reference.name) {
            Some(&index) => {
                reference.declaration = Some(index);
                Ok(())
            }
            None => Err(LinkError::NotDefined {
                name: reference.name.clone(),
                namespace: self.namespace,
            }),
        }
    }
}

/// Resolve every reference in the soup, annotating declaration indices.
///
/// Initializers are walked before their variable is defined, so a variable
/// cannot reference itself or a later declaration. A piece's name is
/// visible inside its own guard and effect.
pub fn link(soup: &mut Soup) -> Result<(), LinkError> {
    let mut variables = Scope::new(Namespace::Variable);
    let mut pieces = Scope::new(Namespace::Piece);

    for index in 0..soup.variables.len() {
        let declaration = &mut soup.variables[index];
        resolve_expression(&mut declaration.initializer, &variables, &pieces)?;
        variables.define(declaration.name.clone(), index)?;
    }

    for index in 0..soup.pieces.len() {
        if let Some(name) = soup.pieces[index].name.clone() {
            pieces.define(name, index)?;
        }
        let piece = &mut soup.pieces[index];
        resolve_expression(&mut piece.guard, &variables, &pieces)?;
        resolve_statement(&mut piece.effect, &variables, &pieces)?;
    }

    Ok(())
}

fn resolve_expression(
    expr: &mut Expression,
    variables: &Scope,
    pieces: &Scope,
) -> Result<(), LinkError> {
    match &mut expr.kind {
        ExprKind::BooleanLiteral(_) | ExprKind::NumberLiteral(_) => Ok(()),
        ExprKind::Reference(reference) | ExprKind::PrimedReference(reference) => {
            variables.resolve(reference)
        }
        ExprKind::NamedPieceReference(reference) => pieces.resolve(reference),
        ExprKind::Enabled(inner) | ExprKind::Input(inner) => {
            resolve_expression(inner, variables, pieces)
        }
        ExprKind::Unary { operand, .. } => resolve_expression(operand, variables, pieces),
        ExprKind::Binary { left, right, .. } => {
            resolve_expression(left, variables, pieces)?;
            resolve_expression(right, variables, pieces)
        }
        ExprKind::Conditional {
            condition,
            then_expr,
            else_expr,
        } => {
            resolve_expression(condition, variables, pieces)?;
            resolve_expression(then_expr, variables, pieces)?;
            resolve_expression(else_expr, variables, pieces)
        }
    }
}

fn resolve_statement(
    stmt: &mut Statement,
    variables: &Scope,
    pieces: &Scope,
) -> Result<(), LinkError> {
    match &mut stmt.kind {
        StmtKind::Skip => Ok(()),
        StmtKind::Assignment { target, value } => {
            resolve_expression(target, variables, pieces)?;
            resolve_expression(value, variables, pieces)
        }
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            resolve_expression(condition, variables, pieces)?;
            resolve_statement(then_branch, variables, pieces)?;
            resolve_statement(else_branch, variables, pieces)
        }
        StmtKind::Sequence { first, second } => {
            resolve_statement(first, variables, pieces)?;
            resolve_statement(second, variables, pieces)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use soup_parser::parse_soup;

    fn linked(source: &str) -> Soup {
        let mut soup = parse_soup(source).unwrap();
        link(&mut soup).unwrap();
        soup
    }

    fn declaration_of(expr: &Expression) -> Option<usize> {
        match &expr.kind {
            ExprKind::Reference(r)
            | ExprKind::PrimedReference(r)
            | ExprKind::NamedPieceReference(r) => r.declaration,
            _ => None,
        }
    }

    #[test]
    fn test_links_guard_and_effect_references() {
        let soup = linked("var a=true; [a] / a=23");
        let guard = &soup.pieces[0].guard;
        assert_eq!(declaration_of(guard), Some(0));
        if let StmtKind::Assignment { target, .. } = &soup.pieces[0].effect.kind {
            assert_eq!(declaration_of(target), Some(0));
        } else {
            panic!("expected an assignment effect");
        }
    }

    #[test]
    fn test_links_to_the_right_declaration() {
        let soup = linked("var a = 1; b = 2 | [b > a]");
        if let ExprKind::Binary { left, right, .. } = &soup.pieces[0].guard.kind {
            assert_eq!(declaration_of(left), Some(1));
            assert_eq!(declaration_of(right), Some(0));
        } else {
            panic!("expected a binary guard");
        }
    }

    #[test]
    fn test_initializer_may_use_earlier_variables() {
        let soup = linked("var a = 1; b = a + 1");
        if let ExprKind::Binary { left, .. } = &soup.variables[1].initializer.kind {
            assert_eq!(declaration_of(left), Some(0));
        } else {
            panic!("expected a binary initializer");
        }
    }

    #[test]
    fn test_forward_reference_in_initializer_fails() {
        let mut soup = parse_soup("var a = b; b = 1").unwrap();
        let err = link(&mut soup).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Symbol b is not defined in the variable scope."
        );
    }

    #[test]
    fn test_self_reference_in_initializer_fails() {
        let mut soup = parse_soup("var a = a + 1").unwrap();
        let err = link(&mut soup).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Symbol a is not defined in the variable scope."
        );
    }

    #[test]
    fn test_duplicate_variable_fails() {
        let mut soup = parse_soup("var a = 1; a = 2").unwrap();
        let err = link(&mut soup).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Symbol a is already defined in the variable scope."
        );
    }

    #[test]
    fn test_duplicate_piece_name_fails() {
        let mut soup = parse_soup("p1: [true] | p1: [true]").unwrap();
        let err = link(&mut soup).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Symbol p1 is already defined in the piece scope."
        );
    }

    #[test]
    fn test_undefined_variable_in_guard_fails() {
        let mut soup = parse_soup("[x > 0]").unwrap();
        let err = link(&mut soup).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Symbol x is not defined in the variable scope."
        );
    }

    #[test]
    fn test_piece_references_resolve_in_the_piece_namespace() {
        let soup = linked("var x = 0 | p1: [p:p1] / x = 1");
        if let ExprKind::NamedPieceReference(r) = &soup.pieces[0].guard.kind {
            assert_eq!(r.declaration, Some(0));
        } else {
            panic!("expected a named-piece reference guard");
        }
    }

    #[test]
    fn test_undefined_piece_reference_fails() {
        let mut soup = parse_soup("p1: [p:other]").unwrap();
        let err = link(&mut soup).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Symbol other is not defined in the piece scope."
        );
    }

    #[test]
    fn test_namespaces_are_separate() {
        // a piece and a variable may share a name
        let soup = linked("var go = true | go: [go] / go = false");
        assert_eq!(declaration_of(&soup.pieces[0].guard), Some(0));
        assert_eq!(soup.pieces[0].name.as_deref(), Some("go"));
    }

    #[test]
    fn test_primed_references_resolve_as_variables() {
        let soup = linked("var x = 0 | [x' > x]");
        if let ExprKind::Binary { left, .. } = &soup.pieces[0].guard.kind {
            assert_eq!(declaration_of(left), Some(0));
        } else {
            panic!("expected a binary guard");
        }
    }
}
