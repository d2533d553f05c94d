//! Statement parsing.
//!
//! Grammar:
//! ```text
//! Statement  = Single { ";" Single }
//! Single     = "if" Expr "then" Statement [ "else" Statement ]
//!            | Expr "=" Expr
//! ```
//!
//! Sequences nest to the right and `else` binds to the nearest `if`. The
//! then-branch is greedy: `if c then x=1; y=2` puts the whole sequence
//! under the `if`. Parenthesize guards accordingly.

use soup_lexer::token::TokenKind;
use soup_types::ast::*;

use crate::error::ParseError;
use crate::parser::Parser;

impl Parser {
    /// Parse a statement, including `;`-separated sequences.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let first = self.parse_single_statement()?;
        if !self.check(&TokenKind::Semicolon) {
            return Ok(first);
        }
        // A `;` only continues the sequence when a statement follows;
        // otherwise it is a trailing separator for the caller to consume.
        if !self.statement_follows(1) {
            return Ok(first);
        }
        self.advance(); // ';'
        let second = self.parse_statement()?;
        let span = first.span.merge(second.span);
        Ok(Statement::new(
            StmtKind::Sequence {
                first: Box::new(first),
                second: Box::new(second),
            },
            span,
        ))
    }

    fn parse_single_statement(&mut self) -> Result<Statement, ParseError> {
        if self.check(&TokenKind::If) {
            return self.parse_if_statement();
        }
        self.parse_assignment()
    }

    /// `"if" Expr "then" Statement [ "else" Statement ]`
    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect(&TokenKind::If)?.span;
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::Then)?;
        let then_branch = self.parse_statement()?;
        let (else_branch, end) = if self.eat(&TokenKind::Else) {
            let stmt = self.parse_statement()?;
            let span = stmt.span;
            (stmt, span)
        } else {
            (Statement::skip(self.previous_span()), then_branch.span)
        };
        Ok(Statement::new(
            StmtKind::If {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            start.merge(end),
        ))
    }

    /// `Expr "=" Expr` — the target's shape is checked at execution time,
    /// not here.
    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        let target = self.parse_expression()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expression()?;
        let span = target.span.merge(value.span);
        Ok(Statement::new(
            StmtKind::Assignment {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    /// Returns `true` if the token `n` ahead can start a statement.
    /// An identifier followed by `:` is a piece name, not a statement.
    pub(crate) fn statement_follows(&self, n: usize) -> bool {
        match self.look_ahead(n) {
            TokenKind::If | TokenKind::LParen | TokenKind::PrimedIdentifier(_) => true,
            TokenKind::Identifier(_) => self.look_ahead(n + 1) != &TokenKind::Colon,
            _ => false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crate::parse_statement;
    use soup_types::ast::*;
    use soup_types::Span;

    fn sp() -> Span {
        Span::point(1, 1)
    }

    fn num(n: f64) -> Expression {
        Expression::new(ExprKind::NumberLiteral(n), sp())
    }

    fn boolean(b: bool) -> Expression {
        Expression::new(ExprKind::BooleanLiteral(b), sp())
    }

    fn reference(name: &str) -> Expression {
        Expression::new(ExprKind::Reference(Reference::new(name)), sp())
    }

    fn assign(target: Expression, value: Expression) -> Statement {
        Statement::new(
            StmtKind::Assignment {
                target: Box::new(target),
                value: Box::new(value),
            },
            sp(),
        )
    }

    fn if_stmt(condition: Expression, then_branch: Statement, else_branch: Statement) -> Statement {
        Statement::new(
            StmtKind::If {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            sp(),
        )
    }

    fn assert_parses_to(source: &str, expected: &Statement) {
        let parsed = parse_statement(source).unwrap();
        assert!(
            parsed.structural_eq(expected),
            "'{source}' parsed to {parsed:?}"
        );
    }

    #[test]
    fn test_assignment() {
        assert_parses_to("x = 23", &assign(reference("x"), num(23.0)));
    }

    #[test]
    fn test_if_with_else() {
        assert_parses_to(
            "if true then x=23 else y=42",
            &if_stmt(
                boolean(true),
                assign(reference("x"), num(23.0)),
                assign(reference("y"), num(42.0)),
            ),
        );
    }

    #[test]
    fn test_if_without_else_defaults_to_skip() {
        assert_parses_to(
            "if true then x=23",
            &if_stmt(
                boolean(true),
                assign(reference("x"), num(23.0)),
                Statement::skip(sp()),
            ),
        );
    }

    #[test]
    fn test_else_binds_to_nearest_if() {
        let inner = if_stmt(
            reference("b"),
            assign(reference("x"), num(1.0)),
            assign(reference("x"), num(2.0)),
        );
        assert_parses_to(
            "if a then if b then x=1 else x=2",
            &if_stmt(reference("a"), inner, Statement::skip(sp())),
        );
    }

    #[test]
    fn test_sequence() {
        assert_parses_to(
            "x=23; y=42",
            &Statement::new(
                StmtKind::Sequence {
                    first: Box::new(assign(reference("x"), num(23.0))),
                    second: Box::new(assign(reference("y"), num(42.0))),
                },
                sp(),
            ),
        );
    }

    #[test]
    fn test_sequence_nests_right() {
        let expected = Statement::new(
            StmtKind::Sequence {
                first: Box::new(assign(reference("x"), num(1.0))),
                second: Box::new(Statement::new(
                    StmtKind::Sequence {
                        first: Box::new(assign(reference("y"), num(2.0))),
                        second: Box::new(assign(reference("z"), num(3.0))),
                    },
                    sp(),
                )),
            },
            sp(),
        );
        assert_parses_to("x=1; y=2; z=3", &expected);
    }

    #[test]
    fn test_missing_then_fails() {
        assert!(parse_statement("if true x=23").is_err());
    }

    #[test]
    fn test_bare_expression_is_not_a_statement() {
        assert!(parse_statement("x + 1").is_err());
    }
}
