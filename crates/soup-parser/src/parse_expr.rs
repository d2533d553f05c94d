//! Expression parsing with full operator precedence.
//!
//! Precedence (lowest → highest):
//! 8. `?:` (conditional, right-associative)
//! 7. `||` / `∨`
//! 6. `&&` / `∧`
//! 5. `==`, `!=`
//! 4. `<`, `<=`, `>`, `>=`
//! 3. `+`, `-`
//! 2. `*`, `/`, `%`
//! 1. unary `!`, `+`, `-`
//!
//! A sign applied directly to a number literal folds into the literal:
//! `-23` is the literal `-23`, while `-(23)` and `--23` keep an explicit
//! unary node. Parentheses are transparent and leave no node behind.

use soup_lexer::token::TokenKind;
use soup_types::ast::*;

use crate::error::ParseError;
use crate::parser::Parser;

impl Parser {
    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    /// Parse an expression.
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_conditional()
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Precedence Chain
    // ══════════════════════════════════════════════════════════════════════════

    /// `ConditionalExpr = OrExpr [ "?" ConditionalExpr ":" ConditionalExpr ]`
    fn parse_conditional(&mut self) -> Result<Expression, ParseError> {
        let condition = self.parse_or()?;
        if !self.eat(&TokenKind::Question) {
            return Ok(condition);
        }
        let then_expr = self.parse_conditional()?;
        self.expect(&TokenKind::Colon)?;
        let else_expr = self.parse_conditional()?;
        let span = condition.span.merge(else_expr.span);
        Ok(Expression::new(
            ExprKind::Conditional {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            },
            span,
        ))
    }

    /// `OrExpr = AndExpr { "||" AndExpr }`
    fn parse_or(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::OrOr) {
            let right = self.parse_and()?;
            left = binary(left, BinOp::Or, right);
        }
        Ok(left)
    }

    /// `AndExpr = EqualityExpr { "&&" EqualityExpr }`
    fn parse_and(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_equality()?;
        while self.eat(&TokenKind::AndAnd) {
            let right = self.parse_equality()?;
            left = binary(left, BinOp::And, right);
        }
        Ok(left)
    }

    /// `EqualityExpr = CompExpr { ("==" | "!=") CompExpr }`
    fn parse_equality(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::BangEq => BinOp::NotEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_comparison()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// `CompExpr = AddExpr { ("<" | "<=" | ">" | ">=") AddExpr }`
    fn parse_comparison(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_add()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Less => BinOp::Less,
                TokenKind::LessEq => BinOp::LessEq,
                TokenKind::Greater => BinOp::Greater,
                TokenKind::GreaterEq => BinOp::GreaterEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_add()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// `AddExpr = MulExpr { ("+" | "-") MulExpr }`
    fn parse_add(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_mul()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_mul()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// `MulExpr = UnaryExpr { ("*" | "/" | "%") UnaryExpr }`
    fn parse_mul(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// `UnaryExpr = ("!" | "+" | "-") UnaryExpr | PrimaryExpr`
    ///
    /// A sign directly in front of a number literal is folded into it.
    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        let start = self.current_span();
        let op = match self.peek_kind() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Minus,
            _ => return self.parse_primary(),
        };
        self.advance();

        if let TokenKind::NumberLit(n) = *self.peek_kind() {
            if matches!(op, UnaryOp::Plus | UnaryOp::Minus) {
                let end = self.advance().span;
                let value = if op == UnaryOp::Minus { -n } else { n };
                return Ok(Expression::new(
                    ExprKind::NumberLiteral(value),
                    start.merge(end),
                ));
            }
        }

        let operand = self.parse_unary()?;
        let span = start.merge(operand.span);
        Ok(Expression::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Primary Expressions
    // ══════════════════════════════════════════════════════════════════════════

    /// `PrimaryExpr = literal | reference | "x'" | "p:name"
    ///              | "enabled" "(" Expr ")" | "@" PrimaryExpr | "(" Expr ")"`
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let span = self.current_span();
        match self.peek_kind().clone() {
            TokenKind::True => {
                self.advance();
                Ok(Expression::new(ExprKind::BooleanLiteral(true), span))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expression::new(ExprKind::BooleanLiteral(false), span))
            }
            TokenKind::NumberLit(n) => {
                self.advance();
                Ok(Expression::new(ExprKind::NumberLiteral(n), span))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Expression::new(
                    ExprKind::Reference(Reference::new(name)),
                    span,
                ))
            }
            TokenKind::PrimedIdentifier(name) => {
                self.advance();
                Ok(Expression::new(
                    ExprKind::PrimedReference(Reference::new(name)),
                    span,
                ))
            }
            TokenKind::PieceRef(name) => {
                self.advance();
                Ok(Expression::new(
                    ExprKind::NamedPieceReference(Reference::new(name)),
                    span,
                ))
            }
            TokenKind::Enabled => {
                self.advance();
                self.expect(&TokenKind::LParen)?;
                let inner = self.parse_expression()?;
                let end = self.expect(&TokenKind::RParen)?.span;
                Ok(Expression::new(
                    ExprKind::Enabled(Box::new(inner)),
                    span.merge(end),
                ))
            }
            // `@` binds to the primary that follows: `@x + y` is `(@x) + y`.
            TokenKind::At => {
                self.advance();
                let inner = self.parse_primary()?;
                let full = span.merge(inner.span);
                Ok(Expression::new(ExprKind::Input(Box::new(inner)), full))
            }
            // Parentheses are transparent: no node is produced.
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    /// Returns `true` if the current token can start an expression.
    pub(crate) fn starts_expression(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::True
                | TokenKind::False
                | TokenKind::NumberLit(_)
                | TokenKind::Identifier(_)
                | TokenKind::PrimedIdentifier(_)
                | TokenKind::PieceRef(_)
                | TokenKind::Enabled
                | TokenKind::At
                | TokenKind::LParen
                | TokenKind::Bang
                | TokenKind::Plus
                | TokenKind::Minus
        )
    }
}

fn binary(left: Expression, op: BinOp, right: Expression) -> Expression {
    let span = left.span.merge(right.span);
    Expression::new(
        ExprKind::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        span,
    )
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
