//! Soup program parsing: the variable section and the piece pool.
//!
//! Grammar:
//! ```text
//! Soup      = [ Variables ] [ "|" ] [ Piece { [ ";" ] "|" Piece } [ ";" ] ]
//! Variables = "var" Assign { (";" | ",") Assign }
//! Piece     = [ name ":" ] [ "[" Expr "]" ] [ "/" Statement ]
//! ```
//!
//! The variable section ends where the assign pattern (`name =`) stops,
//! so the first piece may follow a declaration with no separator at all.
//! An omitted guard is `true`; an omitted effect is `skip`. A piece must
//! have at least one of name, guard or effect.

use soup_lexer::token::TokenKind;
use soup_types::ast::*;

use crate::error::ParseError;
use crate::parser::Parser;

impl Parser {
    /// Parse a complete Soup program.
    pub fn parse_soup(&mut self) -> Result<Soup, ParseError> {
        let start = self.current_span();

        let mut variables = Vec::new();
        while self.check(&TokenKind::Var) {
            self.advance();
            loop {
                variables.push(self.parse_variable_declaration()?);
                if !self.eat(&TokenKind::Semicolon) {
                    self.eat(&TokenKind::Comma);
                }
                // the section continues only while the assign pattern holds
                let continues = matches!(self.peek_kind(), TokenKind::Identifier(_))
                    && self.look_ahead(1) == &TokenKind::Eq;
                if !continues {
                    break;
                }
            }
        }

        self.eat(&TokenKind::Pipe); // optional leading separator

        let mut pieces = Vec::new();
        if !self.at_end() {
            loop {
                pieces.push(self.parse_piece()?);
                self.eat(&TokenKind::Semicolon); // tolerated trailing separator
                if !self.eat(&TokenKind::Pipe) {
                    break;
                }
            }
        }

        let span = start.merge(self.previous_span());
        Ok(Soup {
            variables,
            pieces,
            span,
        })
    }

    /// `name "=" Expr`
    fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, ParseError> {
        let (name, name_span) = self.expect_identifier()?;
        self.expect(&TokenKind::Eq)?;
        let initializer = self.parse_expression()?;
        let span = name_span.merge(initializer.span);
        Ok(VariableDeclaration {
            name,
            initializer,
            span,
        })
    }

    /// Parse one piece: `[ name ":" ] [ "[" Expr "]" ] [ "/" Statement ]`.
    pub fn parse_piece(&mut self) -> Result<Piece, ParseError> {
        let start = self.current_span();

        let name = if matches!(self.peek_kind(), TokenKind::Identifier(_))
            && self.look_ahead(1) == &TokenKind::Colon
        {
            let (name, _) = self.expect_identifier()?;
            self.advance(); // ':'
            Some(name)
        } else {
            None
        };

        let guard = if self.eat(&TokenKind::LBracket) {
            let guard = self.parse_expression()?;
            self.expect(&TokenKind::RBracket)?;
            Some(guard)
        } else {
            None
        };

        let effect = if self.eat(&TokenKind::Slash) {
            Some(self.parse_statement()?)
        } else {
            None
        };

        if name.is_none() && guard.is_none() && effect.is_none() {
            return Err(self.unexpected("a piece"));
        }

        let span = start.merge(self.previous_span());
        Ok(Piece {
            name,
            guard: guard
                .unwrap_or_else(|| Expression::new(ExprKind::BooleanLiteral(true), span)),
            effect: effect.unwrap_or_else(|| Statement::skip(span)),
            span,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
