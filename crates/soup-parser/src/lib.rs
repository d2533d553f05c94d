//! Soup parser: converts a token stream into a syntax tree.

mod error;
mod parse_expr;
mod parse_soup;
mod parse_stmt;
mod parser;

pub use error::ParseError;
pub use parser::Parser;

use soup_types::ast::{Expression, Piece, Soup, Statement};

/// Parse a standalone expression.
pub fn parse_expression(source: &str) -> Result<Expression, ParseError> {
    let tokens = soup_lexer::tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expression()?;
    parser.expect_eof()?;
    Ok(expr)
}

/// Parse a standalone statement.
pub fn parse_statement(source: &str) -> Result<Statement, ParseError> {
    let tokens = soup_lexer::tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let stmt = parser.parse_statement()?;
    parser.expect_eof()?;
    Ok(stmt)
}

/// Parse a standalone piece.
pub fn parse_piece(source: &str) -> Result<Piece, ParseError> {
    let tokens = soup_lexer::tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let piece = parser.parse_piece()?;
    parser.expect_eof()?;
    Ok(piece)
}

/// Parse a complete Soup program.
pub fn parse_soup(source: &str) -> Result<Soup, ParseError> {
    let tokens = soup_lexer::tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let soup = parser.parse_soup()?;
    parser.expect_eof()?;
    Ok(soup)
}
