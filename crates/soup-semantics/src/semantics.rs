//! The transition relation of a Soup program.

use soup_types::ast::{Piece, Soup};

use crate::env::Environment;
use crate::error::EvalResult;
use crate::expression::{evaluate_expression, expect_boolean};
use crate::statement::execute_statement;

/// The `initial` / `actions` / `execute` semantics of a soup.
///
/// A soup is deterministic per piece but nondeterministic overall: every
/// piece whose guard holds in a state is an enabled action, and executing
/// one yields the successor state. `initial` and `execute` return vectors
/// so drivers handle one uniform shape; today each holds exactly one
/// environment.
pub struct SoupSemantics<'a> {
    soup: &'a Soup,
}

impl<'a> SoupSemantics<'a> {
    pub fn new(soup: &'a Soup) -> Self {
        Self { soup }
    }

    /// The initial states: variables bound in declaration order, each
    /// initializer evaluated against the bindings made so far.
    pub fn initial(&self) -> EvalResult<Vec<Environment>> {
        let mut environment = Environment::new();
        for variable in &self.soup.variables {
            let value = evaluate_expression(&variable.initializer, &environment)?;
            environment.define(&variable.name, value)?;
        }
        Ok(vec![environment])
    }

    /// The pieces enabled in `environment`, in declaration order. A guard
    /// that evaluates to a non-boolean is an error, not a disabled piece.
    pub fn actions(&self, environment: &Environment) -> EvalResult<Vec<&'a Piece>> {
        let mut enabled = Vec::new();
        for piece in &self.soup.pieces {
            let guard = evaluate_expression(&piece.guard, environment)?;
            if expect_boolean("Piece guard", guard)? {
                enabled.push(piece);
            }
        }
        Ok(enabled)
    }

    /// Execute a piece from `environment`, returning the successor states.
    /// The source environment is left untouched.
    pub fn execute(&self, piece: &Piece, environment: &Environment) -> EvalResult<Vec<Environment>> {
        let mut target = environment.clone();
        self.execute_in_place(piece, &mut target)?;
        Ok(vec![target])
    }

    /// Execute a piece's effect directly in `environment`.
    pub fn execute_in_place(&self, piece: &Piece, environment: &mut Environment) -> EvalResult<()> {
        execute_statement(&piece.effect, environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use soup_parser::parse_soup;

    fn single(mut states: Vec<Environment>) -> Environment {
        assert_eq!(states.len(), 1);
        states.pop().unwrap()
    }

    #[test]
    fn test_initial() {
        let soup = parse_soup("var x = 23; y = true").unwrap();
        let environment = single(SoupSemantics::new(&soup).initial().unwrap());
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(23.0));
        assert_eq!(environment.lookup("y").unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_initial_is_deterministic() {
        let soup = parse_soup("var x = 23; y = true").unwrap();
        let semantics = SoupSemantics::new(&soup);
        let a = single(semantics.initial().unwrap());
        let b = single(semantics.initial().unwrap());
        assert_eq!(a, b);
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_initial_with_expressions() {
        let soup = parse_soup("var x = 23 + 42; y = x - 23; z = y == 23").unwrap();
        let environment = single(SoupSemantics::new(&soup).initial().unwrap());
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(65.0));
        assert_eq!(environment.lookup("y").unwrap(), Value::Number(42.0));
        assert_eq!(environment.lookup("z").unwrap(), Value::Boolean(false));
    }

    #[test]
    fn test_initializer_only_sees_earlier_variables() {
        let soup = parse_soup("var x = y; y = 1").unwrap();
        let err = SoupSemantics::new(&soup).initial().unwrap_err();
        assert_eq!(err.to_string(), "The variable y is not defined.");
    }

    #[test]
    fn test_actions_in_declaration_order() {
        let soup = parse_soup(
            "var x = 0; | up: [x < 2] / x = x + 1 | down: [x > 0] / x = x - 1",
        )
        .unwrap();
        let semantics = SoupSemantics::new(&soup);
        let environment = single(semantics.initial().unwrap());

        let actions = semantics.actions(&environment).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].name.as_deref(), Some("up"));

        let mid = single(semantics.execute(actions[0], &environment).unwrap());
        let actions = semantics.actions(&mid).unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].name.as_deref(), Some("up"));
        assert_eq!(actions[1].name.as_deref(), Some("down"));
    }

    #[test]
    fn test_no_actions_when_no_guard_holds() {
        let soup = parse_soup("var x = 5; | [x < 2] / x = x + 1").unwrap();
        let semantics = SoupSemantics::new(&soup);
        let environment = single(semantics.initial().unwrap());
        assert!(semantics.actions(&environment).unwrap().is_empty());
    }

    #[test]
    fn test_guard_must_be_boolean() {
        let soup = parse_soup("var x = 0; | [23] / x = 1").unwrap();
        let semantics = SoupSemantics::new(&soup);
        let environment = single(semantics.initial().unwrap());
        let err = semantics.actions(&environment).unwrap_err();
        assert_eq!(err.to_string(), "Piece guard expects a boolean, got '23'.");
    }

    #[test]
    fn test_execute_leaves_source_untouched() {
        let soup = parse_soup("var x = 23; | inc: [true] / x = x + 1").unwrap();
        let semantics = SoupSemantics::new(&soup);
        let environment = single(semantics.initial().unwrap());

        let piece = soup.piece_named("inc").unwrap();
        let target = single(semantics.execute(piece, &environment).unwrap());
        assert_eq!(target.lookup("x").unwrap(), Value::Number(24.0));
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(23.0));
    }

    #[test]
    fn test_execute_in_place_mutates() {
        let soup = parse_soup("var x = 23; | inc: [true] / x = x + 1").unwrap();
        let semantics = SoupSemantics::new(&soup);
        let mut environment = single(semantics.initial().unwrap());

        let piece = soup.piece_named("inc").unwrap();
        semantics.execute_in_place(piece, &mut environment).unwrap();
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(24.0));
    }

    #[test]
    fn test_default_guard_and_effect() {
        let soup = parse_soup("var x = 0; | noop: | / x = 9").unwrap();
        let semantics = SoupSemantics::new(&soup);
        let environment = single(semantics.initial().unwrap());

        // bare name: guard defaults to true, effect to skip
        let actions = semantics.actions(&environment).unwrap();
        assert_eq!(actions.len(), 2);
        let noop = soup.piece_named("noop").unwrap();
        let target = single(semantics.execute(noop, &environment).unwrap());
        assert_eq!(target, environment);
    }
}
