//! Dependent semantics: soups that observe another system's steps.
//!
//! A dependent soup runs alongside some base system and reacts to its
//! transitions. Inside a guard or effect, `@e` evaluates `e` against the
//! observed [`Step`] of the base system (so `@x`, `@x'` and `@p:name` read
//! the base's source, target and fired action), while everything outside
//! an `@` reads the dependent soup's own environment as usual.

use soup_types::ast::{Expression, Piece, Reference, Soup};

use crate::env::Environment;
use crate::error::EvalResult;
use crate::expression::{expect_boolean, ExpressionInterpreter};
use crate::semantics::SoupSemantics;
use crate::statement::{execute_with, EffectEvaluator};
use crate::step::{Step, StepInterpreter};
use crate::value::Value;

/// Evaluate an expression against an observed step and an environment.
pub fn evaluate_dependent_expression(
    expr: &Expression,
    input: &Step<'_>,
    environment: &Environment,
) -> EvalResult<Value> {
    DependentInterpreter { input, environment }.evaluate(expr)
}

/// The dependent interpreter: plain references read the dependent soup's
/// own state, `@e` hands `e` to a step interpreter over the observed
/// transition. Primed and piece references are only meaningful under `@`.
pub struct DependentInterpreter<'a> {
    pub input: &'a Step<'a>,
    pub environment: &'a Environment,
}

impl ExpressionInterpreter for DependentInterpreter<'_> {
    fn reference(&self, _expr: &Expression, reference: &Reference) -> EvalResult<Value> {
        self.environment.lookup(&reference.name)
    }

    fn input(&self, _expr: &Expression, inner: &Expression) -> EvalResult<Value> {
        StepInterpreter { step: self.input }.evaluate(inner)
    }
}

/// Statement evaluator carrying the observed step through an effect.
pub struct DependentContext<'a> {
    pub input: &'a Step<'a>,
}

impl EffectEvaluator for DependentContext<'_> {
    fn evaluate(&self, expr: &Expression, environment: &Environment) -> EvalResult<Value> {
        DependentInterpreter {
            input: self.input,
            environment,
        }
        .evaluate(expr)
    }
}

/// The transition relation of a dependent soup. Mirrors [`SoupSemantics`],
/// except that `actions` and `execute` take the observed step of the base
/// system as an extra input.
pub struct SoupDependentSemantics<'a> {
    soup: &'a Soup,
}

impl<'a> SoupDependentSemantics<'a> {
    pub fn new(soup: &'a Soup) -> Self {
        Self { soup }
    }

    /// Initial states do not depend on any input step.
    pub fn initial(&self) -> EvalResult<Vec<Environment>> {
        SoupSemantics::new(self.soup).initial()
    }

    /// The pieces whose guards hold for this input step and environment,
    /// in declaration order.
    pub fn actions(
        &self,
        input: &Step<'_>,
        environment: &Environment,
    ) -> EvalResult<Vec<&'a Piece>> {
        let interpreter = DependentInterpreter { input, environment };
        let mut enabled = Vec::new();
        for piece in &self.soup.pieces {
            let guard = interpreter.evaluate(&piece.guard)?;
            if expect_boolean("Piece guard", guard)? {
                enabled.push(piece);
            }
        }
        Ok(enabled)
    }

    /// Execute a piece, returning the successor states. The source
    /// environment is left untouched.
    pub fn execute(
        &self,
        piece: &Piece,
        input: &Step<'_>,
        environment: &Environment,
    ) -> EvalResult<Vec<Environment>> {
        let mut target = environment.clone();
        self.execute_in_place(piece, input, &mut target)?;
        Ok(vec![target])
    }

    /// Execute a piece's effect directly in `environment`.
    pub fn execute_in_place(
        &self,
        piece: &Piece,
        input: &Step<'_>,
        environment: &mut Environment,
    ) -> EvalResult<()> {
        execute_with(&DependentContext { input }, &piece.effect, environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepAction;
    use soup_parser::{parse_expression, parse_soup};

    // One fired step of the observed system: x goes 0 to 3 via "piece".
    fn base_soup() -> Soup {
        parse_soup("var x = 0; | piece: [x == 0] / x = 3;").unwrap()
    }

    fn base_states(soup: &Soup) -> (Environment, Environment) {
        let semantics = SoupSemantics::new(soup);
        let source = semantics.initial().unwrap().pop().unwrap();
        let piece = soup.piece_named("piece").unwrap();
        let target = semantics.execute(piece, &source).unwrap().pop().unwrap();
        (source, target)
    }

    fn eval(source: &str, input: &Step<'_>, environment: &Environment) -> Value {
        let expr = parse_expression(source).unwrap();
        evaluate_dependent_expression(&expr, input, environment).unwrap()
    }

    #[test]
    fn test_input_expressions_read_the_observed_step() {
        let soup = base_soup();
        let (s, t) = base_states(&soup);
        let step = Step {
            source: &s,
            action: StepAction::Fired(soup.piece_named("piece").unwrap()),
            target: &t,
        };
        let environment = Environment::new();

        assert_eq!(eval("@true", &step, &environment), Value::Boolean(true));
        assert_eq!(eval("@x", &step, &environment), Value::Number(0.0));
        assert_eq!(eval("@x'", &step, &environment), Value::Number(3.0));
        assert_eq!(eval("@p:piece", &step, &environment), Value::Boolean(true));
        assert_eq!(eval("@p:no", &step, &environment), Value::Boolean(false));
        assert_eq!(eval("@(x == 3)", &step, &environment), Value::Boolean(false));
        assert_eq!(eval("@(x == 0)", &step, &environment), Value::Boolean(true));
        assert_eq!(eval("@(x' == 0)", &step, &environment), Value::Boolean(false));
        assert_eq!(eval("@(x' == 3)", &step, &environment), Value::Boolean(true));
    }

    #[test]
    fn test_mixed_expressions_read_both_worlds() {
        let soup = base_soup();
        let (s, t) = base_states(&soup);
        let step = Step {
            source: &s,
            action: StepAction::Fired(soup.piece_named("piece").unwrap()),
            target: &t,
        };
        let mut environment = Environment::new();
        environment.define("x", Value::Number(1.0)).unwrap();

        assert_eq!(eval("@x + x", &step, &environment), Value::Number(1.0));
        assert_eq!(eval("@x' + x", &step, &environment), Value::Number(4.0));
        assert_eq!(
            eval("@p:piece \u{2227} x == 1", &step, &environment),
            Value::Boolean(true)
        );
        assert_eq!(
            eval("(@x') == x + 2", &step, &environment),
            Value::Boolean(true)
        );
    }

    #[test]
    fn test_plain_references_read_the_dependent_state() {
        let soup = base_soup();
        let (s, t) = base_states(&soup);
        let step = Step {
            source: &s,
            action: StepAction::Fired(soup.piece_named("piece").unwrap()),
            target: &t,
        };
        let environment = Environment::new();

        let expr = parse_expression("x").unwrap();
        let err = evaluate_dependent_expression(&expr, &step, &environment).unwrap_err();
        assert_eq!(err.to_string(), "The variable x is not defined.");
    }

    #[test]
    fn test_dependent_soup_end_to_end() {
        let observed = base_soup();
        let (s, t) = base_states(&observed);
        let step = Step {
            source: &s,
            action: StepAction::Fired(observed.piece_named("piece").unwrap()),
            target: &t,
        };

        let soup = parse_soup(
            "var x = 0; | piece: [x == 0 \u{2227} @x' == 3] / x = @x' + 1;",
        )
        .unwrap();
        let semantics = SoupDependentSemantics::new(&soup);

        let environment = semantics.initial().unwrap().pop().unwrap();
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(0.0));

        let actions = semantics.actions(&step, &environment).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].name.as_deref(), Some("piece"));

        let target = semantics
            .execute(actions[0], &step, &environment)
            .unwrap()
            .pop()
            .unwrap();
        assert_eq!(target.lookup("x").unwrap(), Value::Number(4.0));
        // the source environment is untouched
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(0.0));
    }

    #[test]
    fn test_guard_that_rejects_the_step() {
        let observed = base_soup();
        let (s, t) = base_states(&observed);
        let stuck = Step {
            source: &t,
            action: StepAction::Deadlock,
            target: &t,
        };

        let soup = parse_soup("var x = 0; | piece: [@p:piece] / x = 1;").unwrap();
        let semantics = SoupDependentSemantics::new(&soup);
        let environment = semantics.initial().unwrap().pop().unwrap();

        assert!(semantics.actions(&stuck, &environment).unwrap().is_empty());

        let fired = Step {
            source: &s,
            action: StepAction::Fired(observed.piece_named("piece").unwrap()),
            target: &t,
        };
        assert_eq!(semantics.actions(&fired, &environment).unwrap().len(), 1);
    }
}
