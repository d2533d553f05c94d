//! Statement execution.
//!
//! Statements mutate an [`Environment`] in place. Execution is generic
//! over an [`EffectEvaluator`] so the same walk serves both plain effects
//! (expressions read the environment being mutated) and dependent effects
//! (expressions may also observe another system's step through `@`).

use soup_types::ast::{ExprKind, Expression, Statement, StmtKind};

use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::expression::{evaluate_expression, expect_boolean};
use crate::value::Value;

/// How the expressions inside a statement are evaluated.
///
/// The environment is passed per call rather than captured: during
/// execution it is mutably borrowed between evaluations.
pub trait EffectEvaluator {
    fn evaluate(&self, expr: &Expression, environment: &Environment) -> EvalResult<Value>;
}

/// The plain evaluator: effect expressions only see the environment.
pub struct BaseContext;

impl EffectEvaluator for BaseContext {
    fn evaluate(&self, expr: &Expression, environment: &Environment) -> EvalResult<Value> {
        evaluate_expression(expr, environment)
    }
}

/// Execute a statement against an environment, in place.
pub fn execute_statement(stmt: &Statement, environment: &mut Environment) -> EvalResult<()> {
    execute_with(&BaseContext, stmt, environment)
}

/// Execute a statement, evaluating its expressions with `evaluator`.
///
/// Assignment requires a plain variable reference on the left and can only
/// overwrite an existing binding. `if` requires a boolean condition and
/// runs exactly one branch (an absent `else` is a skip).
pub fn execute_with<E: EffectEvaluator>(
    evaluator: &E,
    stmt: &Statement,
    environment: &mut Environment,
) -> EvalResult<()> {
    match &stmt.kind {
        StmtKind::Skip => Ok(()),
        StmtKind::Assignment { target, value } => {
            let ExprKind::Reference(reference) = &target.kind else {
                return Err(EvalError::InvalidAssignmentTarget(target.to_string()));
            };
            let value = evaluator.evaluate(value, environment)?;
            environment.update(&reference.name, value)
        }
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            let condition = evaluator.evaluate(condition, environment)?;
            if expect_boolean("If condition", condition)? {
                execute_with(evaluator, then_branch, environment)
            } else {
                execute_with(evaluator, else_branch, environment)
            }
        }
        StmtKind::Sequence { first, second } => {
            execute_with(evaluator, first, environment)?;
            execute_with(evaluator, second, environment)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soup_parser::parse_statement;

    fn env(pairs: &[(&str, Value)]) -> Environment {
        let mut environment = Environment::new();
        for (name, value) in pairs {
            environment.define(name, *value).unwrap();
        }
        environment
    }

    fn run(source: &str, environment: &mut Environment) {
        let stmt = parse_statement(source).unwrap();
        execute_statement(&stmt, environment).unwrap();
    }

    fn run_err(source: &str, environment: &mut Environment) -> String {
        let stmt = parse_statement(source).unwrap();
        execute_statement(&stmt, environment)
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn test_assignment() {
        let mut environment = env(&[("x", Value::Number(0.0))]);
        run("x = 23", &mut environment);
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(23.0));
    }

    #[test]
    fn test_assignment_reads_current_state() {
        let mut environment = env(&[("x", Value::Number(23.0))]);
        run("x = x + 1", &mut environment);
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(24.0));
    }

    #[test]
    fn test_assignment_cannot_create() {
        let mut environment = Environment::new();
        assert_eq!(
            run_err("x = 23", &mut environment),
            "The variable x is not defined."
        );
    }

    #[test]
    fn test_assignment_target_must_be_a_reference() {
        let mut environment = env(&[("x", Value::Number(0.0))]);
        assert_eq!(
            run_err("x' = 23", &mut environment),
            "Assignment target expects a variable reference, got 'x''."
        );
    }

    #[test]
    fn test_if_takes_then_branch() {
        let mut environment = env(&[("x", Value::Number(0.0))]);
        run("if true then x = 23 else x = 42", &mut environment);
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(23.0));
    }

    #[test]
    fn test_if_takes_else_branch() {
        let mut environment = env(&[("x", Value::Number(0.0))]);
        run("if false then x = 23 else x = 42", &mut environment);
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(42.0));
    }

    #[test]
    fn test_if_without_else_skips() {
        let mut environment = env(&[("x", Value::Number(7.0))]);
        run("if false then x = 23", &mut environment);
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(7.0));
    }

    #[test]
    fn test_nested_if() {
        let mut environment = env(&[("x", Value::Number(0.0))]);
        run(
            "if true then if false then x = 1 else x = 2 else x = 3",
            &mut environment,
        );
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(2.0));
    }

    #[test]
    fn test_if_condition_must_be_boolean() {
        let mut environment = env(&[("x", Value::Number(0.0))]);
        assert_eq!(
            run_err("if 23 then x = 1", &mut environment),
            "If condition expects a boolean, got '23'."
        );
    }

    #[test]
    fn test_sequence() {
        let mut environment = env(&[("x", Value::Number(0.0)), ("y", Value::Number(0.0))]);
        run("x = 23; y = x + 19", &mut environment);
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(23.0));
        assert_eq!(environment.lookup("y").unwrap(), Value::Number(42.0));
    }

    #[test]
    fn test_three_statement_sequence() {
        let mut environment = env(&[("x", Value::Number(0.0))]);
        run("x = 1; x = x + 1; x = x * 10", &mut environment);
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(20.0));
    }

    #[test]
    fn test_sequence_stops_on_error() {
        let mut environment = env(&[("x", Value::Number(0.0))]);
        assert_eq!(
            run_err("x = 1; y = 2", &mut environment),
            "The variable y is not defined."
        );
        // the first assignment already happened
        assert_eq!(environment.lookup("x").unwrap(), Value::Number(1.0));
    }
}
