//! Executable semantics for Soup programs.
//!
//! The Soup language describes a state space as a set of variables plus a
//! pool of guarded atomic actions (pieces). This crate gives that syntax
//! its meaning:
//!
//! - [`Value`] and [`Environment`] — the runtime state,
//! - [`evaluate_expression`] — pure expression evaluation against an
//!   environment,
//! - [`execute_statement`] — in-place statement execution,
//! - [`SoupSemantics`] — the `initial` / `actions` / `execute` transition
//!   relation,
//! - [`Step`] and [`evaluate_step_expression`] — step-relative evaluation
//!   over a (source, action, target) transition,
//! - [`SoupDependentSemantics`] — soups whose guards and effects observe
//!   another system's step through `@` expressions.

mod dependent;
mod env;
mod error;
mod expression;
mod semantics;
mod statement;
mod step;
mod value;

pub use dependent::{
    evaluate_dependent_expression, DependentContext, DependentInterpreter, SoupDependentSemantics,
};
pub use env::Environment;
pub use error::{EvalError, EvalResult, SoupError};
pub use expression::{evaluate_expression, EnvironmentInterpreter, ExpressionInterpreter};
pub use semantics::SoupSemantics;
pub use statement::{execute_statement, execute_with, BaseContext, EffectEvaluator};
pub use step::{evaluate_step_expression, Step, StepAction, StepInterpreter, DEADLOCK};
pub use value::Value;

/// Parse and evaluate an expression string against an environment.
pub fn evaluate_string(source: &str, environment: &Environment) -> Result<Value, SoupError> {
    let expr = soup_parser::parse_expression(source)?;
    Ok(evaluate_expression(&expr, environment)?)
}

/// Parse and evaluate an expression string against a step.
pub fn evaluate_step_string(source: &str, step: &Step<'_>) -> Result<Value, SoupError> {
    let expr = soup_parser::parse_expression(source)?;
    Ok(evaluate_step_expression(&expr, step)?)
}
