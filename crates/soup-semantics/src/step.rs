//! Step-relative expression evaluation.
//!
//! A [`Step`] is one observed transition of a system: the source state,
//! the action taken, the target state. Step expressions can look at both
//! ends at once: a plain reference reads the source, a primed reference
//! (`x'`) reads the target, and `p:name` asks whether the named piece is
//! the one that fired.

use soup_types::ast::{Expression, Piece, Reference};

use crate::env::Environment;
use crate::error::EvalResult;
use crate::expression::ExpressionInterpreter;
use crate::value::Value;

/// Reserved name: in a step expression, the bare reference `deadlock` is
/// true exactly when the step is a deadlock self-loop. It shadows any
/// variable of the same name.
pub const DEADLOCK: &str = "deadlock";

/// What happened on a step.
#[derive(Debug, Clone, Copy)]
pub enum StepAction<'a> {
    /// A piece fired.
    Fired(&'a Piece),
    /// No piece was enabled; the system stutters in place.
    Deadlock,
}

impl StepAction<'_> {
    pub fn is_deadlock(&self) -> bool {
        matches!(self, StepAction::Deadlock)
    }

    /// The fired piece's name, if the action is a named piece.
    pub fn fired_name(&self) -> Option<&str> {
        match self {
            StepAction::Fired(piece) => piece.name.as_deref(),
            StepAction::Deadlock => None,
        }
    }
}

/// One transition: source state, action, target state.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    pub source: &'a Environment,
    pub action: StepAction<'a>,
    pub target: &'a Environment,
}

/// Evaluate an expression against a step.
pub fn evaluate_step_expression(expr: &Expression, step: &Step<'_>) -> EvalResult<Value> {
    StepInterpreter { step }.evaluate(expr)
}

/// The step interpreter: references resolve against the two ends of the
/// transition. `@` stays unsupported; it belongs to dependent evaluation.
pub struct StepInterpreter<'a> {
    pub step: &'a Step<'a>,
}

impl ExpressionInterpreter for StepInterpreter<'_> {
    fn reference(&self, _expr: &Expression, reference: &Reference) -> EvalResult<Value> {
        if reference.name == DEADLOCK {
            return Ok(Value::Boolean(self.step.action.is_deadlock()));
        }
        self.step.source.lookup(&reference.name)
    }

    fn primed_reference(&self, _expr: &Expression, reference: &Reference) -> EvalResult<Value> {
        self.step.target.lookup(&reference.name)
    }

    fn named_piece_reference(&self, _expr: &Expression, reference: &Reference) -> EvalResult<Value> {
        Ok(Value::Boolean(
            self.step.action.fired_name() == Some(reference.name.as_str()),
        ))
    }

    fn enabled(&self, _expr: &Expression, inner: &Expression) -> EvalResult<Value> {
        self.evaluate(inner)
    }
}
