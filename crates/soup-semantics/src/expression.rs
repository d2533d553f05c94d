//! Expression evaluation.
//!
//! [`ExpressionInterpreter`] owns the single exhaustive dispatch over
//! [`ExprKind`] and all operator semantics; implementations choose what a
//! name means by overriding the hook methods. The base implementation,
//! [`EnvironmentInterpreter`], reads plain references from an
//! [`Environment`] and supports nothing step-relative: primed references,
//! named-piece references, `enabled` and `@` are step or dependent
//! constructs and report themselves unsupported here.
//!
//! Operator semantics:
//! - numeric operators (`+ - * / %`, orderings, unary `+ -`) require
//!   numbers, boolean operators (`&& ||`, unary `!`) require booleans;
//!   operands are checked one by one, left before right, so the first
//!   offender is the one reported;
//! - `&&` and `||` evaluate both operands (no short-circuit — a type error
//!   on the right is an error even when the left decides);
//! - `==` and `!=` are untyped structural comparison;
//! - `/` checks both operand types first, then rejects a zero divisor;
//!   `%` follows IEEE 754 (`x % 0` is NaN);
//! - `c ? a : b` requires a boolean condition and evaluates exactly one
//!   branch.

use soup_types::ast::{BinOp, ExprKind, Expression, Reference, UnaryOp};

use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::value::Value;

/// Evaluate an expression against an environment.
pub fn evaluate_expression(expr: &Expression, environment: &Environment) -> EvalResult<Value> {
    EnvironmentInterpreter { environment }.evaluate(expr)
}

/// Reject a non-boolean where `operator` needs one.
pub(crate) fn expect_boolean(operator: &str, value: Value) -> EvalResult<bool> {
    value
        .as_boolean()
        .ok_or_else(|| EvalError::TypeMismatch {
            operator: operator.to_string(),
            expected: "boolean",
            value: value.to_string(),
        })
}

/// Reject a non-number where `operator` needs one.
pub(crate) fn expect_number(operator: &str, value: Value) -> EvalResult<f64> {
    value
        .as_number()
        .ok_or_else(|| EvalError::TypeMismatch {
            operator: operator.to_string(),
            expected: "number",
            value: value.to_string(),
        })
}

/// Evaluation strategy over the closed expression grammar.
///
/// The provided [`evaluate`](Self::evaluate) handles literals, operators
/// and the conditional once and for all; the hooks decide how the five
/// context-sensitive node kinds resolve. Every hook defaults to an
/// [`EvalError::UnsupportedNode`] so an interpreter only accepts what its
/// context can give meaning to.
pub trait ExpressionInterpreter {
    /// Evaluate one expression tree.
    fn evaluate(&self, expr: &Expression) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::BooleanLiteral(b) => Ok(Value::Boolean(*b)),
            ExprKind::NumberLiteral(n) => Ok(Value::Number(*n)),
            ExprKind::Reference(reference) => self.reference(expr, reference),
            ExprKind::PrimedReference(reference) => self.primed_reference(expr, reference),
            ExprKind::NamedPieceReference(reference) => {
                self.named_piece_reference(expr, reference)
            }
            ExprKind::Enabled(inner) => self.enabled(expr, inner),
            ExprKind::Input(inner) => self.input(expr, inner),
            ExprKind::Unary { op, operand } => {
                let value = self.evaluate(operand)?;
                let operator = format!("Unary {}", op.as_str());
                match op {
                    UnaryOp::Not => Ok(Value::Boolean(!expect_boolean(&operator, value)?)),
                    UnaryOp::Minus => Ok(Value::Number(-expect_number(&operator, value)?)),
                    UnaryOp::Plus => Ok(Value::Number(expect_number(&operator, value)?)),
                }
            }
            ExprKind::Binary { left, op, right } => self.binary(left, *op, right),
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => match self.evaluate(condition)? {
                Value::Boolean(true) => self.evaluate(then_expr),
                Value::Boolean(false) => self.evaluate(else_expr),
                other => Err(EvalError::TypeMismatch {
                    operator: "The conditional expressions ?:".to_string(),
                    expected: "boolean condition",
                    value: other.to_string(),
                }),
            },
        }
    }

    /// Binary operator semantics, shared by every interpreter.
    fn binary(&self, left: &Expression, op: BinOp, right: &Expression) -> EvalResult<Value> {
        match op {
            BinOp::Eq => Ok(Value::Boolean(self.evaluate(left)? == self.evaluate(right)?)),
            BinOp::NotEq => Ok(Value::Boolean(self.evaluate(left)? != self.evaluate(right)?)),
            BinOp::And | BinOp::Or => {
                let l = expect_boolean(op.as_str(), self.evaluate(left)?)?;
                let r = expect_boolean(op.as_str(), self.evaluate(right)?)?;
                Ok(Value::Boolean(match op {
                    BinOp::And => l && r,
                    _ => l || r,
                }))
            }
            _ => {
                let l = expect_number(op.as_str(), self.evaluate(left)?)?;
                let r = expect_number(op.as_str(), self.evaluate(right)?)?;
                match op {
                    BinOp::Mul => Ok(Value::Number(l * r)),
                    BinOp::Div => {
                        if r == 0.0 {
                            Err(EvalError::DivisionByZero)
                        } else {
                            Ok(Value::Number(l / r))
                        }
                    }
                    BinOp::Mod => Ok(Value::Number(l % r)),
                    BinOp::Add => Ok(Value::Number(l + r)),
                    BinOp::Sub => Ok(Value::Number(l - r)),
                    BinOp::Less => Ok(Value::Boolean(l < r)),
                    BinOp::LessEq => Ok(Value::Boolean(l <= r)),
                    BinOp::Greater => Ok(Value::Boolean(l > r)),
                    BinOp::GreaterEq => Ok(Value::Boolean(l >= r)),
                    BinOp::Eq | BinOp::NotEq | BinOp::And | BinOp::Or => unreachable!(),
                }
            }
        }
    }

    // ── Context hooks ─────────────────────────────────────────────

    fn reference(&self, expr: &Expression, reference: &Reference) -> EvalResult<Value> {
        let _ = reference;
        Err(EvalError::UnsupportedNode(expr.kind_name()))
    }

    fn primed_reference(&self, expr: &Expression, reference: &Reference) -> EvalResult<Value> {
        let _ = reference;
        Err(EvalError::UnsupportedNode(expr.kind_name()))
    }

    fn named_piece_reference(&self, expr: &Expression, reference: &Reference) -> EvalResult<Value> {
        let _ = reference;
        Err(EvalError::UnsupportedNode(expr.kind_name()))
    }

    fn enabled(&self, expr: &Expression, inner: &Expression) -> EvalResult<Value> {
        let _ = inner;
        Err(EvalError::UnsupportedNode(expr.kind_name()))
    }

    fn input(&self, expr: &Expression, inner: &Expression) -> EvalResult<Value> {
        let _ = inner;
        Err(EvalError::UnsupportedNode(expr.kind_name()))
    }
}

/// The base interpreter: plain references read the environment, nothing
/// step-relative is allowed.
pub struct EnvironmentInterpreter<'a> {
    pub environment: &'a Environment,
}

impl ExpressionInterpreter for EnvironmentInterpreter<'_> {
    fn reference(&self, _expr: &Expression, reference: &Reference) -> EvalResult<Value> {
        self.environment.lookup(&reference.name)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
