//! Syntax model for the Soup language.
//!
//! Every node carries a [`Span`] for error reporting. Recursive positions
//! are boxed to keep enum sizes reasonable. The node set is closed: the
//! interpreters dispatch over these enums with exhaustive matches.
//!
//! Structural equality ([`Expression::structural_eq`] and friends) ignores
//! spans and compares children recursively; it exists for tests only and
//! plays no role in runtime semantics.

use crate::Span;
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression node.
#[derive(Debug, Clone)]
pub struct Expression {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The node-kind name used in "unsupported node" error messages.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ExprKind::BooleanLiteral(_) => "BooleanLiteral",
            ExprKind::NumberLiteral(_) => "NumberLiteral",
            ExprKind::Reference(_) => "Reference",
            ExprKind::PrimedReference(_) => "PrimedReference",
            ExprKind::NamedPieceReference(_) => "NamedPieceReference",
            ExprKind::Enabled(_) => "EnabledExpression",
            ExprKind::Input(_) => "InputReference",
            ExprKind::Unary { .. } => "UnaryExpression",
            ExprKind::Binary { .. } => "BinaryExpression",
            ExprKind::Conditional { .. } => "ConditionalExpression",
        }
    }

    /// Structural equality: spans are ignored, children compare recursively,
    /// resolved declaration indices must match.
    pub fn structural_eq(&self, other: &Expression) -> bool {
        match (&self.kind, &other.kind) {
            (ExprKind::BooleanLiteral(a), ExprKind::BooleanLiteral(b)) => a == b,
            (ExprKind::NumberLiteral(a), ExprKind::NumberLiteral(b)) => a == b,
            (ExprKind::Reference(a), ExprKind::Reference(b))
            | (ExprKind::PrimedReference(a), ExprKind::PrimedReference(b))
            | (ExprKind::NamedPieceReference(a), ExprKind::NamedPieceReference(b)) => {
                a.name == b.name && a.declaration == b.declaration
            }
            (ExprKind::Enabled(a), ExprKind::Enabled(b))
            | (ExprKind::Input(a), ExprKind::Input(b)) => a.structural_eq(b),
            (
                ExprKind::Unary { op: ao, operand: ae },
                ExprKind::Unary { op: bo, operand: be },
            ) => ao == bo && ae.structural_eq(be),
            (
                ExprKind::Binary {
                    left: al,
                    op: ao,
                    right: ar,
                },
                ExprKind::Binary {
                    left: bl,
                    op: bo,
                    right: br,
                },
            ) => ao == bo && al.structural_eq(bl) && ar.structural_eq(br),
            (
                ExprKind::Conditional {
                    condition: ac,
                    then_expr: at,
                    else_expr: ae,
                },
                ExprKind::Conditional {
                    condition: bc,
                    then_expr: bt,
                    else_expr: be,
                },
            ) => ac.structural_eq(bc) && at.structural_eq(bt) && ae.structural_eq(be),
            _ => false,
        }
    }
}

/// The kind of expression.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// `true` / `false`
    BooleanLiteral(bool),
    /// `23`, `23.4` — both carried as `f64`; source text with a decimal
    /// point parses as floating, otherwise as integer.
    NumberLiteral(f64),
    /// `x` — a plain variable reference (pre-state in step evaluation).
    Reference(Reference),
    /// `x'` — the variable's post-state value; step evaluation only.
    PrimedReference(Reference),
    /// `p:name` — "the fired piece is named `name`"; step evaluation only.
    NamedPieceReference(Reference),
    /// `enabled(expr)` — transparent wrapper, step evaluation only.
    Enabled(Box<Expression>),
    /// `@expr` — evaluated against the externally supplied input instead of
    /// the base environment; dependent evaluation only.
    Input(Box<Expression>),
    /// `!x`, `-x`, `+x`
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    /// `a + b`, `a && b`, `a < b`, ...
    Binary {
        left: Box<Expression>,
        op: BinOp,
        right: Box<Expression>,
    },
    /// `c ? a : b`
    Conditional {
        condition: Box<Expression>,
        then_expr: Box<Expression>,
        else_expr: Box<Expression>,
    },
}

/// A name occurrence. `declaration` is `None` until the linker resolves it
/// to the index of the declaring entity — into [`Soup::variables`] for
/// plain and primed references, into [`Soup::pieces`] for named-piece
/// references. Attaching that index is the only mutation the tree ever sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub declaration: Option<usize>,
}

impl Reference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaration: None,
        }
    }
}

// ── Operators ─────────────────────────────────────────────────────────────────

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!x`
    Not,
    /// `+x`
    Plus,
    /// `-x`
    Minus,
}

impl UnaryOp {
    /// Returns the operator symbol for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

/// Binary operators (in precedence order, highest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Multiplicative
    Mul,
    Div,
    Mod,
    // Additive
    Add,
    Sub,
    // Comparison
    Less,
    LessEq,
    Greater,
    GreaterEq,
    // Equality
    Eq,
    NotEq,
    // Logical
    And,
    Or,
}

impl BinOp {
    /// Returns the operator symbol for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Less => "<",
            BinOp::LessEq => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEq => ">=",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// A statement node.
#[derive(Debug, Clone)]
pub struct Statement {
    pub kind: StmtKind,
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// A `skip` statement at the given position (used for defaulted
    /// effects and absent `else` branches).
    pub fn skip(span: Span) -> Self {
        Self::new(StmtKind::Skip, span)
    }

    /// Structural equality, ignoring spans.
    pub fn structural_eq(&self, other: &Statement) -> bool {
        match (&self.kind, &other.kind) {
            (StmtKind::Skip, StmtKind::Skip) => true,
            (
                StmtKind::Assignment {
                    target: at,
                    value: av,
                },
                StmtKind::Assignment {
                    target: bt,
                    value: bv,
                },
            ) => at.structural_eq(bt) && av.structural_eq(bv),
            (
                StmtKind::If {
                    condition: ac,
                    then_branch: at,
                    else_branch: ae,
                },
                StmtKind::If {
                    condition: bc,
                    then_branch: bt,
                    else_branch: be,
                },
            ) => ac.structural_eq(bc) && at.structural_eq(bt) && ae.structural_eq(be),
            (
                StmtKind::Sequence {
                    first: af,
                    second: as_,
                },
                StmtKind::Sequence {
                    first: bf,
                    second: bs,
                },
            ) => af.structural_eq(bf) && as_.structural_eq(bs),
            _ => false,
        }
    }
}

/// The kind of statement.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// No-op.
    Skip,
    /// `x = expr` — the target must be a [`ExprKind::Reference`]; the
    /// statement interpreter rejects anything else at execution time.
    Assignment {
        target: Box<Expression>,
        value: Box<Expression>,
    },
    /// `if cond then S [else S]` — an absent else is a [`StmtKind::Skip`].
    If {
        condition: Box<Expression>,
        then_branch: Box<Statement>,
        else_branch: Box<Statement>,
    },
    /// `S ; S` — executes left to right, threading the environment.
    Sequence {
        first: Box<Statement>,
        second: Box<Statement>,
    },
}

// ══════════════════════════════════════════════════════════════════════════════
// Pieces & Soup
// ══════════════════════════════════════════════════════════════════════════════

/// An atomic guarded action: `[name:] [ [guard] ] [/ effect]`.
///
/// `name` is `None` for anonymous pieces. An omitted guard is the literal
/// `true`; an omitted effect is `skip` (the parser materializes both).
#[derive(Debug, Clone)]
pub struct Piece {
    pub name: Option<String>,
    pub guard: Expression,
    pub effect: Statement,
    pub span: Span,
}

impl Piece {
    /// Structural equality, ignoring spans.
    pub fn structural_eq(&self, other: &Piece) -> bool {
        self.name == other.name
            && self.guard.structural_eq(&other.guard)
            && self.effect.structural_eq(&other.effect)
    }
}

/// `var name = expr` — a variable declaration with its initializer.
#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    pub name: String,
    pub initializer: Expression,
    pub span: Span,
}

impl VariableDeclaration {
    /// Structural equality, ignoring spans.
    pub fn structural_eq(&self, other: &VariableDeclaration) -> bool {
        self.name == other.name && self.initializer.structural_eq(&other.initializer)
    }
}

/// A complete Soup program: declared variables plus the piece pool.
/// Both sequences preserve source order; `actions` enumerates pieces in
/// declaration order.
#[derive(Debug, Clone)]
pub struct Soup {
    pub variables: Vec<VariableDeclaration>,
    pub pieces: Vec<Piece>,
    pub span: Span,
}

impl Soup {
    /// Structural equality, ignoring spans.
    pub fn structural_eq(&self, other: &Soup) -> bool {
        self.variables.len() == other.variables.len()
            && self.pieces.len() == other.pieces.len()
            && self
                .variables
                .iter()
                .zip(&other.variables)
                .all(|(a, b)| a.structural_eq(b))
            && self
                .pieces
                .iter()
                .zip(&other.pieces)
                .all(|(a, b)| a.structural_eq(b))
    }

    /// Find a piece by name (named pieces only).
    pub fn piece_named(&self, name: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.name.as_deref() == Some(name))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Pretty-printing
// ══════════════════════════════════════════════════════════════════════════════

impl fmt::Display for Expression {
    /// Source-like rendering, used by error messages that must name an
    /// offending node. Composite operands are parenthesized rather than
    /// reconstructing precedence.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::BooleanLiteral(b) => write!(f, "{b}"),
            ExprKind::NumberLiteral(n) => write!(f, "{n}"),
            ExprKind::Reference(r) => write!(f, "{}", r.name),
            ExprKind::PrimedReference(r) => write!(f, "{}'", r.name),
            ExprKind::NamedPieceReference(r) => write!(f, "p:{}", r.name),
            ExprKind::Enabled(inner) => write!(f, "enabled({inner})"),
            ExprKind::Input(inner) => write!(f, "@{}", Operand(inner)),
            ExprKind::Unary { op, operand } => write!(f, "{}{}", op.as_str(), Operand(operand)),
            ExprKind::Binary { left, op, right } => {
                write!(f, "{} {} {}", Operand(left), op.as_str(), Operand(right))
            }
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => write!(
                f,
                "{} ? {} : {}",
                Operand(condition),
                Operand(then_expr),
                Operand(else_expr)
            ),
        }
    }
}

/// Wraps composite sub-expressions in parentheses when rendered as operands.
struct Operand<'a>(&'a Expression);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            ExprKind::Binary { .. } | ExprKind::Conditional { .. } => write!(f, "({})", self.0),
            _ => write!(f, "{}", self.0),
        }
    }
}
