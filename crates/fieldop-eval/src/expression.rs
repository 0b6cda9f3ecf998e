//! The compiled, runtime-invocable unit produced by a builder.
//!
//! An expression closes over its target field path and the validated
//! parameter set captured at build time: by value for literals, by path
//! for references. It holds no reference to the original definition and no
//! mutable state, so one expression can be invoked concurrently against
//! independent events.

use crate::builders::{ArrayOp, CheckOp, IntOp, IpOp, JsonOp, RegexOp, StringOp};
use crate::error::RuntimeError;
use crate::event::Event;

/// Whether an expression filters events or mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionKind {
    /// Mutates or augments the event; can fail per event.
    Transform,
    /// Tests the event; `false` drops it from further processing.
    Predicate,
}

/// A compiled expression: one operator bound to one target field.
#[derive(Debug, Clone)]
pub struct Expression {
    name: &'static str,
    field: String,
    op: Op,
}

/// Compiled per-family operations.
#[derive(Debug, Clone)]
pub(crate) enum Op {
    String(StringOp),
    Int(IntOp),
    Json(JsonOp),
    Regex(RegexOp),
    Array(ArrayOp),
    Ip(IpOp),
    Check(CheckOp),
}

impl Expression {
    pub(crate) fn new(name: &'static str, field: &str, op: Op) -> Self {
        Expression {
            name,
            field: field.to_string(),
            op,
        }
    }

    /// Operator name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Target field path.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> ExpressionKind {
        match self.op {
            Op::Check(_) => ExpressionKind::Predicate,
            _ => ExpressionKind::Transform,
        }
    }

    /// Invoke this expression against one event.
    ///
    /// Transforms mutate the event and return `Ok(true)`; predicates
    /// return their verdict without mutating. `Err` is a per-event
    /// failure, distinct from a predicate's semantic `false`.
    pub fn invoke(&self, event: &mut Event) -> Result<bool, RuntimeError> {
        match &self.op {
            Op::String(op) => op.apply(&self.field, event).map(|_| true),
            Op::Int(op) => op.apply(&self.field, event).map(|_| true),
            Op::Json(op) => op.apply(&self.field, event).map(|_| true),
            Op::Regex(op) => op.apply(&self.field, event).map(|_| true),
            Op::Array(op) => op.apply(&self.field, event).map(|_| true),
            Op::Ip(op) => op.apply(&self.field, event).map(|_| true),
            Op::Check(op) => op.test(&self.field, event),
        }
    }
}
