//! Per-event pipeline outcomes.

use serde::Serialize;

/// The result of applying a pipeline to one event.
///
/// `Dropped` is the semantic verdict of a predicate and is never conflated
/// with `Errored`, which reports a per-event processing failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// Every expression passed; the event was possibly mutated in place.
    Continue,
    /// A predicate returned false; later expressions were not invoked.
    Dropped {
        /// Operator name of the predicate that rejected the event.
        expression: String,
    },
    /// An expression failed; later expressions were not invoked.
    Errored {
        /// Operator name of the failing expression.
        expression: String,
        /// Target field of the failing expression.
        field: String,
        /// Human-readable failure detail.
        reason: String,
    },
}

impl PipelineOutcome {
    pub fn is_continue(&self) -> bool {
        matches!(self, PipelineOutcome::Continue)
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, PipelineOutcome::Dropped { .. })
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, PipelineOutcome::Errored { .. })
    }
}
