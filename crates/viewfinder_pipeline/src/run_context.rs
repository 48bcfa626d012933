//! Per-invocation logging context.

use tracing::Span;
use uuid::Uuid;

/// Correlation id and root span for one pipeline run.
///
/// Passed explicitly to every stage. Stages log with `parent: ctx.span()`
/// and spawned image tasks are instrumented with the same span, so every
/// line of a run carries its `correlation_id`.
///
/// # Examples
///
/// ```
/// use viewfinder_pipeline::RunContext;
///
/// let a = RunContext::new();
/// let b = RunContext::new();
/// assert_ne!(a.correlation_id(), b.correlation_id());
/// ```
#[derive(Debug, Clone)]
pub struct RunContext {
    correlation_id: Uuid,
    span: Span,
}

impl RunContext {
    /// Start a run with a fresh random correlation id.
    pub fn new() -> Self {
        Self::with_correlation_id(Uuid::new_v4())
    }

    /// Start a run with a known correlation id.
    pub fn with_correlation_id(correlation_id: Uuid) -> Self {
        let span = tracing::info_span!("session", correlation_id = %correlation_id);
        Self {
            correlation_id,
            span,
        }
    }

    /// Identifier shared by every log line and stored object of the run.
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Root span of the run.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
