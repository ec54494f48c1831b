//! Audit hook abstraction
//!
//! This module defines the [`AuditHook`] trait and [`dispatch`], the only
//! way gates hand results to a hook. Dispatch swallows every hook failure,
//! panics included, so the decision path never sees one.

use access_rbac::EvaluationResult;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

/// Audit error types.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Channel is saturated; the record was dropped
    #[error("Audit channel full, record dropped")]
    ChannelFull,

    /// Channel receiver is gone
    #[error("Audit channel closed")]
    ChannelClosed,

    /// Record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Downstream sink failed
    #[error("Audit sink error: {0}")]
    Sink(String),
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

impl AuditError {
    /// Whether this error is plain backpressure rather than a fault.
    pub fn is_backpressure(&self) -> bool {
        matches!(self, AuditError::ChannelFull)
    }
}

/// Observer of evaluation outcomes.
///
/// Implementations must not block: `record` is called inline on the
/// decision path. Anything slow belongs behind a channel (see
/// [`ChannelAuditHook`](crate::ChannelAuditHook)).
pub trait AuditHook: Send + Sync {
    /// Record one evaluation result.
    fn record(&self, result: &EvaluationResult) -> AuditResult<()>;
}

impl<H: AuditHook + ?Sized> AuditHook for Arc<H> {
    fn record(&self, result: &EvaluationResult) -> AuditResult<()> {
        (**self).record(result)
    }
}

/// Forward a result to `hook`, isolating the caller from any failure.
///
/// Errors are logged at WARN and discarded. A panicking hook is caught and
/// logged the same way. A full channel is logged at DEBUG only; the channel
/// counts those drops itself.
pub fn dispatch(hook: &dyn AuditHook, result: &EvaluationResult) {
    match panic::catch_unwind(AssertUnwindSafe(|| hook.record(result))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) if e.is_backpressure() => {
            tracing::debug!(result_id = %result.id, "Audit record dropped under backpressure");
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, result_id = %result.id, "Audit hook failed");
        }
        Err(_) => {
            tracing::warn!(result_id = %result.id, "Audit hook panicked");
        }
    }
}

/// Development-console hook that writes each result as a structured
/// `tracing` event.
#[derive(Debug, Clone, Default)]
pub struct TracingAuditHook;

impl TracingAuditHook {
    /// Create a new tracing hook.
    pub fn new() -> Self {
        Self
    }
}

impl AuditHook for TracingAuditHook {
    fn record(&self, result: &EvaluationResult) -> AuditResult<()> {
        let payload = serde_json::to_string(result)?;
        tracing::info!(
            target: "access_audit",
            result_id = %result.id,
            role = %result.role,
            allowed = result.allowed,
            payload = %payload,
            "Access decision"
        );
        Ok(())
    }
}

/// Hook that forwards to several hooks, each isolated from the others.
#[derive(Clone, Default)]
pub struct FanoutAuditHook {
    hooks: Vec<Arc<dyn AuditHook>>,
}

impl std::fmt::Debug for FanoutAuditHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutAuditHook")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl FanoutAuditHook {
    /// Create an empty fanout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook.
    pub fn with(mut self, hook: Arc<dyn AuditHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Number of hooks attached.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are attached.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl AuditHook for FanoutAuditHook {
    fn record(&self, result: &EvaluationResult) -> AuditResult<()> {
        for hook in &self.hooks {
            dispatch(hook.as_ref(), result);
        }
        Ok(())
    }
}
