//! Bounded audit channel
//!
//! This module provides a hook that pushes results onto a bounded tokio
//! channel, and the worker that drains the channel into an async sink.
//! The decision path only ever calls `try_send`: when the channel is
//! saturated the record is dropped and counted.

use crate::hook::{AuditError, AuditHook, AuditResult};
use access_rbac::EvaluationResult;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;

/// Default channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Audit pipeline statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditStats {
    /// Records accepted onto the channel
    pub recorded: u64,
    /// Records dropped because the channel was full or closed
    pub dropped: u64,
    /// Records the sink failed to write
    pub failed: u64,
}

#[derive(Debug, Default)]
struct AuditCounters {
    recorded: AtomicU64,
    dropped: AtomicU64,
    failed: AtomicU64,
}

impl AuditCounters {
    fn snapshot(&self) -> AuditStats {
        AuditStats {
            recorded: self.recorded.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Hook that enqueues results without ever blocking.
///
/// # Example
///
/// ```rust,no_run
/// use access_audit::{spawn_audit_worker, ChannelAuditHook, MemoryAuditSink};
/// use std::sync::Arc;
///
/// async fn example() {
///     let (hook, receiver) = ChannelAuditHook::new(256);
///     let sink = Arc::new(MemoryAuditSink::new());
///     let _worker = spawn_audit_worker(receiver, sink.clone());
///
///     // Hand `hook` to a gate with `with_audit(Arc::new(hook))`.
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ChannelAuditHook {
    sender: mpsc::Sender<EvaluationResult>,
    counters: Arc<AuditCounters>,
}

impl ChannelAuditHook {
    /// Create a hook and the receiving end of its channel.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> (Self, AuditReceiver) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let counters = Arc::new(AuditCounters::default());
        (
            Self {
                sender,
                counters: counters.clone(),
            },
            AuditReceiver { receiver, counters },
        )
    }

    /// Create with [`DEFAULT_CHANNEL_CAPACITY`].
    pub fn with_default_capacity() -> (Self, AuditReceiver) {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Snapshot of the pipeline statistics.
    pub fn stats(&self) -> AuditStats {
        self.counters.snapshot()
    }
}

impl AuditHook for ChannelAuditHook {
    fn record(&self, result: &EvaluationResult) -> AuditResult<()> {
        match self.sender.try_send(result.clone()) {
            Ok(()) => {
                self.counters.recorded.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                Err(AuditError::ChannelFull)
            }
            Err(TrySendError::Closed(_)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                Err(AuditError::ChannelClosed)
            }
        }
    }
}

/// Receiving end of a [`ChannelAuditHook`].
#[derive(Debug)]
pub struct AuditReceiver {
    receiver: mpsc::Receiver<EvaluationResult>,
    counters: Arc<AuditCounters>,
}

impl AuditReceiver {
    /// Receive the next record, or `None` once every hook is dropped.
    pub async fn recv(&mut self) -> Option<EvaluationResult> {
        self.receiver.recv().await
    }

    /// Receive a record if one is ready.
    pub fn try_recv(&mut self) -> Option<EvaluationResult> {
        self.receiver.try_recv().ok()
    }

    /// Snapshot of the pipeline statistics.
    pub fn stats(&self) -> AuditStats {
        self.counters.snapshot()
    }
}

/// Destination for drained audit records (analytics, log shipping).
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Write one record.
    async fn write(&self, result: EvaluationResult) -> AuditResult<()>;
}

/// Drain `receiver` into `sink` until every hook is dropped.
///
/// Sink errors are logged and counted; the worker keeps going.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime, like [`tokio::spawn`].
pub fn spawn_audit_worker(mut receiver: AuditReceiver, sink: Arc<dyn AuditSink>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(result) = receiver.recv().await {
            let id = result.id;
            if let Err(e) = sink.write(result).await {
                receiver.counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(error = %e, result_id = %id, "Audit sink write failed");
            }
        }
        tracing::debug!("Audit channel closed, worker exiting");
    })
}

/// In-memory sink for tests and local inspection.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: RwLock<Vec<EvaluationResult>>,
}

impl MemoryAuditSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All records written so far.
    pub async fn records(&self) -> Vec<EvaluationResult> {
        self.records.read().await.clone()
    }

    /// Number of records written so far.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn write(&self, result: EvaluationResult) -> AuditResult<()> {
        self.records.write().await.push(result);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
