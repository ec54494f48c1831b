//! # Access Audit
//!
//! This crate provides the one-way audit side channel for access-control
//! decisions. Hooks observe every `EvaluationResult` a gate produces; they
//! can never change a decision, and their failures never reach the caller.
//!
//! ## Overview
//!
//! The access-audit crate handles:
//! - **Audit Hooks**: The `AuditHook` trait and isolated `dispatch`
//! - **Console Hook**: Structured `tracing` output for development
//! - **Channel Hook**: Bounded, non-blocking hand-off to an async worker
//! - **Sinks**: Async destinations drained by `spawn_audit_worker`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use access_audit::{spawn_audit_worker, AuditConfig, MemoryAuditSink};
//! use std::sync::Arc;
//!
//! async fn example() {
//!     let pipeline = AuditConfig::from_env().build();
//!
//!     if let Some(receiver) = pipeline.receiver {
//!         let sink = Arc::new(MemoryAuditSink::new());
//!         spawn_audit_worker(receiver, sink);
//!     }
//!
//!     // Attach `pipeline.hook` to policy gates.
//! }
//! ```
//!
//! ## Backpressure
//!
//! Evaluation latency never depends on the sink. `ChannelAuditHook::record`
//! uses `try_send`; when the channel is full the record is dropped and
//! counted in `AuditStats::dropped`.

pub mod channel;
pub mod config;
pub mod hook;

// Re-export main types
pub use channel::{
    spawn_audit_worker, AuditReceiver, AuditSink, AuditStats, ChannelAuditHook, MemoryAuditSink,
    DEFAULT_CHANNEL_CAPACITY,
};
pub use config::{AuditConfig, AuditPipeline};
pub use hook::{dispatch, AuditError, AuditHook, AuditResult, FanoutAuditHook, TracingAuditHook};
