//! # Access Gate
//!
//! This crate enforces access-control decisions at call sites. It exposes
//! two thin adapters over one shared `PermissionEvaluator`, so policy logic
//! is defined once and cannot drift between call styles.
//!
//! ## Overview
//!
//! The access-gate crate handles:
//! - **Render Guard**: `PolicyGate` shows guarded content or a fallback
//! - **Assert Guard**: `PermissionGuard` returns `InsufficientPermissionsError`
//! - **Configuration**: `GateConfig` with exactly one of `permission` / `permissions`
//! - **Denial Routing**: `on_denied` callbacks receive a `DenialContext`
//!
//! ## Architecture
//!
//! ```text
//! GateConfig ─→ PolicyGate ──────┐
//!                                ├─→ PermissionEvaluator ─→ PermissionRegistry
//!               PermissionGuard ─┘          │
//!                                           └─→ AuditHook (optional, one-way)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use access_gate::{GateConfig, PermissionGuard, PolicyGate};
//! use access_rbac::{CheckMode, Permission, PermissionEvaluator, Role};
//! use std::sync::Arc;
//!
//! let evaluator = Arc::new(PermissionEvaluator::standard());
//!
//! // Declarative
//! let gate = PolicyGate::new(
//!     GateConfig::require_any([Permission::FeeManagement, Permission::SystemSettings])
//!         .on_denied(|ctx| println!("denied {} for {:?}", ctx.role, ctx.attempted_action))
//!         .attempted_action("open_fees"),
//!     evaluator.clone(),
//! );
//! assert_eq!(gate.render(Role::FinanceAdmin, || "fees"), Some("fees"));
//!
//! // Imperative
//! let guard = PermissionGuard::new(evaluator);
//! assert!(guard.check_permission(Role::BranchAdmin, Permission::SystemSettings).is_err());
//! ```
//!
//! ## Default Combinator
//!
//! A permission list without an explicit mode is checked with
//! `CheckMode::Any`. Gates that need every permission must say
//! `CheckMode::All` (or use `GateConfig::require_all`).
//!
//! ## Failure Semantics
//!
//! - Misconfigured gates deny through their fallback and log once
//! - Audit hook failures are swallowed and logged, never surfaced

pub mod config;
pub mod decision;
pub mod error;
pub mod gate;
pub mod guard;

// Re-export main types for convenience
pub use config::{DenialCallback, GateConfig, Requirement};
pub use decision::{DenialContext, DenialReason, GateDecision};
pub use error::{ConfigurationError, GateError, GateResult, InsufficientPermissionsError};
pub use gate::PolicyGate;
pub use guard::PermissionGuard;
