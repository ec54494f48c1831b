//! # Access RBAC (Role-Based Access Control)
//!
//! This crate decides whether an actor, identified by a role, may perform a
//! guarded action.
//!
//! ## Overview
//!
//! The access-rbac crate handles:
//! - **Permissions**: The closed set of grantable capabilities
//! - **Roles**: The closed set of actor categories, plus `Unrecognized`
//! - **Permission Matrix**: The immutable role → permission-set mapping
//! - **Evaluator**: Pure ANY/ALL decision functions over the matrix
//!
//! ## Architecture
//!
//! ```text
//! Role (validated from session) ─┐
//!                                ├─→ PermissionEvaluator ─→ bool / EvaluationResult
//! Permission(s) + CheckMode ─────┘          │
//!                                           └─→ PermissionRegistry (Arc, read-only)
//!                                                  ├─ PermissionMatrix rows
//!                                                  └─ super-role bypass
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use access_rbac::{CheckMode, Permission, PermissionEvaluator, PermissionMatrix, PermissionRegistry, Role};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(PermissionRegistry::new(PermissionMatrix::standard()));
//! let evaluator = PermissionEvaluator::new(registry);
//!
//! let role = Role::from_session(Some("branch_admin"));
//! assert!(evaluator.can(role, Permission::ManageUsers));
//! assert!(!evaluator.can(role, Permission::SystemSettings));
//!
//! // Multi-permission checks default to ANY.
//! let perms = [Permission::ManageUsers, Permission::SystemSettings];
//! assert!(evaluator.evaluate(role, &perms, None));
//! assert!(!evaluator.evaluate(role, &perms, Some(CheckMode::All)));
//! ```
//!
//! ## Deny by Default
//!
//! - Unknown or missing roles parse to `Role::Unrecognized`, which owns nothing
//! - A new `Permission` is granted to no row until one opts in
//! - Only the super-role bypasses the matrix, and it never appears in it

pub mod error;
pub mod evaluator;
pub mod matrix;
pub mod permissions;
pub mod roles;

// Re-export main types for convenience
pub use error::{RbacError, RbacResult};
pub use evaluator::{CheckMode, EvaluationRequest, EvaluationResult, PermissionEvaluator};
pub use matrix::{PermissionMatrix, PermissionMatrixBuilder, PermissionRegistry, MATRIX_PATH_ENV};
pub use permissions::{Permission, PermissionSet};
pub use roles::Role;
