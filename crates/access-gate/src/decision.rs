//! Gate decisions
//!
//! The single evaluation path shared by the render guard and the assert
//! guard, plus the denial context handed to callbacks.

use access_audit::{dispatch, AuditHook};
use access_rbac::{PermissionEvaluator, Role};
use std::sync::Arc;

use crate::config::Requirement;

/// Why a gate denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialReason {
    /// The role lacks the required permissions
    Unauthorized,
    /// The gate was configured wrongly and fails closed
    Misconfigured,
}

impl DenialReason {
    /// Get the string representation of the reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::Unauthorized => "unauthorized",
            DenialReason::Misconfigured => "misconfigured",
        }
    }
}

/// What a denial callback receives.
///
/// Enough to route to an explanatory screen; carries no registry contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenialContext {
    /// Wire names of the required permissions
    pub required_permissions: Vec<String>,
    /// The role that was denied
    pub role: Role,
    /// The guarded action, if labelled
    pub attempted_action: Option<String>,
    /// Why access was denied
    pub reason: DenialReason,
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The guarded content or action may proceed
    Allowed,
    /// The fallback strategy applies
    Denied(DenialContext),
}

impl GateDecision {
    /// Whether access was granted.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allowed)
    }
}

/// Evaluate `requirement` for `role`, forwarding the outcome to `audit`.
///
/// Audit failures are isolated by [`dispatch`] and cannot change the result.
pub(crate) fn evaluate(
    evaluator: &PermissionEvaluator,
    audit: Option<&Arc<dyn AuditHook>>,
    requirement: &Requirement,
    role: Role,
    attempted_action: Option<&str>,
) -> bool {
    let request = match requirement.request(role) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, role = %role, "Rejected malformed evaluation request");
            return false;
        }
    };
    let request = match attempted_action {
        Some(action) => request.with_attempted_action(action),
        None => request,
    };

    let result = evaluator.check(&request);
    if let Some(hook) = audit {
        dispatch(hook.as_ref(), &result);
    }
    result.allowed
}

/// Denial context for an unauthorized role.
pub(crate) fn unauthorized(requirement: &Requirement, role: Role, attempted_action: Option<&str>) -> DenialContext {
    DenialContext {
        required_permissions: requirement.wire_names(),
        role,
        attempted_action: attempted_action.map(str::to_string),
        reason: DenialReason::Unauthorized,
    }
}

