//! # Permission Evaluator
//!
//! Pure decision functions over a [`PermissionRegistry`]. Nothing here
//! performs I/O or holds mutable state, so an evaluator can be shared
//! freely across threads and tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{RbacError, RbacResult};
use crate::matrix::PermissionRegistry;
use crate::permissions::Permission;
use crate::roles::Role;

/// Rule for combining several permission checks into one decision.
///
/// The default is [`CheckMode::Any`]: one sufficient capability grants
/// access. Call sites that mean "all of these are required" must ask for
/// [`CheckMode::All`] explicitly; forgetting to do so over-grants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// At least one permission must be held
    #[default]
    Any,
    /// Every permission must be held
    All,
}

impl CheckMode {
    /// Get the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckMode::Any => "any",
            CheckMode::All => "all",
        }
    }

    /// Parse a mode from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "any" | "or" => Some(CheckMode::Any),
            "all" | "and" => Some(CheckMode::All),
            _ => None,
        }
    }
}

impl fmt::Display for CheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single evaluation request.
///
/// The permission list is guaranteed non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationRequest {
    role: Role,
    permissions: Vec<Permission>,
    mode: CheckMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempted_action: Option<String>,
}

impl EvaluationRequest {
    /// Create a request for a single permission.
    pub fn single(role: Role, permission: Permission) -> Self {
        Self {
            role,
            permissions: vec![permission],
            mode: CheckMode::default(),
            attempted_action: None,
        }
    }

    /// Create a request for several permissions.
    ///
    /// `mode` of `None` means [`CheckMode::Any`].
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::EmptyPermissionList`] when `permissions` is empty.
    pub fn many(
        role: Role,
        permissions: impl Into<Vec<Permission>>,
        mode: Option<CheckMode>,
    ) -> RbacResult<Self> {
        let permissions = permissions.into();
        if permissions.is_empty() {
            return Err(RbacError::EmptyPermissionList);
        }
        Ok(Self {
            role,
            permissions,
            mode: mode.unwrap_or_default(),
            attempted_action: None,
        })
    }

    /// Label the action being guarded, for audit records.
    pub fn with_attempted_action(mut self, action: impl Into<String>) -> Self {
        self.attempted_action = Some(action.into());
        self
    }

    /// The requesting role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The requested permissions (never empty).
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// The combinator.
    pub fn mode(&self) -> CheckMode {
        self.mode
    }

    /// The guarded action label, if any.
    pub fn attempted_action(&self) -> Option<&str> {
        self.attempted_action.as_deref()
    }
}

/// The outcome of one evaluation, as handed to audit hooks.
///
/// Not a versioned wire contract; meant for a development console or an
/// analytics sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Unique ID for correlating log lines
    pub id: Uuid,

    /// Whether access was granted
    pub allowed: bool,

    /// The requesting role
    pub role: Role,

    /// The requested permissions
    pub permissions: Vec<Permission>,

    /// The combinator applied
    pub mode: CheckMode,

    /// The guarded action label, if the caller supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempted_action: Option<String>,

    /// When the decision was made
    pub timestamp: DateTime<Utc>,
}

impl EvaluationResult {
    /// Stamp a result for `request`.
    pub fn new(request: &EvaluationRequest, allowed: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            allowed,
            role: request.role,
            permissions: request.permissions.clone(),
            mode: request.mode,
            attempted_action: request.attempted_action.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// Stateless decision functions over a shared registry.
///
/// # Example
///
/// ```
/// use access_rbac::{CheckMode, Permission, PermissionEvaluator, Role};
///
/// let evaluator = PermissionEvaluator::standard();
///
/// assert!(evaluator.can(Role::SuperAdmin, Permission::ManageUsers));
/// assert!(!evaluator.can(Role::BranchAdmin, Permission::SystemSettings));
///
/// let perms = [Permission::FeeManagement, Permission::SystemSettings];
/// assert!(evaluator.evaluate(Role::FinanceAdmin, &perms, None));
/// assert!(!evaluator.evaluate(Role::FinanceAdmin, &perms, Some(CheckMode::All)));
/// ```
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    registry: Arc<PermissionRegistry>,
}

impl PermissionEvaluator {
    /// Create an evaluator over a shared registry.
    pub fn new(registry: Arc<PermissionRegistry>) -> Self {
        Self { registry }
    }

    /// Evaluator over the standard matrix.
    pub fn standard() -> Self {
        Self::new(Arc::new(PermissionRegistry::standard()))
    }

    /// The registry this evaluator consults.
    pub fn registry(&self) -> &PermissionRegistry {
        &self.registry
    }

    /// Whether `role` holds `permission`.
    ///
    /// True iff `role` is the super-role or the permission is in its row.
    pub fn can(&self, role: Role, permission: Permission) -> bool {
        self.registry.is_super_role(role) || self.registry.permissions_for(role).has(permission)
    }

    /// Whether `role` holds every permission in `permissions`.
    ///
    /// An empty list is a caller error and is denied rather than treated as
    /// vacuously true.
    pub fn can_all(&self, role: Role, permissions: &[Permission]) -> bool {
        if permissions.is_empty() {
            tracing::debug!(role = %role, "Denying all-of check with an empty permission list");
            return false;
        }
        permissions.iter().all(|p| self.can(role, *p))
    }

    /// Whether `role` holds at least one permission in `permissions`.
    ///
    /// False for an empty list.
    pub fn can_any(&self, role: Role, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.can(role, *p))
    }

    /// Combine checks over `permissions` with `mode`.
    ///
    /// `None` means [`CheckMode::Any`]. This default is kept for
    /// compatibility with optional-capability gating; pass
    /// `Some(CheckMode::All)` when every permission is required.
    pub fn evaluate(&self, role: Role, permissions: &[Permission], mode: Option<CheckMode>) -> bool {
        match mode.unwrap_or_default() {
            CheckMode::Any => self.can_any(role, permissions),
            CheckMode::All => self.can_all(role, permissions),
        }
    }

    /// Evaluate a request and stamp the outcome.
    pub fn check(&self, request: &EvaluationRequest) -> EvaluationResult {
        let allowed = self.evaluate(request.role, &request.permissions, Some(request.mode));
        tracing::debug!(
            role = %request.role,
            mode = %request.mode,
            permissions = ?request.permissions,
            allowed,
            "Evaluated permission request"
        );
        EvaluationResult::new(request, allowed)
    }
}

impl Default for PermissionEvaluator {
    fn default() -> Self {
        Self::standard()
    }
}
