//! Gate configuration
//!
//! A [`GateConfig`] mirrors what a call site declares: one permission or a
//! list of them, an optional combinator, and what to do on denial.
//! Validation into a [`Requirement`] happens once, when the gate is built.

use access_rbac::{CheckMode, EvaluationRequest, Permission, RbacResult, Role};
use std::fmt;
use std::sync::Arc;

use crate::decision::DenialContext;
use crate::error::ConfigurationError;

/// Callback invoked with the denial context when a gate denies.
pub type DenialCallback = Arc<dyn Fn(&DenialContext) + Send + Sync>;

/// Declared configuration for a policy gate or imperative check.
///
/// Exactly one of [`permission`](Self::permission) and
/// [`permissions`](Self::permissions) must be set. `T` is the type of the
/// fallback content rendered on denial.
///
/// # Example
///
/// ```
/// use access_gate::GateConfig;
/// use access_rbac::{CheckMode, Permission};
///
/// let config: GateConfig<&str> = GateConfig::new()
///     .permissions([Permission::FeeManagement, Permission::ViewReports])
///     .mode(CheckMode::All)
///     .fallback("Finance access required")
///     .attempted_action("open_fee_report");
///
/// assert!(config.requirement().is_ok());
/// ```
pub struct GateConfig<T = ()> {
    pub(crate) permission: Option<Permission>,
    pub(crate) permissions: Option<Vec<Permission>>,
    pub(crate) mode: Option<CheckMode>,
    pub(crate) fallback: Option<T>,
    pub(crate) on_denied: Option<DenialCallback>,
    pub(crate) attempted_action: Option<String>,
}

impl<T> GateConfig<T> {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self {
            permission: None,
            permissions: None,
            mode: None,
            fallback: None,
            on_denied: None,
            attempted_action: None,
        }
    }

    /// Gate on a single permission.
    pub fn require(permission: Permission) -> Self {
        Self::new().permission(permission)
    }

    /// Gate on any of several permissions.
    pub fn require_any(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self::new().permissions(permissions).mode(CheckMode::Any)
    }

    /// Gate on all of several permissions.
    pub fn require_all(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self::new().permissions(permissions).mode(CheckMode::All)
    }

    /// Set the single permission.
    pub fn permission(mut self, permission: Permission) -> Self {
        self.permission = Some(permission);
        self
    }

    /// Set the permission list.
    pub fn permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions = Some(permissions.into_iter().collect());
        self
    }

    /// Set the combinator for the permission list. Unset means ANY.
    pub fn mode(mut self, mode: CheckMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Content to render on denial. Unset renders nothing.
    pub fn fallback(mut self, fallback: T) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Callback to invoke on denial.
    pub fn on_denied<F>(mut self, callback: F) -> Self
    where
        F: Fn(&DenialContext) + Send + Sync + 'static,
    {
        self.on_denied = Some(Arc::new(callback));
        self
    }

    /// Label the guarded action for denial contexts and audit records.
    pub fn attempted_action(mut self, action: impl Into<String>) -> Self {
        self.attempted_action = Some(action.into());
        self
    }

    /// Validate the permission inputs.
    ///
    /// # Errors
    ///
    /// Both forms, neither form, or an empty list.
    pub fn requirement(&self) -> Result<Requirement, ConfigurationError> {
        match (self.permission, &self.permissions) {
            (Some(_), Some(_)) => Err(ConfigurationError::BothPermissionForms),
            (None, None) => Err(ConfigurationError::MissingPermission),
            (None, Some(list)) if list.is_empty() => Err(ConfigurationError::EmptyPermissionList),
            (None, Some(list)) => Ok(Requirement {
                permissions: list.clone(),
                mode: self.mode.unwrap_or_default(),
            }),
            (Some(single), None) => Ok(Requirement {
                permissions: vec![single],
                mode: self.mode.unwrap_or_default(),
            }),
        }
    }
}

impl<T> Default for GateConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for GateConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateConfig")
            .field("permission", &self.permission)
            .field("permissions", &self.permissions)
            .field("mode", &self.mode)
            .field("fallback", &self.fallback)
            .field("on_denied", &self.on_denied.is_some())
            .field("attempted_action", &self.attempted_action)
            .finish()
    }
}

/// Validated permission requirement: a non-empty list and a combinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    permissions: Vec<Permission>,
    mode: CheckMode,
}

impl Requirement {
    pub(crate) fn single(permission: Permission) -> Self {
        Self {
            permissions: vec![permission],
            mode: CheckMode::default(),
        }
    }

    /// The required permissions (never empty).
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// The combinator.
    pub fn mode(&self) -> CheckMode {
        self.mode
    }

    /// Wire names of the required permissions.
    pub fn wire_names(&self) -> Vec<String> {
        self.permissions.iter().map(|p| p.as_str().to_string()).collect()
    }

    pub(crate) fn request(&self, role: Role) -> RbacResult<EvaluationRequest> {
        EvaluationRequest::many(role, self.permissions.clone(), Some(self.mode))
    }
}
