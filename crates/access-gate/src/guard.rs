//! Imperative assert guard
//!
//! [`PermissionGuard`] is the call-style counterpart of the render guard.
//! Failed checks come back as [`InsufficientPermissionsError`] so a caller
//! cannot proceed past an unchecked denial by ignoring a `bool`.

use access_audit::AuditHook;
use access_rbac::{CheckMode, Permission, PermissionEvaluator, Role};
use std::sync::Arc;

use crate::config::{GateConfig, Requirement};
use crate::decision;
use crate::error::{GateResult, InsufficientPermissionsError};

/// Assert guard over a shared evaluator.
///
/// # Example
///
/// ```
/// use access_gate::PermissionGuard;
/// use access_rbac::{Permission, PermissionEvaluator, Role};
/// use std::sync::Arc;
///
/// let guard = PermissionGuard::new(Arc::new(PermissionEvaluator::standard()));
///
/// assert!(guard.check_permission(Role::BranchAdmin, Permission::ManageUsers).is_ok());
/// assert!(guard.check_permission(Role::BranchAdmin, Permission::SystemSettings).is_err());
/// ```
#[derive(Clone)]
pub struct PermissionGuard {
    evaluator: Arc<PermissionEvaluator>,
    audit: Option<Arc<dyn AuditHook>>,
}

impl std::fmt::Debug for PermissionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionGuard")
            .field("audit", &self.audit.is_some())
            .finish()
    }
}

impl PermissionGuard {
    /// Create a guard over a shared evaluator.
    pub fn new(evaluator: Arc<PermissionEvaluator>) -> Self {
        Self {
            evaluator,
            audit: None,
        }
    }

    /// Forward every evaluation outcome to `hook`.
    pub fn with_audit(mut self, hook: Arc<dyn AuditHook>) -> Self {
        self.audit = Some(hook);
        self
    }

    /// Whether `role` holds `permission`.
    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        self.check_permission(role, permission).is_ok()
    }

    /// Require a single permission.
    pub fn check_permission(&self, role: Role, permission: Permission) -> Result<(), InsufficientPermissionsError> {
        self.enforce(&Requirement::single(permission), role, None)
    }

    /// Require at least one of `permissions`.
    ///
    /// # Errors
    ///
    /// A configuration error for an empty list; otherwise a denial.
    pub fn check_any(&self, role: Role, permissions: &[Permission]) -> GateResult<()> {
        let config: GateConfig = GateConfig::require_any(permissions.iter().copied());
        self.check(role, &config)
    }

    /// Require every one of `permissions`.
    ///
    /// # Errors
    ///
    /// A configuration error for an empty list; otherwise a denial.
    pub fn check_all(&self, role: Role, permissions: &[Permission]) -> GateResult<()> {
        let config: GateConfig = GateConfig::require_all(permissions.iter().copied());
        self.check(role, &config)
    }

    /// Enforce a full gate configuration imperatively.
    ///
    /// Fallback and callback settings in `config` are ignored here; the
    /// error is the denial strategy.
    pub fn check<T>(&self, role: Role, config: &GateConfig<T>) -> GateResult<()> {
        let requirement = config.requirement().map_err(|e| {
            tracing::error!(error = %e, "Misconfigured permission check");
            e
        })?;
        self.enforce(&requirement, role, config.attempted_action.as_deref())?;
        Ok(())
    }

    /// Require a permission given by wire names from an untyped boundary.
    ///
    /// Unknown role names evaluate as [`Role::Unrecognized`]. Unknown
    /// permission names are denied with exactly the same error as a known
    /// permission the role lacks.
    pub fn check_permission_str(&self, role: &str, permission: &str) -> Result<(), InsufficientPermissionsError> {
        let role = Role::parse(role);
        match Permission::parse(permission) {
            Some(permission) => self.check_permission(role, permission),
            None => {
                tracing::debug!(role = %role, "Denying check for an unknown permission name");
                Err(denial(vec![permission.trim().to_lowercase()], CheckMode::Any, role, None))
            }
        }
    }

    fn enforce(
        &self,
        requirement: &Requirement,
        role: Role,
        attempted_action: Option<&str>,
    ) -> Result<(), InsufficientPermissionsError> {
        if decision::evaluate(&self.evaluator, self.audit.as_ref(), requirement, role, attempted_action) {
            return Ok(());
        }
        Err(denial(
            requirement.wire_names(),
            requirement.mode(),
            role,
            attempted_action,
        ))
    }
}

fn denial(
    required_permissions: Vec<String>,
    mode: CheckMode,
    role: Role,
    attempted_action: Option<&str>,
) -> InsufficientPermissionsError {
    InsufficientPermissionsError {
        role,
        required_permissions,
        mode,
        attempted_action: attempted_action.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigurationError, GateError};

    fn guard() -> PermissionGuard {
        PermissionGuard::new(Arc::new(PermissionEvaluator::standard()))
    }

    #[test]
    fn test_check_permission() {
        let guard = guard();
        assert!(guard.check_permission(Role::SuperAdmin, Permission::SystemSettings).is_ok());
        assert!(guard.check_permission(Role::BranchAdmin, Permission::SuspendAccounts).is_ok());

        let err = guard
            .check_permission(Role::BranchAdmin, Permission::SystemSettings)
            .unwrap_err();
        assert_eq!(err.role, Role::BranchAdmin);
        assert_eq!(err.required_permissions, vec!["system_settings".to_string()]);
    }

    #[test]
    fn test_has_permission() {
        let guard = guard();
        assert!(guard.has_permission(Role::Auditor, Permission::ViewAuditLogs));
        assert!(!guard.has_permission(Role::Auditor, Permission::ExportReports));
        assert!(!guard.has_permission(Role::Unrecognized, Permission::ViewReports));
    }

    #[test]
    fn test_check_any_and_all() {
        let guard = guard();
        let perms = [Permission::FeeManagement, Permission::SystemSettings];

        assert!(guard.check_any(Role::FinanceAdmin, &perms).is_ok());
        let err = guard.check_all(Role::FinanceAdmin, &perms).unwrap_err();
        match err {
            GateError::InsufficientPermissions(e) => assert_eq!(e.mode, CheckMode::All),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_list_is_configuration_error() {
        let guard = guard();
        assert_eq!(
            guard.check_all(Role::SuperAdmin, &[]).unwrap_err(),
            GateError::Configuration(ConfigurationError::EmptyPermissionList)
        );
        assert_eq!(
            guard.check_any(Role::SuperAdmin, &[]).unwrap_err(),
            GateError::Configuration(ConfigurationError::EmptyPermissionList)
        );
    }

    #[test]
    fn test_check_with_config() {
        let guard = guard();
        let config: GateConfig = GateConfig::new()
            .permissions([Permission::ViewReports, Permission::ExportReports])
            .attempted_action("download_report");

        // Unset mode means ANY: the auditor can view but not export.
        assert!(guard.check(Role::Auditor, &config).is_ok());

        let config = config.mode(CheckMode::All);
        match guard.check(Role::Auditor, &config).unwrap_err() {
            GateError::InsufficientPermissions(e) => {
                assert_eq!(e.attempted_action.as_deref(), Some("download_report"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let both: GateConfig = GateConfig::new()
            .permission(Permission::ViewReports)
            .permissions([Permission::ViewReports]);
        assert_eq!(
            guard.check(Role::SuperAdmin, &both).unwrap_err(),
            GateError::Configuration(ConfigurationError::BothPermissionForms)
        );
    }

    #[test]
    fn test_unknown_permission_indistinguishable_from_denial() {
        let guard = guard();
        let unknown = guard
            .check_permission_str("branch_admin", "launch_rockets")
            .unwrap_err();
        let known = guard
            .check_permission_str("branch_admin", "system_settings")
            .unwrap_err();

        assert_eq!(unknown.to_string(), known.to_string());
        assert_eq!(unknown.role, known.role);
        assert_eq!(unknown.mode, known.mode);
    }

    #[test]
    fn test_check_permission_str() {
        let guard = guard();
        assert!(guard.check_permission_str("SUPER_ADMIN", "system_settings").is_ok());
        assert!(guard.check_permission_str("finance_admin", "fee_management").is_ok());
        assert!(guard.check_permission_str("intruder", "fee_management").is_err());
        assert!(guard.check_permission_str("", "manage_users").is_err());
    }
}
