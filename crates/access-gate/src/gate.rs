//! Declarative render guard
//!
//! A [`PolicyGate`] wraps a guarded region. It is configured once, then
//! asked per actor whether to show the region or its fallback.

use access_audit::AuditHook;
use access_rbac::{PermissionEvaluator, Role};
use std::fmt;
use std::sync::Arc;

use crate::config::{DenialCallback, GateConfig, Requirement};
use crate::decision::{self, DenialContext, DenialReason, GateDecision};
use crate::error::ConfigurationError;

/// Render guard over a shared evaluator.
///
/// A misconfigured gate (both or neither permission form, or an empty list)
/// is still constructed. It logs the mistake once, at construction, and
/// denies every actor through the configured fallback. It never panics.
///
/// # Example
///
/// ```
/// use access_gate::{GateConfig, PolicyGate};
/// use access_rbac::{Permission, PermissionEvaluator, Role};
/// use std::sync::Arc;
///
/// let evaluator = Arc::new(PermissionEvaluator::standard());
/// let gate = PolicyGate::new(
///     GateConfig::require(Permission::SystemSettings).fallback("Ask a super admin"),
///     evaluator,
/// );
///
/// assert_eq!(gate.render(Role::SuperAdmin, || "Settings panel"), Some("Settings panel"));
/// assert_eq!(gate.render(Role::BranchAdmin, || "Settings panel"), Some("Ask a super admin"));
/// ```
pub struct PolicyGate<T = ()> {
    requirement: Result<Requirement, ConfigurationError>,
    fallback: Option<T>,
    on_denied: Option<DenialCallback>,
    attempted_action: Option<String>,
    evaluator: Arc<PermissionEvaluator>,
    audit: Option<Arc<dyn AuditHook>>,
}

impl<T> PolicyGate<T> {
    /// Build a gate from its configuration.
    pub fn new(config: GateConfig<T>, evaluator: Arc<PermissionEvaluator>) -> Self {
        let requirement = config.requirement();
        if let Err(ref e) = requirement {
            tracing::error!(
                error = %e,
                attempted_action = config.attempted_action.as_deref().unwrap_or("-"),
                "Misconfigured policy gate; every actor will be denied"
            );
        }

        Self {
            requirement,
            fallback: config.fallback,
            on_denied: config.on_denied,
            attempted_action: config.attempted_action,
            evaluator,
            audit: None,
        }
    }

    /// Forward every evaluation outcome to `hook`.
    pub fn with_audit(mut self, hook: Arc<dyn AuditHook>) -> Self {
        self.audit = Some(hook);
        self
    }

    /// The configuration error, if the gate was set up wrongly.
    pub fn configuration_error(&self) -> Option<&ConfigurationError> {
        self.requirement.as_ref().err()
    }

    /// Whether the gate was set up wrongly.
    pub fn is_misconfigured(&self) -> bool {
        self.requirement.is_err()
    }

    /// Decide for `role`, invoking the denial callback on denial.
    pub fn decide(&self, role: Role) -> GateDecision {
        let action = self.attempted_action.as_deref();
        let context = match &self.requirement {
            Ok(requirement) => {
                if decision::evaluate(&self.evaluator, self.audit.as_ref(), requirement, role, action) {
                    return GateDecision::Allowed;
                }
                decision::unauthorized(requirement, role, action)
            }
            Err(_) => DenialContext {
                required_permissions: Vec::new(),
                role,
                attempted_action: action.map(str::to_string),
                reason: DenialReason::Misconfigured,
            },
        };

        tracing::debug!(
            role = %role,
            reason = context.reason.as_str(),
            attempted_action = action.unwrap_or("-"),
            "Policy gate denied"
        );
        if let Some(callback) = &self.on_denied {
            callback(&context);
        }
        GateDecision::Denied(context)
    }

    /// Whether `role` passes the gate.
    pub fn allows(&self, role: Role) -> bool {
        self.decide(role).is_allowed()
    }
}

impl<T: Clone> PolicyGate<T> {
    /// Render the guarded content for `role`, or the fallback on denial.
    ///
    /// `content` is only called when access is granted. Returns `None` on
    /// denial when no fallback is configured.
    pub fn render<F>(&self, role: Role, content: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        match self.decide(role) {
            GateDecision::Allowed => Some(content()),
            GateDecision::Denied(_) => self.fallback.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PolicyGate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyGate")
            .field("requirement", &self.requirement)
            .field("fallback", &self.fallback)
            .field("on_denied", &self.on_denied.is_some())
            .field("attempted_action", &self.attempted_action)
            .field("audit", &self.audit.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_audit::{AuditResult, ChannelAuditHook};
    use access_rbac::{CheckMode, EvaluationResult, Permission};
    use std::sync::Mutex;

    fn evaluator() -> Arc<PermissionEvaluator> {
        Arc::new(PermissionEvaluator::standard())
    }

    #[test]
    fn test_allowed_renders_content() {
        let gate = PolicyGate::new(GateConfig::require(Permission::ManageUsers), evaluator());
        assert_eq!(gate.render(Role::BranchAdmin, || "users"), Some("users"));
        assert!(gate.allows(Role::SuperAdmin));
    }

    #[test]
    fn test_denied_renders_nothing_by_default() {
        let gate = PolicyGate::new(GateConfig::require(Permission::SystemSettings), evaluator());
        assert_eq!(gate.render(Role::BranchAdmin, || "settings"), None);
    }

    #[test]
    fn test_content_not_built_on_denial() {
        let gate: PolicyGate<String> =
            PolicyGate::new(GateConfig::require(Permission::SystemSettings), evaluator());
        let rendered = gate.render(Role::Auditor, || panic!("guarded content built for a denied actor"));
        assert_eq!(rendered, None);
    }

    #[test]
    fn test_on_denied_receives_context() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let gate: PolicyGate = PolicyGate::new(
            GateConfig::require_all([Permission::FeeManagement, Permission::SystemSettings])
                .attempted_action("edit_fees")
                .on_denied(move |ctx| sink.lock().unwrap().push(ctx.clone())),
            evaluator(),
        );

        assert!(!gate.allows(Role::FinanceAdmin));
        assert!(gate.allows(Role::SuperAdmin));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].role, Role::FinanceAdmin);
        assert_eq!(seen[0].attempted_action.as_deref(), Some("edit_fees"));
        assert_eq!(seen[0].reason, DenialReason::Unauthorized);
        assert_eq!(
            seen[0].required_permissions,
            vec!["fee_management".to_string(), "system_settings".to_string()]
        );
    }

    #[test]
    fn test_misconfigured_gate_fails_closed() {
        let gate = PolicyGate::new(GateConfig::new().fallback("nope"), evaluator());
        assert!(gate.is_misconfigured());
        assert_eq!(gate.configuration_error(), Some(&ConfigurationError::MissingPermission));
        // Even the super-role is denied by a misconfigured gate.
        assert_eq!(gate.render(Role::SuperAdmin, || "secret"), Some("nope"));
        match gate.decide(Role::SuperAdmin) {
            GateDecision::Denied(ctx) => assert_eq!(ctx.reason, DenialReason::Misconfigured),
            GateDecision::Allowed => panic!("misconfigured gate allowed access"),
        }
    }

    #[test]
    fn test_audit_receives_results() {
        let (hook, mut receiver) = ChannelAuditHook::new(8);
        let gate: PolicyGate = PolicyGate::new(
            GateConfig::require_any([Permission::FeeManagement, Permission::SystemSettings])
                .attempted_action("fees_page"),
            evaluator(),
        )
        .with_audit(Arc::new(hook));

        assert!(gate.allows(Role::FinanceAdmin));
        assert!(!gate.allows(Role::ContentAdmin));

        let first = receiver.try_recv().unwrap();
        assert!(first.allowed);
        assert_eq!(first.mode, CheckMode::Any);
        assert_eq!(first.attempted_action.as_deref(), Some("fees_page"));
        let second = receiver.try_recv().unwrap();
        assert!(!second.allowed);
        assert_eq!(second.role, Role::ContentAdmin);
    }

    struct PanickingHook;

    impl AuditHook for PanickingHook {
        fn record(&self, _result: &EvaluationResult) -> AuditResult<()> {
            panic!("audit sink blew up");
        }
    }

    #[test]
    fn test_broken_audit_does_not_change_decision() {
        let gate: PolicyGate = PolicyGate::new(GateConfig::require(Permission::ManageUsers), evaluator())
            .with_audit(Arc::new(PanickingHook));

        assert!(gate.allows(Role::BranchAdmin));
        assert!(!gate.allows(Role::FinanceAdmin));
    }
}
