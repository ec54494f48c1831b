//! Error types for policy gates
//!
//! Two failures are kept apart: a gate that was set up wrongly
//! ([`ConfigurationError`]) and an actor that lacks the required
//! permissions ([`InsufficientPermissionsError`]).

use access_rbac::{CheckMode, Role};
use thiserror::Error;

/// Gate set-up mistakes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Both `permission` and `permissions` were supplied
    #[error("Gate configured with both a single permission and a permission list")]
    BothPermissionForms,

    /// Neither `permission` nor `permissions` was supplied
    #[error("Gate configured without any permission")]
    MissingPermission,

    /// `permissions` was supplied but empty
    #[error("Gate configured with an empty permission list")]
    EmptyPermissionList,
}

/// Raised by the imperative guard when a check fails.
///
/// The `Display` output is deliberately generic; the fields are for the
/// caller's own handling (e.g. routing to an access-denied screen) and must
/// not be shown to end users verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Insufficient permissions")]
pub struct InsufficientPermissionsError {
    /// The role that was checked
    pub role: Role,
    /// Wire names of the permissions that were required
    pub required_permissions: Vec<String>,
    /// How the permissions were combined
    pub mode: CheckMode,
    /// The guarded action, if labelled
    pub attempted_action: Option<String>,
}

/// Policy gate error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// The gate or check was configured wrongly
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The actor lacks the required permissions
    #[error(transparent)]
    InsufficientPermissions(#[from] InsufficientPermissionsError),
}

/// Result type for gate operations.
pub type GateResult<T> = Result<T, GateError>;

impl GateError {
    /// Check if this error should be logged at error level.
    ///
    /// Denials are expected outcomes; misconfiguration is a bug.
    pub fn is_server_error(&self) -> bool {
        matches!(self, GateError::Configuration(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            GateError::Configuration(_) => 500,
            GateError::InsufficientPermissions(_) => 403,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            GateError::Configuration(_) => "GATE_CONFIG_ERROR",
            GateError::InsufficientPermissions(_) => "INSUFFICIENT_PERMISSIONS",
        }
    }
}
