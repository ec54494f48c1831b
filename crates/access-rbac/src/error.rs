//! Error types for registry construction and request validation
//!
//! Evaluation itself never fails: unknown roles and permissions resolve to
//! denial. These errors only come out of constructors that run at startup
//! or when a caller builds an invalid request.

use thiserror::Error;

/// RBAC error types.
#[derive(Debug, Error)]
pub enum RbacError {
    /// A matrix document names a role outside the enumeration
    #[error("Unknown role in permission matrix: {0}")]
    UnknownRole(String),

    /// A matrix document names a permission outside the enumeration
    #[error("Unknown permission in permission matrix: {0}")]
    UnknownPermission(String),

    /// A matrix document lists grants for the super-role
    #[error("Super role {0} must not be enumerated in the permission matrix")]
    SuperRoleEnumerated(String),

    /// A matrix document lists the same role twice, differing only in case
    #[error("Duplicate role in permission matrix: {0}")]
    DuplicateRole(String),

    /// A multi-permission request was built with no permissions
    #[error("Permission list must not be empty")]
    EmptyPermissionList,

    /// The matrix document could not be parsed
    #[error("Invalid permission matrix: {0}")]
    InvalidMatrix(#[from] serde_json::Error),

    /// The matrix document could not be read
    #[error("Failed to read permission matrix: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for RBAC operations.
pub type RbacResult<T> = Result<T, RbacError>;

impl RbacError {
    /// Get error code for logs and API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            RbacError::UnknownRole(_) => "UNKNOWN_ROLE",
            RbacError::UnknownPermission(_) => "UNKNOWN_PERMISSION",
            RbacError::SuperRoleEnumerated(_) => "SUPER_ROLE_ENUMERATED",
            RbacError::DuplicateRole(_) => "DUPLICATE_ROLE",
            RbacError::EmptyPermissionList => "EMPTY_PERMISSION_LIST",
            RbacError::InvalidMatrix(_) => "INVALID_MATRIX",
            RbacError::Io(_) => "MATRIX_IO",
        }
    }
}
