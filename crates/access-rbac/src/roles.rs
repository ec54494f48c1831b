//! Console roles
//!
//! This module defines the closed set of actor roles. Role strings arrive
//! from the session layer already authenticated; they are validated here,
//! once, into a [`Role`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Actor category that is the unit of permission grant.
///
/// Roles are not hierarchical: apart from the super-role, each role holds
/// exactly the permissions its matrix row lists.
///
/// - **SuperAdmin**: implicitly holds every permission
/// - **BranchAdmin**: user administration for a branch
/// - **FinanceAdmin**: fee configuration
/// - **ContentAdmin**: customer-facing content
/// - **Auditor**: read-only access to reports and the audit trail
/// - **Unrecognized**: anything the session layer sent that is not one of
///   the above, including a missing role. Owns no permissions.
///
/// # Examples
///
/// ```
/// use access_rbac::Role;
///
/// assert_eq!(Role::parse("branch_admin"), Role::BranchAdmin);
/// assert_eq!(Role::parse("root"), Role::Unrecognized);
/// assert_eq!(Role::from_session(None), Role::Unrecognized);
/// ```
///
/// Deserialization goes through [`Role::parse`], so a role read from a
/// serialized session validates exactly like one read from a raw string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Role {
    /// Wildcard role; never enumerated in the matrix
    SuperAdmin,

    /// Branch administrator
    BranchAdmin,

    /// Finance administrator
    FinanceAdmin,

    /// Content administrator
    ContentAdmin,

    /// Read-only auditor
    Auditor,

    /// Unknown or absent role
    Unrecognized,
}

impl Role {
    /// The role that bypasses the matrix.
    pub const SUPER: Role = Role::SuperAdmin;

    /// Parse a role from its wire name (case-insensitive).
    ///
    /// Parsing is total: unknown names become [`Role::Unrecognized`] rather
    /// than an error, so a bad session value can only ever lead to denial.
    ///
    /// # Examples
    ///
    /// ```
    /// use access_rbac::Role;
    ///
    /// assert_eq!(Role::parse("FINANCE_ADMIN"), Role::FinanceAdmin);
    /// assert_eq!(Role::parse(""), Role::Unrecognized);
    /// ```
    pub fn parse(s: &str) -> Self {
        Self::try_parse(s).unwrap_or(Self::Unrecognized)
    }

    /// Parse a role, returning `None` for names outside the enumeration.
    ///
    /// Used where an unknown name is a configuration mistake (matrix
    /// documents) rather than an untrusted input.
    pub fn try_parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "super_admin" => Some(Self::SuperAdmin),
            "branch_admin" => Some(Self::BranchAdmin),
            "finance_admin" => Some(Self::FinanceAdmin),
            "content_admin" => Some(Self::ContentAdmin),
            "auditor" => Some(Self::Auditor),
            _ => None,
        }
    }

    /// Validate the role carried by a session, if any.
    pub fn from_session(role: Option<&str>) -> Self {
        role.map(Self::parse).unwrap_or(Self::Unrecognized)
    }

    /// Get the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::BranchAdmin => "branch_admin",
            Self::FinanceAdmin => "finance_admin",
            Self::ContentAdmin => "content_admin",
            Self::Auditor => "auditor",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Get a human-readable display name for the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use access_rbac::Role;
    ///
    /// assert_eq!(Role::BranchAdmin.display_name(), "Branch Admin");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::BranchAdmin => "Branch Admin",
            Self::FinanceAdmin => "Finance Admin",
            Self::ContentAdmin => "Content Admin",
            Self::Auditor => "Auditor",
            Self::Unrecognized => "Unknown",
        }
    }

    /// Roles that carry a row in the permission matrix.
    ///
    /// Excludes the super-role and [`Role::Unrecognized`].
    pub fn enumerated() -> &'static [Role] {
        &[
            Role::BranchAdmin,
            Role::FinanceAdmin,
            Role::ContentAdmin,
            Role::Auditor,
        ]
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Unrecognized
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}
