//! # Permissions
//!
//! The closed set of capabilities that can be granted to a role, and the
//! set type used to hold a role's grants.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// An atomic, named capability that can be granted or withheld.
///
/// Permissions are opaque to the engine: it only ever asks whether a role
/// holds one. Grants are opt-in per role, so adding a variant here grants it
/// to nobody except the super-role.
///
/// # Example
///
/// ```
/// use access_rbac::permissions::Permission;
///
/// assert_eq!(Permission::ManageUsers.as_str(), "manage_users");
/// assert_eq!(Permission::parse("FEE_MANAGEMENT"), Some(Permission::FeeManagement));
/// assert_eq!(Permission::parse("launch_rockets"), None);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Create, edit and deactivate console users.
    ManageUsers,

    /// Temporarily suspend customer accounts.
    SuspendAccounts,

    /// Change system-wide settings.
    SystemSettings,

    /// Configure fees and fee schedules.
    FeeManagement,

    /// View operational and financial reports.
    ViewReports,

    /// Export reports to files.
    ExportReports,

    /// Open, close and configure branches.
    ManageBranches,

    /// Read the administrative audit trail.
    ViewAuditLogs,

    /// Publish and retire customer-facing content.
    ManageContent,
}

impl Permission {
    /// Get the wire name of the permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ManageUsers => "manage_users",
            Permission::SuspendAccounts => "suspend_accounts",
            Permission::SystemSettings => "system_settings",
            Permission::FeeManagement => "fee_management",
            Permission::ViewReports => "view_reports",
            Permission::ExportReports => "export_reports",
            Permission::ManageBranches => "manage_branches",
            Permission::ViewAuditLogs => "view_audit_logs",
            Permission::ManageContent => "manage_content",
        }
    }

    /// Parse a permission from its wire name (case-insensitive).
    ///
    /// # Returns
    ///
    /// `Some(Permission)` if the name is in the enumeration, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "manage_users" => Some(Permission::ManageUsers),
            "suspend_accounts" => Some(Permission::SuspendAccounts),
            "system_settings" => Some(Permission::SystemSettings),
            "fee_management" => Some(Permission::FeeManagement),
            "view_reports" => Some(Permission::ViewReports),
            "export_reports" => Some(Permission::ExportReports),
            "manage_branches" => Some(Permission::ManageBranches),
            "view_audit_logs" => Some(Permission::ViewAuditLogs),
            "manage_content" => Some(Permission::ManageContent),
            _ => None,
        }
    }

    /// Get all permissions.
    pub fn all() -> Vec<Self> {
        vec![
            Permission::ManageUsers,
            Permission::SuspendAccounts,
            Permission::SystemSettings,
            Permission::FeeManagement,
            Permission::ViewReports,
            Permission::ExportReports,
            Permission::ManageBranches,
            Permission::ViewAuditLogs,
            Permission::ManageContent,
        ]
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of permissions held by a role.
///
/// Membership checks are O(1).
///
/// # Example
///
/// ```
/// use access_rbac::permissions::{Permission, PermissionSet};
///
/// let mut set = PermissionSet::new();
/// set.add(Permission::ManageUsers);
/// set.add(Permission::SuspendAccounts);
///
/// assert!(set.has(Permission::ManageUsers));
/// assert!(!set.has(Permission::SystemSettings));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    permissions: HashSet<Permission>,
}

impl PermissionSet {
    /// Create a new empty permission set.
    pub fn new() -> Self {
        Self {
            permissions: HashSet::new(),
        }
    }

    /// Add a permission to the set.
    pub fn add(&mut self, permission: Permission) {
        self.permissions.insert(permission);
    }

    /// Add multiple permissions to the set.
    pub fn add_all<I>(&mut self, permissions: I)
    where
        I: IntoIterator<Item = Permission>,
    {
        self.permissions.extend(permissions);
    }

    /// Remove a permission from the set.
    ///
    /// # Returns
    ///
    /// `true` if the permission was present, `false` otherwise
    pub fn remove(&mut self, permission: Permission) -> bool {
        self.permissions.remove(&permission)
    }

    /// Check if the set contains a permission.
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Iterate over the permissions in the set (unordered).
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.permissions.iter().copied()
    }

    /// Get all permissions in the set, sorted for stable output.
    pub fn to_sorted_vec(&self) -> Vec<Permission> {
        let mut all: Vec<Permission> = self.iter().collect();
        all.sort();
        all
    }

    /// Merge another permission set into this one.
    pub fn merge(&mut self, other: &PermissionSet) {
        self.permissions.extend(other.iter());
    }

    /// Get the count of permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Check if this set contains every permission in `required`.
    ///
    /// An empty `required` slice is vacuously contained; callers that treat
    /// an empty list as an error must check for it first.
    pub fn contains_all(&self, required: &[Permission]) -> bool {
        required.iter().all(|perm| self.has(*perm))
    }

    /// Check if this set contains at least one permission in `candidates`.
    pub fn contains_any(&self, candidates: &[Permission]) -> bool {
        candidates.iter().any(|perm| self.has(*perm))
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[Permission; N]> for PermissionSet {
    fn from(perms: [Permission; N]) -> Self {
        perms.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_parse() {
        assert_eq!(Permission::parse("manage_users"), Some(Permission::ManageUsers));
        assert_eq!(Permission::parse("System_Settings"), Some(Permission::SystemSettings));
        assert_eq!(Permission::parse(" fee_management "), Some(Permission::FeeManagement));
        assert_eq!(Permission::parse("manage-users"), None);
        assert_eq!(Permission::parse(""), None);
    }

    #[test]
    fn test_parse_inverts_as_str() {
        for perm in Permission::all() {
            assert_eq!(Permission::parse(perm.as_str()), Some(perm));
        }
    }

    #[test]
    fn test_permission_serde_uses_wire_names() {
        let json = serde_json::to_string(&Permission::ViewAuditLogs).unwrap();
        assert_eq!(json, "\"view_audit_logs\"");
        let parsed: Permission = serde_json::from_str("\"suspend_accounts\"").unwrap();
        assert_eq!(parsed, Permission::SuspendAccounts);
    }

    #[test]
    fn test_permission_set() {
        let mut set = PermissionSet::new();
        set.add(Permission::ManageUsers);
        set.add(Permission::ManageUsers);
        set.add(Permission::SuspendAccounts);

        assert_eq!(set.len(), 2);
        assert!(set.has(Permission::ManageUsers));
        assert!(!set.has(Permission::FeeManagement));

        assert!(set.remove(Permission::ManageUsers));
        assert!(!set.remove(Permission::ManageUsers));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_permission_set_merge() {
        let mut a = PermissionSet::from([Permission::ViewReports]);
        let b = PermissionSet::from([Permission::ExportReports, Permission::ViewReports]);
        a.merge(&b);
        assert_eq!(
            a.to_sorted_vec(),
            vec![Permission::ViewReports, Permission::ExportReports]
        );
    }

    #[test]
    fn test_contains_all_and_any() {
        let set = PermissionSet::from([Permission::FeeManagement]);

        assert!(set.contains_any(&[Permission::FeeManagement, Permission::SystemSettings]));
        assert!(!set.contains_all(&[Permission::FeeManagement, Permission::SystemSettings]));
        assert!(set.contains_all(&[Permission::FeeManagement]));
        assert!(!set.contains_any(&[]));
    }
}
