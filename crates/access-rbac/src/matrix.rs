//! # Permission Matrix
//!
//! The role→permission mapping and the registry that serves it to
//! evaluators. The matrix is built once at startup and never mutated;
//! changing access rules means shipping a new matrix document.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::error::{RbacError, RbacResult};
use crate::permissions::{Permission, PermissionSet};
use crate::roles::Role;

/// Environment variable naming a matrix document to load at startup.
pub const MATRIX_PATH_ENV: &str = "ACCESS_MATRIX_PATH";

/// Mapping from each enumerated role to its granted permissions.
///
/// Every role in [`Role::enumerated`] has a row, possibly empty. The
/// super-role never has one: it is handled by [`PermissionRegistry::is_super_role`].
///
/// # Example
///
/// ```
/// use access_rbac::{Permission, PermissionMatrix, Role};
///
/// let matrix = PermissionMatrix::builder()
///     .grant(Role::FinanceAdmin, [Permission::FeeManagement])
///     .build();
///
/// assert!(matrix.row(Role::FinanceAdmin).has(Permission::FeeManagement));
/// assert!(matrix.row(Role::Auditor).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrix {
    rows: HashMap<Role, PermissionSet>,
    empty: PermissionSet,
}

impl PermissionMatrix {
    /// Start building a matrix.
    pub fn builder() -> PermissionMatrixBuilder {
        PermissionMatrixBuilder::default()
    }

    /// The built-in matrix used in production.
    pub fn standard() -> Self {
        Self::builder()
            .grant(
                Role::BranchAdmin,
                [Permission::ManageUsers, Permission::SuspendAccounts],
            )
            .grant(Role::FinanceAdmin, [Permission::FeeManagement])
            .grant(Role::ContentAdmin, [Permission::ManageContent])
            .grant(
                Role::Auditor,
                [Permission::ViewReports, Permission::ViewAuditLogs],
            )
            .build()
    }

    /// Parse a matrix document.
    ///
    /// The document has the shape `{ "roles": { "<role>": ["<permission>", ...] } }`.
    /// Roles left out of the document get an empty row.
    ///
    /// # Errors
    ///
    /// Unknown role or permission names, a row for the super-role, and
    /// malformed JSON are all rejected.
    pub fn from_json_str(json: &str) -> RbacResult<Self> {
        let document: MatrixDocument = serde_json::from_str(json)?;
        document.into_matrix()
    }

    /// Load a matrix document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> RbacResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Get the row for a role.
    ///
    /// Returns the empty set for the super-role, [`Role::Unrecognized`], and
    /// any role without an entry. Never grants implicitly.
    pub fn row(&self, role: Role) -> &PermissionSet {
        self.rows.get(&role).unwrap_or(&self.empty)
    }

    /// Iterate over the enumerated rows.
    pub fn rows(&self) -> impl Iterator<Item = (Role, &PermissionSet)> {
        self.rows.iter().map(|(role, set)| (*role, set))
    }
}

impl Default for PermissionMatrix {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for [`PermissionMatrix`].
#[derive(Debug, Default)]
pub struct PermissionMatrixBuilder {
    rows: HashMap<Role, PermissionSet>,
}

impl PermissionMatrixBuilder {
    /// Grant permissions to a role.
    ///
    /// Grants to the super-role or [`Role::Unrecognized`] are ignored: the
    /// former already holds everything and the latter must hold nothing.
    pub fn grant<I>(mut self, role: Role, permissions: I) -> Self
    where
        I: IntoIterator<Item = Permission>,
    {
        if role == Role::SUPER || role == Role::Unrecognized {
            tracing::warn!(role = %role, "Ignoring grant to a role that cannot be enumerated");
            return self;
        }
        self.rows.entry(role).or_default().add_all(permissions);
        self
    }

    /// Finish the matrix, giving every enumerated role a row.
    pub fn build(mut self) -> PermissionMatrix {
        for role in Role::enumerated() {
            self.rows.entry(*role).or_default();
        }
        PermissionMatrix {
            rows: self.rows,
            empty: PermissionSet::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatrixDocument {
    roles: BTreeMap<String, Vec<String>>,
}

impl MatrixDocument {
    fn into_matrix(self) -> RbacResult<PermissionMatrix> {
        let mut builder = PermissionMatrix::builder();
        let mut seen = HashSet::new();
        for (role_name, permission_names) in self.roles {
            let role = Role::try_parse(&role_name)
                .ok_or_else(|| RbacError::UnknownRole(role_name.clone()))?;
            if role == Role::SUPER {
                return Err(RbacError::SuperRoleEnumerated(role_name));
            }
            if !seen.insert(role) {
                return Err(RbacError::DuplicateRole(role_name));
            }
            let permissions = permission_names
                .iter()
                .map(|name| {
                    Permission::parse(name).ok_or_else(|| RbacError::UnknownPermission(name.clone()))
                })
                .collect::<RbacResult<Vec<_>>>()?;
            builder = builder.grant(role, permissions);
        }
        Ok(builder.build())
    }
}

/// Owner of the canonical matrix and the super-role bypass rule.
///
/// Registries are shared by reference (`Arc<PermissionRegistry>`) between
/// evaluators; they hold no interior mutability, so concurrent reads need
/// no locking.
#[derive(Debug, Clone, Default)]
pub struct PermissionRegistry {
    matrix: PermissionMatrix,
}

impl PermissionRegistry {
    /// Wrap a matrix.
    pub fn new(matrix: PermissionMatrix) -> Self {
        Self { matrix }
    }

    /// Registry over [`PermissionMatrix::standard`].
    pub fn standard() -> Self {
        Self::new(PermissionMatrix::standard())
    }

    /// Load the matrix named by `ACCESS_MATRIX_PATH`, or fall back to the
    /// standard matrix when the variable is unset.
    ///
    /// # Errors
    ///
    /// A set but unreadable or invalid document is an error rather than a
    /// silent fallback.
    pub fn from_env_or_standard() -> RbacResult<Self> {
        match std::env::var(MATRIX_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                tracing::info!(path = %path, "Loading permission matrix");
                Ok(Self::new(PermissionMatrix::from_file(path)?))
            }
            _ => Ok(Self::standard()),
        }
    }

    /// Permissions granted to `role`. Empty for unknown roles.
    pub fn permissions_for(&self, role: Role) -> &PermissionSet {
        self.matrix.row(role)
    }

    /// Whether `role` bypasses the matrix.
    pub fn is_super_role(&self, role: Role) -> bool {
        role == Role::SUPER
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }
}
