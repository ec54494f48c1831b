use access_rbac::{CheckMode, Permission, PermissionEvaluator, PermissionMatrix, PermissionRegistry, Role};
use proptest::prelude::*;
use std::sync::Arc;

fn any_permission() -> impl Strategy<Value = Permission> {
    prop::sample::select(Permission::all())
}

fn any_role() -> impl Strategy<Value = Role> {
    prop::sample::select(vec![
        Role::SuperAdmin,
        Role::BranchAdmin,
        Role::FinanceAdmin,
        Role::ContentAdmin,
        Role::Auditor,
        Role::Unrecognized,
    ])
}

fn any_permissions() -> impl Strategy<Value = Vec<Permission>> {
    prop::collection::vec(any_permission(), 1..6)
}

/// Random matrix: each enumerated role gets an arbitrary subset of permissions.
fn any_matrix() -> impl Strategy<Value = PermissionMatrix> {
    prop::collection::vec(prop::collection::vec(any_permission(), 0..5), Role::enumerated().len())
        .prop_map(|rows| {
            rows.into_iter()
                .zip(Role::enumerated().iter().copied())
                .fold(PermissionMatrix::builder(), |builder, (perms, role)| builder.grant(role, perms))
                .build()
        })
}

fn evaluator_for(matrix: PermissionMatrix) -> PermissionEvaluator {
    PermissionEvaluator::new(Arc::new(PermissionRegistry::new(matrix)))
}

proptest! {
    /// The super-role holds everything; every other role holds exactly its row.
    #[test]
    fn prop_safety(matrix in any_matrix(), role in any_role(), perm in any_permission()) {
        let evaluator = evaluator_for(matrix.clone());
        let expected = role == Role::SuperAdmin || matrix.row(role).has(perm);
        prop_assert_eq!(evaluator.can(role, perm), expected);
    }

    /// ALL implies ANY for non-empty lists.
    #[test]
    fn prop_all_implies_any(matrix in any_matrix(), role in any_role(), perms in any_permissions()) {
        let evaluator = evaluator_for(matrix);
        if evaluator.can_all(role, &perms) {
            prop_assert!(evaluator.can_any(role, &perms));
        }
    }

    /// An unspecified combinator behaves as ANY.
    #[test]
    fn prop_default_mode_is_any(matrix in any_matrix(), role in any_role(), perms in any_permissions()) {
        let evaluator = evaluator_for(matrix);
        prop_assert_eq!(evaluator.evaluate(role, &perms, None), evaluator.can_any(role, &perms));
        prop_assert_eq!(
            evaluator.evaluate(role, &perms, Some(CheckMode::All)),
            evaluator.can_all(role, &perms)
        );
    }

    /// Unknown or absent roles are denied whatever the matrix says.
    #[test]
    fn prop_deny_by_default(matrix in any_matrix(), perm in any_permission(), raw in "[a-z_]{0,16}") {
        let evaluator = evaluator_for(matrix);
        prop_assert!(!evaluator.can(Role::from_session(None), perm));

        let role = Role::parse(&raw);
        if role == Role::Unrecognized {
            prop_assert!(!evaluator.can(role, perm));
        }
    }

    /// Identical inputs give identical outputs.
    #[test]
    fn prop_idempotent(role in any_role(), perms in any_permissions(), all in any::<bool>()) {
        let evaluator = PermissionEvaluator::standard();
        let mode = if all { CheckMode::All } else { CheckMode::Any };
        let first = evaluator.evaluate(role, &perms, Some(mode));
        for _ in 0..3 {
            prop_assert_eq!(evaluator.evaluate(role, &perms, Some(mode)), first);
        }
    }
}
