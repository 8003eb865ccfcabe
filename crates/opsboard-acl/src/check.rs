//! Permission predicates.
//!
//! Pure membership tests over a caller's permission tokens. Tokens are
//! compared as plain strings: there is no hierarchy, no wildcard, and no
//! validation against the catalog. An unknown token is just a string that
//! never matches.
//!
//! Every function accepts any slice of `AsRef<str>` items, so the same
//! predicate works on `&[Permission]`, `&[String]`, and `&[&str]`.

use crate::decision::decide_tab_access;

/// True iff `required` is one of `user_permissions`.
pub fn has_permission<P: AsRef<str>>(user_permissions: &[P], required: impl AsRef<str>) -> bool {
    let required = required.as_ref();
    user_permissions.iter().any(|p| p.as_ref() == required)
}

/// True iff at least one of `required` is held. False for an empty list.
pub fn has_any_permission<P, R>(user_permissions: &[P], required: &[R]) -> bool
where
    P: AsRef<str>,
    R: AsRef<str>,
{
    required.iter().any(|r| has_permission(user_permissions, r))
}

/// True iff every one of `required` is held. True for an empty list.
pub fn has_all_permissions<P, R>(user_permissions: &[P], required: &[R]) -> bool
where
    P: AsRef<str>,
    R: AsRef<str>,
{
    required.iter().all(|r| has_permission(user_permissions, r))
}

/// True iff the caller may open `tab_path`.
///
/// Unmapped paths are always accessible.
pub fn can_access_tab<P: AsRef<str>>(user_permissions: &[P], tab_path: &str) -> bool {
    decide_tab_access(user_permissions, tab_path).is_allowed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::Permission;
    use crate::role::Role;
    use crate::route::TAB_PERMISSIONS;

    const NONE: &[&str] = &[];

    #[test]
    fn test_has_permission_typed() {
        let perms = Role::Agent.permissions();
        assert!(has_permission(perms, Permission::ViewDashboard));
        assert!(!has_permission(perms, Permission::ManageUsers));
    }

    #[test]
    fn test_has_permission_strings() {
        let perms = vec!["view_dashboard".to_string(), "edit_agents".to_string()];
        assert!(has_permission(&perms, "edit_agents"));
        assert!(!has_permission(&perms, "edit_agent"));
    }

    #[test]
    fn test_unknown_tokens_are_plain_strings() {
        let perms = ["fly_drones"];
        assert!(has_permission(&perms, "fly_drones"));
        assert!(!has_permission(Role::Admin.permissions(), "fly_drones"));
    }

    #[test]
    fn test_has_any_empty_is_false() {
        assert!(!has_any_permission(Role::Admin.permissions(), NONE));
        assert!(!has_any_permission(NONE, NONE));
    }

    #[test]
    fn test_has_all_empty_is_true() {
        assert!(has_all_permissions(NONE, NONE));
        assert!(has_all_permissions(Role::Agent.permissions(), NONE));
    }

    #[test]
    fn test_has_any_and_all() {
        let perms = Role::FieldTechnician.permissions();
        let mixed = [Permission::ViewDashboard, Permission::ViewTechnicians];
        assert!(has_any_permission(perms, &mixed));
        assert!(!has_all_permissions(perms, &mixed));

        let held = [Permission::ViewAgents, Permission::ViewTechnicians];
        assert!(has_all_permissions(perms, &held));
    }

    #[test]
    fn test_can_access_unmapped_tab() {
        assert!(can_access_tab(NONE, "/unmapped-path"));
        assert!(can_access_tab(Role::FieldTechnician.permissions(), "/profile"));
    }

    #[test]
    fn test_empty_set_denied_dashboard() {
        assert!(!can_access_tab(NONE, "/dashboard"));
    }

    #[test]
    fn test_field_technician_denied_dashboard() {
        let perms = Role::FieldTechnician.permissions();
        assert!(!can_access_tab(perms, "/dashboard"));
        assert!(can_access_tab(perms, "/service-orders"));
        assert!(can_access_tab(perms, "/technicians"));
    }

    #[test]
    fn test_admin_accesses_every_tab() {
        for tab in TAB_PERMISSIONS {
            assert!(can_access_tab(Role::Admin.permissions(), tab.path));
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn arb_token() -> impl Strategy<Value = String> {
            prop_oneof![
                (0..Permission::ALL.len()).prop_map(|i| Permission::ALL[i].as_str().to_string()),
                "[a-z_]{1,16}",
            ]
        }

        fn arb_perms() -> impl Strategy<Value = Vec<String>> {
            proptest::collection::vec(arb_token(), 0..12)
        }

        fn arb_path() -> impl Strategy<Value = String> {
            prop_oneof![
                (0..TAB_PERMISSIONS.len()).prop_map(|i| TAB_PERMISSIONS[i].path.to_string()),
                "/[a-z-]{1,12}",
            ]
        }

        proptest! {
            #[test]
            fn prop_has_permission_is_membership(perms in arb_perms(), p in arb_token()) {
                prop_assert_eq!(has_permission(&perms, &p), perms.contains(&p));
            }

            #[test]
            fn prop_any_is_or(perms in arb_perms(), req in arb_perms()) {
                let expected = req.iter().any(|r| perms.contains(r));
                prop_assert_eq!(has_any_permission(&perms, &req), expected);
            }

            #[test]
            fn prop_all_is_and(perms in arb_perms(), req in arb_perms()) {
                let expected = req.iter().all(|r| perms.contains(r));
                prop_assert_eq!(has_all_permissions(&perms, &req), expected);
            }

            #[test]
            fn prop_all_implies_any_when_nonempty(perms in arb_perms(), req in arb_perms()) {
                if !req.is_empty() && has_all_permissions(&perms, &req) {
                    prop_assert!(has_any_permission(&perms, &req));
                }
            }

            #[test]
            fn prop_tab_access_matches_table(perms in arb_perms(), path in arb_path()) {
                let expected = match crate::route::required_permission(&path) {
                    None => true,
                    Some(required) => perms.iter().any(|p| p == required.as_str()),
                };
                prop_assert_eq!(can_access_tab(&perms, &path), expected);
            }
        }
    }
}
