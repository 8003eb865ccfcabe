//! Role-by-tab access overview.

use serde::Serialize;

use crate::decision::decide_tab_access;
use crate::role::Role;
use crate::route::{TAB_PERMISSIONS, TabBinding};

/// What one role can reach.
#[derive(Clone, Debug, Serialize)]
pub struct RoleAccess {
    /// The role.
    pub role: Role,
    /// Number of permissions granted.
    pub permission_count: usize,
    /// Gated tabs the role can open.
    pub allowed_tabs: Vec<&'static str>,
    /// Gated tabs the role cannot open.
    pub denied_tabs: Vec<&'static str>,
}

impl RoleAccess {
    /// Compute the overview for `role`.
    pub fn for_role(role: Role) -> Self {
        let perms = role.permissions();
        let (allowed, denied): (Vec<&TabBinding>, Vec<&TabBinding>) = TAB_PERMISSIONS
            .iter()
            .partition(|tab| decide_tab_access(perms, tab.path).is_allowed());
        Self {
            role,
            permission_count: perms.len(),
            allowed_tabs: allowed.into_iter().map(|t| t.path).collect(),
            denied_tabs: denied.into_iter().map(|t| t.path).collect(),
        }
    }
}

/// Overview for every role, in table order.
pub fn access_matrix() -> Vec<RoleAccess> {
    Role::ALL.iter().copied().map(RoleAccess::for_role).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_covers_all_roles() {
        let matrix = access_matrix();
        assert_eq!(matrix.len(), Role::ALL.len());
        for row in &matrix {
            assert_eq!(
                row.allowed_tabs.len() + row.denied_tabs.len(),
                TAB_PERMISSIONS.len()
            );
        }
    }

    #[test]
    fn test_admin_row() {
        let row = RoleAccess::for_role(Role::Admin);
        assert_eq!(row.permission_count, 45);
        assert!(row.denied_tabs.is_empty());
    }

    #[test]
    fn test_field_technician_row() {
        let row = RoleAccess::for_role(Role::FieldTechnician);
        assert_eq!(row.permission_count, 4);
        assert!(row.denied_tabs.contains(&"/dashboard"));
        assert_eq!(row.allowed_tabs.len(), 4);
    }

    #[test]
    fn test_row_serializes() {
        let json = serde_json::to_value(RoleAccess::for_role(Role::Agent)).unwrap();
        assert_eq!(json["role"], "agent");
        assert_eq!(json["permission_count"], 9);
    }

    #[test]
    fn test_row_tabs_follow_table_order() {
        let row = RoleAccess::for_role(Role::Agent);
        assert_eq!(row.allowed_tabs.first(), Some(&"/dashboard"));
        let positions: Vec<usize> = row
            .allowed_tabs
            .iter()
            .map(|p| TAB_PERMISSIONS.iter().position(|t| t.path == *p).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
