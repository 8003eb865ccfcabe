//! Tab access decisions.
//!
//! [`AccessDecision`] is the explained form of [`can_access_tab`]: it says
//! not only whether a route opens, but why. Unmapped routes produce
//! [`AccessDecision::Unrestricted`] so the fail-open case is visible to
//! callers instead of looking like an ordinary grant.
//!
//! [`can_access_tab`]: crate::check::can_access_tab

use serde::Serialize;

use crate::check::has_permission;
use crate::permission::Permission;
use crate::route::{TAB_PERMISSIONS, TabBinding, required_permission};

/// Outcome of checking a caller against a route.
///
/// # Example
///
/// ```
/// use opsboard_acl::{decide_tab_access, AccessDecision, Permission, Role};
///
/// let d = decide_tab_access(Role::FieldTechnician.permissions(), "/dashboard");
/// assert_eq!(d, AccessDecision::Denied { required: Permission::ViewDashboard });
/// assert!(d.is_denied());
///
/// let d = decide_tab_access(Role::FieldTechnician.permissions(), "/profile");
/// assert_eq!(d.status_str(), "unrestricted");
/// assert!(d.is_allowed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccessDecision {
    /// The route is gated and the caller holds the permission.
    Allowed {
        /// Permission the route requires.
        required: Permission,
    },
    /// The route has no binding; everyone may open it.
    Unrestricted,
    /// The route is gated and the caller lacks the permission.
    Denied {
        /// Permission the route requires.
        required: Permission,
    },
}

impl AccessDecision {
    /// Returns `true` for `Allowed` and `Unrestricted`.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        !self.is_denied()
    }

    /// Returns `true` if the caller is turned away.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }

    /// The gating permission, if the route has one.
    #[must_use]
    pub fn required(&self) -> Option<Permission> {
        match self {
            Self::Allowed { required } | Self::Denied { required } => Some(*required),
            Self::Unrestricted => None,
        }
    }

    /// Returns the status as a string ("allowed", "unrestricted", "denied").
    #[must_use]
    pub fn status_str(&self) -> &'static str {
        match self {
            Self::Allowed { .. } => "allowed",
            Self::Unrestricted => "unrestricted",
            Self::Denied { .. } => "denied",
        }
    }
}

/// Decide whether the caller may open `tab_path`.
pub fn decide_tab_access<P: AsRef<str>>(user_permissions: &[P], tab_path: &str) -> AccessDecision {
    match required_permission(tab_path) {
        None => AccessDecision::Unrestricted,
        Some(required) if has_permission(user_permissions, required) => {
            AccessDecision::Allowed { required }
        }
        Some(required) => AccessDecision::Denied { required },
    }
}

/// The gated tabs the caller may open, in table order.
pub fn accessible_tabs<P: AsRef<str>>(user_permissions: &[P]) -> Vec<&'static TabBinding> {
    TAB_PERMISSIONS
        .iter()
        .filter(|tab| has_permission(user_permissions, tab.required))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    #[test]
    fn test_allowed_helpers() {
        let d = decide_tab_access(Role::Agent.permissions(), "/dashboard");
        assert_eq!(
            d,
            AccessDecision::Allowed {
                required: Permission::ViewDashboard
            }
        );
        assert!(d.is_allowed());
        assert!(!d.is_denied());
        assert_eq!(d.status_str(), "allowed");
        assert_eq!(d.required(), Some(Permission::ViewDashboard));
    }

    #[test]
    fn test_unrestricted_helpers() {
        let empty: &[&str] = &[];
        let d = decide_tab_access(empty, "/unmapped-path");
        assert_eq!(d, AccessDecision::Unrestricted);
        assert!(d.is_allowed());
        assert_eq!(d.required(), None);
        assert_eq!(d.status_str(), "unrestricted");
    }

    #[test]
    fn test_denied_helpers() {
        let d = decide_tab_access(Role::Agent.permissions(), "/user-management");
        assert!(d.is_denied());
        assert!(!d.is_allowed());
        assert_eq!(d.status_str(), "denied");
        assert_eq!(d.required(), Some(Permission::ManageUsers));
    }

    #[test]
    fn test_decision_serializes_with_status_tag() {
        let d = AccessDecision::Denied {
            required: Permission::ViewDashboard,
        };
        let json = serde_json::to_value(d).unwrap();
        assert_eq!(json["status"], "denied");
        assert_eq!(json["required"], "view_dashboard");

        let json = serde_json::to_value(AccessDecision::Unrestricted).unwrap();
        assert_eq!(json["status"], "unrestricted");
    }

    #[test]
    fn test_accessible_tabs_field_technician() {
        let paths: Vec<_> = accessible_tabs(Role::FieldTechnician.permissions())
            .into_iter()
            .map(|t| t.path)
            .collect();
        assert_eq!(
            paths,
            vec!["/analytics", "/agents", "/service-orders", "/technicians"]
        );
    }

    #[test]
    fn test_accessible_tabs_admin_is_everything() {
        assert_eq!(
            accessible_tabs(Role::Admin.permissions()).len(),
            TAB_PERMISSIONS.len()
        );
    }

    #[test]
    fn test_accessible_tabs_empty() {
        let empty: &[String] = &[];
        assert!(accessible_tabs(empty).is_empty());
    }
}
