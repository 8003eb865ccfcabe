//! Callers and their permission sets.
//!
//! A [`Subject`] is whoever a check is run for: either a user holding one of
//! the static roles, or a caller with an explicit set of tokens. Explicit
//! sets are plain strings and may hold tokens outside the catalog.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::check;
use crate::decision::{AccessDecision, decide_tab_access};
use crate::permission::Permission;
use crate::role::Role;

/// An owned, ordered set of permission tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The set granted to `role`.
    pub fn from_role(role: Role) -> Self {
        role.permissions().iter().map(Permission::as_str).collect()
    }

    /// Add a token. Returns `false` if it was already present.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        self.0.insert(token.into())
    }

    /// Returns `true` if `token` is in the set.
    pub fn contains(&self, token: impl AsRef<str>) -> bool {
        self.0.contains(token.as_ref())
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over tokens in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Tokens that are not in the catalog.
    pub fn unknown_tokens(&self) -> Vec<&str> {
        self.iter()
            .filter(|t| Permission::lookup(t).is_none())
            .collect()
    }

    /// Union of two sets.
    pub fn union(&self, other: &PermissionSet) -> PermissionSet {
        PermissionSet(self.0.union(&other.0).cloned().collect())
    }

    /// Tokens as a slice-friendly vector, for the free predicates.
    fn as_tokens(&self) -> Vec<&str> {
        self.iter().collect()
    }

    /// See [`check::has_permission`].
    pub fn has(&self, required: impl AsRef<str>) -> bool {
        self.contains(required)
    }

    /// See [`check::has_any_permission`].
    pub fn has_any<R: AsRef<str>>(&self, required: &[R]) -> bool {
        check::has_any_permission(&self.as_tokens(), required)
    }

    /// See [`check::has_all_permissions`].
    pub fn has_all<R: AsRef<str>>(&self, required: &[R]) -> bool {
        check::has_all_permissions(&self.as_tokens(), required)
    }

    /// See [`check::can_access_tab`].
    pub fn can_access_tab(&self, tab_path: &str) -> bool {
        self.decide_tab(tab_path).is_allowed()
    }

    /// See [`decide_tab_access`].
    pub fn decide_tab(&self, tab_path: &str) -> AccessDecision {
        decide_tab_access(&self.as_tokens(), tab_path)
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        PermissionSet(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for PermissionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// The caller a check is evaluated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// A user holding one of the static roles.
    Role(Role),
    /// A caller with an explicit token set.
    Explicit(PermissionSet),
}

impl Subject {
    /// The subject's effective permission tokens.
    pub fn permissions(&self) -> PermissionSet {
        match self {
            Subject::Role(role) => PermissionSet::from_role(*role),
            Subject::Explicit(set) => set.clone(),
        }
    }

    /// Short label for logs and CLI output.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Role(role) => write!(f, "role:{role}"),
            Subject::Explicit(set) => {
                let tokens: Vec<_> = set.iter().collect();
                write!(f, "grants:[{}]", tokens.join(","))
            }
        }
    }
}

impl From<Role> for Subject {
    fn from(role: Role) -> Self {
        Subject::Role(role)
    }
}

impl From<PermissionSet> for Subject {
    fn from(set: PermissionSet) -> Self {
        Subject::Explicit(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_role_matches_table() {
        let set = PermissionSet::from_role(Role::FieldTechnician);
        assert_eq!(set.len(), 4);
        assert!(set.has("view_service_orders"));
        assert!(!set.has("view_dashboard"));
    }

    #[test]
    fn test_explicit_set_keeps_unknown_tokens() {
        let set: PermissionSet = ["view_dashboard", "fly_drones"].into_iter().collect();
        assert!(set.has("fly_drones"));
        assert_eq!(set.unknown_tokens(), vec!["fly_drones"]);
    }

    #[test]
    fn test_insert_and_extend() {
        let mut set = PermissionSet::new();
        assert!(set.is_empty());
        assert!(set.insert("view_alerts"));
        assert!(!set.insert("view_alerts"));
        set.extend(["view_schedule"]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["view_alerts", "view_schedule"]);
    }

    #[test]
    fn test_set_predicates() {
        let set = PermissionSet::from_role(Role::Agent);
        assert!(set.has_any(&["manage_users", "view_alerts"]));
        assert!(!set.has_all(&["manage_users", "view_alerts"]));
        assert!(set.has_all::<&str>(&[]));
        assert!(!set.has_any::<&str>(&[]));
        assert!(set.can_access_tab("/dashboard"));
        assert!(!set.can_access_tab("/settings"));
        assert!(set.can_access_tab("/help"));
    }

    #[test]
    fn test_empty_set_tabs() {
        let set = PermissionSet::new();
        assert!(!set.can_access_tab("/dashboard"));
        assert_eq!(set.decide_tab("/unmapped-path"), AccessDecision::Unrestricted);
    }

    #[test]
    fn test_union() {
        let a: PermissionSet = ["view_alerts"].into_iter().collect();
        let b: PermissionSet = ["view_schedule", "view_alerts"].into_iter().collect();
        assert_eq!(a.union(&b).len(), 2);
    }

    #[test]
    fn test_subject_permissions() {
        let subject = Subject::from(Role::Admin);
        assert_eq!(subject.permissions().len(), Permission::ALL.len());

        let set: PermissionSet = ["view_dashboard"].into_iter().collect();
        let subject = Subject::from(set.clone());
        assert_eq!(subject.permissions(), set);
    }

    #[test]
    fn test_subject_label() {
        assert_eq!(Subject::Role(Role::Manager).label(), "role:manager");
        let set: PermissionSet = ["view_schedule", "view_alerts"].into_iter().collect();
        assert_eq!(
            Subject::Explicit(set).label(),
            "grants:[view_alerts,view_schedule]"
        );
    }

    #[test]
    fn test_subject_serde() {
        let json = serde_json::to_value(Subject::Role(Role::FieldTechnician)).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "field_technician" }));

        let set: PermissionSet = ["view_alerts"].into_iter().collect();
        let json = serde_json::to_value(Subject::Explicit(set)).unwrap();
        assert_eq!(json, serde_json::json!({ "explicit": ["view_alerts"] }));
    }
}
