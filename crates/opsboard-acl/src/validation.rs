//! Table validation and integrity checking.
//!
//! The shipped tables are typed, so most of these invariants hold by
//! construction. Validation still runs over a string-level snapshot
//! ([`Tables`]) so the same checks can be pointed at hand-built tables and
//! so every finding is reported in terms of the tokens users actually see.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::permission::Permission;
use crate::role::Role;
use crate::route::TAB_PERMISSIONS;

// ============================================================================
// Types
// ============================================================================

/// Result of table validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the tables are valid (no errors).
    pub valid: bool,
    /// Critical issues that should be fixed.
    pub errors: Vec<ValidationIssue>,
    /// Non-critical issues (warnings).
    pub warnings: Vec<ValidationIssue>,
    /// Informational findings.
    pub info: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty (valid) result.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            info: Vec::new(),
        }
    }

    /// Add an error (marks the tables as invalid).
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.valid = false;
        self.errors.push(issue);
    }

    /// Add a warning.
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Add an informational finding.
    pub fn add_info(&mut self, issue: ValidationIssue) {
        self.info.push(issue);
    }

    /// Total issue count (errors + warnings).
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Returns `true` if any error, warning, or info entry has `code`.
    pub fn has_code(&self, code: &str) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .chain(&self.info)
            .any(|i| i.code == code)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// A validation issue found in the tables.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue type/code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Affected roles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    /// Affected permission tokens.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    /// Affected tab paths.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tabs: Vec<String>,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            roles: Vec::new(),
            permissions: Vec::new(),
            tabs: Vec::new(),
        }
    }

    /// Attach affected roles.
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Attach affected permission tokens.
    pub fn with_permissions(mut self, permissions: Vec<String>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Attach affected tab paths.
    pub fn with_tabs(mut self, tabs: Vec<String>) -> Self {
        self.tabs = tabs;
        self
    }
}

/// String-level view of the access tables.
#[derive(Clone, Debug, Default)]
pub struct Tables<'a> {
    /// Catalog tokens.
    pub catalog: Vec<&'a str>,
    /// Role key and its granted tokens.
    pub roles: Vec<(&'a str, Vec<&'a str>)>,
    /// Tab path and its required token.
    pub tabs: Vec<(&'a str, &'a str)>,
}

impl Tables<'static> {
    /// Snapshot of the compiled-in tables.
    pub fn shipped() -> Self {
        Self {
            catalog: Permission::tokens().collect(),
            roles: Role::ALL
                .iter()
                .map(|r| {
                    (
                        r.as_str(),
                        r.permissions().iter().map(Permission::as_str).collect(),
                    )
                })
                .collect(),
            tabs: TAB_PERMISSIONS
                .iter()
                .map(|t| (t.path, t.required.as_str()))
                .collect(),
        }
    }
}

const ADMIN: &str = "admin";

// ============================================================================
// Validation functions
// ============================================================================

/// Validate the compiled-in tables.
pub fn validate_tables() -> ValidationResult {
    validate(&Tables::shipped())
}

/// Validate an arbitrary table snapshot.
///
/// Checks for:
/// - Duplicate or malformed catalog tokens
/// - Role grants that reference tokens outside the catalog
/// - Roles that list a token twice
/// - An `admin` role that is not exactly the catalog
/// - Malformed or duplicate tab paths
/// - Tabs gated on tokens outside the catalog
/// - Tabs that only `admin` can open
/// - Catalog tokens no other role is granted
pub fn validate(tables: &Tables<'_>) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_catalog_tokens(tables, &mut result);
    check_role_references(tables, &mut result);
    check_admin_is_catalog(tables, &mut result);
    check_tab_paths(tables, &mut result);
    check_tab_references(tables, &mut result);
    check_admin_only_tabs(tables, &mut result);
    check_unused_permissions(tables, &mut result);

    log::debug!(
        "validated {} permissions, {} roles, {} tabs: {} error(s), {} warning(s)",
        tables.catalog.len(),
        tables.roles.len(),
        tables.tabs.len(),
        result.errors.len(),
        result.warnings.len()
    );

    result
}

/// Quick check if the compiled-in tables have any validation errors.
pub fn is_valid() -> bool {
    validate_tables().valid
}

// ============================================================================
// Individual checks
// ============================================================================

fn is_snake_case(token: &str) -> bool {
    !token.is_empty()
        && !token.starts_with('_')
        && !token.ends_with('_')
        && !token.contains("__")
        && token
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn duplicates<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dupes = BTreeSet::new();
    for item in items {
        if !seen.insert(item) {
            dupes.insert(item.to_string());
        }
    }
    dupes.into_iter().collect()
}

/// Check catalog tokens are unique and lowercase snake_case.
fn check_catalog_tokens(tables: &Tables<'_>, result: &mut ValidationResult) {
    let dupes = duplicates(tables.catalog.iter().copied());
    if !dupes.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "DUPLICATE_PERMISSION_TOKEN",
                format!("{} catalog token(s) appear more than once", dupes.len()),
            )
            .with_permissions(dupes),
        );
    }

    let malformed: Vec<String> = tables
        .catalog
        .iter()
        .filter(|t| !is_snake_case(t))
        .map(|t| t.to_string())
        .collect();
    if !malformed.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "MALFORMED_PERMISSION_TOKEN",
                format!("{} catalog token(s) are not snake_case", malformed.len()),
            )
            .with_permissions(malformed),
        );
    }
}

/// Check every role grant exists in the catalog and is listed once.
fn check_role_references(tables: &Tables<'_>, result: &mut ValidationResult) {
    let catalog: HashSet<&str> = tables.catalog.iter().copied().collect();

    for (role, grants) in &tables.roles {
        let dangling: Vec<String> = grants
            .iter()
            .filter(|p| !catalog.contains(*p))
            .map(|p| p.to_string())
            .collect();
        if !dangling.is_empty() {
            result.add_error(
                ValidationIssue::new(
                    "DANGLING_ROLE_PERMISSION",
                    format!(
                        "role '{role}' references {} token(s) outside the catalog",
                        dangling.len()
                    ),
                )
                .with_roles(vec![role.to_string()])
                .with_permissions(dangling),
            );
        }

        let dupes = duplicates(grants.iter().copied());
        if !dupes.is_empty() {
            result.add_warning(
                ValidationIssue::new(
                    "DUPLICATE_ROLE_PERMISSION",
                    format!("role '{role}' lists {} token(s) twice", dupes.len()),
                )
                .with_roles(vec![role.to_string()])
                .with_permissions(dupes),
            );
        }
    }
}

/// Check `admin` grants exactly the catalog, in both directions.
fn check_admin_is_catalog(tables: &Tables<'_>, result: &mut ValidationResult) {
    let Some((_, admin)) = tables.roles.iter().find(|(name, _)| *name == ADMIN) else {
        result.add_error(ValidationIssue::new(
            "ADMIN_NOT_FULL_CATALOG",
            "no 'admin' role is defined",
        ));
        return;
    };

    let admin: BTreeSet<&str> = admin.iter().copied().collect();
    let catalog: BTreeSet<&str> = tables.catalog.iter().copied().collect();
    if admin != catalog {
        let diff: Vec<String> = catalog
            .symmetric_difference(&admin)
            .map(|t| t.to_string())
            .collect();
        result.add_error(
            ValidationIssue::new(
                "ADMIN_NOT_FULL_CATALOG",
                format!("'admin' differs from the catalog by {} token(s)", diff.len()),
            )
            .with_roles(vec![ADMIN.to_string()])
            .with_permissions(diff),
        );
    }
}

/// Check tab paths are rooted and bound once.
fn check_tab_paths(tables: &Tables<'_>, result: &mut ValidationResult) {
    let malformed: Vec<String> = tables
        .tabs
        .iter()
        .filter(|(path, _)| !path.starts_with('/'))
        .map(|(path, _)| path.to_string())
        .collect();
    if !malformed.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "MALFORMED_TAB_PATH",
                format!("{} tab path(s) do not start with '/'", malformed.len()),
            )
            .with_tabs(malformed),
        );
    }

    let dupes = duplicates(tables.tabs.iter().map(|(path, _)| *path));
    if !dupes.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "DUPLICATE_TAB_PATH",
                format!("{} tab path(s) are bound more than once", dupes.len()),
            )
            .with_tabs(dupes),
        );
    }
}

/// Check every tab is gated on a catalog token.
fn check_tab_references(tables: &Tables<'_>, result: &mut ValidationResult) {
    let catalog: HashSet<&str> = tables.catalog.iter().copied().collect();
    let dangling: Vec<(&str, &str)> = tables
        .tabs
        .iter()
        .filter(|(_, required)| !catalog.contains(required))
        .copied()
        .collect();
    if !dangling.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "DANGLING_TAB_PERMISSION",
                format!(
                    "{} tab(s) require tokens outside the catalog",
                    dangling.len()
                ),
            )
            .with_tabs(dangling.iter().map(|(p, _)| p.to_string()).collect())
            .with_permissions(dangling.iter().map(|(_, r)| r.to_string()).collect()),
        );
    }
}

/// Warn about tabs no role but `admin` can open.
fn check_admin_only_tabs(tables: &Tables<'_>, result: &mut ValidationResult) {
    let admin_only: Vec<String> = tables
        .tabs
        .iter()
        .filter(|(_, required)| {
            !tables
                .roles
                .iter()
                .any(|(name, grants)| *name != ADMIN && grants.contains(required))
        })
        .map(|(path, _)| path.to_string())
        .collect();
    if !admin_only.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "UNREACHABLE_TAB",
                format!("{} tab(s) can only be opened by admin", admin_only.len()),
            )
            .with_tabs(admin_only),
        );
    }
}

/// Note catalog tokens that no role other than `admin` is granted.
fn check_unused_permissions(tables: &Tables<'_>, result: &mut ValidationResult) {
    let granted: HashSet<&str> = tables
        .roles
        .iter()
        .filter(|(name, _)| *name != ADMIN)
        .flat_map(|(_, grants)| grants.iter().copied())
        .collect();
    let unused: Vec<String> = tables
        .catalog
        .iter()
        .filter(|t| !granted.contains(*t))
        .map(|t| t.to_string())
        .collect();
    if !unused.is_empty() {
        result.add_info(
            ValidationIssue::new(
                "UNUSED_PERMISSION",
                format!("{} token(s) are granted only to admin", unused.len()),
            )
            .with_permissions(unused),
        );
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Tables<'static> {
        Tables {
            catalog: vec!["view_dashboard", "manage_users"],
            roles: vec![
                ("admin", vec!["view_dashboard", "manage_users"]),
                ("agent", vec!["view_dashboard"]),
            ],
            tabs: vec![
                ("/dashboard", "view_dashboard"),
                ("/user-management", "manage_users"),
            ],
        }
    }

    #[test]
    fn test_shipped_tables_valid() {
        let result = validate_tables();
        assert!(result.valid, "errors: {:?}", result.errors);
        assert!(is_valid());
    }

    #[test]
    fn test_shipped_tables_report_admin_only_tabs() {
        // User management, settings, and integrations are admin-only on purpose.
        let result = validate_tables();
        let unreachable = result
            .warnings
            .iter()
            .find(|i| i.code == "UNREACHABLE_TAB")
            .unwrap();
        assert!(unreachable.tabs.contains(&"/user-management".to_string()));
        assert!(unreachable.tabs.contains(&"/settings".to_string()));
    }

    #[test]
    fn test_tiny_tables() {
        let result = validate(&tiny());
        assert!(result.valid);
        assert!(result.has_code("UNREACHABLE_TAB"));
        assert!(result.has_code("UNUSED_PERMISSION"));
        assert_eq!(result.total_issues(), 1);
    }

    #[test]
    fn test_dangling_role_permission() {
        let mut tables = tiny();
        tables.roles[1].1.push("view_dashbord");
        let result = validate(&tables);
        assert!(!result.valid);
        let issue = &result.errors[0];
        assert_eq!(issue.code, "DANGLING_ROLE_PERMISSION");
        assert_eq!(issue.roles, vec!["agent"]);
        assert_eq!(issue.permissions, vec!["view_dashbord"]);
    }

    #[test]
    fn test_duplicate_role_permission_is_warning() {
        let mut tables = tiny();
        tables.roles[1].1.push("view_dashboard");
        let result = validate(&tables);
        assert!(result.valid);
        assert!(result.has_code("DUPLICATE_ROLE_PERMISSION"));
    }

    #[test]
    fn test_admin_missing_permission() {
        let mut tables = tiny();
        tables.roles[0].1.pop();
        let result = validate(&tables);
        assert!(!result.valid);
        let issue = result
            .errors
            .iter()
            .find(|i| i.code == "ADMIN_NOT_FULL_CATALOG")
            .unwrap();
        assert_eq!(issue.permissions, vec!["manage_users"]);
    }

    #[test]
    fn test_admin_absent() {
        let mut tables = tiny();
        tables.roles.remove(0);
        let result = validate(&tables);
        assert!(result.has_code("ADMIN_NOT_FULL_CATALOG"));
    }

    #[test]
    fn test_duplicate_and_malformed_tokens() {
        let mut tables = tiny();
        tables.catalog.push("view_dashboard");
        tables.catalog.push("View-Things");
        let result = validate(&tables);
        assert!(result.has_code("DUPLICATE_PERMISSION_TOKEN"));
        assert!(result.has_code("MALFORMED_PERMISSION_TOKEN"));
    }

    #[test]
    fn test_tab_path_checks() {
        let mut tables = tiny();
        tables.tabs.push(("dashboard", "view_dashboard"));
        tables.tabs.push(("/dashboard", "manage_users"));
        let result = validate(&tables);
        assert!(result.has_code("MALFORMED_TAB_PATH"));
        assert!(result.has_code("DUPLICATE_TAB_PATH"));
    }

    #[test]
    fn test_dangling_tab_permission() {
        let mut tables = tiny();
        tables.tabs.push(("/fleet", "view_fleet"));
        let result = validate(&tables);
        let issue = result
            .errors
            .iter()
            .find(|i| i.code == "DANGLING_TAB_PERMISSION")
            .unwrap();
        assert_eq!(issue.tabs, vec!["/fleet"]);
    }

    #[test]
    fn test_snake_case() {
        assert!(is_snake_case("view_dashboard"));
        assert!(is_snake_case("view2"));
        assert!(!is_snake_case(""));
        assert!(!is_snake_case("_view"));
        assert!(!is_snake_case("view__x"));
        assert!(!is_snake_case("ViewX"));
    }

    #[test]
    fn test_result_serializes() {
        let json = serde_json::to_value(validate(&tiny())).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["warnings"][0]["code"], "UNREACHABLE_TAB");
    }
}
