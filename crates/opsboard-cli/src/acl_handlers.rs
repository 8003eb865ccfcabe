//! Handler functions for access-control CLI commands.
//!
//! These functions implement `check`, `tab`, `roles`, `tabs`,
//! `permissions`, and `validate`. Each renders either plain text or JSON.
//! `check` and `tab` return [`Error::AccessDenied`] when the subject is
//! turned away, so scripts can rely on the exit status.

use crate::cli::{CheckMode, SubjectArgs};
use opsboard_acl::{
    AccessDecision, Permission, PermissionSet, Role, RoleAccess, Subject, TAB_PERMISSIONS,
    access_matrix, decide_tab_access, validate_tables,
};
use opsboard_core::traits::{ConfigProvider, OutputFormat};
use opsboard_core::{Error, Result};
use serde::Serialize;

// ============================================================================
// Report types
// ============================================================================

/// Outcome of a `check` command.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Subject label.
    pub subject: String,
    /// `all` or `any`.
    pub mode: &'static str,
    /// Tokens that were tested.
    pub required: Vec<String>,
    /// Tested tokens the subject lacks.
    pub missing: Vec<String>,
    /// Whether the check passed.
    pub granted: bool,
}

/// Outcome of a `tab` command.
#[derive(Debug, Clone, Serialize)]
pub struct TabReport {
    /// Subject label.
    pub subject: String,
    /// Route path that was checked.
    pub path: String,
    /// The decision.
    pub decision: AccessDecision,
}

/// One row of the `tabs` listing.
#[derive(Debug, Clone, Serialize)]
pub struct TabRow {
    /// Route path.
    pub path: &'static str,
    /// Permission the route requires.
    pub required: Permission,
    /// Whether the selected role can open it (absent without `--role`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<bool>,
}

/// Permissions of a single role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleDetail {
    /// The role.
    pub role: Role,
    /// Its permissions, in table order.
    pub permissions: &'static [Permission],
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick the output format: `--json` wins over configuration.
pub fn output_format<C: ConfigProvider>(config: &C, json_flag: bool) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else {
        config.output_format()
    }
}

/// Parse a role name, turning unknown names into an error with a hint.
pub fn parse_role(name: &str) -> Result<Role> {
    Ok(name.parse::<Role>()?)
}

/// Work out who a command is evaluated for.
///
/// Explicit grants take precedence, then `--role`, then the configured
/// default role.
pub fn resolve_subject<C: ConfigProvider>(config: &C, args: &SubjectArgs) -> Result<Subject> {
    if !args.grant.is_empty() {
        let set: PermissionSet = args.grant.iter().cloned().collect();
        warn_unknown(set.unknown_tokens());
        return Ok(Subject::Explicit(set));
    }

    let name = args
        .role
        .as_deref()
        .or_else(|| config.default_role())
        .ok_or_else(|| {
            Error::config(
                "No subject given: pass --role or --grant, or set access.default_role",
            )
        })?;
    Ok(Subject::Role(parse_role(name)?))
}

/// Unknown tokens are allowed, but almost always a typo.
fn warn_unknown<'a>(tokens: impl IntoIterator<Item = &'a str>) {
    for token in tokens {
        if let Err(e) = token.parse::<Permission>() {
            tracing::warn!("{e}; it will never match");
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::serialization(e.to_string()))?;
    println!("{json}");
    Ok(())
}

// ============================================================================
// Evaluation (pure, no output)
// ============================================================================

/// Evaluate a permission check for `subject`.
pub fn evaluate_check(subject: &Subject, required: &[String], mode: CheckMode) -> CheckReport {
    let perms = subject.permissions();
    let missing: Vec<String> = required
        .iter()
        .filter(|r| !perms.has(r.as_str()))
        .cloned()
        .collect();
    let granted = match mode {
        CheckMode::All => perms.has_all(required),
        CheckMode::Any => perms.has_any(required),
    };
    CheckReport {
        subject: subject.label(),
        mode: match mode {
            CheckMode::All => "all",
            CheckMode::Any => "any",
        },
        required: required.to_vec(),
        missing,
        granted,
    }
}

/// Evaluate tab access for `subject`.
pub fn evaluate_tab(subject: &Subject, path: &str) -> TabReport {
    TabReport {
        subject: subject.label(),
        path: path.to_string(),
        decision: subject.permissions().decide_tab(path),
    }
}

/// Plain-text rendering of a check report.
///
/// Missing tokens are listed only when the check failed; a passing `any`
/// check may still lack some of the tested tokens.
pub fn check_text(report: &CheckReport) -> Vec<String> {
    let verdict = if report.granted { "granted" } else { "denied" };
    let mut lines = vec![format!("{}: {} ({})", report.subject, verdict, report.mode)];
    if !report.granted {
        lines.extend(report.missing.iter().map(|token| format!("  missing: {token}")));
    }
    lines
}

/// Build the `tabs` listing, optionally marked for `role`.
pub fn tab_rows(role: Option<Role>) -> Vec<TabRow> {
    TAB_PERMISSIONS
        .iter()
        .map(|tab| TabRow {
            path: tab.path,
            required: tab.required,
            allowed: role.map(|r| decide_tab_access(r.permissions(), tab.path).is_allowed()),
        })
        .collect()
}

// ============================================================================
// Handlers
// ============================================================================

/// Check whether a subject holds the given permissions.
pub fn handle_check<C: ConfigProvider>(
    config: &C,
    subject_args: &SubjectArgs,
    permissions: &[String],
    mode: CheckMode,
    format: OutputFormat,
) -> Result<()> {
    let subject = resolve_subject(config, subject_args)?;
    warn_unknown(permissions.iter().map(String::as_str));

    let report = evaluate_check(&subject, permissions, mode);
    tracing::debug!(subject = %report.subject, granted = report.granted, "permission check");

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            for line in check_text(&report) {
                println!("{line}");
            }
        }
    }

    if report.granted {
        Ok(())
    } else {
        Err(Error::access_denied(format!(
            "{} lacks {}",
            report.subject,
            report.missing.join(", ")
        )))
    }
}

/// Decide whether a subject may open a tab.
pub fn handle_tab<C: ConfigProvider>(
    config: &C,
    subject_args: &SubjectArgs,
    path: &str,
    format: OutputFormat,
) -> Result<()> {
    let subject = resolve_subject(config, subject_args)?;
    let report = evaluate_tab(&subject, path);
    tracing::debug!(subject = %report.subject, path, status = report.decision.status_str(), "tab check");

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => match report.decision {
            AccessDecision::Allowed { required } => {
                println!("{path}: allowed for {} (requires {required})", report.subject)
            }
            AccessDecision::Unrestricted => {
                println!("{path}: unrestricted (no permission bound to this route)")
            }
            AccessDecision::Denied { required } => {
                println!("{path}: denied for {} (requires {required})", report.subject)
            }
        },
    }

    match report.decision {
        AccessDecision::Denied { required } => Err(Error::access_denied(format!(
            "{path} requires {required}"
        ))),
        _ => Ok(()),
    }
}

/// List roles, or show one role's permissions.
pub fn handle_roles(role: Option<&str>, format: OutputFormat) -> Result<()> {
    match role {
        Some(name) => {
            let role = parse_role(name)?;
            let detail = RoleDetail {
                role,
                permissions: role.permissions(),
            };
            match format {
                OutputFormat::Json => print_json(&detail)?,
                OutputFormat::Text => {
                    println!("{} ({} permissions)", detail.role, detail.permissions.len());
                    for p in detail.permissions {
                        println!("  {p}");
                    }
                }
            }
        }
        None => {
            let matrix: Vec<RoleAccess> = access_matrix();
            match format {
                OutputFormat::Json => print_json(&matrix)?,
                OutputFormat::Text => {
                    for row in &matrix {
                        println!(
                            "{:<18} {:>3} permissions  {:>2}/{} tabs",
                            row.role.as_str(),
                            row.permission_count,
                            row.allowed_tabs.len(),
                            TAB_PERMISSIONS.len()
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

/// List tab bindings, optionally marked for one role.
pub fn handle_tabs(role: Option<&str>, format: OutputFormat) -> Result<()> {
    let role = role.map(parse_role).transpose()?;
    let rows = tab_rows(role);
    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Text => {
            for row in &rows {
                let mark = match row.allowed {
                    Some(true) => "  allowed",
                    Some(false) => "  denied",
                    None => "",
                };
                println!("{:<20} {:<24}{mark}", row.path, row.required.as_str());
            }
            println!("Unlisted routes are open to every role.");
        }
    }
    Ok(())
}

/// List the permission catalog.
pub fn handle_permissions(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&Permission::ALL)?,
        OutputFormat::Text => {
            for p in Permission::ALL {
                let holders: Vec<&str> = Role::ALL
                    .iter()
                    .filter(|r| r.grants(*p))
                    .map(Role::as_str)
                    .collect();
                println!("{:<26} {}", p.as_str(), holders.join(", "));
            }
        }
    }
    Ok(())
}

/// Validate the access tables.
pub fn handle_validate(format: OutputFormat) -> Result<()> {
    let result = validate_tables();

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => {
            if result.valid {
                println!("Access tables are valid.");
            } else {
                println!("Access tables have validation issues:");
            }

            for error in &result.errors {
                println!("  ERROR [{}]: {}", error.code, error.message);
                for item in error.roles.iter().chain(&error.permissions).chain(&error.tabs) {
                    println!("    - {item}");
                }
            }

            for warning in &result.warnings {
                println!("  WARN  [{}]: {}", warning.code, warning.message);
                for item in warning.roles.iter().chain(&warning.permissions).chain(&warning.tabs) {
                    println!("    - {item}");
                }
            }

            for info in &result.info {
                println!("  INFO  [{}]: {}", info.code, info.message);
            }

            println!(
                "\nSummary: {} error(s), {} warning(s)",
                result.errors.len(),
                result.warnings.len()
            );
        }
    }

    if result.valid {
        Ok(())
    } else {
        Err(Error::invalid_data(format!(
            "{} validation error(s)",
            result.errors.len()
        )))
    }
}

// ============================================================================
// Tests
// ============================================================================
