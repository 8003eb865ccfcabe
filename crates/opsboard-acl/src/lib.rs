//! Access control for the Opsboard dashboard.
//!
//! A flat role/permission model: a closed permission catalog, a static
//! role table, a static tab table, and pure predicates over them.
//! Everything here is synchronous and side-effect free; the tables are
//! compiled in and have no setter API.
//!
//! # Modules
//!
//! - [`permission`]: The permission catalog
//! - [`role`]: Role-to-permission table
//! - [`route`]: Tab-to-permission table
//! - [`check`]: Permission predicates
//! - [`decision`]: Explained tab access decisions
//! - [`subject`]: Permission sets and callers
//! - [`validation`]: Table integrity checks
//! - [`matrix`]: Role-by-tab access overview

#![doc = include_str!("../README.md")]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod check;
pub mod decision;
pub mod error;
pub mod matrix;
pub mod permission;
pub mod role;
pub mod route;
pub mod subject;
pub mod validation;

mod suggest;

pub use check::{can_access_tab, has_all_permissions, has_any_permission, has_permission};
pub use decision::{AccessDecision, accessible_tabs, decide_tab_access};
pub use error::{AclError, Result};
pub use matrix::{RoleAccess, access_matrix};
pub use permission::Permission;
pub use role::{Role, role_permissions};
pub use route::{TAB_PERMISSIONS, TabBinding, find_tab, required_permission};
pub use subject::{PermissionSet, Subject};
pub use validation::{ValidationIssue, ValidationResult, validate_tables};
