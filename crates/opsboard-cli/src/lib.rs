//! Command-line inspector for Opsboard access control.
//!
//! This crate wires the `opsboard-acl` tables and predicates into a small
//! CLI that answers "can this role see that tab?" style questions.
//!
//! # Key Abstractions
//!
//! - `OpsboardCli<C>`: Generic CLI parameterized over config provider
//! - `OpsboardConfig`: File and environment backed configuration
//! - `acl_handlers`: Access queries rendered as text or JSON

#![doc = include_str!("../README.md")]

pub mod acl_handlers;
pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::OpsboardCli;
pub use cli::{BaseCommand, CheckMode, CliArgs, ConfigAction, ConfigCommand, SubjectArgs};
pub use config::OpsboardConfig;
