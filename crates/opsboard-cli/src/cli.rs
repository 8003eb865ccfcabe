//! CLI argument parsing and command definitions.
//!
//! Provides the CLI structure for the `opsboard` tool: configuration,
//! verbosity, output format, and the access-inspection commands.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments for Opsboard.
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "OPSBOARD_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print results as JSON regardless of the configured format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<BaseCommand>,
}

/// Built-in commands.
#[derive(Subcommand, Debug)]
pub enum BaseCommand {
    /// Check whether a subject holds one or more permissions.
    Check {
        /// Permission tokens to test.
        #[arg(required = true)]
        permissions: Vec<String>,

        /// Who to check.
        #[command(flatten)]
        subject: SubjectArgs,

        /// Combine multiple permissions with AND (`all`) or OR (`any`).
        #[arg(short, long, value_enum, default_value_t = CheckMode::All)]
        mode: CheckMode,
    },

    /// Decide whether a subject may open a dashboard tab.
    Tab {
        /// Route path, e.g. `/dashboard`.
        path: String,

        /// Who to check.
        #[command(flatten)]
        subject: SubjectArgs,
    },

    /// List roles, or show the permissions of one role.
    Roles {
        /// Role to show.
        role: Option<String>,
    },

    /// List tab bindings, optionally marked for one role.
    Tabs {
        /// Mark each tab as allowed or denied for this role.
        #[arg(short, long)]
        role: Option<String>,
    },

    /// List the permission catalog.
    Permissions,

    /// Check the access tables for integrity problems.
    Validate,

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Subject selection shared by `check` and `tab`.
#[derive(Args, Debug, Clone, Default)]
pub struct SubjectArgs {
    /// Evaluate as this role.
    #[arg(short, long, conflicts_with = "grant")]
    pub role: Option<String>,

    /// Evaluate with an explicit permission token (repeatable).
    #[arg(short, long)]
    pub grant: Vec<String>,
}

/// How `check` combines multiple permissions.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMode {
    /// Every permission must be held.
    #[default]
    All,
    /// At least one permission must be held.
    Any,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "access.default_role").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "access.default_role").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
