//! OpsboardCli application framework.
//!
//! Provides the generic CLI application that embedding crates instantiate
//! with their own [`ConfigProvider`] implementation.

use crate::cli::{BaseCommand, CliArgs};
use crate::config::OpsboardConfig;
use crate::{acl_handlers, config_handlers};
use opsboard_core::Result;
use opsboard_core::traits::ConfigProvider;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// OpsboardCli
// ============================================================================

/// Generic CLI application parameterized over a config provider.
///
/// Applications create an `OpsboardCli<MyConfig>` and call `run()`.
pub struct OpsboardCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
}

impl OpsboardCli<OpsboardConfig> {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = OpsboardConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }
}

impl<C: ConfigProvider> OpsboardCli<C> {
    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the config provider.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    /// Records emitted through the `log` facade are forwarded as well.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        let format = acl_handlers::output_format(&*self.config, args.json);
        tracing::debug!(project = self.config.project_name(), %format, "starting");

        match args.command {
            Some(BaseCommand::Check {
                permissions,
                subject,
                mode,
            }) => acl_handlers::handle_check(&*self.config, &subject, &permissions, mode, format),
            Some(BaseCommand::Tab { path, subject }) => {
                acl_handlers::handle_tab(&*self.config, &subject, &path, format)
            }
            Some(BaseCommand::Roles { role }) => acl_handlers::handle_roles(role.as_deref(), format),
            Some(BaseCommand::Tabs { role }) => acl_handlers::handle_tabs(role.as_deref(), format),
            Some(BaseCommand::Permissions) => acl_handlers::handle_permissions(format),
            Some(BaseCommand::Validate) => acl_handlers::handle_validate(format),
            Some(BaseCommand::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(BaseCommand::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {} (use --help for usage)", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
