//! Configuration for the Opsboard CLI.
//!
//! Provides the [`OpsboardConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `OPSBOARD_CONFIG` environment variable
//! 3. XDG default: `~/.config/opsboard/config.toml`
//! 4. Built-in defaults

use confyg::{Confygery, env};
use opsboard_core::traits::{ConfigProvider, OutputFormat};
use opsboard_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Opsboard CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsboardConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Access-check configuration.
    pub access: AccessConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Access-check configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Role evaluated when a command names neither `--role` nor `--grant`.
    pub default_role: Option<String>,
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Render results as `text` or `json`.
    pub format: OutputFormat,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for OpsboardConfig {
    fn default() -> Self {
        Self {
            project_name: "opsboard".to_string(),
            access: AccessConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl OpsboardConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// Loading priority:
    /// 1. Explicit `config_path` (from `--config` flag)
    /// 2. `OPSBOARD_CONFIG` env var
    /// 3. XDG default: `~/.config/opsboard/config.toml`
    /// 4. Built-in defaults
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("OPSBOARD");
        env_opts.add_section("access");
        env_opts.add_section("output");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        // 1. Explicit --config flag
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        // 2. OPSBOARD_CONFIG env var
        if let Ok(path) = std::env::var("OPSBOARD_CONFIG") {
            return Some(PathBuf::from(path));
        }

        // 3. XDG default
        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("opsboard").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::serialization(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `OPSBOARD_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::serialization(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "OPSBOARD", &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for OpsboardConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn default_role(&self) -> Option<&str> {
        self.access.default_role.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Test support
// ============================================================================

/// Serialises tests that read or write process environment variables.
#[cfg(test)]
static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Hold this in any test that touches `OPSBOARD_*` or `RUST_LOG`, including
/// tests that parse `CliArgs`, since clap reads `OPSBOARD_CONFIG`.
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

// ============================================================================
// Tests
// ============================================================================
