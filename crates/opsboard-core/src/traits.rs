//! Core traits for Opsboard configuration.
//!
//! These traits define the extension points that applications implement
//! to customise Opsboard's behaviour. The primary trait is [`ConfigProvider`],
//! which abstracts the settings the CLI framework reads at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// How command results are rendered.
///
/// Serializes as lowercase. Deserialization accepts any case, matching
/// [`FromStr`], so `OPSBOARD_OUTPUT_FORMAT=JSON` loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable plain text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Returns the format name as used in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::config(format!(
                "Unknown output format '{other}' (expected 'text' or 'json')"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Trait for application configuration.
///
/// Every Opsboard-based application implements this trait to provide
/// the settings that the CLI framework needs: project identity, the role
/// used when a command names no subject, and the output format.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use opsboard_core::traits::{ConfigProvider, OutputFormat};
///
/// #[derive(Clone)]
/// struct DispatchDeskConfig;
///
/// impl ConfigProvider for DispatchDeskConfig {
///     fn project_name(&self) -> &str {
///         "dispatch-desk"
///     }
///
///     fn default_role(&self) -> Option<&str> {
///         Some("human_coordinator")
///     }
/// }
///
/// let config = DispatchDeskConfig;
/// assert_eq!(config.output_format(), OutputFormat::Text);
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Role name to evaluate when a command does not name a subject.
    ///
    /// The name is not validated here; callers parse it against the role
    /// table and report unknown names.
    fn default_role(&self) -> Option<&str>;

    /// Output format for command results.
    fn output_format(&self) -> OutputFormat {
        OutputFormat::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestConfig {
        name: String,
        role: Option<String>,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            &self.name
        }

        fn default_role(&self) -> Option<&str> {
            self.role.as_deref()
        }
    }

    #[test]
    fn test_config_provider_project_name() {
        let config = TestConfig {
            name: "test-project".into(),
            role: None,
        };
        assert_eq!(config.project_name(), "test-project");
    }

    #[test]
    fn test_config_provider_default_role() {
        let config = TestConfig {
            name: "test".into(),
            role: Some("manager".into()),
        };
        assert_eq!(config.default_role(), Some("manager"));
    }

    #[test]
    fn test_config_provider_default_output_format() {
        let config = TestConfig {
            name: "test".into(),
            role: None,
        };
        assert_eq!(config.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_config_provider_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TestConfig>();
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_output_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Json).unwrap();
        assert_eq!(json, "\"json\"");
        let parsed: OutputFormat = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(parsed, OutputFormat::Text);
    }

    #[test]
    fn test_output_format_deserialize_any_case() {
        let parsed: OutputFormat = serde_json::from_str("\"JSON\"").unwrap();
        assert_eq!(parsed, OutputFormat::Json);
        let parsed: OutputFormat = serde_json::from_str("\"Text\"").unwrap();
        assert_eq!(parsed, OutputFormat::Text);
        assert!(serde_json::from_str::<OutputFormat>("\"xml\"").is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::default().to_string(), "text");
    }
}
