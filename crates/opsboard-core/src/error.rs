//! Error types for Opsboard operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Opsboard crates. Uses `thiserror` for derive macros.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur in Opsboard operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// Path being read or written.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Item not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A subject lacks the permission an operation requires.
    #[error("Access denied: {0}")]
    AccessDenied(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an access denied error.
    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::AccessDenied(msg.into())
    }

    /// Wrap an I/O error with the path that produced it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Returns `true` for errors caused by bad configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` for access denials.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied(_))
    }
}

/// Result type alias using Opsboard's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_config_display() {
        let err = Error::config("missing default role");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing default role"
        );
        assert!(err.is_config());
        assert!(!err.is_access_denied());
    }

    #[test]
    fn test_error_access_denied() {
        let err = Error::access_denied("/dashboard requires view_dashboard");
        assert!(err.is_access_denied());
        assert!(err.to_string().starts_with("Access denied:"));
    }

    #[test]
    fn test_error_io_with_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io_with_path(io, "/etc/opsboard/config.toml");
        let msg = err.to_string();
        assert!(msg.contains("/etc/opsboard/config.toml"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::other("boom");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_helpers() {
        assert!(matches!(Error::not_found("x"), Error::NotFound(_)));
        assert!(matches!(Error::invalid_data("x"), Error::InvalidData(_)));
        assert!(matches!(Error::serialization("x"), Error::Serialization(_)));
    }
}
