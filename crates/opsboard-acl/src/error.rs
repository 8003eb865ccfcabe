//! Error types for parsing access-control names.
//!
//! The predicates themselves never fail; errors only arise when turning
//! user-supplied strings into catalog types.

use thiserror::Error;

/// Errors raised while parsing role and permission names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AclError {
    /// The name does not match any role.
    #[error("unknown role '{name}'{}", hint(.suggestion))]
    UnknownRole {
        /// The name as given.
        name: String,
        /// Closest known role, if any is close enough.
        suggestion: Option<String>,
    },

    /// The token does not match any catalog permission.
    #[error("unknown permission '{token}'{}", hint(.suggestion))]
    UnknownPermission {
        /// The token as given.
        token: String,
        /// Closest catalog token, if any is close enough.
        suggestion: Option<String>,
    },
}

impl AclError {
    /// The suggested replacement, if one was found.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::UnknownRole { suggestion, .. } | Self::UnknownPermission { suggestion, .. } => {
                suggestion.as_deref()
            }
        }
    }
}

fn hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}

impl From<AclError> for opsboard_core::Error {
    fn from(err: AclError) -> Self {
        opsboard_core::Error::invalid_data(err.to_string())
    }
}

/// Result type alias for access-control parsing.
pub type Result<T> = std::result::Result<T, AclError>;
