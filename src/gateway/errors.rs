//! Identity provider error types.
//!
//! These describe what the provider reported, independent of how the user
//! service or the HTTP facade reacts to it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Username already taken within the realm
    #[error("User with username '{username}' already exists in realm '{realm}'")]
    Duplicate { realm: String, username: String },

    #[error("User '{id}' not found in realm '{realm}'")]
    NotFound { realm: String, id: String },

    /// Provider could not be reached
    #[error("Identity provider unavailable: {message}")]
    Unavailable { message: String },

    /// Provider answered with an unexpected status
    #[error("Identity provider rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Identity provider internal error: {message}")]
    Internal { message: String },
}

impl GatewayError {
    pub fn duplicate(realm: impl Into<String>, username: impl Into<String>) -> Self {
        Self::Duplicate {
            realm: realm.into(),
            username: username.into(),
        }
    }

    pub fn not_found(realm: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            realm: realm.into(),
            id: id.to_string(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a duplicate username error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}
