//! Error types for user management operations.
//!
//! Every layer reports failures through a typed `thiserror` enum. The HTTP
//! facade translates [`UserServiceError`] into status codes; nothing below it
//! knows about HTTP.

use crate::auth::AuthError;
use crate::gateway::GatewayError;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Main error type for user service operations.
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Client input is malformed; carries one message per offending field.
    #[error("Validation error: {0}")]
    Validation(#[from] FieldErrors),

    /// No identity is attached to the request
    #[error("Authentication required")]
    Unauthenticated,

    /// Identity is attached but lacks the required role
    #[error("Access denied for '{username}': {required} required")]
    Forbidden { username: String, required: String },

    /// The identity provider has no user with this id
    #[error("User not found: {id}")]
    NotFound { id: String },

    /// The identity provider already holds a user with this username
    #[error("User already exists: {username}")]
    Conflict { username: String },

    /// Any other provider or infrastructure fault.
    ///
    /// Surfaced as a server error and never retried internally.
    #[error("Identity provider error: {0}")]
    Unknown(#[source] GatewayError),
}

impl UserServiceError {
    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a conflict error
    pub fn conflict(username: impl Into<String>) -> Self {
        Self::Conflict {
            username: username.into(),
        }
    }

    /// Stable machine-readable code, used in error bodies and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::NotFound { .. } => "USER_NOT_FOUND",
            Self::Conflict { .. } => "USER_ALREADY_EXISTS",
            Self::Unknown(GatewayError::Unavailable { .. }) => "PROVIDER_UNAVAILABLE",
            Self::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// Whether the failure was caused by the client rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// HTTP status code this failure is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unauthenticated => 401,
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Unknown(GatewayError::Unavailable { .. }) => 502,
            Self::Unknown(_) => 500,
        }
    }
}

impl From<ValidationError> for UserServiceError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(FieldErrors::from(error))
    }
}

impl From<AuthError> for UserServiceError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Unauthenticated => Self::Unauthenticated,
            AuthError::Forbidden { username, required } => Self::Forbidden {
                username,
                required: required.to_string(),
            },
        }
    }
}

/// A single field violation.
///
/// The `Display` text is the human-readable message returned to callers;
/// [`ValidationError::attribute`] names the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Username should not be blank")]
    BlankUsername,

    #[error("Username should be between 1 and {max} characters long")]
    UsernameLength { max: usize },

    #[error("Email should be valid")]
    InvalidEmail,

    /// `threshold` is the largest rejected length.
    #[error("Password should be greater than {threshold} characters long")]
    PasswordTooShort { threshold: usize },

    /// Generic non-blank constraint for free-text attributes
    #[error("must not be blank")]
    Blank { attribute: String },

    #[error("Invalid user id format")]
    InvalidId { value: String },
}

impl ValidationError {
    /// Name of the request field this violation belongs to.
    pub fn attribute(&self) -> &str {
        match self {
            Self::BlankUsername | Self::UsernameLength { .. } => "username",
            Self::InvalidEmail => "email",
            Self::PasswordTooShort { .. } => "password",
            Self::Blank { attribute } => attribute,
            Self::InvalidId { .. } => "id",
        }
    }

    /// Create a blank-field error
    pub fn blank(attribute: impl Into<String>) -> Self {
        Self::Blank {
            attribute: attribute.into(),
        }
    }
}

/// Field name to message map reported for a rejected request.
///
/// Holds at most one message per field; the first violation recorded for a
/// field wins. Serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    violations: BTreeMap<String, ValidationError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation unless the field already has one.
    pub fn push(&mut self, error: ValidationError) {
        self.violations
            .entry(error.attribute().to_string())
            .or_insert(error);
    }

    /// Record the error side of a validation result, returning the value on success.
    pub fn collect<T>(&mut self, result: ValidationResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.violations.get(field)
    }

    /// Message for a field, as it appears in the response body.
    pub fn message(&self, field: &str) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.push(error);
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.violations {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, error)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            self.violations
                .iter()
                .map(|(field, error)| (field, error.to_string())),
        )
    }
}

/// Errors raised while loading or validating server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Invalid value for {variable}: {message}")]
    InvalidVariable { variable: String, message: String },

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type UserServiceResult<T> = Result<T, UserServiceError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
