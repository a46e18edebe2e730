//! UserName value object.
//!
//! User names identify an account within a realm. Uniqueness is the identity
//! provider's job; this type only enforces the structural rules.

use super::is_blank;
use crate::error::{ValidationError, ValidationResult};
use serde::{Serialize, Serializer};
use std::fmt;

/// A validated user name.
///
/// ## Validation Rules
///
/// - Must not be blank
/// - Must be at most [`UserName::DEFAULT_MAX_LENGTH`] characters, or the
///   configured maximum when built through [`UserName::with_max_length`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub const DEFAULT_MAX_LENGTH: usize = 50;

    /// Create a new UserName with the default length limit.
    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        Self::with_max_length(value, Self::DEFAULT_MAX_LENGTH)
    }

    /// Create a new UserName with an explicit length limit.
    ///
    /// Length is counted in characters, not bytes.
    pub fn with_max_length(value: impl Into<String>, max_length: usize) -> ValidationResult<Self> {
        let value = value.into();
        if is_blank(&value) {
            return Err(ValidationError::BlankUsername);
        }
        if value.chars().count() > max_length {
            return Err(ValidationError::UsernameLength { max: max_length });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for UserName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl TryFrom<String> for UserName {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UserName {
    type Error = ValidationError;

    fn try_from(value: &str) -> ValidationResult<Self> {
        Self::new(value)
    }
}
