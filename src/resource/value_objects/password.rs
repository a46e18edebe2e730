//! Password value object.
//!
//! Passwords are forwarded to the identity provider as credentials and never
//! echoed back, so the type has no `Serialize` impl and redacts itself in
//! `Debug` output.

use crate::error::{ValidationError, ValidationResult};
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const DEFAULT_MIN_LENGTH: usize = 5;

    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        Self::with_min_length(value, Self::DEFAULT_MIN_LENGTH)
    }

    /// Require at least `min_length` characters.
    pub fn with_min_length(value: impl Into<String>, min_length: usize) -> ValidationResult<Self> {
        let value = value.into();
        if value.chars().count() < min_length {
            return Err(ValidationError::PasswordTooShort {
                threshold: min_length.saturating_sub(1),
            });
        }
        Ok(Self(value))
    }

    /// Plain-text value, for handing to the identity provider only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
