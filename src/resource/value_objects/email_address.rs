//! EmailAddress value object.

use super::is_blank;
use crate::error::{ValidationError, ValidationResult};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// RFC 5322 style address pattern.
///
/// Local part: dot-separated atoms. Domain: dot-separated labels that start
/// and end with an alphanumeric character.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)*[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$",
    )
    .expect("EMAIL_REGEX is a valid regex pattern")
});

/// Maximum address length (RFC 5321).
const MAX_EMAIL_LENGTH: usize = 254;

/// A validated email address.
///
/// ## Validation Rules
///
/// - Must not be blank
/// - Must not exceed 254 characters
/// - Must match the address pattern (`local@domain`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        let value = value.into();
        Self::validate_value(&value)?;
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, domain)| domain).unwrap_or_default()
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn validate_value(value: &str) -> ValidationResult<()> {
        if is_blank(value) || value.chars().count() > MAX_EMAIL_LENGTH {
            return Err(ValidationError::InvalidEmail);
        }
        if !EMAIL_REGEX.is_match(value) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}
