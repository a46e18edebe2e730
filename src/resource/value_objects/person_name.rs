//! First and last name value object.

use super::is_blank;
use crate::error::{ValidationError, ValidationResult};
use serde::{Serialize, Serializer};
use std::fmt;

/// A non-blank name component, tagged with the request field it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    attribute: &'static str,
    value: String,
}

impl PersonName {
    /// `attribute` names the field in violation messages, e.g. `"firstName"`.
    pub fn new(attribute: &'static str, value: impl Into<String>) -> ValidationResult<Self> {
        let value = value.into();
        if is_blank(&value) {
            return Err(ValidationError::blank(attribute));
        }
        Ok(Self { attribute, value })
    }

    pub fn first(value: impl Into<String>) -> ValidationResult<Self> {
        Self::new("firstName", value)
    }

    pub fn last(value: impl Into<String>) -> ValidationResult<Self> {
        Self::new("lastName", value)
    }

    pub fn attribute(&self) -> &str {
        self.attribute
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Serialize for PersonName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}
