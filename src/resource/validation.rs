//! Structural validation of user creation requests.
//!
//! Violations are collected across all fields and reported together, so a
//! caller sees every problem with a request in a single response.

use super::request::{UserCreateRequest, ValidatedUserRequest};
use super::value_objects::{EmailAddress, Password, PersonName, UserName};
use crate::error::FieldErrors;
use serde::{Deserialize, Serialize};

/// Tunable limits for request validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationPolicy {
    /// Inclusive upper bound on username length, in characters
    pub username_max_length: usize,
    /// Inclusive lower bound on password length, in characters
    pub password_min_length: usize,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            username_max_length: UserName::DEFAULT_MAX_LENGTH,
            password_min_length: Password::DEFAULT_MIN_LENGTH,
        }
    }
}

/// Validates [`UserCreateRequest`]s against a [`ValidationPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UserValidator {
    policy: ValidationPolicy,
}

impl UserValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate every field, returning all violations when any field fails.
    pub fn validate(
        &self,
        request: &UserCreateRequest,
    ) -> Result<ValidatedUserRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = errors.collect(UserName::with_max_length(
            request.username.as_str(),
            self.policy.username_max_length,
        ));
        let email = errors.collect(EmailAddress::new(request.email.as_str()));
        let password = errors.collect(Password::with_min_length(
            request.password.as_str(),
            self.policy.password_min_length,
        ));
        let first_name = errors.collect(PersonName::first(request.first_name.as_str()));
        let last_name = errors.collect(PersonName::last(request.last_name.as_str()));

        match (username, email, password, first_name, last_name) {
            (Some(username), Some(email), Some(password), Some(first_name), Some(last_name)) => {
                Ok(ValidatedUserRequest {
                    username,
                    email,
                    password,
                    first_name,
                    last_name,
                })
            }
            _ => Err(errors),
        }
    }
}
