//! User creation request payloads.

use super::value_objects::{EmailAddress, Password, PersonName, UserName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /api/users`.
///
/// Missing keys deserialize as empty strings so that they surface as field
/// violations instead of body rejections.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserCreateRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserCreateRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl fmt::Debug for UserCreateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreateRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// A request whose every field passed validation.
///
/// Only [`UserValidator::validate`](super::UserValidator::validate) builds one.
#[derive(Debug, Clone)]
pub struct ValidatedUserRequest {
    pub username: UserName,
    pub email: EmailAddress,
    pub password: Password,
    pub first_name: PersonName,
    pub last_name: PersonName,
}
