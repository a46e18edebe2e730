//! Canned principals, tokens and requests.

use backend_resources::auth::Principal;
use backend_resources::{RequestContext, UserCreateRequest};

pub const REALM: &str = "ITM";
pub const MODERATOR_TOKEN: &str = "moderator-token";
pub const USER_TOKEN: &str = "user-token";

pub fn moderator() -> Principal {
    Principal::new("moderator", ["ROLE_MODERATOR"])
}

pub fn plain_user() -> Principal {
    Principal::new("bob", ["ROLE_USER"])
}

pub fn moderator_context() -> RequestContext {
    RequestContext::authenticated(moderator())
}

pub fn user_context() -> RequestContext {
    RequestContext::authenticated(plain_user())
}

pub fn anonymous_context() -> RequestContext {
    RequestContext::with_generated_id()
}

/// A request that passes validation.
pub fn valid_request() -> UserCreateRequest {
    UserCreateRequest::new(
        "username_",
        "email_@example.com",
        "password",
        "firstName",
        "lastName",
    )
}

/// Usernames rejected by the default policy.
pub fn invalid_usernames() -> Vec<String> {
    vec![String::new(), " ".to_string(), "u".repeat(51)]
}

pub fn invalid_emails() -> Vec<&'static str> {
    vec!["", "invalid-email", "plainaddress", "user@", "@example.com"]
}

pub fn short_passwords() -> Vec<&'static str> {
    vec!["", "1", "1234"]
}
