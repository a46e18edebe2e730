//! Role-based authorization gate and bearer credential authentication.
//!
//! Every user operation declares the [`Requirement`] it needs through
//! [`Operation::required`]. The single [`authorize`] function checks a caller
//! against that declaration before the operation body runs, so a rejected call
//! never has partial side effects.
//!
//! # Example Usage
//!
//! ```rust
//! use backend_resources::auth::{authorize, AuthError, Operation, Principal};
//!
//! let moderator = Principal::new("mod", ["MODERATOR"]);
//! let user = Principal::new("bob", ["USER"]);
//!
//! assert!(authorize(Some(&moderator), Operation::CreateUser).is_ok());
//! assert!(matches!(
//!     authorize(Some(&user), Operation::CreateUser),
//!     Err(AuthError::Forbidden { .. })
//! ));
//! assert!(authorize(Some(&user), Operation::Hello).is_ok());
//! assert!(matches!(
//!     authorize(None, Operation::Hello),
//!     Err(AuthError::Unauthenticated)
//! ));
//! ```

pub mod credentials;

pub use credentials::{
    AuthenticationError, AuthenticationValidator, AuthenticationWitness, LinearCredential,
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Prefix some identity providers put in front of role names.
const ROLE_PREFIX: &str = "ROLE_";

/// Role name, normalized to upper case without the `ROLE_` prefix.
///
/// `moderator`, `MODERATOR` and `ROLE_MODERATOR` are the same role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Role(String);

impl Role {
    /// Role required to manage other users' accounts.
    pub const MODERATOR: &'static str = "MODERATOR";

    pub fn new(name: impl AsRef<str>) -> Self {
        let upper = name.as_ref().trim().to_uppercase();
        let stripped = upper.strip_prefix(ROLE_PREFIX).unwrap_or(&upper);
        Self(stripped.to_string())
    }

    pub fn moderator() -> Self {
        Self::new(Self::MODERATOR)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    username: String,
    roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new<I, R>(username: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Self {
            username: username.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}

/// What a caller must present to run an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Any authenticated identity, regardless of roles
    Authenticated,
    /// At least one of the listed roles
    AnyRole(BTreeSet<Role>),
}

impl Requirement {
    pub fn any_role<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Self::AnyRole(roles.into_iter().map(Into::into).collect())
    }

    pub fn is_satisfied_by(&self, principal: &Principal) -> bool {
        match self {
            Self::Authenticated => true,
            Self::AnyRole(roles) => roles.iter().any(|role| principal.has_role(role)),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated => f.write_str("authentication"),
            Self::AnyRole(roles) => {
                let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
                write!(f, "role {}", names.join(" or "))
            }
        }
    }
}

/// Operations guarded by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateUser,
    GetUserById,
    SearchUsers,
    Hello,
}

impl Operation {
    /// Declared requirement for this operation.
    pub fn required(self) -> Requirement {
        match self {
            Self::CreateUser | Self::GetUserById | Self::SearchUsers => {
                Requirement::any_role([Role::MODERATOR])
            }
            Self::Hello => Requirement::Authenticated,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateUser => "create_user",
            Self::GetUserById => "get_user_by_id",
            Self::SearchUsers => "search_users",
            Self::Hello => "hello",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication required")]
    Unauthenticated,
    #[error("'{username}' lacks {required}")]
    Forbidden {
        username: String,
        required: Requirement,
    },
}

/// Check `principal` against the requirement declared by `operation`.
///
/// Returns the principal on success so callers can continue with a
/// non-optional identity.
pub fn authorize(
    principal: Option<&Principal>,
    operation: Operation,
) -> Result<&Principal, AuthError> {
    let Some(principal) = principal else {
        debug!("Rejected anonymous call to {}", operation);
        return Err(AuthError::Unauthenticated);
    };

    let required = operation.required();
    if !required.is_satisfied_by(principal) {
        warn!(
            "Access denied: '{}' called {} without {}",
            principal.username(),
            operation,
            required
        );
        return Err(AuthError::Forbidden {
            username: principal.username().to_string(),
            required,
        });
    }

    debug!("Access granted: '{}' -> {}", principal.username(), operation);
    Ok(principal)
}
