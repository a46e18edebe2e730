//! Core `UserService` struct and construction.

use crate::auth::{self, Operation, Principal};
use crate::error::{ConfigError, ConfigResult, UserServiceResult};
use crate::gateway::IdentityGateway;
use crate::resource::{RequestContext, UserValidator, ValidationPolicy};

/// Realm used when none is configured.
pub const DEFAULT_REALM: &str = "ITM";

/// Orchestrates validation and identity provider calls.
///
/// Holds no per-request state: every call is independent, and identity
/// records are never cached between calls.
#[derive(Debug)]
pub struct UserService<G> {
    pub(super) gateway: G,
    pub(super) realm: String,
    pub(super) validator: UserValidator,
}

impl<G: IdentityGateway> UserService<G> {
    /// Create a service for the default realm with default validation limits.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            realm: DEFAULT_REALM.to_string(),
            validator: UserValidator::default(),
        }
    }

    pub fn builder(gateway: G) -> UserServiceBuilder<G> {
        UserServiceBuilder::new(gateway)
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn validator(&self) -> &UserValidator {
        &self.validator
    }

    /// Run the authorization gate for `operation`.
    ///
    /// Every operation calls this before touching its input, so rejected
    /// calls have no side effects.
    pub fn authorize<'a>(
        &self,
        context: &'a RequestContext,
        operation: Operation,
    ) -> UserServiceResult<&'a Principal> {
        Ok(auth::authorize(context.principal(), operation)?)
    }
}

/// Builder for [`UserService`].
///
/// ```rust
/// use backend_resources::gateway::InMemoryRealm;
/// use backend_resources::resource::ValidationPolicy;
/// use backend_resources::user_service::UserService;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = UserService::builder(InMemoryRealm::new())
///     .with_realm("ITM")
///     .with_validation_policy(ValidationPolicy {
///         username_max_length: 30,
///         password_min_length: 8,
///     })
///     .build()?;
/// assert_eq!(service.realm(), "ITM");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct UserServiceBuilder<G> {
    gateway: G,
    realm: String,
    policy: ValidationPolicy,
}

impl<G: IdentityGateway> UserServiceBuilder<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            realm: DEFAULT_REALM.to_string(),
            policy: ValidationPolicy::default(),
        }
    }

    /// Set the identity provider realm all operations are scoped to.
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    pub fn with_validation_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// # Errors
    ///
    /// Returns a `ConfigError` if the realm is blank or a length limit is zero.
    pub fn build(self) -> ConfigResult<UserService<G>> {
        if self.realm.trim().is_empty() {
            return Err(ConfigError::invalid("realm must not be blank"));
        }
        if self.policy.username_max_length == 0 {
            return Err(ConfigError::invalid("username max length must be at least 1"));
        }
        if self.policy.password_min_length == 0 {
            return Err(ConfigError::invalid("password min length must be at least 1"));
        }

        Ok(UserService {
            gateway: self.gateway,
            realm: self.realm,
            validator: UserValidator::new(self.policy),
        })
    }
}
