//! Server configuration.
//!
//! Configuration comes from a JSON file ([`ServerConfig::from_json_file`]),
//! from `BACKEND_RESOURCES_*` environment variables ([`ServerConfig::from_env`])
//! or from the fluent [`ServerConfigBuilder`]. All three paths end in
//! [`ServerConfig::validate`].
//!
//! # Environment Variables
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `BACKEND_RESOURCES_BIND_ADDRESS` | listen address | `127.0.0.1:8080` |
//! | `BACKEND_RESOURCES_REALM` | identity provider realm | `ITM` |
//! | `BACKEND_RESOURCES_USERNAME_MAX_LENGTH` | username limit | `50` |
//! | `BACKEND_RESOURCES_PASSWORD_MIN_LENGTH` | password minimum | `5` |
//! | `BACKEND_RESOURCES_CREDENTIALS` | `token=username:ROLE1\|ROLE2;...` | none |

use crate::auth::{AuthenticationValidator, Principal};
use crate::error::{ConfigError, ConfigResult};
use crate::gateway::IdentityGateway;
use crate::resource::ValidationPolicy;
use crate::user_service::{DEFAULT_REALM, UserService};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;

pub const ENV_PREFIX: &str = "BACKEND_RESOURCES_";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// A bearer token and the principal it authenticates as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialConfig {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl CredentialConfig {
    pub fn new<I, S>(token: impl Into<String>, username: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            token: token.into(),
            username: username.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse one `token=username:ROLE1|ROLE2` entry. The role list is optional.
    pub fn parse(entry: &str) -> ConfigResult<Self> {
        let invalid = |message: &str| ConfigError::InvalidVariable {
            variable: format!("{}CREDENTIALS", ENV_PREFIX),
            message: format!("{} in entry '{}'", message, entry),
        };

        let (token, rest) = entry
            .split_once('=')
            .ok_or_else(|| invalid("missing '='"))?;
        let (username, roles) = rest.split_once(':').unwrap_or((rest, ""));

        let token = token.trim();
        let username = username.trim();
        if token.is_empty() {
            return Err(invalid("empty token"));
        }
        if username.is_empty() {
            return Err(invalid("empty username"));
        }

        let roles = roles
            .split('|')
            .map(str::trim)
            .filter(|role| !role.is_empty());
        Ok(Self::new(token, username, roles))
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.username.clone(), self.roles.iter().map(String::as_str))
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    pub bind_address: String,
    pub realm: String,
    pub validation: ValidationPolicy,
    pub credentials: Vec<CredentialConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            realm: DEFAULT_REALM.to_string(),
            validation: ValidationPolicy::default(),
            credentials: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load from `BACKEND_RESOURCES_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names to values.
    ///
    /// Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| {
            let name = format!("{}{}", ENV_PREFIX, suffix);
            lookup(&name).map(|value| (name, value))
        };
        let mut config = Self::default();

        if let Some((_, value)) = var("BIND_ADDRESS") {
            config.bind_address = value;
        }
        if let Some((_, value)) = var("REALM") {
            config.realm = value;
        }
        if let Some((name, value)) = var("USERNAME_MAX_LENGTH") {
            config.validation.username_max_length = parse_length(&name, &value)?;
        }
        if let Some((name, value)) = var("PASSWORD_MIN_LENGTH") {
            config.validation.password_min_length = parse_length(&name, &value)?;
        }
        if let Some((_, value)) = var("CREDENTIALS") {
            config.credentials = value
                .split(';')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(CredentialConfig::parse)
                .collect::<ConfigResult<_>>()?;
        }

        config.validate()?;
        debug!(
            "Loaded configuration from environment ({} credentials)",
            config.credentials.len()
        );
        Ok(config)
    }

    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        self.socket_addr()?;

        if self.realm.trim().is_empty() {
            return Err(ConfigError::invalid("realm must not be blank"));
        }
        if self.validation.username_max_length == 0 {
            return Err(ConfigError::invalid("username max length must be at least 1"));
        }
        if self.validation.password_min_length == 0 {
            return Err(ConfigError::invalid("password min length must be at least 1"));
        }

        let mut seen = HashSet::new();
        for credential in &self.credentials {
            if credential.token.trim().is_empty() || credential.username.trim().is_empty() {
                return Err(ConfigError::invalid("credentials need a token and a username"));
            }
            if !seen.insert(credential.token.as_str()) {
                return Err(ConfigError::invalid(format!(
                    "credential token for '{}' is registered twice",
                    credential.username
                )));
            }
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        self.bind_address
            .parse()
            .map_err(|e| ConfigError::InvalidVariable {
                variable: "bindAddress".to_string(),
                message: format!("'{}': {}", self.bind_address, e),
            })
    }

    /// Build a [`UserService`] for this realm and validation policy.
    pub fn build_service<G: IdentityGateway>(&self, gateway: G) -> ConfigResult<UserService<G>> {
        UserService::builder(gateway)
            .with_realm(self.realm.clone())
            .with_validation_policy(self.validation)
            .build()
    }

    /// Registry seeded with every configured credential.
    pub async fn authenticator(&self) -> AuthenticationValidator {
        let authenticator = AuthenticationValidator::new();
        for credential in &self.credentials {
            authenticator
                .register_credential(credential.token.clone(), credential.principal())
                .await;
        }
        authenticator
    }
}

fn parse_length(variable: &str, value: &str) -> ConfigResult<usize> {
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::InvalidVariable {
            variable: variable.to_string(),
            message: format!("'{}': {}", value, e),
        })
}

/// Fluent builder for [`ServerConfig`].
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn with_bind_address(mut self, address: impl Into<String>) -> Self {
        self.config.bind_address = address.into();
        self
    }

    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.config.realm = realm.into();
        self
    }

    pub fn with_validation_policy(mut self, policy: ValidationPolicy) -> Self {
        self.config.validation = policy;
        self
    }

    pub fn with_credential(mut self, credential: CredentialConfig) -> Self {
        self.config.credentials.push(credential);
        self
    }

    pub fn build(self) -> ConfigResult<ServerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
