//! Bearer credential authentication.
//!
//! Credentials are registered against a [`Principal`]. Authentication consumes
//! a [`LinearCredential`] and yields an [`AuthenticationWitness`], which is the
//! only way to obtain an authenticated principal from a raw token.
//!
//! ```rust
//! use backend_resources::auth::{AuthenticationValidator, LinearCredential, Principal};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = AuthenticationValidator::new();
//! validator
//!     .register_credential("token-123", Principal::new("alice", ["MODERATOR"]))
//!     .await;
//!
//! let witness = validator
//!     .authenticate(LinearCredential::new("token-123"))
//!     .await?;
//! assert_eq!(witness.principal().username(), "alice");
//! # Ok(())
//! # }
//! ```

use super::Principal;
use log::debug;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const BEARER_SCHEME: &str = "Bearer";

/// Raw credential that can only be consumed once.
#[derive(Debug)]
pub struct LinearCredential {
    value: String,
}

impl LinearCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Parse an `Authorization` header value of the form `Bearer <token>`.
    ///
    /// The scheme is matched case-insensitively.
    pub fn from_authorization_header(header: &str) -> Result<Self, AuthenticationError> {
        let (scheme, token) = header
            .trim()
            .split_once(' ')
            .ok_or(AuthenticationError::MalformedAuthorization)?;

        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            return Err(AuthenticationError::UnsupportedScheme(scheme.to_string()));
        }

        let token = token.trim();
        if token.is_empty() {
            return Err(AuthenticationError::MalformedAuthorization);
        }

        Ok(Self::new(token))
    }

    /// Consume this credential for authentication
    pub fn consume(self) -> String {
        self.value
    }
}

/// Proof that a credential was validated.
///
/// Only [`AuthenticationValidator::authenticate`] constructs it.
#[derive(Debug, Clone)]
pub struct AuthenticationWitness {
    principal: Principal,
    credential_hash: String,
    validated_at: chrono::DateTime<chrono::Utc>,
}

impl AuthenticationWitness {
    fn new(principal: Principal, credential_hash: String) -> Self {
        Self {
            principal,
            credential_hash,
            validated_at: chrono::Utc::now(),
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn into_principal(self) -> Principal {
        self.principal
    }

    /// SHA-256 fingerprint of the credential, safe to log
    pub fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    pub fn validated_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.validated_at
    }
}

/// Registry of bearer credentials.
#[derive(Debug, Clone, Default)]
pub struct AuthenticationValidator {
    credentials: Arc<RwLock<HashMap<String, Principal>>>,
}

impl AuthenticationValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a credential, replacing any principal previously bound to it.
    pub async fn register_credential(&self, credential: impl Into<String>, principal: Principal) {
        let mut creds = self.credentials.write().await;
        creds.insert(credential.into(), principal);
    }

    /// Remove a credential. Returns whether it was registered.
    pub async fn revoke_credential(&self, credential: &str) -> bool {
        let mut creds = self.credentials.write().await;
        creds.remove(credential).is_some()
    }

    pub async fn credential_count(&self) -> usize {
        self.credentials.read().await.len()
    }

    /// Authenticate a credential, consuming it.
    pub async fn authenticate(
        &self,
        credential: LinearCredential,
    ) -> Result<AuthenticationWitness, AuthenticationError> {
        let raw = credential.consume();
        let credential_hash = fingerprint(&raw);

        let creds = self.credentials.read().await;
        match creds.get(&raw) {
            Some(principal) => {
                debug!(
                    "Authenticated '{}' (credential {})",
                    principal.username(),
                    &credential_hash[..12]
                );
                Ok(AuthenticationWitness::new(principal.clone(), credential_hash))
            }
            None => {
                debug!("Unknown credential {}", &credential_hash[..12]);
                Err(AuthenticationError::InvalidCredential)
            }
        }
    }
}

fn fingerprint(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Authentication errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credential provided")]
    InvalidCredential,
    #[error("Malformed Authorization header")]
    MalformedAuthorization,
    #[error("Unsupported authorization scheme '{0}'")]
    UnsupportedScheme(String),
}
