//! Identity provider abstraction.
//!
//! The identity provider is the system of record for user accounts. This
//! module defines the admin operations the service consumes through the
//! [`IdentityGateway`] trait, keeping provider specifics out of the user
//! service.
//!
//! # Responsibilities
//!
//! The gateway is responsible for:
//! - Creating identities and rejecting duplicate usernames atomically
//! - Fetching, searching and deleting identities within a realm
//! - Reporting provider failures as [`GatewayError`]
//!
//! The gateway is NOT responsible for:
//! - Validating request fields
//! - Authorization of callers
//! - Mapping failures to HTTP statuses
//!
//! # Example Usage
//!
//! ```rust
//! use backend_resources::gateway::{IdentityGateway, InMemoryRealm, NewIdentity};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let realm = InMemoryRealm::new();
//! let id = realm
//!     .create("ITM", NewIdentity::new("alice", "a@example.com", "secret1", "A", "B"))
//!     .await?;
//!
//! let record = realm.fetch_by_id("ITM", id).await?;
//! assert_eq!(record.username, "alice");
//!
//! realm.delete_by_id("ITM", id).await?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;

pub use errors::GatewayError;
pub use in_memory::{InMemoryRealm, InMemoryRealmStats};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use uuid::Uuid;

/// Identity as stored by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub enabled: bool,
    pub realm_roles: BTreeSet<String>,
    pub groups: BTreeSet<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Payload for creating an identity.
#[derive(Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub username: String,
    pub email: String,
    /// Initial password credential, never persisted in clear text
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub enabled: bool,
}

impl NewIdentity {
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
            enabled: true,
        }
    }
}

impl fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewIdentity")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Admin operations of an identity provider, scoped by realm.
///
/// # Behavior
///
/// - `create` must check username uniqueness and insert atomically; concurrent
///   creates of one username must yield exactly one success
/// - Username comparison is case-insensitive
/// - No operation retries internally; failures surface immediately
pub trait IdentityGateway: Send + Sync {
    /// Create an identity and return its provider-assigned id.
    ///
    /// Fails with [`GatewayError::Duplicate`] if the username is taken.
    fn create(
        &self,
        realm: &str,
        identity: NewIdentity,
    ) -> impl Future<Output = Result<Uuid, GatewayError>> + Send;

    /// Fetch an identity by id.
    ///
    /// Fails with [`GatewayError::NotFound`] if it does not exist.
    fn fetch_by_id(
        &self,
        realm: &str,
        id: Uuid,
    ) -> impl Future<Output = Result<IdentityRecord, GatewayError>> + Send;

    /// Search identities whose username contains `username`, case-insensitively.
    ///
    /// Results are ordered by username. An empty vector means no match.
    fn search_by_username(
        &self,
        realm: &str,
        username: &str,
    ) -> impl Future<Output = Result<Vec<IdentityRecord>, GatewayError>> + Send;

    /// Delete an identity by id.
    ///
    /// Fails with [`GatewayError::NotFound`] if it does not exist.
    fn delete_by_id(
        &self,
        realm: &str,
        id: Uuid,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}
