//! In-memory identity provider.
//!
//! Thread-safe implementation of [`IdentityGateway`] backed by nested maps
//! behind a tokio `RwLock`. Used by tests, benchmarks and the demo server in
//! place of a real identity provider.
//!
//! # Features
//!
//! * Realm isolation through the `realm` → `id` map structure
//! * Username uniqueness checked and enforced under a single write lock
//! * Passwords stored as SHA-256 digests only
//! * Outage simulation via [`InMemoryRealm::set_available`]

use super::{GatewayError, IdentityGateway, IdentityRecord, NewIdentity};
use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredIdentity {
    record: IdentityRecord,
    password_digest: String,
}

/// Thread-safe in-memory identity provider.
///
/// Clones share the same underlying data.
#[derive(Debug, Clone)]
pub struct InMemoryRealm {
    // Structure: realm -> id -> identity
    data: Arc<RwLock<HashMap<String, HashMap<Uuid, StoredIdentity>>>>,
    default_roles: Arc<BTreeSet<String>>,
    available: Arc<AtomicBool>,
}

impl InMemoryRealm {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
            default_roles: Arc::new(BTreeSet::new()),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Realm roles granted to every newly created identity.
    pub fn with_default_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_roles = Arc::new(roles.into_iter().map(Into::into).collect());
        self
    }

    /// Simulate the provider going down (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        if !available {
            warn!("In-memory identity provider marked unavailable");
        }
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Grant a realm role to an identity.
    pub async fn assign_realm_role(
        &self,
        realm: &str,
        id: Uuid,
        role: impl Into<String>,
    ) -> Result<(), GatewayError> {
        self.modify(realm, id, |record| {
            record.realm_roles.insert(role.into());
        })
        .await
    }

    /// Add an identity to a group.
    pub async fn assign_group(
        &self,
        realm: &str,
        id: Uuid,
        group: impl Into<String>,
    ) -> Result<(), GatewayError> {
        self.modify(realm, id, |record| {
            record.groups.insert(group.into());
        })
        .await
    }

    /// Check a username/password pair against the stored credential.
    pub async fn verify_password(&self, realm: &str, username: &str, password: &str) -> bool {
        let data_guard = self.data.read().await;
        let digest = digest_password(password);
        let folded = fold_username(username);
        data_guard
            .get(realm)
            .into_iter()
            .flat_map(|identities| identities.values())
            .any(|stored| {
                fold_username(&stored.record.username) == folded
                    && stored.password_digest == digest
            })
    }

    /// Get storage statistics for debugging and tests.
    pub async fn stats(&self) -> InMemoryRealmStats {
        let data_guard = self.data.read().await;
        InMemoryRealmStats {
            realm_count: data_guard.len(),
            total_identities: data_guard.values().map(HashMap::len).sum(),
        }
    }

    /// Number of identities in one realm.
    pub async fn count(&self, realm: &str) -> usize {
        let data_guard = self.data.read().await;
        data_guard.get(realm).map(HashMap::len).unwrap_or(0)
    }

    /// Clear all data (useful for testing).
    pub async fn clear(&self) {
        let mut data_guard = self.data.write().await;
        data_guard.clear();
    }

    fn ensure_available(&self) -> Result<(), GatewayError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(GatewayError::unavailable("connection refused"))
        }
    }

    async fn modify<F>(&self, realm: &str, id: Uuid, apply: F) -> Result<(), GatewayError>
    where
        F: FnOnce(&mut IdentityRecord),
    {
        self.ensure_available()?;
        let mut data_guard = self.data.write().await;
        let stored = data_guard
            .get_mut(realm)
            .and_then(|identities| identities.get_mut(&id))
            .ok_or_else(|| GatewayError::not_found(realm, id))?;
        apply(&mut stored.record);
        Ok(())
    }
}

impl Default for InMemoryRealm {
    fn default() -> Self {
        Self::new()
    }
}

/// Case folding shared by uniqueness, search and password checks.
fn fold_username(username: &str) -> String {
    username.to_lowercase()
}

fn digest_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl IdentityGateway for InMemoryRealm {
    async fn create(&self, realm: &str, identity: NewIdentity) -> Result<Uuid, GatewayError> {
        self.ensure_available()?;

        // Uniqueness check and insert happen under the same write lock
        let mut data_guard = self.data.write().await;
        let identities = data_guard.entry(realm.to_string()).or_default();

        let folded = fold_username(&identity.username);
        let taken = identities
            .values()
            .any(|stored| fold_username(&stored.record.username) == folded);
        if taken {
            debug!(
                "Rejecting duplicate username '{}' in realm '{}'",
                identity.username, realm
            );
            return Err(GatewayError::duplicate(realm, identity.username));
        }

        let id = Uuid::new_v4();
        let record = IdentityRecord {
            id,
            username: identity.username,
            email: identity.email,
            first_name: identity.first_name,
            last_name: identity.last_name,
            enabled: identity.enabled,
            realm_roles: self.default_roles.as_ref().clone(),
            groups: BTreeSet::new(),
            created_at: chrono::Utc::now(),
        };
        info!("Created identity '{}' ({}) in realm '{}'", record.username, id, realm);

        identities.insert(
            id,
            StoredIdentity {
                record,
                password_digest: digest_password(&identity.password),
            },
        );

        Ok(id)
    }

    async fn fetch_by_id(&self, realm: &str, id: Uuid) -> Result<IdentityRecord, GatewayError> {
        self.ensure_available()?;

        let data_guard = self.data.read().await;
        data_guard
            .get(realm)
            .and_then(|identities| identities.get(&id))
            .map(|stored| stored.record.clone())
            .ok_or_else(|| GatewayError::not_found(realm, id))
    }

    async fn search_by_username(
        &self,
        realm: &str,
        username: &str,
    ) -> Result<Vec<IdentityRecord>, GatewayError> {
        self.ensure_available()?;

        let needle = fold_username(username);
        let data_guard = self.data.read().await;

        let mut results: Vec<IdentityRecord> = data_guard
            .get(realm)
            .into_iter()
            .flat_map(|identities| identities.values())
            .filter(|stored| fold_username(&stored.record.username).contains(&needle))
            .map(|stored| stored.record.clone())
            .collect();

        // Sort results by username for consistency
        results.sort_by(|a, b| a.username.cmp(&b.username));

        Ok(results)
    }

    async fn delete_by_id(&self, realm: &str, id: Uuid) -> Result<(), GatewayError> {
        self.ensure_available()?;

        let mut data_guard = self.data.write().await;
        let removed = data_guard
            .get_mut(realm)
            .and_then(|identities| identities.remove(&id));

        match removed {
            Some(stored) => {
                info!(
                    "Deleted identity '{}' ({}) from realm '{}'",
                    stored.record.username, id, realm
                );
                Ok(())
            }
            None => Err(GatewayError::not_found(realm, id)),
        }
    }
}

/// Statistics about the current state of the in-memory provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryRealmStats {
    /// Number of realms holding at least one identity
    pub realm_count: usize,
    /// Total number of identities across realms
    pub total_identities: usize,
}
