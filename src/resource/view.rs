//! Read-only user projection returned by lookups.

use crate::gateway::IdentityRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// User as seen by API callers.
///
/// Built fresh from the provider record on every lookup; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roles: BTreeSet<String>,
    pub groups: BTreeSet<String>,
}

impl From<IdentityRecord> for UserView {
    fn from(record: IdentityRecord) -> Self {
        Self {
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            roles: record.realm_roles,
            groups: record.groups,
        }
    }
}
