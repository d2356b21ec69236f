use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::platform::Platform;

/// An independently configured remote sales channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub platform: Platform,
    pub base_url: String,
    /// API credential, encrypted at rest by the `CredentialCipher`
    /// collaborator. `None` for stores reachable without one.
    pub api_credential: Option<String>,
    pub active: bool,
    pub last_synced_at: Option<DateTime<Utc>>,
}

/// Selection predicate for multi-store sync targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreFilter {
    pub platform: Platform,
    pub active_only: bool,
}

impl StoreFilter {
    pub fn active_on(platform: Platform) -> Self {
        Self {
            platform,
            active_only: true,
        }
    }

    pub fn matches(&self, store: &Store) -> bool {
        store.platform == self.platform && (!self.active_only || store.active)
    }
}
