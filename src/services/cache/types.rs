//! Snapshot, entry and event types for the external data cache

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// One fetched entry: either the payload or the recorded fetch error. A
/// failing endpoint stores its error in-band instead of aborting the refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheEntry {
    Failure { error: String },
    Payload(Value),
}

impl CacheEntry {
    pub fn is_failure(&self) -> bool {
        matches!(self, CacheEntry::Failure { .. })
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            CacheEntry::Payload(value) => Some(value),
            CacheEntry::Failure { .. } => None,
        }
    }
}

/// Full entry set of one named cache, replaced wholesale per refresh and
/// persisted atomically as one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub entries: BTreeMap<String, CacheEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheSnapshot {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now < expires_at)
    }

    /// Successful payloads only, keyed by source.
    pub fn payloads(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter_map(|(key, entry)| entry.payload().map(|value| (key.as_str(), value)))
    }
}

/// Settings one cache instance is constructed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub name: String,
    pub endpoints: Vec<String>,
    pub ttl: Duration,
}

impl CacheConfig {
    pub fn new(name: impl Into<String>, endpoints: Vec<String>, ttl: Duration) -> Self {
        Self {
            name: name.into(),
            endpoints,
            ttl,
        }
    }
}

/// How a refresh cycle completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A network round was performed and the snapshot rebuilt
    Fetched,
    /// The persistent tier was still fresh and reused without fetches
    ReusedPersistent,
}

/// Broadcast after every completed refresh cycle
#[derive(Debug, Clone)]
pub struct CacheRefreshEvent {
    pub cache: String,
    pub outcome: RefreshOutcome,
    /// Endpoints the cache covers
    pub sources: usize,
    /// Entries recorded as failures in this cycle
    pub failures: usize,
    pub timestamp: DateTime<Utc>,
}
