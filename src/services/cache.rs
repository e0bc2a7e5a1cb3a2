// src/services/cache.rs
// DOCUMENTATION: Session-scoped suggestion cache over an injectable blob store
// PURPOSE: Serve repeated queries without a network round-trip

use crate::models::PlacePrediction;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Key/value store holding one serialized blob per named slot
/// DOCUMENTATION: The persistence seam. The default MemoryStore lives for the
/// process; swap in any backend (file, browser session storage behind FFI)
/// without touching the cache logic. Fakeable in tests.
pub trait BlobStore: Send + Sync {
    fn get_blob(&self, key: &str) -> Option<String>;
    fn set_blob(&self, key: &str, value: String);
}

/// In-memory blob store, the session-storage analogue
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get_blob(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_blob(&self, key: &str, value: String) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }
}

/// One cached prediction list with its absolute expiry instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Vec<PlacePrediction>,

    /// Expiry as epoch milliseconds; camelCase to match the persisted layout
    #[serde(rename = "maxAge")]
    pub max_age: i64,
}

impl CacheEntry {
    fn is_fresh(&self, now_millis: i64) -> bool {
        self.max_age - now_millis >= 0
    }
}

/// TTL cache over a single serialized slot
/// DOCUMENTATION: The whole mapping is rewritten on every store (read-modify-
/// write of one blob, not per-key updates), which lazily prunes expired
/// entries. A pure lookup never writes. Last write wins under concurrent
/// stores; the cache is best-effort, not authoritative.
pub struct SuggestionCache {
    store: Arc<dyn BlobStore>,
    slot: String,
    ttl_secs: i64,
}

impl SuggestionCache {
    pub fn new(store: Arc<dyn BlobStore>, slot: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            store,
            slot: slot.into(),
            ttl_secs,
        }
    }

    /// Return the cached predictions for a query iff the entry is still fresh
    /// DOCUMENTATION: Keys are lower-cased. Expired or absent entries report
    /// a miss; expired ones stay physically present until the next store.
    pub fn lookup(&self, key: &str) -> Option<Vec<PlacePrediction>> {
        let key = key.to_lowercase();
        let now = Utc::now().timestamp_millis();

        match self.read_slot().get(&key) {
            Some(entry) if entry.is_fresh(now) => {
                log::debug!("Cache HIT for key: {}", key);
                Some(entry.data.clone())
            }
            Some(_) => {
                log::debug!("Cache EXPIRED for key: {}", key);
                None
            }
            None => {
                log::debug!("Cache MISS for key: {}", key);
                None
            }
        }
    }

    /// Insert or overwrite the entry for a query and rewrite the slot
    /// DOCUMENTATION: Entries already past their expiry are filtered out of
    /// the rewritten blob.
    pub fn store(&self, key: &str, predictions: Vec<PlacePrediction>) {
        let key = key.to_lowercase();
        let now = Utc::now().timestamp_millis();

        let mut entries: HashMap<String, CacheEntry> = self
            .read_slot()
            .into_iter()
            .filter(|(_, entry)| entry.is_fresh(now))
            .collect();

        entries.insert(
            key.clone(),
            CacheEntry {
                data: predictions,
                max_age: now + self.ttl_secs * 1000,
            },
        );

        match serde_json::to_string(&entries) {
            Ok(blob) => {
                self.store.set_blob(&self.slot, blob);
                log::debug!("Cache SET for key: {} (TTL: {}s)", key, self.ttl_secs);
            }
            Err(e) => log::error!("Failed to serialize cache blob: {}", e),
        }
    }

    /// Deserialize the current slot blob, treating anything unreadable as empty
    fn read_slot(&self) -> HashMap<String, CacheEntry> {
        let Some(blob) = self.store.get_blob(&self.slot) else {
            return HashMap::new();
        };

        match serde_json::from_str(&blob) {
            Ok(entries) => entries,
            Err(e) => {
                // Self-heals on the next store
                log::warn!("Unreadable cache blob in slot {}: {}", self.slot, e);
                HashMap::new()
            }
        }
    }
}
