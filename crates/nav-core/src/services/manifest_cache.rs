// ============================================================================
// Nav Core - Manifest Cache
// File: crates/nav-core/src/services/manifest_cache.rs
// ============================================================================
//! Time-boxed cache of the last canonical manifest over injected storage

use std::sync::Arc;
use std::time::Duration;

use nav_shared::constants::DEFAULT_CACHE_KEY;
use nav_shared::EpochMillis;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::MenuItem;
use crate::repositories::{CacheStorage, Clock};

/// Serialized form: `{ "data": [...], "timestamp": <epoch ms> }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(rename = "data")]
    pub payload: Vec<MenuItem>,
    #[serde(rename = "timestamp")]
    pub fetched_at: EpochMillis,
}

impl CacheEntry {
    pub fn is_expired(&self, now: EpochMillis, ttl: Duration) -> bool {
        now - self.fetched_at > ttl.as_millis() as i64
    }
}

/// Storage failures never escape: a failed read is a miss and a failed
/// write leaves caching as a no-op.
///
/// Writes and clears are serialized, so a clear issued while a write is in
/// flight always lands after it.
#[derive(Clone)]
pub struct ManifestCache {
    storage: Arc<dyn CacheStorage>,
    clock: Arc<dyn Clock>,
    key: String,
    ttl: Duration,
    write_lock: Arc<Mutex<()>>,
}

impl ManifestCache {
    pub fn new(storage: Arc<dyn CacheStorage>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            storage,
            clock,
            key: DEFAULT_CACHE_KEY.to_string(),
            ttl,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn now_ms(&self) -> EpochMillis {
        self.clock.now_ms()
    }

    /// Raw entry regardless of age.
    pub async fn entry(&self) -> Option<CacheEntry> {
        let raw = match self.storage.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read menu cache: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Discarding unreadable menu cache entry: {}", e);
                None
            }
        }
    }

    /// Cached payload; `None` when absent, unreadable, or expired unless
    /// `ignore_expiry` is set.
    pub async fn read(&self, ignore_expiry: bool) -> Option<Vec<MenuItem>> {
        let entry = self.entry().await?;
        let now = self.clock.now_ms();

        if !ignore_expiry && entry.is_expired(now, self.ttl) {
            debug!("Menu cache expired (age: {} ms)", now - entry.fetched_at);
            return None;
        }

        Some(entry.payload)
    }

    pub async fn write(&self, items: &[MenuItem]) {
        self.write_if(items, &|| true).await;
    }

    /// Writes only if `still_current` holds once the write slot is taken.
    /// Returns whether the entry was stored.
    pub async fn write_if(
        &self,
        items: &[MenuItem],
        still_current: &(dyn Fn() -> bool + Send + Sync),
    ) -> bool {
        let _slot = self.write_lock.lock().await;
        if !still_current() {
            debug!("Menu cache write skipped for a superseded fetch");
            return false;
        }

        let entry = CacheEntry {
            payload: items.to_vec(),
            fetched_at: self.clock.now_ms(),
        };

        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize menu cache: {}", e);
                return false;
            }
        };

        match self.storage.set(&self.key, raw).await {
            Ok(()) => {
                debug!("Cached {} menu items", items.len());
                true
            }
            Err(e) => {
                warn!("Failed to cache menu: {}", e);
                false
            }
        }
    }

    pub async fn clear(&self) {
        let _slot = self.write_lock.lock().await;
        if let Err(e) = self.storage.remove(&self.key).await {
            warn!("Failed to clear menu cache: {}", e);
        }
    }
}
