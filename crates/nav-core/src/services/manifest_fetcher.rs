// ============================================================================
// Nav Core - Manifest Fetcher
// File: crates/nav-core/src/services/manifest_fetcher.rs
// ============================================================================
//! Cache-first manifest retrieval with stale fallback

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::MenuItem;
use crate::repositories::ManifestSource;
use crate::services::manifest_cache::ManifestCache;
use crate::services::manifest_normalizer::normalize_manifest;

/// Availability over freshness: neither method ever fails. A broken
/// backend degrades to the last cached manifest, or to an empty one.
#[derive(Clone)]
pub struct ManifestFetcher {
    source: Arc<dyn ManifestSource>,
    cache: ManifestCache,
}

impl ManifestFetcher {
    pub fn new(source: Arc<dyn ManifestSource>, cache: ManifestCache) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &ManifestCache {
        &self.cache
    }

    /// Fresh cache hit, else one remote fetch.
    pub async fn fetch_menu(&self) -> Vec<MenuItem> {
        self.fetch_guarded(false, &|| true).await
    }

    /// Skips the freshness check but keeps the stale fallback.
    pub async fn fetch_menu_fresh(&self) -> Vec<MenuItem> {
        self.fetch_guarded(true, &|| true).await
    }

    /// `still_current` is checked after the remote call returns; when it
    /// says no, the payload is returned but not written to the cache.
    pub async fn fetch_guarded(
        &self,
        bypass_cache: bool,
        still_current: &(dyn Fn() -> bool + Send + Sync),
    ) -> Vec<MenuItem> {
        if !bypass_cache {
            if let Some(cached) = self.cache.read(false).await {
                debug!("Serving {} menu items from cache", cached.len());
                return cached;
            }
        }
        self.fetch_remote(still_current).await
    }

    async fn fetch_remote(&self, still_current: &(dyn Fn() -> bool + Send + Sync)) -> Vec<MenuItem> {
        match self.source.fetch_manifest().await {
            Ok(raw) => {
                let items = normalize_manifest(&raw);
                // Evaluated under the cache's write slot
                if !self.cache.write_if(&items, still_current).await {
                    debug!("Fetch superseded or cache unavailable, menu cache untouched");
                }
                info!("Fetched menu manifest with {} items", items.len());
                items
            }
            Err(e) => {
                error!("Failed to fetch menu: {}", e);
                match self.cache.read(true).await {
                    Some(stale) => {
                        warn!("Serving {} stale menu items after fetch failure", stale.len());
                        stale
                    }
                    None => Vec::new(),
                }
            }
        }
    }
}
