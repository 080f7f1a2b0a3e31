// ============================================================================
// Nav Infrastructure - Engine Factory
// File: crates/nav-infrastructure/src/engine_factory.rs
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use nav_core::error::NavError;
use nav_core::repositories::{CacheStorage, SystemClock};
use nav_core::services::{
    ContentRegistry, ManifestCache, ManifestFetcher, NamingStrategy, NavigationEngine,
    RouteResolver,
};
use nav_shared::config::NavConfig;

use crate::cache::{FileStorage, MemoryStorage};
use crate::http::HttpManifestSource;

/// Wires the HTTP source, cache storage and resolver from configuration.
pub fn build_engine(
    config: &NavConfig,
    registry: ContentRegistry,
) -> Result<NavigationEngine, NavError> {
    let source = Arc::new(HttpManifestSource::new(&config.api)?);
    info!("Menu manifest source: {}", source.url());

    let storage: Arc<dyn CacheStorage> = match config.cache.dir.as_deref() {
        Some(dir) => {
            info!("Menu cache persisted under {}", dir);
            Arc::new(FileStorage::new(dir))
        }
        None => Arc::new(MemoryStorage::new()),
    };

    let cache = ManifestCache::new(
        storage,
        Arc::new(SystemClock),
        Duration::from_secs(config.cache.ttl_seconds),
    )
    .with_key(config.cache.key.clone());

    let resolver = RouteResolver::with_strategies(
        registry,
        NamingStrategy::defaults(&config.resolver.page_suffix),
    );

    Ok(NavigationEngine::new(ManifestFetcher::new(source, cache), resolver))
}
