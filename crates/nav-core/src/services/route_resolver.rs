// ============================================================================
// Nav Core - Route Resolver
// File: crates/nav-core/src/services/route_resolver.rs
// ============================================================================
//! Lazy hint -> content resolution against a static registry
//!
//! A path hint is turned into a canonical identifier
//! (`/dashboard/user-list` -> `DashboardUserList`) and each naming strategy
//! proposes one candidate, tried in order against the registry. When no
//! candidate loads, the caller still gets a placeholder unit.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt};
use nav_shared::constants::DEFAULT_PAGE_SUFFIX;
use nav_shared::utils::{capitalize_first, pascal_to_kebab};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};

use crate::domain::{ContentUnit, MenuItem, ResolvedNode};
use crate::error::NavError;

pub type ContentFuture = BoxFuture<'static, Result<ContentUnit, NavError>>;
pub type ContentLoader = Arc<dyn Fn() -> ContentFuture + Send + Sync>;

/// Identifier -> content factory. Built once at startup.
#[derive(Clone, Default)]
pub struct ContentRegistry {
    loaders: HashMap<String, ContentLoader>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F, Fut>(&mut self, identifier: impl Into<String>, loader: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ContentUnit, NavError>> + Send + 'static,
    {
        self.loaders
            .insert(identifier.into(), Arc::new(move || loader().boxed()));
    }

    /// Registers a page whose content is known up front.
    pub fn register_page(&mut self, identifier: impl Into<String>, payload: Value) {
        let identifier = identifier.into();
        let unit = ContentUnit::page(identifier.clone(), payload);
        self.register(identifier, move || {
            let unit = unit.clone();
            async move { Ok(unit) }
        });
    }

    pub fn with_page(mut self, identifier: impl Into<String>, payload: Value) -> Self {
        self.register_page(identifier, payload);
        self
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.loaders.contains_key(identifier)
    }

    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub async fn load(&self, identifier: &str) -> Result<ContentUnit, NavError> {
        let loader = self
            .loaders
            .get(identifier)
            .cloned()
            .ok_or_else(|| NavError::ComponentNotFound(identifier.to_string()))?;
        loader().await
    }
}

/// One way of spelling a canonical identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingStrategy {
    /// `DashboardUserList`
    Exact,
    /// `DashboardUserListPage`
    Suffixed(String),
    /// `dashboard-user-list`
    KebabCase,
}

impl NamingStrategy {
    pub fn candidate(&self, canonical: &str) -> String {
        match self {
            NamingStrategy::Exact => canonical.to_string(),
            NamingStrategy::Suffixed(suffix) => format!("{}{}", canonical, suffix),
            NamingStrategy::KebabCase => pascal_to_kebab(canonical),
        }
    }

    pub fn defaults(page_suffix: &str) -> Vec<Self> {
        vec![
            NamingStrategy::Exact,
            NamingStrategy::Suffixed(page_suffix.to_string()),
            NamingStrategy::KebabCase,
        ]
    }
}

/// `/dashboard/user-list` -> `DashboardUserList`
pub fn canonical_identifier(hint: &str) -> String {
    hint.strip_prefix('/')
        .unwrap_or(hint)
        .split(['/', '-'])
        .map(capitalize_first)
        .collect()
}

pub struct RouteResolver {
    registry: ContentRegistry,
    strategies: Vec<NamingStrategy>,
    resolved: DashMap<String, Arc<OnceCell<ContentUnit>>>,
}

impl RouteResolver {
    pub fn new(registry: ContentRegistry) -> Self {
        Self::with_strategies(registry, NamingStrategy::defaults(DEFAULT_PAGE_SUFFIX))
    }

    pub fn with_strategies(registry: ContentRegistry, strategies: Vec<NamingStrategy>) -> Self {
        Self {
            registry,
            strategies,
            resolved: DashMap::new(),
        }
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    /// Identifiers tried for `hint`, in order.
    pub fn candidates(&self, hint: &str) -> Vec<String> {
        let canonical = canonical_identifier(hint);
        self.strategies
            .iter()
            .map(|s| s.candidate(&canonical))
            .collect()
    }

    /// Never fails. Successful resolutions are memoized per hint and
    /// concurrent calls for one hint share a single load; placeholders are
    /// not memoized so a later registry hit can still win.
    pub async fn resolve(&self, hint: &str) -> ContentUnit {
        if hint.is_empty() {
            return ContentUnit::not_found(hint);
        }

        let cell = self.resolved.entry(hint.to_string()).or_default().clone();

        match cell.get_or_try_init(|| self.load(hint)).await {
            Ok(unit) => unit.clone(),
            Err(e) => {
                warn!("Failed to load component for path {}: {}", hint, e);
                self.resolved.remove_if(hint, |_, cell| cell.get().is_none());
                ContentUnit::not_found(hint)
            }
        }
    }

    /// Number of hints with a memoized or in-flight resolution.
    pub fn memoized(&self) -> usize {
        self.resolved.len()
    }

    pub async fn resolve_node(&self, item: &MenuItem) -> ResolvedNode {
        let hint = item.resolution_hint().unwrap_or_default();
        ResolvedNode {
            item: item.detached(),
            content: self.resolve(hint).await,
        }
    }

    /// Drops memoized results, e.g. after the registry's backing pages change.
    pub fn forget_all(&self) {
        self.resolved.clear();
    }

    async fn load(&self, hint: &str) -> Result<ContentUnit, NavError> {
        for candidate in self.candidates(hint) {
            match self.registry.load(&candidate).await {
                Ok(unit) => {
                    debug!("Resolved {} to component {}", hint, candidate);
                    return Ok(unit);
                }
                Err(NavError::ComponentNotFound(_)) => {
                    trace!("No component registered as {}", candidate);
                }
                Err(e) => {
                    warn!("Component {} failed to load: {}", candidate, e);
                }
            }
        }
        Err(NavError::ComponentNotFound(canonical_identifier(hint)))
    }
}
