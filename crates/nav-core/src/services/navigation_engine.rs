// ============================================================================
// Nav Core - Navigation Engine
// File: crates/nav-core/src/services/navigation_engine.rs
// ============================================================================
//! Fetch -> hierarchy -> role filter pipeline bound to the current viewer

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use nav_shared::utils::is_public_route;
use tracing::{debug, info};

use crate::domain::{ContentUnit, MenuItem, ResolvedNode, Viewer};
use crate::error::NavError;
use crate::services::breadcrumbs::{breadcrumbs, Breadcrumb};
use crate::services::hierarchy::build_hierarchy;
use crate::services::manifest_fetcher::ManifestFetcher;
use crate::services::role_filter::{filter_by_roles, retain_navigable};
use crate::services::route_resolver::RouteResolver;
use crate::services::routes::{generate_routes, route_chain, RouteDefinition};

/// What the rendering layer should show for the sidebar
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationState {
    Idle,
    Loading,
    Ready(Arc<Vec<MenuItem>>),
}

impl NavigationState {
    pub fn tree(&self) -> Option<Arc<Vec<MenuItem>>> {
        match self {
            NavigationState::Ready(tree) => Some(tree.clone()),
            _ => None,
        }
    }
}

struct Session {
    viewer: Viewer,
    /// Bumped on every identity change.
    generation: u64,
}

pub struct NavigationEngine {
    fetcher: ManifestFetcher,
    resolver: RouteResolver,
    session: Mutex<Session>,
    state: watch::Sender<NavigationState>,
}

impl NavigationEngine {
    pub fn new(fetcher: ManifestFetcher, resolver: RouteResolver) -> Self {
        let (state, _) = watch::channel(NavigationState::Idle);
        Self {
            fetcher,
            resolver,
            session: Mutex::new(Session {
                viewer: Viewer::anonymous(),
                generation: 0,
            }),
            state,
        }
    }

    /// Stateless pipeline for an arbitrary role set.
    pub async fn get_navigation_tree(&self, viewer_roles: &[String]) -> Vec<MenuItem> {
        let items = self.fetcher.fetch_menu().await;
        Self::assemble(&items, viewer_roles)
    }

    /// Same as `get_navigation_tree` but always goes to the source first.
    pub async fn refresh_tree(&self, viewer_roles: &[String]) -> Vec<MenuItem> {
        let items = self.fetcher.fetch_menu_fresh().await;
        Self::assemble(&items, viewer_roles)
    }

    fn assemble(items: &[MenuItem], viewer_roles: &[String]) -> Vec<MenuItem> {
        let tree = build_hierarchy(items);
        let permitted = filter_by_roles(&tree, viewer_roles);
        retain_navigable(&permitted)
    }

    pub fn viewer(&self) -> Viewer {
        self.session.lock().viewer.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigationState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> NavigationState {
        self.state.borrow().clone()
    }

    pub fn fetcher(&self) -> &ManifestFetcher {
        &self.fetcher
    }

    /// Switches identity and loads the tree for it.
    pub async fn login(&self, viewer: Viewer) -> Result<Arc<Vec<MenuItem>>, NavError> {
        info!(
            "Loading navigation for viewer {:?} (primary role: {:?})",
            viewer.id,
            viewer.primary_role()
        );
        self.switch_viewer(viewer);
        self.load().await
    }

    /// Resets to anonymous and clears the manifest cache. Any load still in
    /// flight for the previous identity is discarded when it returns.
    pub async fn logout(&self) {
        self.switch_viewer(Viewer::anonymous());
        self.fetcher.cache().clear().await;
        self.resolver.forget_all();
        info!("Navigation reset after logout");
    }

    pub async fn load(&self) -> Result<Arc<Vec<MenuItem>>, NavError> {
        self.run(false).await
    }

    /// Bypasses the cache for the current viewer.
    pub async fn refresh(&self) -> Result<Arc<Vec<MenuItem>>, NavError> {
        self.run(true).await
    }

    fn switch_viewer(&self, viewer: Viewer) {
        let mut session = self.session.lock();
        session.viewer = viewer;
        session.generation += 1;
        self.state.send_replace(NavigationState::Idle);
    }

    async fn run(&self, bypass_cache: bool) -> Result<Arc<Vec<MenuItem>>, NavError> {
        let (generation, viewer) = {
            let session = self.session.lock();
            (session.generation, session.viewer.clone())
        };

        if !viewer.is_authenticated {
            let empty = Arc::new(Vec::new());
            self.publish(generation, NavigationState::Ready(empty.clone()))?;
            return Ok(empty);
        }

        self.publish(generation, NavigationState::Loading)?;

        let still_current = || self.is_current(generation);
        let items = self.fetcher.fetch_guarded(bypass_cache, &still_current).await;
        let tree = Arc::new(Self::assemble(&items, &viewer.roles));

        self.publish(generation, NavigationState::Ready(tree.clone()))?;
        debug!("Published navigation tree with {} roots", tree.len());
        Ok(tree)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.session.lock().generation == generation
    }

    /// Publishes under the session lock so an identity switch cannot slip
    /// between the generation check and the send.
    fn publish(&self, generation: u64, state: NavigationState) -> Result<(), NavError> {
        let session = self.session.lock();
        if session.generation != generation {
            debug!("Discarding navigation result for superseded generation {}", generation);
            return Err(NavError::Superseded);
        }
        self.state.send_replace(state);
        Ok(())
    }

    pub async fn resolve(&self, item: &MenuItem) -> ResolvedNode {
        self.resolver.resolve_node(item).await
    }

    pub async fn resolve_hint(&self, hint: &str) -> ContentUnit {
        self.resolver.resolve(hint).await
    }

    /// Routes for the currently published tree; empty until one is ready.
    pub fn routes(&self) -> Vec<RouteDefinition> {
        self.state()
            .tree()
            .map(|tree| generate_routes(&tree))
            .unwrap_or_default()
    }

    /// Route guard for `pathname`. Auth pages are always open; anything else
    /// needs a signed-in viewer holding a role for every route on the way
    /// down to it.
    pub fn authorize(&self, pathname: &str) -> Result<(), NavError> {
        if is_public_route(pathname) {
            return Ok(());
        }

        let viewer = self.viewer();
        if !viewer.is_authenticated {
            return Err(NavError::Unauthorized(format!("login required for {}", pathname)));
        }

        let routes = self.routes();
        let chain = route_chain(&routes, pathname)
            .ok_or_else(|| NavError::NotFound(pathname.to_string()))?;

        match chain.iter().find(|route| !viewer.can_access(&route.handle.roles)) {
            Some(route) => Err(NavError::Forbidden(format!(
                "{} requires one of {:?}",
                route.path, route.handle.roles
            ))),
            None => Ok(()),
        }
    }

    pub fn breadcrumbs(&self, pathname: &str) -> Vec<Breadcrumb> {
        let tree = self.state().tree().unwrap_or_default();
        breadcrumbs(pathname, &tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MenuId;
    use crate::repositories::ManualClock;
    use crate::services::manifest_cache::ManifestCache;
    use crate::services::route_resolver::ContentRegistry;
    use crate::test_support::{MemoryStore, ScriptedSource, StallingStore};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::sync::Notify;

    fn manifest() -> Value {
        json!({
            "data": [
                { "id": 1, "title": "Home", "path": "/", "order": 1 },
                { "id": 2, "menu_title": "Employees", "menu_path": "/employee-list", "menu_order": 2, "roles": ["admin", "manager"] },
                { "id": 3, "title": "Add User", "path": "/users-add", "parent_id": 2, "roles": ["admin"] },
                { "id": 4, "title": "Profile", "path": "/profile-view", "order": 3 },
                { "id": 5, "title": "Legacy", "path": "/legacy", "order": 4, "is_active": false },
                { "id": 6, "title": "Settings", "order": 5 }
            ]
        })
    }

    fn engine_with(source: Arc<ScriptedSource>, store: Arc<MemoryStore>) -> NavigationEngine {
        let cache = ManifestCache::new(store, Arc::new(ManualClock::new(0)), Duration::from_secs(300));
        let registry = ContentRegistry::new()
            .with_page("HomePage", json!({ "title": "Home" }))
            .with_page("profile-view", json!({ "title": "Profile" }));
        NavigationEngine::new(
            ManifestFetcher::new(source, cache),
            RouteResolver::new(registry),
        )
    }

    fn ids(tree: &[MenuItem]) -> Vec<MenuId> {
        tree.iter().map(|i| i.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_pipeline_end_to_end() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(manifest())]));
        let engine = engine_with(source, Arc::new(MemoryStore::default()));

        let admin = engine.get_navigation_tree(&["admin".to_string()]).await;
        assert_eq!(ids(&admin), vec![MenuId::Number(1), MenuId::Number(2), MenuId::Number(4)]);
        assert_eq!(ids(&admin[1].children), vec![MenuId::Number(3)]);

        let manager = engine.get_navigation_tree(&["manager".to_string()]).await;
        assert!(manager[1].children.is_empty());

        let guest = engine.get_navigation_tree(&[]).await;
        assert_eq!(ids(&guest), vec![MenuId::Number(1), MenuId::Number(4)]);
    }

    #[tokio::test]
    async fn test_anonymous_viewer_gets_empty_tree_without_fetch() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(manifest())]));
        let engine = engine_with(source.clone(), Arc::new(MemoryStore::default()));

        let tree = engine.load().await.unwrap();
        assert!(tree.is_empty());
        assert_eq!(source.calls(), 0);
        assert_eq!(engine.state(), NavigationState::Ready(Arc::new(Vec::new())));
    }

    #[tokio::test]
    async fn test_login_publishes_tree() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(manifest())]));
        let engine = engine_with(source, Arc::new(MemoryStore::default()));
        let mut rx = engine.subscribe();

        let tree = engine.login(Viewer::authenticated("u-1", ["admin"])).await.unwrap();
        assert_eq!(tree.len(), 3);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().tree().map(|t| t.len()), Some(3));
        assert_eq!(engine.routes().len(), 3);
        assert_eq!(engine.breadcrumbs("/employee-list")[1].label, "Employees");
    }

    #[tokio::test]
    async fn test_refresh_bypasses_cache() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(manifest()),
            Ok(json!([{ "id": 9, "title": "Only", "path": "/only" }])),
        ]));
        let engine = engine_with(source.clone(), Arc::new(MemoryStore::default()));
        engine.login(Viewer::authenticated("u-1", ["user"])).await.unwrap();

        engine.load().await.unwrap();
        assert_eq!(source.calls(), 1);

        let tree = engine.refresh().await.unwrap();
        assert_eq!(source.calls(), 2);
        assert_eq!(ids(&tree), vec![MenuId::Number(9)]);
    }

    #[tokio::test]
    async fn test_logout_mid_fetch_discards_result() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(ScriptedSource::gated(vec![Ok(manifest())], gate.clone()));
        let store = Arc::new(MemoryStore::default());
        let engine = Arc::new(engine_with(source.clone(), store.clone()));

        let task = {
            let engine = engine.clone();
            tokio::spawn(async move { engine.login(Viewer::authenticated("u-1", ["admin"])).await })
        };

        while source.calls() == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(engine.state(), NavigationState::Loading);

        engine.logout().await;
        gate.notify_one();

        let result = task.await.unwrap();
        assert_eq!(result, Err(NavError::Superseded));
        assert_eq!(engine.state(), NavigationState::Idle);
        assert!(store.raw("app_menu_cache").is_none());
        assert!(!engine.viewer().is_authenticated);
    }

    #[tokio::test]
    async fn test_logout_during_cache_write_leaves_cache_empty() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(json!([
            { "id": 1, "title": "Secret", "path": "/secret", "roles": ["admin"] }
        ]))]));
        let store = Arc::new(StallingStore::default());
        let cache = ManifestCache::new(store.clone(), Arc::new(ManualClock::new(0)), Duration::from_secs(300));
        let engine = Arc::new(NavigationEngine::new(
            ManifestFetcher::new(source, cache),
            RouteResolver::new(ContentRegistry::new()),
        ));

        let login = {
            let engine = engine.clone();
            tokio::spawn(async move { engine.login(Viewer::authenticated("u-1", ["admin"])).await })
        };
        store.entered.notified().await;

        let logout = {
            let engine = engine.clone();
            tokio::spawn(async move { engine.logout().await })
        };
        while engine.viewer().is_authenticated {
            tokio::task::yield_now().await;
        }
        store.release.notify_one();

        assert_eq!(login.await.unwrap(), Err(NavError::Superseded));
        logout.await.unwrap();
        assert!(store.raw("app_menu_cache").is_none());
        assert_eq!(engine.state(), NavigationState::Idle);
    }

    #[tokio::test]
    async fn test_authorize_routes() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(manifest())]));
        let engine = engine_with(source, Arc::new(MemoryStore::default()));

        assert!(matches!(engine.authorize("/profile-view"), Err(NavError::Unauthorized(_))));
        assert_eq!(engine.authorize("/auth/login"), Ok(()));

        engine.login(Viewer::authenticated("u-1", ["manager"])).await.unwrap();
        assert_eq!(engine.authorize("/employee-list"), Ok(()));
        assert_eq!(engine.authorize("/profile-view"), Ok(()));
        // Filtered out for a manager, so it is unknown rather than visible
        assert!(matches!(engine.authorize("/users-add"), Err(NavError::NotFound(_))));

        engine.login(Viewer::authenticated("u-2", ["admin"])).await.unwrap();
        assert_eq!(engine.authorize("/users-add"), Ok(()));
    }

    #[tokio::test]
    async fn test_resolution_through_engine() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(manifest())]));
        let engine = engine_with(source, Arc::new(MemoryStore::default()));
        let tree = engine.login(Viewer::authenticated("u-1", ["user"])).await.unwrap();

        let profile = tree.iter().find(|i| i.id == MenuId::Number(4)).unwrap();
        let node = engine.resolve(profile).await;
        assert_eq!(node.content.identifier(), Some("profile-view"));

        let missing = engine.resolve_hint("/reports/monthly").await;
        assert!(missing.is_fallback());
    }
}
