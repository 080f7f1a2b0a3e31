//! Domain services (pipeline stages)

pub mod manifest_cache;
pub mod manifest_normalizer;
pub mod manifest_fetcher;
pub mod hierarchy;
pub mod role_filter;
pub mod route_resolver;
pub mod routes;
pub mod breadcrumbs;
pub mod navigation_engine;

pub use manifest_cache::{CacheEntry, ManifestCache};
pub use manifest_normalizer::normalize_manifest;
pub use manifest_fetcher::ManifestFetcher;
pub use hierarchy::{build_hierarchy, MenuArena};
pub use role_filter::{filter_by_roles, retain_navigable};
pub use route_resolver::{canonical_identifier, ContentRegistry, NamingStrategy, RouteResolver};
pub use routes::{generate_routes, route_chain, RouteDefinition, RouteHandle};
pub use breadcrumbs::{breadcrumbs, Breadcrumb};
pub use navigation_engine::{NavigationEngine, NavigationState};
