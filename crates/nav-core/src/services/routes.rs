// ============================================================================
// Nav Core - Route Table
// File: crates/nav-core/src/services/routes.rs
// ============================================================================
//! Nested route definitions for the rendering layer

use serde::Serialize;

use crate::domain::MenuItem;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteHandle {
    pub title: String,
    pub icon: Option<String>,
    pub roles: Vec<String>,
}

/// Content is not resolved here; the renderer hands `hint` to the
/// `RouteResolver` when the route is first visited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDefinition {
    pub path: String,
    pub hint: String,
    pub handle: RouteHandle,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteDefinition>,
}

pub fn generate_routes(tree: &[MenuItem]) -> Vec<RouteDefinition> {
    tree.iter().flat_map(to_routes).collect()
}

/// A group without a path contributes its children's routes in its place.
fn to_routes(item: &MenuItem) -> Vec<RouteDefinition> {
    if !item.is_active {
        return Vec::new();
    }
    if !item.is_navigable() {
        return generate_routes(&item.children);
    }

    let path = item.path.clone().unwrap_or_default();
    let hint = item.resolution_hint().unwrap_or(&path).to_string();
    vec![RouteDefinition {
        hint,
        handle: RouteHandle {
            title: item.title.clone(),
            icon: item.icon.clone(),
            roles: item.roles.clone(),
        },
        children: generate_routes(&item.children),
        path,
    }]
}

/// Routes from the top level down to the one matching `path`.
pub fn route_chain<'a>(routes: &'a [RouteDefinition], path: &str) -> Option<Vec<&'a RouteDefinition>> {
    routes.iter().find_map(|route| {
        if route.path == path {
            return Some(vec![route]);
        }
        route_chain(&route.children, path).map(|mut chain| {
            chain.insert(0, route);
            chain
        })
    })
}
