// ============================================================================
// Nav Core - Menu Item Entity
// File: crates/nav-core/src/domain/menu_item.rs
// Description: Canonical manifest entry, also used as tree node
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

/// Menu identifier as sent by the backend: numeric or textual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuId::Number(n) => write!(f, "{}", n),
            MenuId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MenuId {
    fn from(n: i64) -> Self {
        MenuId::Number(n)
    }
}

impl From<&str> for MenuId {
    fn from(s: &str) -> Self {
        MenuId::Text(s.to_string())
    }
}

impl From<String> for MenuId {
    fn from(s: String) -> Self {
        MenuId::Text(s)
    }
}

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub parent_id: Option<MenuId>,

    #[serde(default)]
    pub order: i64,

    /// Required roles; empty means public
    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Explicit resolution hint, falls back to `path`
    #[serde(default)]
    pub component: Option<String>,

    #[serde(default)]
    pub children: Vec<MenuItem>,
}

fn default_active() -> bool {
    true
}

impl MenuItem {
    pub fn new(id: impl Into<MenuId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            path: None,
            icon: None,
            parent_id: None,
            order: 0,
            roles: Vec::new(),
            is_active: true,
            component: None,
            children: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<MenuId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_public(&self) -> bool {
        self.roles.is_empty()
    }

    /// Public, or at least one required role is held by the viewer.
    pub fn is_visible_to(&self, viewer_roles: &[String]) -> bool {
        self.is_public() || self.roles.iter().any(|r| viewer_roles.contains(r))
    }

    pub fn is_navigable(&self) -> bool {
        self.is_active && self.path.as_deref().is_some_and(|p| !p.is_empty())
    }

    pub fn resolution_hint(&self) -> Option<&str> {
        self.component
            .as_deref()
            .filter(|c| !c.is_empty())
            .or_else(|| self.path.as_deref().filter(|p| !p.is_empty()))
    }

    /// Copy of this item with the subtree dropped.
    pub fn detached(&self) -> Self {
        Self {
            children: Vec::new(),
            ..self.clone()
        }
    }
}

/// Depth-first search for the node whose path equals `path`.
pub fn find_by_path<'a>(tree: &'a [MenuItem], path: &str) -> Option<&'a MenuItem> {
    tree.iter().find_map(|item| {
        if item.path.as_deref() == Some(path) {
            Some(item)
        } else {
            find_by_path(&item.children, path)
        }
    })
}

/// Total number of nodes in a forest.
pub fn count_nodes(tree: &[MenuItem]) -> usize {
    tree.iter().map(|item| 1 + count_nodes(&item.children)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility() {
        let public = MenuItem::new(1, "Home").with_path("/");
        let admin = MenuItem::new(2, "Users").with_roles(["admin"]);

        assert!(public.is_visible_to(&[]));
        assert!(!admin.is_visible_to(&[]));
        assert!(admin.is_visible_to(&["user".into(), "admin".into()]));
    }

    #[test]
    fn test_navigability_and_hint() {
        let item = MenuItem::new(1, "Users").with_path("/dashboard/users");
        assert!(item.is_navigable());
        assert_eq!(item.resolution_hint(), Some("/dashboard/users"));

        let item = item.with_component("UsersList");
        assert_eq!(item.resolution_hint(), Some("UsersList"));

        assert!(!MenuItem::new(2, "Group").is_navigable());
        assert!(!MenuItem::new(3, "Old").with_path("/old").inactive().is_navigable());
        assert!(!MenuItem::new(4, "Blank").with_path("").is_navigable());
    }

    #[test]
    fn test_canonical_json_shape() {
        let item = MenuItem::new(7, "Profile")
            .with_path("/profile")
            .with_parent("root")
            .with_roles(["user"]);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["parentId"], "root");
        assert_eq!(json["isActive"], true);

        let back: MenuItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_find_by_path() {
        let tree = vec![MenuItem::new(1, "Dashboard")
            .with_path("/dashboard")
            .with_children(vec![MenuItem::new(2, "Users").with_path("/dashboard/users")])];
        assert_eq!(find_by_path(&tree, "/dashboard/users").map(|i| i.title.as_str()), Some("Users"));
        assert!(find_by_path(&tree, "/missing").is_none());
        assert_eq!(count_nodes(&tree), 2);
    }
}
