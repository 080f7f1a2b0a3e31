// ============================================================================
// Nav Core - Role Filter
// File: crates/nav-core/src/services/role_filter.rs
// ============================================================================
//! Per-viewer pruning of the menu forest

use crate::domain::MenuItem;

/// Keeps nodes that are public or share a role with the viewer. A kept
/// parent survives even when every child is pruned. Sibling order is kept.
pub fn filter_by_roles(tree: &[MenuItem], viewer_roles: &[String]) -> Vec<MenuItem> {
    tree.iter()
        .filter(|item| item.is_visible_to(viewer_roles))
        .map(|item| MenuItem {
            children: filter_by_roles(&item.children, viewer_roles),
            ..item.detached()
        })
        .collect()
}

/// Drops inactive nodes with their subtrees. An active node without a path
/// stays as a group while something beneath it survives, and is dropped
/// once it would be an empty leaf.
pub fn retain_navigable(tree: &[MenuItem]) -> Vec<MenuItem> {
    tree.iter()
        .filter(|item| item.is_active)
        .filter_map(|item| {
            let children = retain_navigable(&item.children);
            (item.is_navigable() || !children.is_empty()).then(|| MenuItem {
                children,
                ..item.detached()
            })
        })
        .collect()
}
