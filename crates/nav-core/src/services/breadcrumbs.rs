// ============================================================================
// Nav Core - Breadcrumbs
// File: crates/nav-core/src/services/breadcrumbs.rs
// ============================================================================

use nav_shared::utils::kebab_to_title;
use serde::Serialize;

use crate::domain::{find_by_path, MenuItem};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub path: String,
    pub is_last: bool,
}

/// Trail for `pathname`: `Home` then one crumb per segment. Labels come from
/// the menu node with the same path when there is one. Empty on `/`.
pub fn breadcrumbs(pathname: &str, tree: &[MenuItem]) -> Vec<Breadcrumb> {
    let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Vec::new();
    }

    let mut trail = vec![Breadcrumb {
        label: "Home".to_string(),
        path: "/".to_string(),
        is_last: false,
    }];

    let mut current = String::new();
    for (i, segment) in segments.iter().enumerate() {
        current.push('/');
        current.push_str(segment);

        let label = find_by_path(tree, &current)
            .map(|item| item.title.clone())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| kebab_to_title(segment));

        trail.push(Breadcrumb {
            label,
            path: current.clone(),
            is_last: i == segments.len() - 1,
        });
    }

    trail
}
