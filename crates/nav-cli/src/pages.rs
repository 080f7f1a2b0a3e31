//! Built-in content registry for the dashboard pages

use nav_core::services::ContentRegistry;
use serde_json::json;

/// Identifiers follow the dashboard naming: PascalCase `...Page` for the
/// main sections, kebab-case for nested views.
pub fn dashboard_registry() -> ContentRegistry {
    ContentRegistry::new()
        .with_page("HomePage", json!({ "title": "Home" }))
        .with_page("EmployeeList", json!({ "title": "Employee List" }))
        .with_page("UsersAdd", json!({ "title": "Add User" }))
        .with_page("LoginPage", json!({ "title": "Login" }))
        .with_page("profile-view", json!({ "title": "Profile" }))
        .with_page("profile-edit", json!({ "title": "Edit Profile" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav_core::services::{NamingStrategy, RouteResolver};

    #[tokio::test]
    async fn test_dashboard_paths_resolve() {
        let resolver =
            RouteResolver::with_strategies(dashboard_registry(), NamingStrategy::defaults("Page"));

        for (hint, expected) in [
            ("HomePage", "HomePage"),
            ("/login", "LoginPage"),
            ("/employee-list", "EmployeeList"),
            ("/users-add", "UsersAdd"),
            ("/profile-view", "profile-view"),
        ] {
            assert_eq!(resolver.resolve(hint).await.identifier(), Some(expected), "{}", hint);
        }
        assert!(resolver.resolve("/reports").await.is_fallback());
    }
}
