//! Utility functions

use crate::constants::PUBLIC_ROUTES;

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `DashboardUserList` -> `dashboard-user-list`
pub fn pascal_to_kebab(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
        }
        out.extend(c.to_lowercase());
    }
    match out.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => out,
    }
}

/// `user-list` -> `User List`
pub fn kebab_to_title(segment: &str) -> String {
    segment
        .split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_public_route(url: &str) -> bool {
    PUBLIC_ROUTES.iter().any(|route| url.contains(route))
}
