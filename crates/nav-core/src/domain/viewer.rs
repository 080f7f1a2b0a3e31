// ============================================================================
// Nav Core - Viewer Identity
// File: crates/nav-core/src/domain/viewer.rs
// Description: Current identity with role checks
// ============================================================================

use nav_shared::constants::ROLE_HIERARCHY;
use serde::{Deserialize, Serialize};

/// Identity the navigation tree is built for. Supplied by the auth layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub is_authenticated: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated<I, S>(id: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: Some(id.into()),
            display_name: None,
            is_authenticated: true,
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// False for an empty `roles` list.
    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        roles.iter().any(|r| self.has_role(r.as_ref()))
    }

    /// An empty requirement means the route is public.
    pub fn can_access<S: AsRef<str>>(&self, required_roles: &[S]) -> bool {
        required_roles.is_empty() || self.has_any_role(required_roles)
    }

    /// Highest role in admin > manager > user, else the first held role.
    pub fn primary_role(&self) -> Option<&str> {
        for role in ROLE_HIERARCHY {
            if self.has_role(role) {
                return Some(role);
            }
        }
        self.roles.first().map(String::as_str)
    }
}
