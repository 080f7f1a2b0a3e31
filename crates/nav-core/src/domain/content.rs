// ============================================================================
// Nav Core - Content Unit
// File: crates/nav-core/src/domain/content.rs
// Description: Renderable artifact resolved for a navigable node
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use super::MenuItem;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentUnit {
    /// A registered page; `payload` is whatever its factory produced.
    Page { identifier: String, payload: Value },
    /// Placeholder shown when no registered page matches the hint.
    Fallback { hint: String, notice: String },
}

impl ContentUnit {
    pub fn page(identifier: impl Into<String>, payload: Value) -> Self {
        ContentUnit::Page {
            identifier: identifier.into(),
            payload,
        }
    }

    pub fn not_found(hint: &str) -> Self {
        ContentUnit::Fallback {
            hint: hint.to_string(),
            notice: format!(
                "Component Not Found: the component for path \"{}\" could not be loaded.",
                hint
            ),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ContentUnit::Fallback { .. })
    }

    pub fn identifier(&self) -> Option<&str> {
        match self {
            ContentUnit::Page { identifier, .. } => Some(identifier),
            ContentUnit::Fallback { .. } => None,
        }
    }
}

/// A menu item paired with its content. Recomputed per navigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedNode {
    pub item: MenuItem,
    pub content: ContentUnit,
}
