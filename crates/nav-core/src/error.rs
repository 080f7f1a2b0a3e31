//! Navigation errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Component failed to load: {identifier}: {reason}")]
    ComponentLoad { identifier: String, reason: String },

    #[error("Navigation load superseded by an identity change")]
    Superseded,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for NavError {
    fn from(e: serde_json::Error) -> Self {
        NavError::Parse(e.to_string())
    }
}
