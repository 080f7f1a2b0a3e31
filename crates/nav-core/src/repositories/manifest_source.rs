//! Manifest source trait (port)

use async_trait::async_trait;
use serde_json::Value;

use crate::error::NavError;

/// Remote endpoint returning the raw menu manifest. The payload is returned
/// untouched; shape normalization happens in the fetcher.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManifestSource: Send + Sync {
    async fn fetch_manifest(&self) -> Result<Value, NavError>;
}
