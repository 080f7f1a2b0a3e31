//! Cache storage trait (port)

use async_trait::async_trait;

use crate::error::NavError;

/// Key-value text store backing the manifest cache. `set` must replace the
/// whole value atomically: readers observe either the old or the new text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, NavError>;
    async fn set(&self, key: &str, value: String) -> Result<(), NavError>;
    async fn remove(&self, key: &str) -> Result<(), NavError>;
}
