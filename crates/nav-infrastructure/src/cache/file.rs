// ============================================================================
// Nav Infrastructure - File Cache Storage
// File: crates/nav-infrastructure/src/cache/file.rs
// ============================================================================

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use nav_core::error::NavError;
use nav_core::repositories::CacheStorage;

/// One JSON file per key under `dir`. Writes land in a temp file first and
/// are renamed into place, so a reader never sees a half-written entry.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> NavError {
    NavError::Storage(format!("{} {}: {}", action, path.display(), err))
}

#[async_trait]
impl CacheStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, NavError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("read", &path, e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), NavError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| storage_error("create", &self.dir, e))?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.tmp", Uuid::new_v4()));

        if let Err(e) = tokio::fs::write(&tmp, value.as_bytes()).await {
            return Err(storage_error("write", &tmp, e));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(storage_error("rename", &path, e));
        }

        debug!("Cache entry written to {}", path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), NavError> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("remove", &path, e)),
        }
    }
}
