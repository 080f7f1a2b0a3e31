//! Fakes shared by the unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tokio::sync::Notify;

use crate::error::NavError;
use crate::repositories::{CacheStorage, ManifestSource};

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl CacheStorage for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, NavError> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), NavError> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), NavError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Source replaying a scripted sequence of responses; the last one repeats.
pub struct ScriptedSource {
    responses: Mutex<Vec<Result<Value, NavError>>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Value, NavError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Every fetch waits for `gate.notify_one()` before answering.
    pub fn gated(responses: Vec<Result<Value, NavError>>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(responses)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ManifestSource for ScriptedSource {
    async fn fetch_manifest(&self) -> Result<Value, NavError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let mut responses = self.responses.lock();
        if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses
                .first()
                .cloned()
                .unwrap_or_else(|| Err(NavError::Transport("no scripted response".into())))
        }
    }
}

/// Store whose `set` announces itself on `entered` and then holds until
/// `release` is notified.
#[derive(Default)]
pub struct StallingStore {
    inner: MemoryStore,
    pub entered: Notify,
    pub release: Notify,
}

impl StallingStore {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.raw(key)
    }
}

#[async_trait]
impl CacheStorage for StallingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, NavError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), NavError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), NavError> {
        self.inner.remove(key).await
    }
}
