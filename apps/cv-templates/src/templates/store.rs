//! Key-value persistence contract for chosen or customized configurations.
//!
//! Real backends live outside this crate. `MemoryTemplateStore` serializes to
//! JSON like a remote store would, so tests exercise the same round trip.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::templates::model::TemplateConfiguration;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Pluggable store. Carried by hosts as `Arc<dyn TemplateStore>`.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<TemplateConfiguration>, StoreError>;

    async fn save(&self, key: &str, config: &TemplateConfiguration) -> Result<(), StoreError>;

    /// Returns whether a value was present.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn load(&self, key: &str) -> Result<Option<TemplateConfiguration>, StoreError> {
        let entries = self.entries.read().await;
        let Some(json) = entries.get(key) else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(json)?))
    }

    async fn save(&self, key: &str, config: &TemplateConfiguration) -> Result<(), StoreError> {
        let json = serde_json::to_string(config)?;
        self.entries.write().await.insert(key.to_string(), json);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.write().await.remove(key).is_some())
    }
}
