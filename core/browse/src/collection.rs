//! Saved collections
//!
//! The browse core only reads the collection list and appends search hits to
//! one collection. Storage lives behind [`CollectionStore`].

use std::path::PathBuf;

use async_trait::async_trait;
use catalog::NormalizedRecord;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Failed to access collection file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse collections: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Collection not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<NormalizedRecord>,
}

impl Collection {
    /// New empty collection with a millisecond-timestamp id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: chrono::Utc::now().timestamp_millis().to_string(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn contains(&self, record: &NormalizedRecord) -> bool {
        self.items.iter().any(|item| item.key() == record.key())
    }
}

#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Collection>, CollectionError>;

    async fn save(&self, collections: &[Collection]) -> Result<(), CollectionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Append `record` to the collection with `collection_id`.
///
/// Records are identified by `(source, id)`; adding one already present is a
/// no-op and nothing is written.
pub async fn add_to_collection(
    store: &dyn CollectionStore,
    collection_id: &str,
    record: &NormalizedRecord,
) -> Result<AddOutcome, CollectionError> {
    let mut collections = store.list().await?;
    let collection = collections
        .iter_mut()
        .find(|c| c.id == collection_id)
        .ok_or_else(|| CollectionError::NotFound(collection_id.to_string()))?;

    if collection.contains(record) {
        return Ok(AddOutcome::AlreadyPresent);
    }
    collection.items.push(record.clone());

    store.save(&collections).await?;
    tracing::debug!(
        collection = collection_id,
        source = %record.source,
        id = %record.id,
        "Added record to collection"
    );
    Ok(AddOutcome::Added)
}

/// Collections kept as one JSON array in a file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CollectionStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<Collection>, CollectionError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a temporary file, then rename over the target.
    async fn save(&self, collections: &[Collection]) -> Result<(), CollectionError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(collections)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

/// In-process store
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<Vec<Collection>>,
}

impl MemoryStore {
    pub fn new(collections: Vec<Collection>) -> Self {
        Self {
            collections: Mutex::new(collections),
        }
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Collection>, CollectionError> {
        Ok(self.collections.lock().clone())
    }

    async fn save(&self, collections: &[Collection]) -> Result<(), CollectionError> {
        *self.collections.lock() = collections.to_vec();
        Ok(())
    }
}
