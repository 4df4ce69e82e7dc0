//! Vector store abstractions.
//!
//! The memory store is consumed through [`VectorStore`]: a liveness call, a
//! collection listing, and a dump of the stored documents with their metadata.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// Tracing target for vector store operations.
pub const TRACING_TARGET: &str = "atom_core::memory";

/// A document stored in the vector store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Document text.
    pub content: String,
    /// Arbitrary metadata attached at insertion time.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl StoredDocument {
    /// Creates a document without metadata.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Adds a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns the document timestamp from `timestamp`, falling back to `time`.
    ///
    /// Empty strings and non-scalar values count as absent.
    pub fn timestamp(&self) -> Option<String> {
        ["timestamp", "time"]
            .iter()
            .filter_map(|key| self.metadata.get(*key))
            .find_map(|value| match value {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

/// Core trait for vector store access.
#[async_trait::async_trait]
pub trait VectorStore: Send + Sync {
    /// Liveness call; fails if the store cannot be reached.
    async fn heartbeat(&self) -> Result<()>;

    /// Lists collection names; fails if the store is unreachable or corrupted.
    async fn list_collections(&self) -> Result<Vec<String>>;

    /// Returns every document in the configured collection.
    async fn documents(&self) -> Result<Vec<StoredDocument>>;
}

/// Vector store wrapper with observability.
///
/// The inner store is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct MemoryService {
    inner: Arc<dyn VectorStore>,
}

impl fmt::Debug for MemoryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryService").finish_non_exhaustive()
    }
}

impl MemoryService {
    /// Creates a new memory service wrapper.
    pub fn new<S>(store: S) -> Self
    where
        S: VectorStore + 'static,
    {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Performs a liveness call against the store.
    pub async fn heartbeat(&self) -> Result<()> {
        let started_at = Instant::now();
        let result = self.inner.heartbeat().await;

        if let Err(error) = &result {
            tracing::debug!(
                target: TRACING_TARGET,
                error = %error,
                elapsed_ms = started_at.elapsed().as_millis(),
                "vector store heartbeat failed"
            );
        }

        result
    }

    /// Lists the collections in the store.
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        let result = self.inner.list_collections().await;

        match &result {
            Ok(collections) => tracing::debug!(
                target: TRACING_TARGET,
                collection_count = collections.len(),
                "vector store collections listed"
            ),
            Err(error) => tracing::debug!(
                target: TRACING_TARGET,
                error = %error,
                "vector store listing failed"
            ),
        }

        result
    }

    /// Fetches the stored documents.
    pub async fn documents(&self) -> Result<Vec<StoredDocument>> {
        let started_at = Instant::now();
        let result = self.inner.documents().await;

        match &result {
            Ok(documents) => tracing::debug!(
                target: TRACING_TARGET,
                document_count = documents.len(),
                elapsed_ms = started_at.elapsed().as_millis(),
                "vector store documents fetched"
            ),
            Err(error) => tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                "vector store document fetch failed"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_prefers_timestamp_key() {
        let document = StoredDocument::new("hello")
            .with_metadata("time", "2024-01-01T00:00:00")
            .with_metadata("timestamp", "2024-02-01T00:00:00");
        assert_eq!(document.timestamp().as_deref(), Some("2024-02-01T00:00:00"));
    }

    #[test]
    fn timestamp_falls_back_to_time_key() {
        let document = StoredDocument::new("hello")
            .with_metadata("timestamp", "")
            .with_metadata("time", "2024-01-01T00:00:00");
        assert_eq!(document.timestamp().as_deref(), Some("2024-01-01T00:00:00"));
    }

    #[test]
    fn timestamp_absent() {
        let document = StoredDocument::new("hello").with_metadata("role", "user");
        assert_eq!(document.timestamp(), None);
    }
}
