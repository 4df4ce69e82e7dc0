//! Mock vector store, embedding server, and robotics client.

use atom_core::embedding::EmbeddingProvider;
use atom_core::memory::{StoredDocument, VectorStore};
use atom_core::robotics::RoboticsClient;
use atom_core::{Error, Result, ServiceHealth};

/// Mock vector store holding a fixed set of documents.
#[derive(Clone, Debug, Default)]
pub struct MockVectorStore {
    documents: Vec<StoredDocument>,
    offline: bool,
}

impl MockVectorStore {
    /// Creates an empty, reachable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that fails every request.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Replaces the stored documents.
    pub fn with_documents(mut self, documents: Vec<StoredDocument>) -> Self {
        self.documents = documents;
        self
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline {
            return Err(Error::network_error().with_message("vector store unreachable"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl VectorStore for MockVectorStore {
    async fn heartbeat(&self) -> Result<()> {
        self.ensure_online()
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        self.ensure_online()?;
        Ok(vec!["atom_memory".to_owned()])
    }

    async fn documents(&self) -> Result<Vec<StoredDocument>> {
        self.ensure_online()?;
        Ok(self.documents.clone())
    }
}

/// Reported state of a [`MockEmbeddingServer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum EmbeddingState {
    #[default]
    Healthy,
    Degraded,
    Down,
}

/// Mock embedding server health endpoint.
#[derive(Clone, Debug, Default)]
pub struct MockEmbeddingServer {
    state: EmbeddingState,
}

impl MockEmbeddingServer {
    /// Server answering with `status: healthy`.
    pub fn healthy() -> Self {
        Self::default()
    }

    /// Server reachable but not reporting healthy.
    pub fn degraded() -> Self {
        Self {
            state: EmbeddingState::Degraded,
        }
    }

    /// Server that cannot be reached.
    pub fn down() -> Self {
        Self {
            state: EmbeddingState::Down,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockEmbeddingServer {
    async fn health_check(&self) -> Result<ServiceHealth> {
        match self.state {
            EmbeddingState::Healthy => Ok(ServiceHealth::healthy()),
            EmbeddingState::Degraded => Ok(ServiceHealth::degraded("loading model")),
            EmbeddingState::Down => {
                Err(Error::service_unavailable().with_message("connection refused"))
            }
        }
    }
}

/// Mock robotics client.
#[derive(Clone, Debug)]
pub struct MockRobotics {
    device: String,
}

impl Default for MockRobotics {
    fn default() -> Self {
        Self::new("mock-arm")
    }
}

impl MockRobotics {
    /// Creates a client for the named device.
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
        }
    }
}

impl RoboticsClient for MockRobotics {
    fn device(&self) -> &str {
        &self.device
    }
}
