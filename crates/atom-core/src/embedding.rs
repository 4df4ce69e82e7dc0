//! Local embedding server.
//!
//! Only the health endpoint of the embedding server is consumed here.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{Result, ServiceHealth};

/// Tracing target for embedding server operations.
pub const TRACING_TARGET: &str = "atom_core::embedding";

/// Core trait for embedding server health.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Calls the server's health endpoint.
    ///
    /// Returns an error if the server could not be reached or answered with a
    /// non-success status. A reachable server that does not report itself
    /// healthy yields a degraded [`ServiceHealth`].
    async fn health_check(&self) -> Result<ServiceHealth>;
}

/// Embedding server wrapper with observability.
#[derive(Clone)]
pub struct EmbeddingService {
    inner: Arc<dyn EmbeddingProvider>,
}

impl fmt::Debug for EmbeddingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingService").finish_non_exhaustive()
    }
}

impl EmbeddingService {
    /// Creates a new embedding service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: EmbeddingProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Calls the embedding server's health endpoint.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        let started_at = Instant::now();
        let result = self.inner.health_check().await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(health) => tracing::debug!(
                target: TRACING_TARGET,
                status = ?health.status,
                elapsed_ms = elapsed.as_millis(),
                "embedding server health checked"
            ),
            Err(error) => tracing::debug!(
                target: TRACING_TARGET,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "embedding server health check failed"
            ),
        }

        result
    }
}
