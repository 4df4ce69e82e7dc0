//! Embedding server health client.

use std::time::{Duration, Instant};

use atom_core::ServiceHealth;
use atom_core::embedding::EmbeddingProvider;
use serde::Deserialize;
use url::Url;

use crate::{Error, ReqwestClient};

/// Tracing target for embedding server checks.
const TRACING_TARGET: &str = "atom_reqwest::embedding";

/// Per-request timeout for the health endpoint.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct HealthPayload {
    #[serde(default)]
    status: Option<String>,
}

/// Health client for the local embedding server.
#[derive(Debug, Clone)]
pub struct EmbeddingServerClient {
    client: ReqwestClient,
    health_url: Url,
}

impl EmbeddingServerClient {
    /// Creates a client from the embedding server base URL.
    ///
    /// The base URL usually points at the OpenAI-compatible `/v1` prefix;
    /// the health endpoint lives at the server root.
    pub fn new(client: ReqwestClient, base_url: &str) -> crate::Result<Self> {
        Ok(Self {
            client,
            health_url: Self::health_url(base_url)?,
        })
    }

    fn health_url(base_url: &str) -> crate::Result<Url> {
        let root = base_url.trim_end_matches('/');
        let root = root.strip_suffix("/v1").unwrap_or(root);
        Ok(Url::parse(&format!("{root}/health"))?)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for EmbeddingServerClient {
    async fn health_check(&self) -> atom_core::Result<ServiceHealth> {
        let started_at = Instant::now();

        let response = self
            .client
            .http()
            .get(self.health_url.clone())
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(Error::from)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                "embedding server returned non-success status"
            );
            return Err(atom_core::Error::service_unavailable()
                .with_message(format!("embedding server returned {status}")));
        }

        // A reachable server with an unexpected body is degraded, not down.
        let reported = response
            .json::<HealthPayload>()
            .await
            .ok()
            .and_then(|payload| payload.status);

        let health = match reported.as_deref() {
            Some("healthy") => ServiceHealth::healthy(),
            Some(other) => ServiceHealth::degraded(format!("embedding server reports {other}")),
            None => ServiceHealth::degraded("embedding server did not report a status"),
        };

        Ok(health.with_response_time(started_at.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_url_strips_api_prefix() -> anyhow::Result<()> {
        let url = EmbeddingServerClient::health_url("http://localhost:2000/v1")?;
        assert_eq!(url.as_str(), "http://localhost:2000/health");

        let url = EmbeddingServerClient::health_url("http://localhost:2000/v1/")?;
        assert_eq!(url.as_str(), "http://localhost:2000/health");
        Ok(())
    }

    #[test]
    fn test_health_url_without_prefix() -> anyhow::Result<()> {
        let url = EmbeddingServerClient::health_url("http://embeddings:2000")?;
        assert_eq!(url.as_str(), "http://embeddings:2000/health");
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() -> anyhow::Result<()> {
        let client = ReqwestClient::new(Default::default())?;
        let embeddings = EmbeddingServerClient::new(client, "http://127.0.0.1:9/v1")?;
        assert!(embeddings.health_check().await.is_err());
        Ok(())
    }
}
