//! Upstream endpoints and credentials.

use std::time::Duration;

use atom_core::embedding::EmbeddingService;
use atom_core::memory::MemoryService;
use atom_core::news::NewsService;
use atom_core::weather::WeatherService;
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{
    ChromaClient, EmbeddingServerClient, NewsApiClient, OpenMeteoClient, ReqwestClient,
    ReqwestConfig, Result,
};

/// Default Open-Meteo forecast endpoint.
const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Default NewsAPI top-headlines endpoint.
const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/top-headlines";

/// Endpoints and credentials for every HTTP upstream the server talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct UpstreamConfig {
    /// Open-Meteo forecast endpoint.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "WEATHER_API_URL", default_value = DEFAULT_WEATHER_API_URL)
    )]
    pub weather_api_url: String,

    /// NewsAPI top-headlines endpoint.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "NEWS_API_URL", default_value = DEFAULT_NEWS_API_URL)
    )]
    pub news_api_url: String,

    /// NewsAPI key. Without it the news feed serves its placeholder.
    #[cfg_attr(feature = "config", arg(long, env = "NEWS_API_KEY"))]
    #[serde(skip_serializing)]
    pub news_api_key: Option<String>,

    /// Two-letter country code for headlines.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "NEWS_COUNTRY", default_value = "us")
    )]
    pub news_country: String,

    /// Base URL of the embedding server (a trailing `/v1` is ignored).
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "EMBEDDING_SERVER_BASE_URL",
            default_value = "http://localhost:2000/v1"
        )
    )]
    pub embedding_server_url: String,

    /// Base URL of the Chroma vector store.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CHROMA_URL", default_value = "http://localhost:8001")
    )]
    pub chroma_url: String,

    /// Chroma collection holding conversation memory.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CHROMA_COLLECTION", default_value = "atom_memory")
    )]
    pub chroma_collection: String,

    /// Default timeout in seconds for upstream requests.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "UPSTREAM_TIMEOUT", default_value_t = 10)
    )]
    pub upstream_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            weather_api_url: DEFAULT_WEATHER_API_URL.to_owned(),
            news_api_url: DEFAULT_NEWS_API_URL.to_owned(),
            news_api_key: None,
            news_country: "us".to_owned(),
            embedding_server_url: "http://localhost:2000/v1".to_owned(),
            chroma_url: "http://localhost:8001".to_owned(),
            chroma_collection: "atom_memory".to_owned(),
            upstream_timeout_secs: 10,
        }
    }
}

impl UpstreamConfig {
    /// Returns the default upstream timeout as a [`Duration`].
    #[inline]
    pub const fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Returns `true` if a non-empty news API key is configured.
    pub fn has_news_api_key(&self) -> bool {
        self.news_api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    /// Builds the shared HTTP client.
    pub fn connect(&self) -> Result<ReqwestClient> {
        ReqwestClient::new(ReqwestConfig::default().with_timeout(self.upstream_timeout()))
    }

    /// Builds the weather service backed by Open-Meteo.
    pub fn weather_service(&self, client: &ReqwestClient) -> Result<WeatherService> {
        let provider = OpenMeteoClient::new(client.clone(), &self.weather_api_url)?;
        Ok(WeatherService::new(provider))
    }

    /// Builds the news service backed by NewsAPI.
    pub fn news_service(&self, client: &ReqwestClient) -> Result<NewsService> {
        let provider = NewsApiClient::new(client.clone(), &self.news_api_url)?
            .with_api_key(self.news_api_key.clone())
            .with_country(self.news_country.clone());
        Ok(NewsService::new(provider))
    }

    /// Builds the embedding server health client.
    pub fn embedding_service(&self, client: &ReqwestClient) -> Result<EmbeddingService> {
        let provider = EmbeddingServerClient::new(client.clone(), &self.embedding_server_url)?;
        Ok(EmbeddingService::new(provider))
    }

    /// Builds the memory store client backed by Chroma.
    pub fn memory_service(&self, client: &ReqwestClient) -> Result<MemoryService> {
        let provider =
            ChromaClient::new(client.clone(), &self.chroma_url, &self.chroma_collection)?;
        Ok(MemoryService::new(provider))
    }
}
