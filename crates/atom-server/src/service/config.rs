use std::time::Duration;

use atom_core::embedding::EmbeddingService;
use atom_core::memory::MemoryService;
use atom_core::news::NewsService;
use atom_core::weather::WeatherService;
use atom_reqwest::{ReqwestClient, UpstreamConfig};
#[cfg(feature = "config")]
use clap::{ArgAction, Args};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::service::{Error, Result};

/// Default values for configuration options.
mod defaults {
    /// Weather and news entries stay fresh for five minutes.
    pub const CACHE_TTL_SECS: u64 = 300;

    /// Coordinates are cached at two decimal places (roughly 1 km).
    pub const COORDINATE_PRECISION: u32 = 2;

    /// Pacing delay before answering a boot-status request.
    pub const BOOT_DELAY_MS: u64 = 350;

    /// Upper bound for a single readiness probe.
    pub const PROBE_TIMEOUT_SECS: u64 = 2;

    /// Upper bound for a single upstream data fetch.
    pub const FETCH_TIMEOUT_SECS: u64 = 10;

    /// Blocking collaborator calls run strictly one at a time.
    pub const BLOCKING_WORKERS: usize = 1;
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Enables the text-to-speech subsystem.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "USE_TTS", default_value_t = false, action = ArgAction::Set)
    )]
    #[builder(default)]
    pub use_tts: bool,

    /// Enables the robotic arm interface.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "ROBOTIC_ARM", default_value_t = false, action = ArgAction::Set)
    )]
    #[builder(default)]
    pub robotic_arm: bool,

    /// Freshness window of cached forecasts, in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "WEATHER_CACHE_TTL", default_value_t = defaults::CACHE_TTL_SECS)
    )]
    #[builder(default = "defaults::CACHE_TTL_SECS")]
    pub weather_cache_ttl_secs: u64,

    /// Freshness window of cached headlines, in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "NEWS_CACHE_TTL", default_value_t = defaults::CACHE_TTL_SECS)
    )]
    #[builder(default = "defaults::CACHE_TTL_SECS")]
    pub news_cache_ttl_secs: u64,

    /// Decimal places kept when normalizing coordinates into cache keys.
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "COORDINATE_PRECISION",
            default_value_t = defaults::COORDINATE_PRECISION
        )
    )]
    #[builder(default = "defaults::COORDINATE_PRECISION")]
    pub coordinate_precision: u32,

    /// Delay before answering `/boot-status`, in milliseconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "BOOT_DELAY_MS", default_value_t = defaults::BOOT_DELAY_MS)
    )]
    #[builder(default = "defaults::BOOT_DELAY_MS")]
    pub boot_delay_ms: u64,

    /// Timeout of a single readiness probe, in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "PROBE_TIMEOUT", default_value_t = defaults::PROBE_TIMEOUT_SECS)
    )]
    #[builder(default = "defaults::PROBE_TIMEOUT_SECS")]
    pub probe_timeout_secs: u64,

    /// Timeout of a single weather or news fetch, in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "FETCH_TIMEOUT", default_value_t = defaults::FETCH_TIMEOUT_SECS)
    )]
    #[builder(default = "defaults::FETCH_TIMEOUT_SECS")]
    pub fetch_timeout_secs: u64,

    /// Number of blocking collaborator calls allowed to run at once.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "BLOCKING_WORKERS", default_value_t = defaults::BLOCKING_WORKERS)
    )]
    #[builder(default = "defaults::BLOCKING_WORKERS")]
    pub blocking_workers: usize,

    /// Third-party HTTP endpoints and credentials.
    #[cfg_attr(feature = "config", command(flatten))]
    #[builder(default)]
    pub upstream: UpstreamConfig,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Returns the forecast cache TTL.
    #[inline]
    pub const fn weather_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.weather_cache_ttl_secs)
    }

    /// Returns the headline cache TTL.
    #[inline]
    pub const fn news_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.news_cache_ttl_secs)
    }

    /// Returns the boot-status pacing delay.
    #[inline]
    pub const fn boot_delay(&self) -> Duration {
        Duration::from_millis(self.boot_delay_ms)
    }

    /// Returns the per-probe timeout.
    #[inline]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Returns the per-fetch timeout.
    #[inline]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Builds the shared HTTP client for all upstreams.
    pub fn connect_http(&self) -> Result<ReqwestClient> {
        self.upstream.connect().map_err(|e| {
            Error::external("http", "Failed to build the upstream HTTP client").with_source(e)
        })
    }

    /// Builds the Open-Meteo forecast service.
    pub fn weather_service(&self, client: &ReqwestClient) -> Result<WeatherService> {
        self.upstream.weather_service(client).map_err(|e| {
            Error::external("open-meteo", "Invalid weather API URL").with_source(e)
        })
    }

    /// Builds the NewsAPI headline service.
    pub fn news_service(&self, client: &ReqwestClient) -> Result<NewsService> {
        if !self.upstream.has_news_api_key() {
            tracing::warn!(
                target: super::TRACING_TARGET,
                "NEWS_API_KEY is not set, the news feed will serve its placeholder"
            );
        }

        self.upstream
            .news_service(client)
            .map_err(|e| Error::external("newsapi", "Invalid news API URL").with_source(e))
    }

    /// Builds the embedding server health client.
    pub fn embedding_service(&self, client: &ReqwestClient) -> Result<EmbeddingService> {
        self.upstream.embedding_service(client).map_err(|e| {
            Error::external("embeddings", "Invalid embedding server URL").with_source(e)
        })
    }

    /// Builds the Chroma memory store client.
    pub fn memory_service(&self, client: &ReqwestClient) -> Result<MemoryService> {
        self.upstream
            .memory_service(client)
            .map_err(|e| Error::external("chroma", "Invalid Chroma URL").with_source(e))
    }

    /// Validates ranges that clap cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.coordinate_precision > 6 {
            return Err(Error::config("Coordinate precision cannot exceed 6 decimal places"));
        }

        if self.probe_timeout_secs == 0 || self.fetch_timeout_secs == 0 {
            return Err(Error::config("Probe and fetch timeouts must be at least 1 second"));
        }

        if self.blocking_workers == 0 {
            return Err(Error::config("Blocking worker count must be greater than 0"));
        }

        Ok(())
    }
}

impl ServiceConfigBuilder {
    /// Wrapper for builder validation that returns String errors.
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if let Some(precision) = builder.coordinate_precision
            && precision > 6
        {
            return Err("Coordinate precision cannot exceed 6 decimal places".to_string());
        }

        if builder.probe_timeout_secs == Some(0) {
            return Err("Probe timeout must be at least 1 second".to_string());
        }

        if builder.fetch_timeout_secs == Some(0) {
            return Err("Fetch timeout must be at least 1 second".to_string());
        }

        if builder.blocking_workers == Some(0) {
            return Err("Blocking worker count must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(debug_assertions)]
impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            use_tts: false,
            robotic_arm: false,
            weather_cache_ttl_secs: defaults::CACHE_TTL_SECS,
            news_cache_ttl_secs: defaults::CACHE_TTL_SECS,
            coordinate_precision: defaults::COORDINATE_PRECISION,
            boot_delay_ms: defaults::BOOT_DELAY_MS,
            probe_timeout_secs: defaults::PROBE_TIMEOUT_SECS,
            fetch_timeout_secs: defaults::FETCH_TIMEOUT_SECS,
            blocking_workers: defaults::BLOCKING_WORKERS,
            upstream: UpstreamConfig::default(),
        }
    }
}
