//! Weather forecast provider.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Tracing target for weather operations.
pub const TRACING_TARGET: &str = "atom_core::weather";

/// Forecast payload as returned by the upstream, passed through untouched.
pub type Forecast = serde_json::Value;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a new coordinate pair.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Core trait for weather forecast providers.
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the current conditions and daily forecast for a position.
    async fn forecast(&self, at: Coordinates) -> Result<Forecast>;
}

/// Weather provider wrapper with observability.
#[derive(Clone)]
pub struct WeatherService {
    inner: Arc<dyn WeatherProvider>,
}

impl fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherService").finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Creates a new weather service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: WeatherProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Fetches the forecast for a position.
    pub async fn forecast(&self, at: Coordinates) -> Result<Forecast> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            latitude = at.latitude,
            longitude = at.longitude,
            "fetching forecast"
        );

        let result = self.inner.forecast(at).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(_) => tracing::debug!(
                target: TRACING_TARGET,
                elapsed_ms = elapsed.as_millis(),
                "forecast fetched"
            ),
            Err(error) => tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "forecast fetch failed"
            ),
        }

        result
    }
}
