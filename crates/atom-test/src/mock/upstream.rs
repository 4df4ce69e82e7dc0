//! Counting mocks for the weather and news upstreams.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use atom_core::news::{Article, NewsProvider};
use atom_core::weather::{Coordinates, Forecast, WeatherProvider};
use atom_core::{Error, Result};
use serde_json::json;

/// Mock forecast provider.
///
/// Echoes the requested coordinates back together with the call number, so
/// a cached response is distinguishable from a fresh one.
#[derive(Clone, Debug, Default)]
pub struct MockWeatherProvider {
    calls: Arc<AtomicUsize>,
    failing: bool,
    delay: Option<Duration>,
}

impl MockWeatherProvider {
    /// Creates a provider that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that always fails with an external error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Delays every response by the given duration.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of upstream calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn forecast(&self, at: Coordinates) -> Result<Forecast> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing {
            return Err(Error::external_error()
                .with_message("Failed to fetch weather data from Open-Meteo"));
        }

        Ok(json!({
            "latitude": at.latitude,
            "longitude": at.longitude,
            "current": { "temperature_2m": 18.4, "weather_code": 3, "wind_speed_10m": 9.1 },
            "call": call,
        }))
    }
}

/// Mock headline provider.
#[derive(Clone, Debug)]
pub struct MockNewsProvider {
    calls: Arc<AtomicUsize>,
    articles: Vec<Article>,
    error: Option<String>,
}

impl Default for MockNewsProvider {
    fn default() -> Self {
        Self::new(vec![Article::new(
            "Mock Wire",
            "Mock headline",
            "Mock summary.",
            "2026-10-16T08:00:00Z",
        )])
    }
}

impl MockNewsProvider {
    /// Creates a provider returning the given articles.
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            calls: Arc::default(),
            articles,
            error: None,
        }
    }

    /// Creates a provider that always fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::new(Vec::new())
        }
    }

    /// Number of upstream calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl NewsProvider for MockNewsProvider {
    async fn headlines(&self) -> Result<Vec<Article>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.error {
            Some(message) => Err(Error::external_error().with_message(message.clone())),
            None => Ok(self.articles.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_weather_counts_calls_across_clones() -> Result<()> {
        let provider = MockWeatherProvider::new();
        let handle = provider.clone();

        let forecast = provider.forecast(Coordinates::new(1.0, 2.0)).await?;
        assert_eq!(forecast["call"], 1);
        assert_eq!(handle.calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_failing_news_reports_message() {
        let provider = MockNewsProvider::failing("upstream down");
        let err = provider.headlines().await.unwrap_err();
        assert_eq!(err.to_string(), "upstream down");
        assert_eq!(provider.calls(), 1);
    }
}
