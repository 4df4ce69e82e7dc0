use std::time::Duration;

use atom_core::Result;
use atom_core::weather::{Coordinates, Forecast, WeatherService};

use super::{CachedProxy, Proxied, Surface};
use crate::service::cache::CoordinateKey;

/// Open-Meteo forecasts cached per rounded coordinate pair.
///
/// Upstream failures surface to the caller; nothing synthetic is served.
#[derive(Debug, Clone)]
pub struct WeatherProxy {
    weather: WeatherService,
    proxy: CachedProxy<CoordinateKey, Forecast>,
    precision: u32,
}

impl WeatherProxy {
    pub fn new(weather: WeatherService, ttl: Duration, timeout: Duration, precision: u32) -> Self {
        Self {
            weather,
            proxy: CachedProxy::new("weather", ttl, timeout),
            precision,
        }
    }

    /// Forecast for `at`, from cache when a nearby point was fetched recently.
    ///
    /// The cache key is rounded, but the upstream request uses the exact
    /// coordinates of the first caller.
    pub async fn forecast(&self, at: Coordinates) -> Result<Proxied<Forecast>> {
        let key = CoordinateKey::new(at, self.precision);
        let weather = self.weather.clone();
        self.proxy
            .get_or_fetch(key, || async move { weather.forecast(at).await }, &Surface)
            .await
    }
}

#[cfg(test)]
mod tests {
    use atom_test::MockWeatherProvider;

    use super::*;
    use crate::service::proxy::ProxySource;

    fn proxy(provider: &MockWeatherProvider) -> WeatherProxy {
        WeatherProxy::new(
            WeatherService::new(provider.clone()),
            Duration::from_secs(300),
            Duration::from_secs(10),
            2,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn nearby_requests_share_one_fetch() -> Result<()> {
        let provider = MockWeatherProvider::new();
        let weather = proxy(&provider);

        let first = weather.forecast(Coordinates::new(37.77, -122.41)).await?;
        let second = weather.forecast(Coordinates::new(37.7712, -122.4099)).await?;

        assert_eq!(provider.calls(), 1);
        assert_eq!(first.value, second.value);
        assert_eq!(second.source, ProxySource::Cache);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_refetched() -> Result<()> {
        let provider = MockWeatherProvider::new();
        let weather = proxy(&provider);
        let at = Coordinates::new(48.85, 2.35);

        let first = weather.forecast(at).await?;
        tokio::time::advance(Duration::from_secs(301)).await;
        let second = weather.forecast(at).await?;

        assert_eq!(provider.calls(), 2);
        assert_eq!(first.value["call"], 1);
        assert_eq!(second.value["call"], 2);
        assert_eq!(second.source, ProxySource::Upstream);
        Ok(())
    }

    #[tokio::test]
    async fn failures_surface_and_retry_next_time() {
        let provider = MockWeatherProvider::failing();
        let weather = proxy(&provider);
        let at = Coordinates::new(1.0, 2.0);

        assert!(weather.forecast(at).await.is_err());
        assert!(weather.forecast(at).await.is_err());
        assert_eq!(provider.calls(), 2);
    }
}
