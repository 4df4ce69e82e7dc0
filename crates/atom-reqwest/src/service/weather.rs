//! Open-Meteo forecast client.

use atom_core::weather::{Coordinates, Forecast, WeatherProvider};
use url::Url;

use crate::{Error, ReqwestClient};

/// Tracing target for weather requests.
const TRACING_TARGET: &str = "atom_reqwest::weather";

/// Current-conditions variables requested from Open-Meteo.
const CURRENT_VARIABLES: &str = "temperature_2m,weather_code,wind_speed_10m";

/// Daily aggregates requested from Open-Meteo.
const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min,sunrise,sunset";

/// Forecast client for the Open-Meteo API.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: ReqwestClient,
    endpoint: Url,
}

impl OpenMeteoClient {
    /// Creates a client against the given forecast endpoint.
    pub fn new(client: ReqwestClient, endpoint: &str) -> crate::Result<Self> {
        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
        })
    }

    /// Query parameters for a forecast at the given position.
    ///
    /// Coordinates are sent exactly as received; rounding only affects caching.
    fn query(at: Coordinates) -> [(&'static str, String); 5] {
        [
            ("latitude", at.latitude.to_string()),
            ("longitude", at.longitude.to_string()),
            ("current", CURRENT_VARIABLES.to_owned()),
            ("daily", DAILY_VARIABLES.to_owned()),
            ("timezone", "auto".to_owned()),
        ]
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn forecast(&self, at: Coordinates) -> atom_core::Result<Forecast> {
        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %self.endpoint,
            coordinates = %at,
            "requesting forecast"
        );

        let response = self
            .client
            .http()
            .get(self.endpoint.clone())
            .query(&Self::query(at))
            .send()
            .await
            .map_err(Error::from)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                "forecast request rejected"
            );
            return Err(atom_core::Error::external_error()
                .with_message("Failed to fetch weather data from Open-Meteo"));
        }

        let forecast = response.json::<Forecast>().await.map_err(Error::from)?;
        Ok(forecast)
    }
}
