//! Weather forecast handler.
//!
//! Forecasts are cached per rounded coordinate pair, so nearby requests
//! within the freshness window share one upstream call.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use atom_core::weather::Forecast;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::{Json, ValidateJson};
use crate::handler::request::GetForecast;
use crate::handler::response::ErrorResponse;
use crate::handler::{ErrorKind, Result};
use crate::service::{ServiceState, WeatherProxy};

/// Tracing target for weather operations.
const TRACING_TARGET: &str = "atom_server::handler::weather";

/// Returns the forecast for a coordinate pair.
#[tracing::instrument(skip_all)]
async fn get_forecast(
    State(weather): State<WeatherProxy>,
    ValidateJson(request): ValidateJson<GetForecast>,
) -> Result<(StatusCode, Json<Forecast>)> {
    let Some(at) = request.coordinates() else {
        return Err(ErrorKind::BadRequest
            .with_message("Latitude and Longitude are required")
            .with_resource("weather"));
    };

    tracing::debug!(
        target: TRACING_TARGET,
        latitude = at.latitude,
        longitude = at.longitude,
        "Fetching forecast"
    );

    let forecast = weather.forecast(at).await.map_err(|error| {
        tracing::error!(target: TRACING_TARGET, error = %error, "Forecast lookup failed");
        ErrorKind::InternalServerError
            .with_message(format!("Weather service error: {}", error))
            .with_resource("weather")
    })?;

    tracing::debug!(
        target: TRACING_TARGET,
        source = %forecast.source,
        "Forecast served"
    );

    Ok((StatusCode::OK, Json(forecast.into_value())))
}

fn get_forecast_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get weather forecast")
        .description(
            "Returns the current conditions and daily forecast for the given coordinates. \
             Responses are cached per location, rounded to the configured precision.",
        )
        .response::<200, Json<Forecast>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Returns routes for weather forecasts.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/weather", post_with(get_forecast, get_forecast_docs))
        .with_path_items(|item| item.tag("Weather"))
}

#[cfg(test)]
mod tests {
    use atom_test::MockWeatherProvider;
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::{TestCollaborators, create_test_server_with};

    #[tokio::test]
    async fn repeated_lookup_is_served_from_cache() -> anyhow::Result<()> {
        let provider = MockWeatherProvider::new();
        let test = TestCollaborators::ready().with_weather(provider.clone());
        let server = create_test_server_with(test, |_| routes())?;

        let request = json!({ "latitude": 37.77, "longitude": -122.41 });
        let first = server.post("/weather").json(&request).await;
        let second = server.post("/weather").json(&request).await;

        first.assert_status_ok();
        second.assert_status_ok();
        assert_eq!(first.text(), second.text());
        assert_eq!(provider.calls(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn nearby_coordinates_share_a_cache_entry() -> anyhow::Result<()> {
        let provider = MockWeatherProvider::new();
        let test = TestCollaborators::ready().with_weather(provider.clone());
        let server = create_test_server_with(test, |_| routes())?;

        server
            .post("/weather")
            .json(&json!({ "latitude": 37.771, "longitude": -122.411 }))
            .await
            .assert_status_ok();
        let response = server
            .post("/weather")
            .json(&json!({ "latitude": 37.774, "longitude": -122.414 }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["call"], 1);
        assert_eq!(provider.calls(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn zero_coordinates_are_accepted() -> anyhow::Result<()> {
        let server = create_test_server_with(TestCollaborators::ready(), |_| routes())?;

        let response = server
            .post("/weather")
            .json(&json!({ "latitude": 0.0, "longitude": 0.0 }))
            .await;
        response.assert_status_ok();

        Ok(())
    }

    #[tokio::test]
    async fn missing_coordinate_is_rejected() -> anyhow::Result<()> {
        let provider = MockWeatherProvider::new();
        let test = TestCollaborators::ready().with_weather(provider.clone());
        let server = create_test_server_with(test, |_| routes())?;

        let response = server
            .post("/weather")
            .json(&json!({ "latitude": 37.77 }))
            .await;
        response.assert_status_bad_request();
        assert!(response.text().contains("Latitude and Longitude are required"));
        assert_eq!(provider.calls(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_coordinate_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with(TestCollaborators::ready(), |_| routes())?;

        let response = server
            .post("/weather")
            .json(&json!({ "latitude": 120.0, "longitude": 0.0 }))
            .await;
        response.assert_status_bad_request();

        Ok(())
    }

    #[tokio::test]
    async fn upstream_failure_is_a_server_error() -> anyhow::Result<()> {
        let provider = MockWeatherProvider::failing();
        let test = TestCollaborators::ready().with_weather(provider.clone());
        let server = create_test_server_with(test, |_| routes())?;

        let request = json!({ "latitude": 37.77, "longitude": -122.41 });
        let response = server.post("/weather").json(&request).await;
        response.assert_status_internal_server_error();
        assert!(response.text().contains("Weather service error"));

        // Failures are not cached.
        server.post("/weather").json(&request).await;
        assert_eq!(provider.calls(), 2);

        Ok(())
    }
}
