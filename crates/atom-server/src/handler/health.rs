//! System health handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::HealthReport;
use crate::service::{ServiceState, SystemHealth};

/// Tracing target for health operations.
const TRACING_TARGET: &str = "atom_server::handler::health";

/// Reports the status of every subsystem.
///
/// Always answers `200`; a failing subsystem shows up as `Offline` in the body.
#[tracing::instrument(skip_all)]
async fn get_health(
    State(system_health): State<SystemHealth>,
) -> Result<(StatusCode, Json<HealthReport>)> {
    let report = system_health.report().await;

    tracing::debug!(
        target: TRACING_TARGET,
        llm_status = %report.llm_status,
        chroma_db = %report.chroma_db,
        stt = %report.stt,
        "Health report prepared"
    );

    Ok((StatusCode::OK, Json(report)))
}

fn get_health_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get system health")
        .description(
            "Returns the status of the core engine, embedding server, memory store, \
             judge model, speech synthesis and speech recognition.",
        )
        .response::<200, Json<HealthReport>>()
}

/// Returns routes for system health.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(get_health, get_health_docs))
        .with_path_items(|item| item.tag("Health"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handler::test::{TestCollaborators, create_test_server_with};

    #[tokio::test]
    async fn ready_system_reports_online() -> anyhow::Result<()> {
        let server = create_test_server_with(TestCollaborators::ready(), |_| routes())?;

        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_json(&json!({
            "llmStatus": "Running",
            "embeddingsServer": "Online",
            "chromaDb": "Connected",
            "judgeModel": "Running",
            "ttsMode": "Piper",
            "ttsStatus": "Online",
            "stt": "Online",
        }));

        Ok(())
    }

    #[tokio::test]
    async fn bare_system_reports_offline() -> anyhow::Result<()> {
        let server = create_test_server_with(TestCollaborators::none(), |_| routes())?;

        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_json(&json!({
            "llmStatus": "Offline",
            "embeddingsServer": "Offline",
            "chromaDb": "Offline",
            "judgeModel": "Offline",
            "ttsMode": "Off",
            "ttsStatus": "Disabled",
            "stt": "Offline",
        }));

        Ok(())
    }
}
