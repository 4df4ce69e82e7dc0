//! Boot sequence handlers.
//!
//! The front end walks its boot animation by asking for one module at a
//! time. Every answer is paced so the animation stays readable, and an
//! unknown module is reported as `error` rather than as an HTTP failure.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::Json;
use crate::handler::request::CheckBootModule;
use crate::handler::response::{BootModuleStatus, ErrorResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::{BootSequence, ServiceState};

/// Tracing target for boot sequence operations.
const TRACING_TARGET: &str = "atom_server::handler::boot";

/// Checks a single boot module.
#[tracing::instrument(skip_all)]
async fn check_boot_module(
    State(boot): State<BootSequence>,
    Json(request): Json<CheckBootModule>,
) -> Result<(StatusCode, Json<BootModuleStatus>)> {
    let Some(module) = request.module_name() else {
        return Err(ErrorKind::BadRequest
            .with_message("Missing module field")
            .with_resource("module"));
    };

    tracing::debug!(target: TRACING_TARGET, module, "Checking boot module");

    let response = match boot.check(module).await {
        Ok(status) => BootModuleStatus::from(status),
        Err(unknown) => {
            tracing::warn!(target: TRACING_TARGET, error = %unknown, "Unknown boot module");
            BootModuleStatus::error()
        }
    };

    tracing::info!(
        target: TRACING_TARGET,
        module,
        status = ?response.status,
        "Boot module checked"
    );

    Ok((StatusCode::OK, Json(response)))
}

fn check_boot_module_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Check boot module")
        .description(
            "Reports whether a named subsystem is up. Unknown modules report `error`. \
             The answer is delayed by the configured boot pacing.",
        )
        .response::<200, Json<BootModuleStatus>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Returns routes for the boot sequence.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/boot-status",
            post_with(check_boot_module, check_boot_module_docs),
        )
        .with_path_items(|item| item.tag("Boot"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handler::response::BootCheck;
    use crate::handler::test::{TestCollaborators, create_test_server_with};
    use crate::service::modules;

    #[tokio::test]
    async fn ready_engine_reports_ok() -> anyhow::Result<()> {
        let server = create_test_server_with(TestCollaborators::ready(), |_| routes())?;

        let response = server
            .post("/boot-status")
            .json(&json!({ "module": modules::ATOM_CORE }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<BootModuleStatus>().status, BootCheck::Ok);

        Ok(())
    }

    #[tokio::test]
    async fn disabled_robotics_reports_error() -> anyhow::Result<()> {
        let server = create_test_server_with(TestCollaborators::ready(), |_| routes())?;

        let response = server
            .post("/boot-status")
            .json(&json!({ "module": modules::ROBOTICS_INTERFACE }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "status": "error" }));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_module_reports_error() -> anyhow::Result<()> {
        let server = create_test_server_with(TestCollaborators::ready(), |_| routes())?;

        let response = server
            .post("/boot-status")
            .json(&json!({ "module": "FLUX_CAPACITOR" }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "status": "error" }));

        Ok(())
    }

    #[tokio::test]
    async fn padded_module_reports_error() -> anyhow::Result<()> {
        let server = create_test_server_with(TestCollaborators::ready(), |_| routes())?;

        let response = server
            .post("/boot-status")
            .json(&json!({ "module": format!(" {} ", modules::ATOM_CORE) }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "status": "error" }));

        let response = server
            .post("/boot-status")
            .json(&json!({ "module": "   " }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "status": "error" }));

        Ok(())
    }

    #[tokio::test]
    async fn missing_module_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with(TestCollaborators::ready(), |_| routes())?;

        let response = server.post("/boot-status").json(&json!({})).await;
        response.assert_status_bad_request();

        let response = server
            .post("/boot-status")
            .json(&json!({ "module": "" }))
            .await;
        response.assert_status_bad_request();

        Ok(())
    }

    #[tokio::test]
    async fn missing_collaborators_report_error() -> anyhow::Result<()> {
        let server = create_test_server_with(TestCollaborators::none(), |_| routes())?;

        for module in [modules::ATOM_CORE, modules::MEMORY_ENGINE, modules::EMBEDDINGS_SERVER] {
            let response = server
                .post("/boot-status")
                .json(&json!({ "module": module }))
                .await;
            response.assert_status_ok();
            response.assert_json(&json!({ "status": "error" }));
        }

        Ok(())
    }
}
