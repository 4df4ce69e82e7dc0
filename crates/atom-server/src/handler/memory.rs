//! Recent memory handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::{MemoryItem, RecentMemories};
use crate::service::{MemoryFeed, ServiceState};

/// Tracing target for memory operations.
const TRACING_TARGET: &str = "atom_server::handler::memory";

/// Lists the most recent memory entries, newest first.
///
/// A store failure is reported in the body next to an empty list, with `200`.
#[tracing::instrument(skip_all)]
async fn list_memory(
    State(memory_feed): State<MemoryFeed>,
) -> Result<(StatusCode, Json<RecentMemories>)> {
    let response = match memory_feed.recent().await {
        Ok(entries) => RecentMemories {
            memory: entries.into_iter().map(MemoryItem::from).collect(),
            error: None,
        },
        Err(error) => {
            tracing::warn!(target: TRACING_TARGET, error = %error, "Memory store unavailable");
            RecentMemories {
                memory: Vec::new(),
                error: Some(error.to_string()),
            }
        }
    };

    tracing::debug!(
        target: TRACING_TARGET,
        entry_count = response.memory.len(),
        "Memory listed"
    );

    Ok((StatusCode::OK, Json(response)))
}

fn list_memory_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List recent memory")
        .description(
            "Returns up to 15 remembered utterances, newest first. When the memory store \
             cannot be read the list is empty and `error` describes why.",
        )
        .response::<200, Json<RecentMemories>>()
}

/// Returns routes for the memory feed.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/memory", get_with(list_memory, list_memory_docs))
        .with_path_items(|item| item.tag("Memory"))
}
