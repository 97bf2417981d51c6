use axum::{extract::State, Extension, Json};
use postpipe_pipeline::{PipelineRequest, PipelineResponse};

use crate::middleware::RequestId;

use super::AppState;

/// `POST /pipeline`. Always answers 200; failures are listed in `errors`.
pub(super) async fn run_pipeline(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<PipelineRequest>,
) -> Json<PipelineResponse> {
    tracing::info!(request_id = %req_id.0, "pipeline run requested");

    let response = state.pipeline.run(&request).await;
    Json(response)
}
