use std::sync::Arc;

use axum::extract::{self, State};
use axum::Json;
use serde_json::{json, Value};

use pipeview_proto::{SubsetRequest, SubsetResponse};

use crate::handler::resolve_subset_request;
use crate::AppState;

pub async fn ping() -> &'static str {
    "pong"
}

pub async fn get_pipelines(State(state): State<Arc<AppState>>) -> Json<Value> {
    json!(state.index.origins(&state.location_ref)).into()
}

pub async fn resolve_subset(
    State(state): State<Arc<AppState>>,
    extract::Json(request): extract::Json<SubsetRequest>,
) -> Json<SubsetResponse> {
    Json(resolve_subset_request(&state.index, &request))
}
