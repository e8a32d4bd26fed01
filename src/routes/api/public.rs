use std::sync::Arc;

use axum::{Router, extract::State, routing::get};
use serde::Serialize;

use crate::{
    response::{ApiResult, JsonApiResponse},
    state::AppState,
};

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
    active_sessions: usize,
    table_match: &'static str,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    JsonApiResponse::ok(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
        active_sessions: state.sessions.len()?,
        table_match: state.stats.table_match().as_str(),
    })
}
