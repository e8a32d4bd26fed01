use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    response::{ApiResult, JsonApiResponse},
    services::{ServiceContext, query_service::GeneratedQuery},
    session::DatabaseEngine,
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub query: String,
    #[serde(default)]
    pub database_engine: Option<DatabaseEngine>,
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/query/engines", get(list_engines))
        .route("/query/generate", post(generate))
        .with_state(state)
}

async fn list_engines() -> ApiResult<[DatabaseEngine; 4]> {
    JsonApiResponse::ok(DatabaseEngine::ALL)
}

async fn generate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateRequest>,
) -> ApiResult<GeneratedQuery> {
    let generated = ServiceContext::from_state(state.as_ref())
        .query()
        .generate(&body.query, body.database_engine, body.session_id)
        .await?;
    JsonApiResponse::ok(generated)
}
