use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    response::{ApiResult, JsonApiResponse},
    schema::Schema,
    services::{
        ServiceContext,
        schema_service::{SchemaAnalysis, SchemaService, TableDetail},
    },
    state::AppState,
    stats::SchemaReport,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/schema/sample", get(sample_schema))
        .route("/schema/sample/stats", get(sample_stats))
        .route("/schema/sample/tables/{name}", get(sample_table))
        .route("/schema/stats", post(analyze_schema))
        .with_state(state)
}

async fn sample_schema(State(state): State<Arc<AppState>>) -> ApiResult<Schema> {
    JsonApiResponse::ok(schema_service(&state).sample())
}

async fn sample_stats(State(state): State<Arc<AppState>>) -> ApiResult<SchemaReport> {
    let service = schema_service(&state);
    JsonApiResponse::ok(service.report(&service.sample()))
}

async fn sample_table(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<TableDetail> {
    let service = schema_service(&state);
    let detail = service.table_detail(&service.sample(), &name)?;
    JsonApiResponse::ok(detail)
}

async fn analyze_schema(
    State(state): State<Arc<AppState>>,
    Json(schema): Json<Schema>,
) -> ApiResult<SchemaAnalysis> {
    let analysis = schema_service(&state).analyze(&schema)?;
    JsonApiResponse::ok(analysis)
}

fn schema_service(state: &AppState) -> SchemaService {
    ServiceContext::from_state(state).schema()
}
