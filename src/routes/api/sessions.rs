use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    response::{ApiResult, JsonApiResponse},
    schema::FieldSpec,
    services::{ServiceContext, session_service::SessionService},
    session::{ConnectionDetails, ConnectionSession, DatabaseEngine},
    state::AppState,
    stats::SchemaReport,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub database_engine: DatabaseEngine,
    pub database_name: String,
    pub connection_string: String,
    pub collections: Vec<String>,
    pub connected_at: DateTime<Utc>,
}

impl From<&ConnectionSession> for SessionResponse {
    fn from(session: &ConnectionSession) -> Self {
        Self {
            id: session.id,
            database_engine: session.connection.database_engine,
            database_name: session.connection.database_name.clone(),
            connection_string: session.connection.redacted_connection_string(),
            collections: session.collection_names().map(str::to_string).collect(),
            connected_at: session.connected_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct DisconnectResponse {
    id: Uuid,
    disconnected: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sessions", post(connect))
        .route("/sessions/{id}", get(get_session).delete(disconnect))
        .route("/sessions/{id}/collections/{name}", get(get_collection))
        .route("/sessions/{id}/stats", get(session_stats))
        .with_state(state)
}

async fn connect(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConnectionDetails>,
) -> ApiResult<SessionResponse> {
    let session = session_service(&state).connect(body).await?;
    JsonApiResponse::with_status(
        StatusCode::CREATED,
        "connected",
        SessionResponse::from(session.as_ref()),
    )
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<SessionResponse> {
    let session = session_service(&state).get(&id)?;
    JsonApiResponse::ok(SessionResponse::from(session.as_ref()))
}

async fn disconnect(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<DisconnectResponse> {
    session_service(&state).disconnect(&id)?;
    JsonApiResponse::ok(DisconnectResponse {
        id,
        disconnected: true,
    })
}

async fn get_collection(
    State(state): State<Arc<AppState>>,
    Path((id, name)): Path<(Uuid, String)>,
) -> ApiResult<BTreeMap<String, FieldSpec>> {
    let fields = session_service(&state).collection(&id, &name)?;
    JsonApiResponse::ok(fields)
}

async fn session_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<SchemaReport> {
    let report = session_service(&state).report(&id)?;
    JsonApiResponse::ok(report)
}

fn session_service(state: &AppState) -> SessionService {
    ServiceContext::from_state(state).sessions()
}
