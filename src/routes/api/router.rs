use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{demo_requests, public, query, schema, sessions};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public::router(state.clone()))
        .merge(schema::router(state.clone()))
        .merge(sessions::router(state.clone()))
        .merge(query::router(state))
        .merge(demo_requests::router())
}
