use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod public;

pub fn router(state: Arc<AppState>) -> Router {
    public::router(state)
}
