use std::sync::Arc;

use crate::{
    query_api::QueryApi,
    services::{
        query_service::QueryService, schema_service::SchemaService,
        session_service::SessionService,
    },
    session::SessionRegistry,
    state::AppState,
    stats::SchemaStatsEngine,
};

#[derive(Clone)]
pub struct ServiceContext {
    stats: SchemaStatsEngine,
    sessions: SessionRegistry,
    query_api: Arc<dyn QueryApi>,
}

impl ServiceContext {
    pub fn new(
        stats: SchemaStatsEngine,
        sessions: SessionRegistry,
        query_api: Arc<dyn QueryApi>,
    ) -> Self {
        Self {
            stats,
            sessions,
            query_api,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.stats,
            state.sessions.clone(),
            Arc::clone(&state.query_api),
        )
    }

    pub fn schema(&self) -> SchemaService {
        SchemaService::new(self.stats)
    }

    pub fn sessions(&self) -> SessionService {
        SessionService::new(
            self.sessions.clone(),
            Arc::clone(&self.query_api),
            self.schema(),
        )
    }

    pub fn query(&self) -> QueryService {
        QueryService::new(Arc::clone(&self.query_api), self.sessions.clone())
    }
}
