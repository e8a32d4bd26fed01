use std::sync::Arc;

use crate::{
    config::AppConfig, query_api::QueryApi, session::SessionRegistry, stats::SchemaStatsEngine,
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub stats: SchemaStatsEngine,
    pub sessions: SessionRegistry,
    pub query_api: Arc<dyn QueryApi>,
}

impl AppState {
    pub fn new(config: AppConfig, query_api: Arc<dyn QueryApi>) -> Arc<Self> {
        Arc::new(Self {
            stats: config.stats.engine(),
            sessions: SessionRegistry::new(config.sessions.max_sessions),
            config,
            query_api,
        })
    }
}
