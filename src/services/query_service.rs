use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::AppError,
    query_api::{GenerateQueryRequest, QueryApi, extract_sql},
    session::{DatabaseEngine, SessionRegistry},
};

const MAX_QUERY_LEN: usize = 2_000;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuery {
    pub query: String,
    pub database_engine: DatabaseEngine,
    pub session_id: Option<Uuid>,
    /// Answer as returned by the query API.
    pub raw: String,
    /// Copy-ready statement.
    pub statement: String,
}

#[derive(Clone)]
pub struct QueryService {
    query_api: Arc<dyn QueryApi>,
    sessions: SessionRegistry,
}

impl QueryService {
    pub fn new(query_api: Arc<dyn QueryApi>, sessions: SessionRegistry) -> Self {
        Self {
            query_api,
            sessions,
        }
    }

    /// Generates a query for `question`.
    ///
    /// With a session, its collections are sent as context and its engine is
    /// used unless one is given explicitly.
    pub async fn generate(
        &self,
        question: &str,
        database_engine: Option<DatabaseEngine>,
        session_id: Option<Uuid>,
    ) -> Result<GeneratedQuery, AppError> {
        let question = normalize_question(question)?;
        let session = session_id
            .map(|id| self.sessions.get(&id))
            .transpose()?;

        let database_engine = database_engine
            .or_else(|| session.as_ref().map(|s| s.connection.database_engine))
            .unwrap_or_default();
        let request = GenerateQueryRequest {
            query: question.to_string(),
            database_engine,
            context: session.as_ref().map(|s| s.collections.clone()),
        };

        let raw = self.query_api.generate_query(&request).await.map_err(|err| {
            tracing::warn!(engine = %database_engine, error = %err, "query generation failed");
            AppError::from(err)
        })?;
        let statement = extract_sql(&raw).trim().to_string();

        Ok(GeneratedQuery {
            query: request.query,
            database_engine,
            session_id,
            raw,
            statement,
        })
    }
}

fn normalize_question(raw: &str) -> Result<&str, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request("query is required"));
    }
    if trimmed.chars().count() > MAX_QUERY_LEN {
        return Err(AppError::bad_request("query is too long"));
    }
    Ok(trimmed)
}
