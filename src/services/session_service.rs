use std::{collections::BTreeMap, sync::Arc};

use uuid::Uuid;

use crate::{
    error::AppError,
    query_api::QueryApi,
    schema::FieldSpec,
    services::schema_service::SchemaService,
    session::{ConnectionDetails, ConnectionSession, SessionRegistry},
    stats::SchemaReport,
};

#[derive(Clone)]
pub struct SessionService {
    sessions: SessionRegistry,
    query_api: Arc<dyn QueryApi>,
    schema: SchemaService,
}

impl SessionService {
    pub fn new(
        sessions: SessionRegistry,
        query_api: Arc<dyn QueryApi>,
        schema: SchemaService,
    ) -> Self {
        Self {
            sessions,
            query_api,
            schema,
        }
    }

    /// Introspects the database through the query API and registers a session for it.
    pub async fn connect(
        &self,
        details: ConnectionDetails,
    ) -> Result<Arc<ConnectionSession>, AppError> {
        let details = details.normalized()?;
        let collections = self.query_api.fetch_database(&details).await.map_err(|err| {
            tracing::warn!(
                engine = %details.database_engine,
                database = %details.database_name,
                error = %err,
                "database introspection failed"
            );
            AppError::from(err)
        })?;

        let session = self.sessions.create(details, collections)?;
        tracing::info!(
            session_id = %session.id,
            engine = %session.connection.database_engine,
            database = %session.connection.database_name,
            collections = session.collections.len(),
            "database connected"
        );
        Ok(session)
    }

    pub fn get(&self, id: &Uuid) -> Result<Arc<ConnectionSession>, AppError> {
        self.sessions.get(id)
    }

    pub fn disconnect(&self, id: &Uuid) -> Result<(), AppError> {
        let session = self.sessions.destroy(id)?;
        tracing::info!(
            session_id = %session.id,
            database = %session.connection.database_name,
            "database disconnected"
        );
        Ok(())
    }

    pub fn collection(
        &self,
        id: &Uuid,
        name: &str,
    ) -> Result<BTreeMap<String, FieldSpec>, AppError> {
        let session = self.sessions.get(id)?;
        session
            .collections
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Collection not found: {name}")))
    }

    pub fn report(&self, id: &Uuid) -> Result<SchemaReport, AppError> {
        let session = self.sessions.get(id)?;
        Ok(self.schema.report(&session.schema))
    }
}
