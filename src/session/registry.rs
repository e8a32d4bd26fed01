use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use chrono::Utc;
use uuid::Uuid;

use crate::{error::AppError, schema::CollectionsPayload, schema::Schema};

use super::{ConnectionDetails, ConnectionSession};

/// Live connection sessions keyed by id.
///
/// Sessions are created and destroyed explicitly; handlers receive the
/// session they operate on instead of reading ambient state.
#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<Uuid, Arc<ConnectionSession>>>>,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
        }
    }

    pub fn create(
        &self,
        connection: ConnectionDetails,
        collections: CollectionsPayload,
    ) -> Result<Arc<ConnectionSession>, AppError> {
        let schema = Schema::from_collections(&collections)?;
        let mut sessions = self
            .inner
            .write()
            .map_err(|_| AppError::internal("session registry lock poisoned"))?;

        if sessions.len() >= self.max_sessions {
            return Err(AppError::conflict("Too many active connections"));
        }

        let session = Arc::new(ConnectionSession {
            id: Uuid::new_v4(),
            connection,
            collections,
            schema,
            connected_at: Utc::now(),
        });
        sessions.insert(session.id, Arc::clone(&session));
        Ok(session)
    }

    pub fn get(&self, id: &Uuid) -> Result<Arc<ConnectionSession>, AppError> {
        let sessions = self
            .inner
            .read()
            .map_err(|_| AppError::internal("session registry lock poisoned"))?;
        sessions
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Connection not found"))
    }

    pub fn destroy(&self, id: &Uuid) -> Result<Arc<ConnectionSession>, AppError> {
        let mut sessions = self
            .inner
            .write()
            .map_err(|_| AppError::internal("session registry lock poisoned"))?;
        sessions
            .remove(id)
            .ok_or_else(|| AppError::not_found("Connection not found"))
    }

    pub fn len(&self) -> Result<usize, AppError> {
        self.inner
            .read()
            .map(|sessions| sessions.len())
            .map_err(|_| AppError::internal("session registry lock poisoned"))
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }
}
