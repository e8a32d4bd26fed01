use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppError,
    schema::{CollectionsPayload, Schema},
};

const MAX_DATABASE_NAME_LEN: usize = 128;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum DatabaseEngine {
    #[default]
    #[serde(rename = "MongoDB")]
    MongoDb,
    #[serde(rename = "SQL")]
    Sql,
    #[serde(rename = "MySQL")]
    MySql,
    #[serde(rename = "PostgreSQL")]
    PostgreSql,
}

impl DatabaseEngine {
    pub const ALL: [DatabaseEngine; 4] = [
        DatabaseEngine::MongoDb,
        DatabaseEngine::Sql,
        DatabaseEngine::MySql,
        DatabaseEngine::PostgreSql,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DatabaseEngine::MongoDb => "MongoDB",
            DatabaseEngine::Sql => "SQL",
            DatabaseEngine::MySql => "MySQL",
            DatabaseEngine::PostgreSql => "PostgreSQL",
        }
    }
}

impl std::fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    pub connection_string: String,
    pub database_name: String,
    #[serde(default)]
    pub database_engine: DatabaseEngine,
}

impl ConnectionDetails {
    pub fn new(
        connection_string: impl Into<String>,
        database_name: impl Into<String>,
        database_engine: DatabaseEngine,
    ) -> Self {
        Self {
            connection_string: connection_string.into(),
            database_name: database_name.into(),
            database_engine,
        }
    }

    /// Trims both fields and rejects blank or oversized values.
    pub fn normalized(self) -> Result<Self, AppError> {
        let connection_string = self.connection_string.trim();
        if connection_string.is_empty() {
            return Err(AppError::bad_request("connectionString is required"));
        }

        let database_name = self.database_name.trim();
        if database_name.is_empty() {
            return Err(AppError::bad_request("databaseName is required"));
        }
        if database_name.len() > MAX_DATABASE_NAME_LEN {
            return Err(AppError::bad_request("databaseName is too long"));
        }

        Ok(Self {
            connection_string: connection_string.to_string(),
            database_name: database_name.to_string(),
            database_engine: self.database_engine,
        })
    }

    /// Connection string with any `user:password@` credentials masked.
    pub fn redacted_connection_string(&self) -> String {
        let raw = self.connection_string.as_str();
        let Some((scheme, rest)) = raw.split_once("://") else {
            return raw.to_string();
        };
        // credentials live in the authority; path and query may contain '@'
        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let (authority, tail) = rest.split_at(authority_end);
        match authority.rsplit_once('@') {
            Some((_, host)) => format!("{scheme}://***@{host}{tail}"),
            None => raw.to_string(),
        }
    }
}

/// An established link to a user database, passed explicitly to whatever needs it.
#[derive(Debug, Clone)]
pub struct ConnectionSession {
    pub id: Uuid,
    pub connection: ConnectionDetails,
    pub collections: CollectionsPayload,
    pub schema: Schema,
    pub connected_at: DateTime<Utc>,
}

impl ConnectionSession {
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }
}
