//! Client side of the external query API that introspects databases and
//! turns natural-language questions into queries.

mod client;
mod markdown;
pub mod placeholder;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::{
    schema::CollectionsPayload,
    session::{ConnectionDetails, DatabaseEngine},
};

pub use client::HttpQueryApi;
pub use markdown::extract_sql;

#[derive(Debug, Error)]
pub enum QueryApiError {
    #[error("invalid query API request: {0}")]
    InvalidRequest(String),
    #[error("query API unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("query API responded with status {status}")]
    Status { status: u16 },
    #[error("query API returned an invalid payload: {0}")]
    InvalidPayload(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateQueryRequest {
    pub query: String,
    pub database_engine: DatabaseEngine,
    /// Collections of the connected database, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<CollectionsPayload>,
}

#[async_trait]
pub trait QueryApi: Send + Sync {
    /// Introspects the database behind `connection`.
    async fn fetch_database(
        &self,
        connection: &ConnectionDetails,
    ) -> Result<CollectionsPayload, QueryApiError>;

    /// Returns the raw generated answer, usually a fenced code block.
    async fn generate_query(&self, request: &GenerateQueryRequest) -> Result<String, QueryApiError>;
}
