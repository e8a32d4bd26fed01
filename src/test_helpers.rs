//! In-process fixtures for router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{Router, middleware};

use crate::{
    config::AppConfig,
    middleware::{catch_panic_layer, json_error_middleware},
    query_api::{GenerateQueryRequest, QueryApi, QueryApiError},
    routes::router,
    schema::{CollectionsPayload, FieldSpec},
    session::ConnectionDetails,
    state::AppState,
};

/// [`QueryApi`] double that answers from fixed data and records what it was asked.
#[derive(Default)]
pub struct StubQueryApi {
    collections: CollectionsPayload,
    answer: String,
    fail_with_status: Option<u16>,
    generate_requests: Mutex<Vec<GenerateQueryRequest>>,
}

impl StubQueryApi {
    pub fn new(collections: CollectionsPayload, answer: impl Into<String>) -> Self {
        Self {
            collections,
            answer: answer.into(),
            ..Self::default()
        }
    }

    /// Every call fails as if the API answered with `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    pub fn generate_requests(&self) -> Vec<GenerateQueryRequest> {
        self.generate_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), QueryApiError> {
        match self.fail_with_status {
            Some(status) => Err(QueryApiError::Status { status }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl QueryApi for StubQueryApi {
    async fn fetch_database(
        &self,
        _connection: &ConnectionDetails,
    ) -> Result<CollectionsPayload, QueryApiError> {
        self.check()?;
        Ok(self.collections.clone())
    }

    async fn generate_query(&self, request: &GenerateQueryRequest) -> Result<String, QueryApiError> {
        self.check()?;
        if let Ok(mut requests) = self.generate_requests.lock() {
            requests.push(request.clone());
        }
        Ok(self.answer.clone())
    }
}

/// Two small document collections as the query API would report them.
pub fn shop_collections() -> CollectionsPayload {
    let mut collections = CollectionsPayload::new();
    collections.insert(
        "customers".to_string(),
        [
            ("_id", "ObjectId"),
            ("name", "str"),
            ("email", "str"),
            ("signed_up", "datetime"),
        ]
        .into_iter()
        .map(|(field, tag)| (field.to_string(), FieldSpec::new(tag)))
        .collect(),
    );
    collections.insert(
        "orders".to_string(),
        [
            ("_id", "ObjectId"),
            ("customer_id", "ObjectId"),
            ("total", "float"),
        ]
        .into_iter()
        .map(|(field, tag)| (field.to_string(), FieldSpec::new(tag)))
        .collect(),
    );
    collections
}

pub fn test_state(query_api: Arc<dyn QueryApi>) -> Arc<AppState> {
    AppState::new(AppConfig::default(), query_api)
}

/// Full router with the same error layers as the binary.
pub fn test_router(state: Arc<AppState>) -> Router {
    router(state)
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
}
