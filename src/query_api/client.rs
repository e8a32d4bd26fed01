use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    schema::CollectionsPayload,
    session::ConnectionDetails,
};

use super::{GenerateQueryRequest, QueryApi, QueryApiError};

const FETCH_DATABASE_PATH: &str = "api/fetch-database";
const GENERATE_QUERY_PATH: &str = "api/generate-query";

#[derive(Debug, Serialize)]
struct FetchDatabaseBody<'a> {
    database_engine: &'a str,
    connection_string: &'a str,
    database_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct FetchDatabaseResponse {
    data: CollectionsPayload,
}

#[derive(Debug, Deserialize)]
struct GenerateQueryResponse {
    response: String,
}

/// [`QueryApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpQueryApi {
    http: Client,
    base_url: Url,
}

impl HttpQueryApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, QueryApiError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| QueryApiError::InvalidRequest(format!("base url: {err}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, QueryApiError> {
        self.base_url
            .join(path)
            .map_err(|err| QueryApiError::InvalidRequest(format!("endpoint {path}: {err}")))
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, QueryApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "calling query API");

        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), path, "query API request failed");
            return Err(QueryApiError::Status {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|err| QueryApiError::InvalidPayload(err.to_string()))
    }
}

#[async_trait]
impl QueryApi for HttpQueryApi {
    async fn fetch_database(
        &self,
        connection: &ConnectionDetails,
    ) -> Result<CollectionsPayload, QueryApiError> {
        let body = FetchDatabaseBody {
            database_engine: connection.database_engine.as_str(),
            connection_string: &connection.connection_string,
            database_name: &connection.database_name,
        };
        let response: FetchDatabaseResponse = self.post_json(FETCH_DATABASE_PATH, &body).await?;
        Ok(response.data)
    }

    async fn generate_query(&self, request: &GenerateQueryRequest) -> Result<String, QueryApiError> {
        let response: GenerateQueryResponse = self.post_json(GENERATE_QUERY_PATH, request).await?;
        Ok(response.response)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::session::DatabaseEngine;

    use super::*;

    #[test]
    fn endpoints_resolve_under_base_path() {
        let api = HttpQueryApi::new("http://127.0.0.1:5000", Duration::from_secs(5))
            .expect("client should build");
        assert_eq!(
            api.endpoint(FETCH_DATABASE_PATH).expect("join").as_str(),
            "http://127.0.0.1:5000/api/fetch-database"
        );

        let nested = HttpQueryApi::new("http://gateway.local/nlq", Duration::from_secs(5))
            .expect("client should build");
        assert_eq!(
            nested.endpoint(GENERATE_QUERY_PATH).expect("join").as_str(),
            "http://gateway.local/nlq/api/generate-query"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpQueryApi::new("not a url", Duration::from_secs(1))
            .expect_err("base url should be rejected");
        assert!(matches!(err, QueryApiError::InvalidRequest(_)));
    }

    #[test]
    fn request_bodies_use_snake_case_wire_names() {
        let body = FetchDatabaseBody {
            database_engine: DatabaseEngine::MongoDb.as_str(),
            connection_string: "mongodb://localhost:27017",
            database_name: "shop",
        };
        assert_eq!(
            serde_json::to_value(&body).expect("serialize"),
            serde_json::json!({
                "database_engine": "MongoDB",
                "connection_string": "mongodb://localhost:27017",
                "database_name": "shop"
            })
        );

        let request = GenerateQueryRequest {
            query: "top products".to_string(),
            database_engine: DatabaseEngine::PostgreSql,
            context: None,
        };
        assert_eq!(
            serde_json::to_value(&request).expect("serialize"),
            serde_json::json!({ "query": "top products", "database_engine": "PostgreSQL" })
        );
    }
}
