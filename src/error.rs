use crate::{query_api::QueryApiError, schema::SchemaError};

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Upstream(String),
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Upstream(message)
            | Self::Internal(message) => message.as_str(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        AppError::bad_request(err.to_string())
    }
}

impl From<QueryApiError> for AppError {
    fn from(err: QueryApiError) -> Self {
        match err {
            QueryApiError::InvalidRequest(_) => AppError::bad_request(err.to_string()),
            QueryApiError::Transport(_)
            | QueryApiError::Status { .. }
            | QueryApiError::InvalidPayload(_) => AppError::upstream(err.to_string()),
        }
    }
}
