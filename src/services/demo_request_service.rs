use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

const MAX_FIELD_LEN: usize = 200;
const MAX_MESSAGE_LEN: usize = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoRole {
    Developer,
    DataScientist,
    BusinessAnalyst,
    Executive,
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<DemoRole>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoRequestReceipt {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
}

/// Accepts contact/demo requests. Nothing is stored; accepted requests are logged.
#[derive(Clone, Default)]
pub struct DemoRequestService;

impl DemoRequestService {
    pub fn new() -> Self {
        Self
    }

    pub fn submit(&self, request: &DemoRequest) -> Result<DemoRequestReceipt, AppError> {
        let name = required("name", &request.name, MAX_FIELD_LEN)?;
        let email = required("email", &request.email, MAX_FIELD_LEN)?;
        if !looks_like_email(email) {
            return Err(AppError::bad_request("email is invalid"));
        }
        required("message", &request.message, MAX_MESSAGE_LEN)?;
        if let Some(company) = request.company.as_deref()
            && company.trim().len() > MAX_FIELD_LEN
        {
            return Err(AppError::bad_request("company is too long"));
        }

        let receipt = DemoRequestReceipt {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
        };
        tracing::info!(
            request_id = %receipt.id,
            requester = %name,
            email = %email,
            company = request.company.as_deref().unwrap_or(""),
            role = ?request.role,
            "demo request received"
        );
        Ok(receipt)
    }
}

fn required<'a>(field: &str, value: &'a str, max_len: usize) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::bad_request(format!("{field} is too long")));
    }
    Ok(trimmed)
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, message: &str) -> DemoRequest {
        DemoRequest {
            name: "Ada".to_string(),
            email: email.to_string(),
            company: Some("Analytical Engines".to_string()),
            role: Some(DemoRole::DataScientist),
            message: message.to_string(),
        }
    }

    #[test]
    fn accepts_complete_request() {
        let receipt = DemoRequestService::new()
            .submit(&request("ada@example.com", "Please show me a demo"))
            .expect("request should be accepted");
        assert!(!receipt.id.is_nil());
    }

    #[test]
    fn rejects_bad_email_and_blank_message() {
        let service = DemoRequestService::new();
        let err = service
            .submit(&request("ada.example.com", "hi"))
            .expect_err("email without @ should fail");
        assert_eq!(err.message(), "email is invalid");

        let err = service
            .submit(&request("ada@example.com", "   "))
            .expect_err("blank message should fail");
        assert_eq!(err.message(), "message is required");
    }

    #[test]
    fn roles_use_form_values() {
        let role: DemoRole = serde_json::from_str("\"business_analyst\"").expect("role");
        assert_eq!(role, DemoRole::BusinessAnalyst);
    }
}
