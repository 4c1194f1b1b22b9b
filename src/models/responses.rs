use serde::{Deserialize, Serialize};
use crate::models::domain::FieldError;

/// Successful contact submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_email_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub admin_email_id: Option<String>,
}

/// Contact validation failure, one message per failed constraint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactErrorResponse {
    pub success: bool,
    pub error: String,
    pub details: Vec<String>,
}

/// Successful newsletter signup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterResponse {
    pub success: bool,
    pub message: String,
    pub email_ids: NewsletterEmailIds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterEmailIds {
    pub welcome_email: Option<String>,
    pub admin_email: Option<String>,
}

/// Newsletter validation failure with per-field detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterValidationResponse {
    pub success: bool,
    pub error: String,
    pub details: Vec<FieldError>,
}

/// Newsletter delivery failure; each entry is `"sent"` or `"failed"`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterDeliveryStatus {
    pub welcome_email: String,
    pub admin_email: String,
}

/// Generic failure envelope shared by both endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<NewsletterDeliveryStatus>,
}

impl FailureResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
