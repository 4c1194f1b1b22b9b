// Route exports
pub mod contact;
pub mod health;
pub mod newsletter;

use crate::core::Dispatcher;
use actix_web::{error, http::StatusCode, web, HttpResponse};
use serde::Serialize;
use serde_json::error::Category;

/// Largest JSON body accepted by the form endpoints
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::configure)
            .configure(contact::configure)
            .configure(newsletter::configure),
    );
}

/// Error raised by the JSON extractor before a handler runs
///
/// Carries a ready-made body so each endpoint keeps its own response shape.
#[derive(Debug)]
pub struct BodyError {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl BodyError {
    pub fn new<T: Serialize>(status: StatusCode, body: &T) -> Self {
        let body = serde_json::to_value(body)
            .unwrap_or_else(|_| serde_json::json!({ "success": false, "error": "Internal server error" }));
        Self { status, body }
    }
}

impl std::fmt::Display for BodyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.body)
    }
}

impl std::error::Error for BodyError {}

impl error::ResponseError for BodyError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

/// Message returned when a well-formed body is not a JSON object
pub const NOT_AN_OBJECT: &str = "Request body must be a JSON object";

/// Whether the extractor failed on valid JSON that is not an object
///
/// Form bodies are read as JSON objects, so a data error can only mean an
/// array or a scalar at the top level. Syntax errors, truncated bodies and
/// wrong content types were never parseable and are not covered here.
pub fn is_non_object_body(err: &error::JsonPayloadError) -> bool {
    matches!(err, error::JsonPayloadError::Deserialize(e) if e.classify() == Category::Data)
}
