use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use crate::core::parse_contact;
use crate::models::{ContactErrorResponse, ContactResponse, FailureResponse};
use crate::routes::{is_non_object_body, AppState, BodyError, MAX_BODY_BYTES, NOT_AN_OBJECT};
use serde_json::{Map, Value};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/contact")
            .app_data(
                web::JsonConfig::default()
                    .limit(MAX_BODY_BYTES)
                    .error_handler(handle_contact_body_error),
            )
            .route(web::post().to(submit_contact)),
    );
}

/// Contact form endpoint
///
/// POST /api/contact
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "email": "string",
///   "subject": "string",
///   "message": "string"
/// }
/// ```
async fn submit_contact(
    state: web::Data<AppState>,
    body: web::Json<Map<String, Value>>,
) -> impl Responder {
    let submission = match parse_contact(&body) {
        Ok(submission) => submission,
        Err(errors) => {
            tracing::warn!("Contact form rejected: {:?}", errors);
            return HttpResponse::BadRequest().json(ContactErrorResponse {
                success: false,
                error: "Validation failed".to_string(),
                details: errors.into_iter().map(|e| e.message).collect(),
            });
        }
    };

    match state.dispatcher.dispatch_contact(&submission).await {
        Ok(receipt) => {
            tracing::info!("Contact submission {} accepted", receipt.reference);
            HttpResponse::Ok().json(ContactResponse {
                success: true,
                message: "Thank you for your message! I'll get back to you soon.".to_string(),
                user_email_id: receipt.submitter_email_id,
                admin_email_id: receipt.owner_email_id,
            })
        }
        Err(e) => {
            tracing::error!("Failed to send contact emails: {}", e);
            HttpResponse::InternalServerError()
                .json(FailureResponse::new("Failed to send message. Please try again later."))
        }
    }
}

/// Map extractor failures onto the contact response envelopes
fn handle_contact_body_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Contact payload error on {}: {}", req.path(), err);

    let body_error = if is_non_object_body(&err) {
        BodyError::new(
            StatusCode::BAD_REQUEST,
            &ContactErrorResponse {
                success: false,
                error: "Validation failed".to_string(),
                details: vec![NOT_AN_OBJECT.to_string()],
            },
        )
    } else {
        BodyError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            &FailureResponse::new("Internal server error"),
        )
    };

    body_error.into()
}
