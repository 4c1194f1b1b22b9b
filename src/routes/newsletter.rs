use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use crate::core::parse_newsletter;
use crate::models::{
    FailureResponse, FieldError, NewsletterDeliveryStatus, NewsletterEmailIds, NewsletterResponse,
    NewsletterValidationResponse,
};
use crate::routes::{is_non_object_body, AppState, BodyError, MAX_BODY_BYTES, NOT_AN_OBJECT};
use serde_json::{Map, Value};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/newsletter")
            .app_data(
                web::JsonConfig::default()
                    .limit(MAX_BODY_BYTES)
                    .error_handler(handle_newsletter_body_error),
            )
            .route(web::post().to(subscribe)),
    );
}

fn delivery_label(accepted: bool) -> String {
    let label = if accepted { "sent" } else { "failed" };
    label.to_string()
}

/// Newsletter signup endpoint
///
/// POST /api/newsletter
///
/// Request body:
/// ```json
/// {
///   "email": "string",
///   "interests": ["string"]
/// }
/// ```
async fn subscribe(
    state: web::Data<AppState>,
    body: web::Json<Map<String, Value>>,
) -> impl Responder {
    let signup = match parse_newsletter(&body) {
        Ok(signup) => signup,
        Err(errors) => {
            tracing::warn!("Newsletter signup rejected: {:?}", errors);
            return HttpResponse::BadRequest().json(NewsletterValidationResponse {
                success: false,
                error: "Invalid request data".to_string(),
                details: errors,
            });
        }
    };

    match state.dispatcher.dispatch_newsletter(&signup).await {
        Ok(receipt) => {
            tracing::info!("Newsletter signup {} accepted", receipt.reference);
            HttpResponse::Ok().json(NewsletterResponse {
                success: true,
                message: "Successfully subscribed to the newsletter!".to_string(),
                email_ids: NewsletterEmailIds {
                    welcome_email: receipt.submitter_email_id,
                    admin_email: receipt.owner_email_id,
                },
            })
        }
        Err(e) => {
            tracing::error!("Failed to send newsletter emails: {}", e);
            HttpResponse::InternalServerError().json(FailureResponse {
                success: false,
                error: "Failed to process subscription. Please try again later.".to_string(),
                details: Some(NewsletterDeliveryStatus {
                    welcome_email: delivery_label(e.submitter_accepted()),
                    admin_email: delivery_label(e.owner_accepted()),
                }),
            })
        }
    }
}

/// Map extractor failures onto the newsletter response envelopes
fn handle_newsletter_body_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Newsletter payload error on {}: {}", req.path(), err);

    let body_error = if is_non_object_body(&err) {
        BodyError::new(
            StatusCode::BAD_REQUEST,
            &NewsletterValidationResponse {
                success: false,
                error: "Invalid request data".to_string(),
                details: vec![FieldError::new("body", NOT_AN_OBJECT)],
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
