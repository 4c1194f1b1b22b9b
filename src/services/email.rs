use crate::models::EmailMessage;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the email provider
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Provider rejected the request ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Body of a successful send
#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Body the provider returns for rejected requests
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Transactional email API client
///
/// Speaks the `POST /emails` contract: a sender, a recipient list, a
/// subject and an HTML body in, a message id out. Acceptance by the
/// provider is all this reports; delivery happens later, out of band.
pub struct EmailClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl EmailClient {
    /// Create a new email client
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, EmailError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Submit one email; returns the provider's message id when it sends one
    pub async fn send(&self, message: &EmailMessage) -> Result<Option<String>, EmailError> {
        let url = format!("{}/emails", self.base_url.trim_end_matches('/'));

        tracing::debug!("Sending email \"{}\" to {} recipient(s)", message.subject, message.to.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(EmailError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorBody>(&body)
                .ok()
                .and_then(|b| match (b.name, b.message) {
                    (Some(name), Some(message)) => Some(format!("{}: {}", name, message)),
                    (None, Some(message)) => Some(message),
                    (Some(name), None) => Some(name),
                    (None, None) => None,
                })
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

            return Err(EmailError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| EmailError::InvalidResponse(format!("Failed to parse send response: {}", e)))?;

        tracing::debug!("Provider accepted email: id={:?}", body.id);

        Ok(body.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> EmailMessage {
        EmailMessage {
            from: "Portfolio <hello@example.com>".to_string(),
            to: vec!["jane@example.com".to_string()],
            reply_to: None,
            subject: "Thanks".to_string(),
            html: "<p>Hi</p>".to_string(),
        }
    }

    #[test]
    fn test_email_client_creation() {
        let client = EmailClient::new(
            "https://mail.test".to_string(),
            "re_test".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(client.base_url, "https://mail.test");
        assert_eq!(client.api_key, "re_test");
    }

    #[tokio::test]
    async fn test_send_returns_provider_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/emails")
            .match_header("authorization", "Bearer re_test")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "to": ["jane@example.com"],
                "subject": "Thanks",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"email_123"}"#)
            .create_async()
            .await;

        let client = EmailClient::new(server.url(), "re_test".to_string(), Duration::from_secs(5)).unwrap();
        let id = client.send(&message()).await.unwrap();

        assert_eq!(id.as_deref(), Some("email_123"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_maps_provider_rejection() {
        let mut server = mockito::Server::new_async().await;
        let _rejected = server
            .mock("POST", "/emails")
            .with_status(422)
            .with_body(r#"{"statusCode":422,"name":"validation_error","message":"Invalid `to` field"}"#)
            .create_async()
            .await;

        let client = EmailClient::new(server.url(), "re_test".to_string(), Duration::from_secs(5)).unwrap();
        let err = client.send(&message()).await.unwrap_err();

        match err {
            EmailError::ApiError { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "validation_error: Invalid `to` field");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_send_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        let _unauthorized = server.mock("POST", "/emails").with_status(401).create_async().await;

        let client = EmailClient::new(server.url(), "bad".to_string(), Duration::from_secs(5)).unwrap();
        assert!(matches!(client.send(&message()).await, Err(EmailError::Unauthorized)));
    }
}
