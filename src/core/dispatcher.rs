use crate::core::templates::{self, RenderedEmail, SubmissionMeta};
use crate::models::{ContactSubmission, EmailMessage, NewsletterSignup};
use crate::services::{EmailClient, EmailError};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Addresses and branding applied to every outgoing email
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub from_address: String,
    pub admin_address: String,
    pub site_name: String,
}

/// Both emails of a submission were accepted by the provider
#[derive(Debug, Clone)]
pub struct Receipt {
    pub reference: Uuid,
    /// Provider id of the email sent to the submitter
    pub submitter_email_id: Option<String>,
    /// Provider id of the email sent to the site owner
    pub owner_email_id: Option<String>,
}

/// At least one of the two sends was rejected
#[derive(Debug, Error)]
#[error(
    "notification delivery failed for submission {}: submitter={}, owner={}",
    .reference,
    describe(.submitter),
    describe(.owner)
)]
pub struct DeliveryError {
    pub reference: Uuid,
    pub submitter: Result<Option<String>, EmailError>,
    pub owner: Result<Option<String>, EmailError>,
}

impl DeliveryError {
    pub fn submitter_accepted(&self) -> bool {
        self.submitter.is_ok()
    }

    pub fn owner_accepted(&self) -> bool {
        self.owner.is_ok()
    }
}

fn describe(outcome: &Result<Option<String>, EmailError>) -> String {
    match outcome {
        Ok(_) => "accepted".to_string(),
        Err(e) => e.to_string(),
    }
}

/// Renders and submits the two emails that follow every accepted form
///
/// Each call is independent: nothing is retried and nothing is recorded
/// once the call returns.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<EmailClient>,
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(client: Arc<EmailClient>, settings: DispatchSettings) -> Self {
        Self { client, settings }
    }

    /// Send the thank-you email and the owner notification for a contact message
    pub async fn dispatch_contact(&self, submission: &ContactSubmission) -> Result<Receipt, DeliveryError> {
        let meta = SubmissionMeta::now();
        let site = &self.settings.site_name;

        let to_submitter = self.message(
            submission.email.as_ref(),
            None,
            templates::contact_confirmation(site, submission),
        );
        let to_owner = self.message(
            &self.settings.admin_address,
            Some(submission.email.to_string()),
            templates::contact_notification(site, submission, &meta),
        );

        tracing::info!("Dispatching contact emails for submission {}", meta.reference);

        self.send_pair(meta.reference, to_submitter, to_owner).await
    }

    /// Send the welcome email and the owner notification for a newsletter signup
    pub async fn dispatch_newsletter(&self, signup: &NewsletterSignup) -> Result<Receipt, DeliveryError> {
        let meta = SubmissionMeta::now();
        let site = &self.settings.site_name;

        let to_subscriber = self.message(
            signup.email.as_ref(),
            None,
            templates::newsletter_welcome(site, signup),
        );
        let to_owner = self.message(
            &self.settings.admin_address,
            None,
            templates::newsletter_notification(site, signup, &meta),
        );

        tracing::info!(
            "Dispatching newsletter emails for submission {} ({} interests)",
            meta.reference,
            signup.interests.len()
        );

        self.send_pair(meta.reference, to_subscriber, to_owner).await
    }

    fn message(&self, to: &str, reply_to: Option<String>, rendered: RenderedEmail) -> EmailMessage {
        EmailMessage {
            from: self.settings.from_address.clone(),
            to: vec![to.to_string()],
            reply_to,
            subject: rendered.subject,
            html: rendered.html,
        }
    }

    async fn send_pair(
        &self,
        reference: Uuid,
        to_submitter: EmailMessage,
        to_owner: EmailMessage,
    ) -> Result<Receipt, DeliveryError> {
        // Both sends are always attempted; neither outcome gates the other
        let (submitter, owner) = tokio::join!(self.client.send(&to_submitter), self.client.send(&to_owner));

        match (submitter, owner) {
            (Ok(submitter_email_id), Ok(owner_email_id)) => {
                tracing::info!(
                    "Provider accepted both emails for submission {} (submitter: {:?}, owner: {:?})",
                    reference,
                    submitter_email_id,
                    owner_email_id
                );
                Ok(Receipt {
                    reference,
                    submitter_email_id,
                    owner_email_id,
                })
            }
            (submitter, owner) => {
                if let Err(e) = &submitter {
                    tracing::error!("Submitter email failed for submission {}: {}", reference, e);
                }
                if let Err(e) = &owner {
                    tracing::error!("Owner email failed for submission {}: {}", reference, e);
                }
                Err(DeliveryError {
                    reference,
                    submitter,
                    owner,
                })
            }
        }
    }
}
