//! HTML bodies for the four notification emails
//!
//! Every value that came from a submission goes through [`escape`] before it
//! is placed in markup. Subjects are plain text and are not escaped.

use crate::models::{ContactSubmission, NewsletterSignup};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Subject and HTML body of one outgoing email
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Per-dispatch values shown on owner notifications
#[derive(Debug, Clone, Copy)]
pub struct SubmissionMeta {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionMeta {
    pub fn now() -> Self {
        Self {
            reference: Uuid::new_v4(),
            submitted_at: Utc::now(),
        }
    }
}

/// Escape submitted text for inclusion in an HTML body
#[inline]
pub fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}

fn layout(site_name: &str, heading: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <body style="margin:0;padding:0;background:#f4f4f5;font-family:-apple-system,Segoe UI,Helvetica,Arial,sans-serif;color:#18181b;">
    <div style="max-width:600px;margin:0 auto;padding:32px 24px;">
      <h1 style="font-size:22px;margin:0 0 24px;">{heading}</h1>
      <div style="background:#ffffff;border-radius:8px;padding:24px;line-height:1.6;">
{body}
      </div>
      <p style="font-size:12px;color:#71717a;margin-top:24px;">{site_name}</p>
    </div>
  </body>
</html>
"#,
        heading = escape(heading),
        body = body,
        site_name = escape(site_name),
    )
}

fn quoted_block(text: &str) -> String {
    format!(
        r#"<div style="white-space:pre-wrap;border-left:3px solid #d4d4d8;padding-left:12px;color:#3f3f46;">{}</div>"#,
        escape(text)
    )
}

fn meta_rows(meta: &SubmissionMeta) -> String {
    format!(
        r#"<p style="font-size:12px;color:#71717a;">Reference {reference} &middot; received {at}</p>"#,
        reference = meta.reference,
        at = meta.submitted_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    )
}

fn interests_list(interests: &[String]) -> String {
    if interests.is_empty() {
        return "<p>No specific interests selected.</p>".to_string();
    }
    let items: String = interests
        .iter()
        .map(|interest| format!("<li>{}</li>", escape(interest)))
        .collect();
    format!("<ul>{}</ul>", items)
}

/// Thank-you email sent back to the person who used the contact form
pub fn contact_confirmation(site_name: &str, submission: &ContactSubmission) -> RenderedEmail {
    let body = format!(
        r#"<p>Hi {name},</p>
<p>Thanks for getting in touch. Your message has been received and I will get back to you as soon as I can.</p>
<p>For your records, here is what you sent:</p>
<p><strong>{subject}</strong></p>
{message}"#,
        name = escape(&submission.name),
        subject = escape(&submission.subject),
        message = quoted_block(&submission.message),
    );

    RenderedEmail {
        subject: format!("Thanks for reaching out, {}", submission.name),
        html: layout(site_name, "Message received", &body),
    }
}

/// Notification to the site owner about a new contact submission
pub fn contact_notification(
    site_name: &str,
    submission: &ContactSubmission,
    meta: &SubmissionMeta,
) -> RenderedEmail {
    let body = format!(
        r#"<p><strong>From:</strong> {name} &lt;{email}&gt;</p>
<p><strong>Subject:</strong> {subject}</p>
{message}
{meta}"#,
        name = escape(&submission.name),
        email = escape(submission.email.as_ref()),
        subject = escape(&submission.subject),
        message = quoted_block(&submission.message),
        meta = meta_rows(meta),
    );

    RenderedEmail {
        subject: format!("New contact form submission: {}", submission.subject),
        html: layout(site_name, "New contact form submission", &body),
    }
}

/// Welcome email sent to a new newsletter subscriber
pub fn newsletter_welcome(site_name: &str, signup: &NewsletterSignup) -> RenderedEmail {
    let interests = if signup.interests.is_empty() {
        "<p>You will receive every update as it goes out.</p>".to_string()
    } else {
        format!(
            "<p>You told us you are interested in:</p>\n{}",
            interests_list(&signup.interests)
        )
    };

    let body = format!(
        r#"<p>Hi there,</p>
<p>Thanks for subscribing to the {site} newsletter. New posts, documentation updates and research write-ups will land in your inbox.</p>
{interests}
<p>If you did not sign up, you can safely ignore this email.</p>"#,
        site = escape(site_name),
        interests = interests,
    );

    RenderedEmail {
        subject: format!("Welcome to the {} newsletter", site_name),
        html: layout(site_name, "Welcome aboard", &body),
    }
}

/// Notification to the site owner about a new subscriber
pub fn newsletter_notification(
    site_name: &str,
    signup: &NewsletterSignup,
    meta: &SubmissionMeta,
) -> RenderedEmail {
    let body = format!(
        r#"<p><strong>Email:</strong> {email}</p>
<p><strong>Interests:</strong></p>
{interests}
{meta}"#,
        email = escape(signup.email.as_ref()),
        interests = interests_list(&signup.interests),
        meta = meta_rows(meta),
    );

    RenderedEmail {
        subject: format!("New newsletter subscriber: {}", signup.email),
        html: layout(site_name, "New newsletter subscriber", &body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmailAddress;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Jane".to_string(),
            email: EmailAddress::new_unchecked("jane@example.com".to_string()),
            subject: "Hello there".to_string(),
            message: "<script>alert(1)</script>".to_string(),
        }
    }

    #[test]
    fn test_contact_message_is_escaped() {
        let email = contact_confirmation("Portfolio", &submission());
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_notification_carries_reference() {
        let meta = SubmissionMeta::now();
        let email = contact_notification("Portfolio", &submission(), &meta);
        assert!(email.html.contains(&meta.reference.to_string()));
        assert_eq!(email.subject, "New contact form submission: Hello there");
    }

    #[test]
    fn test_empty_interests_message() {
        assert_eq!(interests_list(&[]), "<p>No specific interests selected.</p>");
    }
}
