//! Portfolio Forms - contact and newsletter handlers for the portfolio site
//!
//! Each submission is validated against a fixed schema, then two HTML emails
//! are rendered and handed to a transactional email provider: one back to
//! the submitter and one to the site owner.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{validate_contact, validate_newsletter, DeliveryError, DispatchSettings, Dispatcher, Receipt};
pub use models::{ContactForm, ContactSubmission, FieldError, NewsletterForm, NewsletterSignup};
pub use services::{EmailClient, EmailError};
