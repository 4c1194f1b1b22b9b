// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ContactSubmission, EmailAddress, EmailMessage, FieldError, NewsletterSignup};
pub use requests::{ContactForm, NewsletterForm};
pub use responses::{
    ContactErrorResponse, ContactResponse, FailureResponse, HealthResponse, NewsletterDeliveryStatus,
    NewsletterEmailIds, NewsletterResponse, NewsletterValidationResponse,
};
