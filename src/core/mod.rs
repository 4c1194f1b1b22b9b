// Form pipeline: validate, render, dispatch
pub mod dispatcher;
pub mod templates;
pub mod validation;

pub use dispatcher::{DeliveryError, DispatchSettings, Dispatcher, Receipt};
pub use templates::{RenderedEmail, SubmissionMeta};
pub use validation::{collect_field_errors, parse_contact, parse_newsletter, validate_contact, validate_newsletter};
