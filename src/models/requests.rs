use validator::Validate;

/// Contact form fields as read from the request body
///
/// Every field is optional so that a missing field is reported alongside
/// the others. Bodies are read member by member in
/// [`crate::core::validation::parse_contact`], which only accepts objects.
#[derive(Debug, Clone, Default, Validate)]
pub struct ContactForm {
    #[validate(
        required(message = "Name is required"),
        length(min = 2, max = 100, message = "Name must be between 2 and 100 characters")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Email is required"),
        email(message = "Please provide a valid email address")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Subject is required"),
        length(min = 5, max = 200, message = "Subject must be between 5 and 200 characters")
    )]
    pub subject: Option<String>,
    #[validate(
        required(message = "Message is required"),
        length(min = 10, max = 2000, message = "Message must be between 10 and 2000 characters")
    )]
    pub message: Option<String>,
}

impl ContactForm {
    /// Field names in the order errors are reported
    pub const FIELDS: [&'static str; 4] = ["name", "email", "subject", "message"];
}

/// Newsletter signup fields as read from the request body
#[derive(Debug, Clone, Default, Validate)]
pub struct NewsletterForm {
    #[validate(
        required(message = "Email is required"),
        email(message = "Please provide a valid email address")
    )]
    pub email: Option<String>,
    /// Topics the subscriber picked; absent or `null` means none
    pub interests: Option<Vec<String>>,
}

impl NewsletterForm {
    pub const FIELDS: [&'static str; 2] = ["email", "interests"];
}
