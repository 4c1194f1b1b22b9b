use crate::models::{ContactForm, ContactSubmission, EmailAddress, FieldError, NewsletterForm, NewsletterSignup};
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

/// Flatten a validation report into per-field errors
///
/// Fields are emitted in `order`; each failed constraint on a field yields
/// its own entry. Fields not listed in `order` follow, sorted by name.
pub fn collect_field_errors(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldError> {
    let mut collected: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, list)| {
            let field = field.to_string();
            list.iter()
                .map(|error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::new(field.clone(), message)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    sort_by_field(&mut collected, order);
    collected
}

fn sort_by_field(errors: &mut [FieldError], order: &[&str]) {
    let rank = |field: &str| order.iter().position(|f| *f == field).unwrap_or(order.len());
    // Stable, so several errors on one field keep their relative order
    errors.sort_by(|a, b| {
        rank(a.field.as_str())
            .cmp(&rank(b.field.as_str()))
            .then_with(|| a.field.cmp(&b.field))
    });
}

/// Combine JSON type errors with the constraint report
///
/// A field that already failed its type check is not reported again by
/// the constraint rules (it reaches them as absent).
fn merge_errors(
    report: Result<(), ValidationErrors>,
    mut errors: Vec<FieldError>,
    order: &[&str],
) -> Vec<FieldError> {
    if let Err(report) = report {
        let typed: Vec<String> = errors.iter().map(|e| e.field.clone()).collect();
        errors.extend(
            collect_field_errors(&report, order)
                .into_iter()
                .filter(|e| !typed.contains(&e.field)),
        );
    }
    sort_by_field(&mut errors, order);
    errors
}

fn field_label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Read an optional string member; `null` counts as absent
fn string_member(body: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.clone()),
        Some(_) => {
            errors.push(FieldError::new(field, format!("{} must be a string", field_label(field))));
            None
        }
    }
}

/// Read an optional list-of-strings member; `null` counts as absent
fn string_list_member(
    body: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Vec<String>> {
    let invalid = |errors: &mut Vec<FieldError>| {
        errors.push(FieldError::new(
            field,
            format!("{} must be a list of strings", field_label(field)),
        ));
    };

    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => {
            let strings: Option<Vec<String>> = items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect();
            if strings.is_none() {
                invalid(errors);
            }
            strings
        }
        Some(_) => {
            invalid(errors);
            None
        }
    }
}

/// Type-check a contact body member by member, then validate it
pub fn parse_contact(body: &Map<String, Value>) -> Result<ContactSubmission, Vec<FieldError>> {
    let mut type_errors = Vec::new();
    let form = ContactForm {
        name: string_member(body, "name", &mut type_errors),
        email: string_member(body, "email", &mut type_errors),
        subject: string_member(body, "subject", &mut type_errors),
        message: string_member(body, "message", &mut type_errors),
    };
    check_contact(form, type_errors)
}

/// Type-check a newsletter body member by member, then validate it
pub fn parse_newsletter(body: &Map<String, Value>) -> Result<NewsletterSignup, Vec<FieldError>> {
    let mut type_errors = Vec::new();
    let form = NewsletterForm {
        email: string_member(body, "email", &mut type_errors),
        interests: string_list_member(body, "interests", &mut type_errors),
    };
    check_newsletter(form, type_errors)
}

/// Validate a contact form, producing a trusted submission
///
/// All fields are checked before returning; nothing short-circuits.
pub fn validate_contact(form: ContactForm) -> Result<ContactSubmission, Vec<FieldError>> {
    check_contact(form, Vec::new())
}

/// Validate a newsletter signup, defaulting missing interests to an empty list
pub fn validate_newsletter(form: NewsletterForm) -> Result<NewsletterSignup, Vec<FieldError>> {
    check_newsletter(form, Vec::new())
}

fn check_contact(form: ContactForm, type_errors: Vec<FieldError>) -> Result<ContactSubmission, Vec<FieldError>> {
    let errors = merge_errors(form.validate(), type_errors, &ContactForm::FIELDS);

    // An absent field always carries a `required` or type error
    let (Some(name), Some(email), Some(subject), Some(message)) =
        (form.name, form.email, form.subject, form.message)
    else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactSubmission {
        name,
        email: EmailAddress::new_unchecked(email),
        subject,
        message,
    })
}

fn check_newsletter(form: NewsletterForm, type_errors: Vec<FieldError>) -> Result<NewsletterSignup, Vec<FieldError>> {
    let errors = merge_errors(form.validate(), type_errors, &NewsletterForm::FIELDS);

    let Some(email) = form.email else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewsletterSignup {
        email: EmailAddress::new_unchecked(email),
        interests: form.interests.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_contact() -> ContactForm {
        ContactForm {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            subject: Some("Hello there".to_string()),
            message: Some("This is a test message.".to_string()),
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_valid_contact_passes() {
        let submission = validate_contact(valid_contact()).unwrap();
        assert_eq!(submission.name, "Jane Doe");
        assert_eq!(submission.email.as_ref(), "jane@example.com");
    }

    #[test]
    fn test_errors_follow_field_order() {
        let form = ContactForm {
            name: Some("J".to_string()),
            email: Some("nope".to_string()),
            subject: None,
            message: Some("short".to_string()),
        };

        let errors = validate_contact(form).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "subject", "message"]);
        assert_eq!(errors[2].message, "Subject is required");
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut form = valid_contact();
        // Two characters, three bytes
        form.name = Some("Zoë".chars().skip(1).collect());
        assert!(validate_contact(form).is_ok());
    }

    #[test]
    fn test_wrong_type_reported_with_other_fields() {
        let body = object(json!({ "name": 42, "email": "bad" }));

        let errors = parse_contact(&body).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "subject", "message"]);
        assert_eq!(errors[0].message, "Name must be a string");
    }

    #[test]
    fn test_null_member_is_absent() {
        let body = object(json!({
            "name": null,
            "email": "jane@example.com",
            "subject": "Hello there",
            "message": "This is a test message."
        }));

        let errors = parse_contact(&body).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("name", "Name is required")]);
    }

    #[test]
    fn test_newsletter_interests_default_to_empty() {
        let form = NewsletterForm {
            email: Some("reader@example.com".to_string()),
            interests: None,
        };
        let signup = validate_newsletter(form).unwrap();
        assert!(signup.interests.is_empty());
    }

    #[test]
    fn test_newsletter_interests_must_be_strings() {
        for interests in [json!("rust"), json!(["rust", 7])] {
            let body = object(json!({ "email": "bad", "interests": interests }));

            let errors = parse_newsletter(&body).unwrap_err();
            assert_eq!(
                errors,
                vec![
                    FieldError::new("email", "Please provide a valid email address"),
                    FieldError::new("interests", "Interests must be a list of strings"),
                ]
            );
        }
    }

    #[test]
    fn test_newsletter_missing_email() {
        let errors = validate_newsletter(NewsletterForm::default()).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("email", "Email is required")]);
    }
}
