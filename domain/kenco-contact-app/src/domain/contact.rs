use std::collections::BTreeMap;

use validator::{Validate, ValidationErrors};

/// A contact-form submission as it arrives from the website. Lives for the
/// duration of one request and is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ContactSubmission {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone,
            message: message.into(),
        }
    }

    /// The phone number, treating an empty field the same as a missing one.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|phone| !phone.is_empty())
    }

    pub fn check(&self) -> Result<(), ValidationFailure> {
        self.validate().map_err(ValidationFailure::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactConfirmation {
    pub message: String,
}

/// Per-field validation messages, ordered by field name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationFailure {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationFailure {
    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.fields.values().flatten().map(String::as_str)
    }
}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|error| match &error.message {
                        Some(message) => message.to_string(),
                        None => format!("Invalid {}", field),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        Self { fields }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.messages().collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_submission() -> ContactSubmission {
        ContactSubmission::new(
            "John Smith",
            "john@example.com",
            Some("+64 21 123 4567".to_string()),
            "I am interested in your Endurocide curtains.",
        )
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(valid_submission().check().is_ok());

        let mut without_phone = valid_submission();
        without_phone.phone = None;
        assert!(without_phone.check().is_ok());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let submission = ContactSubmission::new("", "a@b.com", None, "1234567890");
        let failure = submission.check().unwrap_err();
        assert_eq!(
            failure.field("name"),
            Some(&["Name is required".to_string()][..])
        );
        assert_eq!(failure.fields().len(), 1);
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let submission = ContactSubmission::new("Jane", "not-an-email", None, "1234567890");
        let failure = submission.check().unwrap_err();
        assert_eq!(
            failure.field("email"),
            Some(&["Valid email is required".to_string()][..])
        );
    }

    #[test]
    fn test_message_minimum_length() {
        let short = ContactSubmission::new("Jane", "jane@example.com", None, "123456789");
        let failure = short.check().unwrap_err();
        assert_eq!(
            failure.field("message"),
            Some(&["Message must be at least 10 characters".to_string()][..])
        );

        let exact = ContactSubmission::new("Jane", "jane@example.com", None, "1234567890");
        assert!(exact.check().is_ok());
    }

    #[test]
    fn test_message_length_counts_characters() {
        // ten characters, twenty bytes
        let submission = ContactSubmission::new("Jane", "jane@example.com", None, "éééééééééé");
        assert!(submission.check().is_ok());

        let submission = ContactSubmission::new("Jane", "jane@example.com", None, "ééééé");
        assert!(submission.check().is_err());
    }

    #[test]
    fn test_all_failing_fields_are_reported() {
        let submission = ContactSubmission::new("", "nope", Some(String::new()), "short");
        let failure = submission.check().unwrap_err();
        let fields: Vec<&str> = failure.fields().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["email", "message", "name"]);
        assert_eq!(
            failure.to_string(),
            "Valid email is required; Message must be at least 10 characters; Name is required"
        );
    }

    #[test]
    fn test_empty_phone_reads_as_missing() {
        let mut submission = valid_submission();
        assert_eq!(submission.phone(), Some("+64 21 123 4567"));
        submission.phone = Some(String::new());
        assert_eq!(submission.phone(), None);
    }
}
