//! Client-side checks applied before a contact form is sent.
//!
//! Both checks are conveniences for the browser experience. The server does not
//! enforce either of them.

use std::time::{Duration, Instant};

use crate::ContactRequest;

pub const RESUBMIT_COOLDOWN: Duration = Duration::from_millis(3000);
pub const THROTTLED_MESSAGE: &str = "Please wait a moment before submitting again.";

/// The raw form state, including the hidden `website` honeypot field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub website: String,
}

impl ContactFormFields {
    pub fn to_request(&self) -> ContactRequest {
        ContactRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: Some(self.phone.clone()).filter(|phone| !phone.is_empty()),
            message: self.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeDecision {
    Forward(ContactRequest),
    /// The honeypot was filled in. Drop the submission without telling anyone.
    Abandon,
    Throttled,
}

#[derive(Debug, Clone)]
pub struct ContactFormIntake {
    cooldown: Duration,
    last_forwarded_at: Option<Instant>,
}

impl Default for ContactFormIntake {
    fn default() -> Self {
        Self::new(RESUBMIT_COOLDOWN)
    }
}

impl ContactFormIntake {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_forwarded_at: None,
        }
    }

    /// Decides what to do with the form at `now`. A forwarded submission
    /// starts a new cooldown window whether or not the send later succeeds.
    pub fn check(&mut self, fields: &ContactFormFields, now: Instant) -> IntakeDecision {
        if !fields.website.is_empty() {
            return IntakeDecision::Abandon;
        }

        if let Some(last) = self.last_forwarded_at
            && now.saturating_duration_since(last) < self.cooldown
        {
            return IntakeDecision::Throttled;
        }

        self.last_forwarded_at = Some(now);
        IntakeDecision::Forward(fields.to_request())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ContactFormFields {
        ContactFormFields {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: String::new(),
            message: "Please send me more information.".to_string(),
            website: String::new(),
        }
    }

    #[test]
    fn test_honeypot_abandons() {
        let mut intake = ContactFormIntake::default();
        let mut form = filled_form();
        form.website = "http://spam.example".to_string();

        assert_eq!(intake.check(&form, Instant::now()), IntakeDecision::Abandon);
        // an abandoned submission does not start the cooldown
        form.website.clear();
        assert!(matches!(
            intake.check(&form, Instant::now()),
            IntakeDecision::Forward(_)
        ));
    }

    #[test]
    fn test_resubmission_within_cooldown_is_throttled() {
        let mut intake = ContactFormIntake::default();
        let form = filled_form();
        let start = Instant::now();

        assert!(matches!(intake.check(&form, start), IntakeDecision::Forward(_)));
        assert_eq!(
            intake.check(&form, start + Duration::from_millis(2999)),
            IntakeDecision::Throttled
        );
        assert!(matches!(
            intake.check(&form, start + Duration::from_millis(3000)),
            IntakeDecision::Forward(_)
        ));
    }

    #[test]
    fn test_empty_phone_is_omitted() {
        let mut form = filled_form();
        assert_eq!(form.to_request().phone, None);

        form.phone = "09 123 4567".to_string();
        assert_eq!(form.to_request().phone.as_deref(), Some("09 123 4567"));
    }
}
