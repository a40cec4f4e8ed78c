use std::sync::Arc;

use log::{error, info};

use crate::{
    domain::contact::ContactSubmission,
    ports::email::{EmailPort, OutgoingEmail},
};

pub const DEFAULT_SENDER: &str = "noreply@kenco.nz";
pub const DEFAULT_PRIMARY_RECIPIENT: &str = "web@kenco.nz";
pub const SECONDARY_RECIPIENT: &str = "peter.carikas@kenco.nz";

const PHONE_PLACEHOLDER: &str = "Not provided";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMailSettings {
    pub from: String,
    pub primary_recipient: String,
}

impl Default for ContactMailSettings {
    fn default() -> Self {
        Self {
            from: DEFAULT_SENDER.to_string(),
            primary_recipient: DEFAULT_PRIMARY_RECIPIENT.to_string(),
        }
    }
}

impl ContactMailSettings {
    /// Reads `SES_FROM_EMAIL` and `SES_TO_EMAIL`, falling back to the defaults
    /// when unset or blank.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            from: non_blank_env("SES_FROM_EMAIL").unwrap_or(defaults.from),
            primary_recipient: non_blank_env("SES_TO_EMAIL")
                .unwrap_or(defaults.primary_recipient),
        }
    }

    pub fn recipients(&self) -> Vec<String> {
        vec![
            self.primary_recipient.clone(),
            SECONDARY_RECIPIENT.to_string(),
        ]
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[async_trait::async_trait]
pub trait DispatchContactEmailWorkflow {
    /// Makes exactly one send attempt. Returns whether the transport
    /// acknowledged the message; transport errors are logged, not returned.
    async fn dispatch(&self, submission: &ContactSubmission) -> bool;
}

pub struct DispatchContactEmailWorkflowImpl<E: EmailPort> {
    email_port: Arc<E>,
    settings: ContactMailSettings,
}

impl<E: EmailPort> DispatchContactEmailWorkflowImpl<E> {
    pub fn new(email_port: Arc<E>, settings: ContactMailSettings) -> Self {
        Self {
            email_port,
            settings,
        }
    }
}

#[async_trait::async_trait]
impl<E: EmailPort + Send + Sync> DispatchContactEmailWorkflow
    for DispatchContactEmailWorkflowImpl<E>
{
    async fn dispatch(&self, submission: &ContactSubmission) -> bool {
        let email = compose_contact_email(submission, &self.settings);
        match self.email_port.send_email(&email).await {
            Ok(()) => {
                info!("Contact email from {} dispatched", submission.email);
                true
            }
            Err(e) => {
                error!("Failed to send contact email: {}", e);
                false
            }
        }
    }
}

pub fn compose_contact_email(
    submission: &ContactSubmission,
    settings: &ContactMailSettings,
) -> OutgoingEmail {
    OutgoingEmail {
        from: settings.from.clone(),
        to: settings.recipients(),
        subject: format!("New Contact Form Submission from {}", submission.name),
        body: contact_email_body(submission),
    }
}

fn contact_email_body(submission: &ContactSubmission) -> String {
    format!(
        "New Contact Form Submission\n\
         \n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         \n\
         Message:\n\
         {}\n\
         \n\
         ---\n\
         This email was sent from the Kenco website contact form.",
        submission.name,
        submission.email,
        submission.phone().unwrap_or(PHONE_PLACEHOLDER),
        submission.message,
    )
}
