use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod intake;

use intake::{ContactFormFields, ContactFormIntake, IntakeDecision, THROTTLED_MESSAGE};

pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";

const SUBMIT_PATH: &str = "/api/contact/submit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactConfirmation {
    pub success: bool,
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Server {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ClientError {
    /// The text to show the person who filled in the form.
    pub fn user_message(&self) -> &str {
        match self {
            ClientError::Server { message, .. } if !message.is_empty() => message,
            _ => FALLBACK_FAILURE_MESSAGE,
        }
    }
}

#[derive(Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    base_url: String,
}

impl ContactClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn submit(&self, request: &ContactRequest) -> Result<ContactConfirmation, ClientError> {
        let url = format!("{}{}", self.base_url, SUBMIT_PATH);
        let response = self.http.post(url).json(request).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<ContactConfirmation>().await?);
        }

        let body = response.text().await?;
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|body| body.error)
            .unwrap_or_default();
        Err(ClientError::Server { status, message })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Sent(String),
    Abandoned,
    Throttled(String),
    Failed(String),
}

/// A contact form bound to a backend: intake checks first, then one request.
pub struct ContactForm {
    pub fields: ContactFormFields,
    intake: ContactFormIntake,
    client: ContactClient,
}

impl ContactForm {
    pub fn new(client: ContactClient) -> Self {
        Self::with_intake(client, ContactFormIntake::default())
    }

    pub fn with_intake(client: ContactClient, intake: ContactFormIntake) -> Self {
        Self {
            fields: ContactFormFields::default(),
            intake,
            client,
        }
    }

    pub async fn submit(&mut self) -> FormOutcome {
        let request = match self.intake.check(&self.fields, Instant::now()) {
            IntakeDecision::Forward(request) => request,
            IntakeDecision::Abandon => {
                log::debug!("Honeypot field filled, dropping submission");
                return FormOutcome::Abandoned;
            }
            IntakeDecision::Throttled => {
                return FormOutcome::Throttled(THROTTLED_MESSAGE.to_string());
            }
        };

        match self.client.submit(&request).await {
            Ok(confirmation) => {
                self.fields = ContactFormFields::default();
                FormOutcome::Sent(confirmation.message)
            }
            Err(e) => {
                log::warn!("Contact submission failed: {}", e);
                FormOutcome::Failed(e.user_message().to_string())
            }
        }
    }
}
