use std::sync::{Arc, Mutex};

/// A fully composed plain-text message, ready to hand to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

#[async_trait::async_trait]
pub trait EmailPort {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), SendEmailError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendEmailError {
    #[error("invalid address '{0}'")]
    InvalidAddress(String),
    #[error("failed to build email: {0}")]
    Build(String),
    #[error("failed to send email: {0}")]
    Transport(String),
}

/// Records every send attempt. Fails each attempt when constructed with
/// [`MockEmailPort::failing`].
#[derive(Clone, Default)]
pub struct MockEmailPort {
    attempts: Arc<Mutex<Vec<OutgoingEmail>>>,
    failure: Option<SendEmailError>,
}

#[allow(unused)]
impl MockEmailPort {
    pub fn failing(error: SendEmailError) -> Self {
        Self {
            attempts: Arc::default(),
            failure: Some(error),
        }
    }

    pub fn get_attempts(&self) -> Vec<OutgoingEmail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl EmailPort for MockEmailPort {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), SendEmailError> {
        self.attempts.lock().unwrap().push(email.clone());
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
