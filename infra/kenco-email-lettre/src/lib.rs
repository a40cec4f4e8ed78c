use std::str::FromStr;

use kenco_contact_app::ports::email::{EmailPort, OutgoingEmail, SendEmailError};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use log::{info, warn};

pub mod ses;

use ses::SesSmtpConfig;

#[derive(Debug, thiserror::Error)]
pub enum EmailConfigError {
    #[error("failed to create SMTP transport: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

pub struct LettreEmailAdapter {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl LettreEmailAdapter {
    pub fn new(config: SesSmtpConfig) -> Result<Self, EmailConfigError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?;
        match config.credentials {
            Some((username, password)) => {
                builder = builder.credentials(Credentials::new(username, password));
            }
            None => warn!("No SES credentials configured, sending unauthenticated"),
        }
        info!(
            "Using SMTP relay {} (region {})",
            config.host, config.region
        );
        Ok(Self {
            transport: builder.build(),
        })
    }

    pub fn from_env() -> Result<Self, EmailConfigError> {
        Self::new(SesSmtpConfig::from_env())
    }
}

#[async_trait::async_trait]
impl EmailPort for LettreEmailAdapter {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), SendEmailError> {
        let message = build_message(email)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| SendEmailError::Transport(e.to_string()))?;
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, SendEmailError> {
    Mailbox::from_str(address).map_err(|_| SendEmailError::InvalidAddress(address.to_string()))
}

pub fn build_message(email: &OutgoingEmail) -> Result<Message, SendEmailError> {
    let mut builder = Message::builder()
        .from(parse_mailbox(&email.from)?)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_PLAIN);
    for to in &email.to {
        builder = builder.to(parse_mailbox(to)?);
    }
    builder
        .body(email.body.clone())
        .map_err(|e| SendEmailError::Build(e.to_string()))
}
