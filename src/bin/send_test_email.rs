//! Sends one contact email through the configured SES relay to check
//! credentials end to end.

use kenco_contact_app::{
    domain::contact::ContactSubmission,
    ports::email::EmailPort,
    workflow::contact::dispatch::{ContactMailSettings, compose_contact_email},
};
use kenco_email_lettre::LettreEmailAdapter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let adapter = LettreEmailAdapter::from_env().expect("Failed to create email adapter");

    let submission = ContactSubmission::new(
        "Test User",
        "test@example.com",
        Some("123-456-7890".to_string()),
        "This is a test message to validate the SES SMTP credentials.",
    );
    let email = compose_contact_email(&submission, &ContactMailSettings::from_env());

    match adapter.send_email(&email).await {
        Ok(()) => println!("Test email sent to {:?}", email.to),
        Err(e) => {
            eprintln!("Test email failed: {}", e);
            std::process::exit(1);
        }
    }
}
