use std::sync::Arc;

use kenco_contact_api::HttpConfig;
use kenco_contact_app::{build_application, workflow::contact::dispatch::ContactMailSettings};
use kenco_email_lettre::LettreEmailAdapter;
use log::{error, info};

mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    // The .env file is optional; the environment may already be populated.
    let dotenv = dotenvy::dotenv();

    logs::init_logger().expect("Failed to initialize logger");

    if let Err(e) = dotenv {
        info!("No .env file loaded: {}", e);
    }

    let email_adapter =
        Arc::new(LettreEmailAdapter::from_env().expect("Failed to create email adapter"));
    let mail_settings = ContactMailSettings::from_env();
    info!(
        "Contact emails go from {} to {:?}",
        mail_settings.from,
        mail_settings.recipients()
    );

    let app = Arc::new(build_application(email_adapter, mail_settings));

    info!("Starting application");

    if let Err(e) = kenco_contact_api::run(app, HttpConfig::from_env(), shutdown_signal()).await {
        error!("HTTP API failed: {}", e);
        std::process::exit(1);
    }
}
