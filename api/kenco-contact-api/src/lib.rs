use std::sync::Arc;

use axum::{Router, routing::post};
use kenco_contact_app::Application;
use log::info;

mod contact;
mod error;

pub use error::ServiceError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl HttpConfig {
    /// Reads `KENCO_HTTP_HOST` and `KENCO_HTTP_PORT`. Unset or unparsable
    /// values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("KENCO_HTTP_HOST")
            .ok()
            .filter(|host| !host.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = match std::env::var("KENCO_HTTP_PORT") {
            Ok(port) => port.trim().parse::<u16>().unwrap_or_else(|_| {
                log::warn!("KENCO_HTTP_PORT '{}' is not a valid port", port);
                defaults.port
            }),
            Err(_) => defaults.port,
        };
        Self { host, port }
    }
}

pub fn router(app: Arc<Application>) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new().route("/contact/submit", post(contact::submit)),
        )
        .with_state(AppState { app })
}

pub async fn run(
    app: Arc<Application>,
    config: HttpConfig,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    info!("API server listening on {}:{}", config.host, config.port);
    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("HTTP API shut down gracefully");
    Ok(())
}
