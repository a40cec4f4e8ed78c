use std::collections::BTreeMap;

use axum::{http::StatusCode, response::IntoResponse};
use kenco_contact_app::workflow::contact::submit::SubmitContactError;

pub enum ServiceError {
    Validation {
        message: String,
        fields: BTreeMap<String, Vec<String>>,
    },
    Internal(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Validation { message, .. } => write!(f, "Validation failed: {}", message),
            ServiceError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl From<SubmitContactError> for ServiceError {
    fn from(error: SubmitContactError) -> Self {
        match error {
            SubmitContactError::Validation(failure) => ServiceError::Validation {
                message: failure.to_string(),
                fields: failure.fields().clone(),
            },
            SubmitContactError::Delivery => ServiceError::Internal(error.to_string()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServiceError::Validation { message, fields } => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": message, "fields": fields }),
            ),
            ServiceError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": msg }),
            ),
        };
        (status, axum::Json(body)).into_response()
    }
}
