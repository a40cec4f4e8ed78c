use axum::{Json, extract::State};
use kenco_contact_app::domain::contact::ContactSubmission;

use crate::{AppState, ServiceError};

/// Missing text fields deserialize as empty strings so they surface as field
/// validation messages instead of a JSON rejection.
#[derive(serde::Deserialize)]
pub struct JsonContactSubmission {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    message: String,
}

impl From<JsonContactSubmission> for ContactSubmission {
    fn from(value: JsonContactSubmission) -> Self {
        ContactSubmission::new(value.name, value.email, value.phone, value.message)
    }
}

#[derive(serde::Serialize)]
pub struct JsonContactConfirmation {
    success: bool,
    message: String,
}

pub async fn submit(
    State(app_state): State<AppState>,
    Json(submission): Json<JsonContactSubmission>,
) -> Result<Json<JsonContactConfirmation>, ServiceError> {
    let confirmation = app_state
        .app
        .contact_submit_use_case
        .submit(submission.into())
        .await
        .map_err(|e| {
            let e = ServiceError::from(e);
            log::debug!("contact.submit failed: {}", e);
            e
        })?;

    Ok(Json(JsonContactConfirmation {
        success: true,
        message: confirmation.message,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use kenco_contact_app::{
        build_application,
        ports::email::{MockEmailPort, SendEmailError},
        workflow::contact::{
            dispatch::ContactMailSettings,
            submit::{ACKNOWLEDGEMENT, DELIVERY_FAILURE},
        },
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::router;

    async fn post_submission(port: &MockEmailPort, body: Value) -> (StatusCode, Value) {
        let app = Arc::new(build_application(
            Arc::new(port.clone()),
            ContactMailSettings::default(),
        ));
        let request = Request::builder()
            .method("POST")
            .uri("/api/contact/submit")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router(app).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_submit_success() {
        let port = MockEmailPort::default();
        let (status, body) = post_submission(
            &port,
            json!({
                "name": "John Smith",
                "email": "john@example.com",
                "phone": "+64 21 123 4567",
                "message": "I am interested in your Endurocide curtains."
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "message": ACKNOWLEDGEMENT }));

        let attempts = port.get_attempts();
        assert_eq!(attempts.len(), 1);
        assert!(attempts[0].body.contains("+64 21 123 4567"));
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_name() {
        let port = MockEmailPort::default();
        let (status, body) = post_submission(
            &port,
            json!({ "name": "", "email": "a@b.com", "message": "1234567890" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"]["name"], json!(["Name is required"]));
        assert_eq!(body["error"], "Name is required");
        assert!(port.get_attempts().is_empty());
    }

    #[tokio::test]
    async fn test_submit_reports_missing_fields() {
        let port = MockEmailPort::default();
        let (status, body) = post_submission(&port, json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields = body["fields"].as_object().unwrap();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("message"));
        assert!(port.get_attempts().is_empty());
    }

    #[tokio::test]
    async fn test_submit_delivery_failure() {
        let port = MockEmailPort::failing(SendEmailError::Transport("timeout".to_string()));
        let (status, body) = post_submission(
            &port,
            json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "message": "Please send a brochure."
            }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": DELIVERY_FAILURE }));
        assert_eq!(port.get_attempts().len(), 1);
    }
}
