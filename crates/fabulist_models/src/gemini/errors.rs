//! Shared handling of HTTP failures.

use super::ApiErrorBody;
use fabulist_error::{ServiceError, ServiceErrorKind};
use reqwest::Response;
use serde::Deserialize;
use tracing::error;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiErrorBody>,
}

/// Service-provided message from an error body, if it has one.
pub(crate) fn message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()?
        .error?
        .message()
        .clone()
}

/// Map a network failure to a transport error.
pub(crate) fn transport_error(service: &'static str, e: reqwest::Error) -> ServiceError {
    error!(service, error = ?e, "Failed to send request");
    ServiceError::new(ServiceErrorKind::Transport(e.to_string()))
}

/// Pass successful responses through; turn anything else into a status error.
pub(crate) async fn ensure_success(
    service: &'static str,
    response: Response,
) -> Result<Response, ServiceError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error!(service, status = %status, body = %body, "Service returned error");
    Err(ServiceError::new(ServiceErrorKind::status(
        status.as_u16(),
        message_from_body(&body),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_from_body_reads_error_message() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            message_from_body(body).as_deref(),
            Some("Resource has been exhausted")
        );
    }

    #[test]
    fn message_from_body_tolerates_other_bodies() {
        assert!(message_from_body("<html>Bad Gateway</html>").is_none());
        assert!(message_from_body("{}").is_none());
        assert!(message_from_body(r#"{"error": {"code": 500}}"#).is_none());
    }
}
