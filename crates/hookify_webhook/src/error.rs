// --- File: crates/hookify_webhook/src/error.rs ---
use axum::response::{IntoResponse, Response};
use hookify_common::{not_found, validation_error, HookifyError, HttpStatusCode, IntoHttpResponse};
use thiserror::Error;

/// Errors raised while constructing or delivering a webhook payload.
///
/// HTTP-level rejections from the subscriber are NOT errors; they come back
/// inside [`crate::logic::DeliveryResult`] so the caller can decide whether
/// to retry. Only malformed input and transport failures surface here.
#[derive(Error, Debug)]
pub enum WebhookError {
    /// Missing subscriber URL or empty computed body. Raised before any
    /// network call; the input has to be fixed before a retry can succeed.
    #[error("Missing required elements to send webhook payload")]
    InvalidRequest,

    /// The POST never reached the subscriber (DNS, refused connection, TLS).
    #[error("Webhook delivery failed in transit: {0}")]
    Transport(#[from] reqwest::Error),

    /// The payload template could not be rendered.
    #[error("Failed to render payload template: {0}")]
    Template(String),

    /// Payload (de)serialization failed.
    #[error("Failed to serialize webhook payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Webhook dispatch is switched off in the runtime configuration.
    #[error("Webhook dispatch is not enabled")]
    Disabled,

    /// Webhook configuration missing or incomplete.
    #[error("Webhook configuration missing or incomplete")]
    ConfigError,
}

/// Convert WebhookError to HookifyError
impl From<WebhookError> for HookifyError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::InvalidRequest => {
                validation_error("Missing required elements to send webhook payload")
            }
            WebhookError::Transport(e) if e.is_timeout() => {
                HookifyError::TimeoutError(e.to_string())
            }
            WebhookError::Transport(e) => {
                hookify_common::external_service_error("webhook subscriber", e)
            }
            WebhookError::Template(msg) => {
                validation_error(format!("Payload template failed to render: {}", msg))
            }
            WebhookError::Serialize(e) => HookifyError::ParseError(e.to_string()),
            WebhookError::Disabled => not_found("Webhook dispatch is not enabled"),
            WebhookError::ConfigError => {
                HookifyError::ConfigError("Webhook configuration missing or incomplete".to_string())
            }
        }
    }
}

/// Implement HttpStatusCode for WebhookError to provide a consistent way to
/// convert dispatch failures to HTTP status codes on the internal surface.
impl HttpStatusCode for WebhookError {
    fn status_code(&self) -> u16 {
        match self {
            WebhookError::InvalidRequest => 400,
            WebhookError::Transport(_) => 502,
            WebhookError::Template(_) => 422,
            WebhookError::Serialize(_) => 400,
            WebhookError::Disabled => 404,
            WebhookError::ConfigError => 500,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
