// --- File: crates/hookify_webhook/src/auth.rs ---

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use constant_time_eq::constant_time_eq;
use hookify_config::AppConfig;
use std::sync::Arc;
use tracing::warn;

/// State for the internal-auth middleware; it only needs the AppConfig to
/// read the shared secret.
#[derive(Clone)]
pub struct WebhookAuthState {
    pub config: Arc<AppConfig>,
}

pub const INTERNAL_AUTH_HEADER: &str = "X-Internal-Auth-Secret";

/// Axum middleware authenticating internal dispatch requests.
/// Checks for the shared secret in the `X-Internal-Auth-Secret` header.
pub async fn webhook_auth_middleware(
    State(auth_state): State<Arc<WebhookAuthState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // 1. Get the expected shared secret from config
    let expected_secret = match auth_state
        .config
        .webhook
        .as_ref()
        .and_then(|webhook| webhook.shared_secret.clone())
    {
        Some(secret) => secret,
        None => {
            warn!("webhook shared secret not configured, rejecting internal dispatch request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error for webhook auth.".to_string(),
            )
                .into_response();
        }
    };

    // 2. Get the token from the request header
    let provided_secret = req
        .headers()
        .get(INTERNAL_AUTH_HEADER)
        .and_then(|value| value.to_str().ok());

    // 3. Validate the token
    match provided_secret {
        Some(provided) if constant_time_eq(provided.as_bytes(), expected_secret.as_bytes()) => {
            next.run(req).await
        }
        Some(_) => {
            warn!("internal dispatch request with invalid secret");
            (
                StatusCode::UNAUTHORIZED,
                "Unauthorized: Invalid credentials.".to_string(),
            )
                .into_response()
        }
        None => (
            StatusCode::UNAUTHORIZED,
            format!("Unauthorized: Missing {} header.", INTERNAL_AUTH_HEADER),
        )
            .into_response(),
    }
}
