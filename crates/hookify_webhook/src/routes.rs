// --- File: crates/hookify_webhook/src/routes.rs ---
use crate::auth::{webhook_auth_middleware, WebhookAuthState};
use crate::handlers::{dispatch_handler, test_dispatch_handler, WebhookState};
use axum::{middleware, routing::post, Router};
use hookify_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the webhook dispatch service.
/// Both endpoints are internal and sit behind the shared-secret auth layer.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let handler_state = Arc::new(WebhookState {
        config: config.clone(),
    });

    let auth_middleware_state = Arc::new(WebhookAuthState { config });

    Router::new()
        .route("/webhooks/dispatch", post(dispatch_handler))
        .route("/webhooks/test", post(test_dispatch_handler))
        .layer(middleware::from_fn_with_state(
            auth_middleware_state,
            webhook_auth_middleware,
        ))
        .with_state(handler_state)
}
