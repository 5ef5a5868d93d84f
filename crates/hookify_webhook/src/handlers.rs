// --- File: crates/hookify_webhook/src/handlers.rs ---
use crate::error::WebhookError;
use crate::event::EventPayload;
use crate::logic::{dispatch_generic_payload, fan_out, DeliveryResult, FanOutOutcome, Subscriber};
use axum::{extract::State, response::Json};
use chrono::Utc;
use hookify_common::is_webhooks_enabled;
use hookify_common::services::WebhookTarget;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

// State for webhook handlers
#[derive(Clone)]
pub struct WebhookState {
    pub config: Arc<hookify_config::AppConfig>,
}

/// A dispatch request as issued by the booking pipeline after a domain event.
/// Subscriber registrations for the event are carried in the request; the
/// dispatcher does not look them up itself.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DispatchRequest {
    #[cfg_attr(feature = "openapi", schema(example = "BOOKING_CREATED"))]
    pub trigger_event: String,
    /// ISO-8601 timestamp of the domain event, forwarded verbatim.
    #[cfg_attr(feature = "openapi", schema(example = "2026-03-04T19:30:00Z"))]
    pub created_at: String,
    pub targets: Vec<WebhookTarget>,
    pub payload: EventPayload,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DispatchResponse {
    pub outcomes: Vec<FanOutOutcome>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TestDispatchRequest {
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://hooks.example.com/booking")
    )]
    pub subscriber_url: String,
    #[serde(default)]
    pub secret: Option<String>,
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/webhooks/dispatch", // Relative to /api
    request_body = DispatchRequest,
    responses(
        (status = 200, description = "Per-subscriber delivery outcomes", body = DispatchResponse),
        (status = 401, description = "Missing or invalid internal auth secret"),
        (status = 404, description = "Webhook dispatch not enabled"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Webhooks"
))]
pub async fn dispatch_handler(
    State(state): State<Arc<WebhookState>>,
    Json(request): Json<DispatchRequest>,
) -> Result<Json<DispatchResponse>, WebhookError> {
    if !is_webhooks_enabled(&state.config) {
        return Err(WebhookError::Disabled);
    }

    let default_secret = state
        .config
        .webhook
        .as_ref()
        .and_then(|webhook| webhook.default_secret.clone());
    let targets: Vec<WebhookTarget> = request
        .targets
        .into_iter()
        .map(|mut target| {
            if target.secret.is_none() {
                target.secret = default_secret.clone();
            }
            target
        })
        .collect();

    info!(
        "dispatching '{}' to {} subscriber(s)",
        request.trigger_event,
        targets.len()
    );

    let outcomes = fan_out(
        &request.trigger_event,
        &request.created_at,
        targets,
        &request.payload,
    )
    .await;

    Ok(Json(DispatchResponse { outcomes }))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/webhooks/test", // Relative to /api
    request_body = TestDispatchRequest,
    responses(
        (status = 200, description = "Normalized delivery result from the test ping", body = DeliveryResult),
        (status = 401, description = "Missing or invalid internal auth secret"),
        (status = 404, description = "Webhook dispatch not enabled"),
        (status = 502, description = "Delivery failed in transit")
    ),
    tag = "Webhooks"
))]
pub async fn test_dispatch_handler(
    State(state): State<Arc<WebhookState>>,
    Json(request): Json<TestDispatchRequest>,
) -> Result<Json<DeliveryResult>, WebhookError> {
    if !is_webhooks_enabled(&state.config) {
        return Err(WebhookError::Disabled);
    }

    let created_at = Utc::now().to_rfc3339();
    let subscriber = Subscriber {
        subscriber_url: request.subscriber_url,
        provider_id: None,
        payload_template: None,
    };
    let ping = json!({
        "id": Uuid::new_v4().to_string(),
        "triggerEvent": "ping",
        "createdAt": created_at,
        "payload": { "message": "Hookify endpoint check" },
    });

    let secret = request.secret.or_else(|| {
        state
            .config
            .webhook
            .as_ref()
            .and_then(|webhook| webhook.default_secret.clone())
    });

    let result =
        dispatch_generic_payload(secret.as_deref(), "ping", &created_at, &subscriber, &ping).await?;
    Ok(Json(result))
}
