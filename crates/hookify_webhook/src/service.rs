// --- File: crates/hookify_webhook/src/service.rs ---
use hookify_common::services::{BoxFuture, WebhookDeliveryOutcome, WebhookService, WebhookTarget};
use hookify_config::AppConfig;
use serde_json::Value;
use std::sync::Arc;

use crate::error::WebhookError;
use crate::event::EventPayload;
use crate::logic::{dispatch_calendar_event, dispatch_generic_payload, DeliveryResult, Subscriber};

/// Webhook delivery service backed by the HTTP dispatcher in this crate.
pub struct HttpWebhookService {
    config: Arc<AppConfig>,
}

impl HttpWebhookService {
    /// Create a new HTTP webhook delivery service
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// Per-target secret, with the configured default as fallback.
    fn signing_secret(&self, target: &WebhookTarget) -> Option<String> {
        target.secret.clone().or_else(|| {
            self.config
                .webhook
                .as_ref()
                .and_then(|webhook| webhook.default_secret.clone())
        })
    }
}

impl From<DeliveryResult> for WebhookDeliveryOutcome {
    fn from(result: DeliveryResult) -> Self {
        WebhookDeliveryOutcome {
            ok: result.ok,
            status: result.status,
            message: result.message,
        }
    }
}

impl WebhookService for HttpWebhookService {
    type Error = WebhookError;

    fn dispatch_event(
        &self,
        trigger_event: &str,
        created_at: &str,
        target: &WebhookTarget,
        payload: Value,
    ) -> BoxFuture<'_, WebhookDeliveryOutcome, Self::Error> {
        // Clone into owned values so the future only borrows self
        let trigger_event = trigger_event.to_string();
        let created_at = created_at.to_string();
        let subscriber = Subscriber::from(target);
        let secret = self.signing_secret(target);

        Box::pin(async move {
            let event: EventPayload = serde_json::from_value(payload)?;
            let result = dispatch_calendar_event(
                secret.as_deref(),
                &trigger_event,
                &created_at,
                &subscriber,
                event,
            )
            .await?;
            Ok(result.into())
        })
    }

    fn dispatch_generic(
        &self,
        trigger_event: &str,
        created_at: &str,
        target: &WebhookTarget,
        payload: Value,
    ) -> BoxFuture<'_, WebhookDeliveryOutcome, Self::Error> {
        let trigger_event = trigger_event.to_string();
        let created_at = created_at.to_string();
        let subscriber = Subscriber::from(target);
        let secret = self.signing_secret(target);

        Box::pin(async move {
            let result = dispatch_generic_payload(
                secret.as_deref(),
                &trigger_event,
                &created_at,
                &subscriber,
                &payload,
            )
            .await?;
            Ok(result.into())
        })
    }
}
