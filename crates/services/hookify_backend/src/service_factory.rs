// --- File: crates/services/hookify_backend/src/service_factory.rs ---
use hookify_common::services::{BoxedError, ServiceFactory, WebhookService};
use hookify_config::AppConfig;
use std::sync::Arc;

#[cfg(feature = "webhook")]
use hookify_common::services::{BoxFuture, WebhookDeliveryOutcome, WebhookTarget};
#[cfg(feature = "webhook")]
use hookify_webhook::service::HttpWebhookService;
#[cfg(feature = "webhook")]
use serde_json::Value;

/// Wraps a concrete WebhookService so its error type can cross the
/// ServiceFactory boundary as a BoxedError trait object.
#[cfg(feature = "webhook")]
struct BoxedWebhookService<S>(Arc<S>);

#[cfg(feature = "webhook")]
impl<S> WebhookService for BoxedWebhookService<S>
where
    S: WebhookService + 'static,
{
    type Error = BoxedError;

    fn dispatch_event(
        &self,
        trigger_event: &str,
        created_at: &str,
        target: &WebhookTarget,
        payload: Value,
    ) -> BoxFuture<'_, WebhookDeliveryOutcome, BoxedError> {
        let inner = Arc::clone(&self.0);
        let trigger_event = trigger_event.to_string();
        let created_at = created_at.to_string();
        let target = target.clone();
        Box::pin(async move {
            inner
                .dispatch_event(&trigger_event, &created_at, &target, payload)
                .await
                .map_err(|err| BoxedError(Box::new(err)))
        })
    }

    fn dispatch_generic(
        &self,
        trigger_event: &str,
        created_at: &str,
        target: &WebhookTarget,
        payload: Value,
    ) -> BoxFuture<'_, WebhookDeliveryOutcome, BoxedError> {
        let inner = Arc::clone(&self.0);
        let trigger_event = trigger_event.to_string();
        let created_at = created_at.to_string();
        let target = target.clone();
        Box::pin(async move {
            inner
                .dispatch_generic(&trigger_event, &created_at, &target, payload)
                .await
                .map_err(|err| BoxedError(Box::new(err)))
        })
    }
}

/// Service factory for the backend: constructs service instances once from
/// the runtime configuration and hands them out as trait objects.
pub struct HookifyServiceFactory {
    #[cfg(feature = "webhook")]
    webhook_service: Option<Arc<dyn WebhookService<Error = BoxedError>>>,
}

impl HookifyServiceFactory {
    pub fn new(config: Arc<AppConfig>) -> Self {
        #[cfg(feature = "webhook")]
        let webhook_service = if hookify_common::is_webhooks_enabled(&config) {
            Some(Arc::new(BoxedWebhookService(Arc::new(
                HttpWebhookService::new(config.clone()),
            ))) as Arc<dyn WebhookService<Error = BoxedError>>)
        } else {
            None
        };

        #[cfg(not(feature = "webhook"))]
        let _ = config;

        Self {
            #[cfg(feature = "webhook")]
            webhook_service,
        }
    }
}

impl ServiceFactory for HookifyServiceFactory {
    fn webhook_service(&self) -> Option<Arc<dyn WebhookService<Error = BoxedError>>> {
        #[cfg(feature = "webhook")]
        {
            self.webhook_service.clone()
        }
        #[cfg(not(feature = "webhook"))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookify_config::{ServerConfig, WebhookConfig};

    fn config(use_webhooks: bool) -> Arc<AppConfig> {
        Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            use_webhooks,
            webhook: Some(WebhookConfig::default()),
        })
    }

    #[test]
    #[cfg(feature = "webhook")]
    fn webhook_service_is_available_when_enabled() {
        let factory = HookifyServiceFactory::new(config(true));
        assert!(factory.webhook_service().is_some());
    }

    #[test]
    fn webhook_service_is_absent_when_disabled() {
        let factory = HookifyServiceFactory::new(config(false));
        assert!(factory.webhook_service().is_none());
    }
}
