// --- File: crates/hookify_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! This module provides trait definitions for external services used by the
//! application. These traits allow for dependency injection and easier testing
//! by decoupling the application logic from specific implementations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// A registered webhook destination, as handed to the dispatcher by a
/// subscriber registry. How registrations are stored is out of scope here;
/// the dispatcher treats them as read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WebhookTarget {
    /// Endpoint URL the payload is POSTed to.
    pub url: String,
    /// Well-known integration id, if the registration belongs to one.
    #[serde(default)]
    pub provider_id: Option<String>,
    /// Optional user-authored body template.
    #[serde(default)]
    pub payload_template: Option<String>,
    /// Optional per-subscriber signing secret.
    #[serde(default)]
    pub secret: Option<String>,
}

/// Normalized outcome of a single delivery attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WebhookDeliveryOutcome {
    /// Whether the subscriber answered with a 2xx status.
    pub ok: bool,
    /// The HTTP status code the subscriber returned.
    pub status: u16,
    /// The response body, read as text.
    pub message: String,
}

/// A trait for webhook delivery operations.
///
/// This trait defines the operations that can be performed by a webhook
/// delivery service: sending calendar-event payloads and free-form payloads
/// to registered subscriber endpoints.
pub trait WebhookService: Send + Sync {
    /// Error type returned by webhook delivery operations.
    type Error: StdError + Send + Sync + 'static;

    /// Deliver a calendar-event payload to one subscriber.
    fn dispatch_event(
        &self,
        trigger_event: &str,
        created_at: &str,
        target: &WebhookTarget,
        payload: Value,
    ) -> BoxFuture<'_, WebhookDeliveryOutcome, Self::Error>;

    /// Deliver a free-form JSON payload to one subscriber.
    fn dispatch_generic(
        &self,
        trigger_event: &str,
        created_at: &str,
        target: &WebhookTarget,
        payload: Value,
    ) -> BoxFuture<'_, WebhookDeliveryOutcome, Self::Error>;
}

/// A factory for creating service instances.
///
/// This trait provides methods for creating instances of the services the
/// application needs, conditionally on configuration.
pub trait ServiceFactory: Send + Sync {
    /// Get a webhook delivery service instance.
    fn webhook_service(&self) -> Option<Arc<dyn WebhookService<Error = BoxedError>>>;
}
