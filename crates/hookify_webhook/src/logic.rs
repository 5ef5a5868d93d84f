// --- File: crates/hookify_webhook/src/logic.rs ---

use hmac::{Hmac, Mac};
use hookify_common::services::WebhookTarget;
use hookify_common::HTTP_CLIENT;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::Sha256;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::error::WebhookError;
use crate::event::{EventPayload, LONG_DATETIME_FORMAT};
use crate::template::render_template;

/// Signature header attached to every delivery.
pub const SIGNATURE_HEADER: &str = "X-Cal-Signature-256";

/// Sentinel sent in place of a signature when no secret is available.
/// Receivers must treat it as "no verification possible", never as a valid
/// signature of an empty key.
pub const UNSIGNED_SENTINEL: &str = "no-secret-provided";

/// Provider id whose deliveries always carry the raw payload. The id is
/// fixed in the subscriber registry.
pub const RAW_PASSTHROUGH_PROVIDER: &str = "zapier";

type HmacSha256 = Hmac<Sha256>;

/// Subscriber registration fields the dispatcher reads. Registrations are
/// created and stored elsewhere; this is a read-only view per delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Subscriber {
    pub subscriber_url: String,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub payload_template: Option<String>,
}

impl Subscriber {
    /// The registration's template, with an empty string counting as absent.
    pub fn template(&self) -> Option<&str> {
        self.payload_template
            .as_deref()
            .filter(|template| !template.is_empty())
    }
}

impl From<&WebhookTarget> for Subscriber {
    fn from(target: &WebhookTarget) -> Self {
        Subscriber {
            subscriber_url: target.url.clone(),
            provider_id: target.provider_id.clone(),
            payload_template: target.payload_template.clone(),
        }
    }
}

/// How the delivery body gets built for a subscriber, resolved once from the
/// registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderBehavior {
    /// Payload serialized verbatim; any template on the registration is ignored.
    RawPassthrough,
    /// The subscriber's template reshapes the payload.
    Templated,
    /// Standard `{triggerEvent, createdAt, payload}` envelope.
    DefaultEnvelope,
}

impl ProviderBehavior {
    pub fn resolve(subscriber: &Subscriber) -> Self {
        match subscriber.provider_id.as_deref() {
            Some(RAW_PASSTHROUGH_PROVIDER) => ProviderBehavior::RawPassthrough,
            _ if subscriber.template().is_some() => ProviderBehavior::Templated,
            _ => ProviderBehavior::DefaultEnvelope,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    FormUrlencoded,
}

impl ContentType {
    /// Decided once from the unrendered template text: a template author
    /// signals intent to produce a JSON body by writing valid JSON. The
    /// rendered output is not consulted, even though substitution can change
    /// its shape.
    pub fn for_template(template: Option<&str>) -> Self {
        match template {
            Some(text) if serde_json::from_str::<Value>(text).is_err() => {
                ContentType::FormUrlencoded
            }
            _ => ContentType::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::FormUrlencoded => "application/x-www-form-urlencoded",
        }
    }
}

/// Normalized outcome of one delivery. A non-2xx response is reported here,
/// not raised: whether to retry belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeliveryResult {
    pub ok: bool,
    pub status: u16,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    trigger_event: &'a str,
    created_at: &'a str,
    payload: &'a EventPayload,
}

/// Hex HMAC-SHA256 of the exact body bytes, keyed by the subscriber secret.
pub fn sign_body(secret_key: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret_key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Fill in the derived payload fields before rendering or serialization.
/// Caller-provided values for these fields are overwritten; the dispatcher
/// owns them.
pub(crate) fn augment_event(trigger_event: &str, event: &mut EventPayload) {
    if event.description.is_none() {
        event.description = event.additional_notes.clone();
    }

    let tz = event.organizer.timezone();
    event.trigger_event = Some(event.organizer.translate(&trigger_event.to_lowercase()));
    event.adjusted_start_time = Some(
        event
            .start_time
            .with_timezone(&tz)
            .format(LONG_DATETIME_FORMAT)
            .to_string(),
    );
    event.adjusted_end_time = Some(
        event
            .end_time
            .with_timezone(&tz)
            .format(LONG_DATETIME_FORMAT)
            .to_string(),
    );
}

pub(crate) fn build_body(
    subscriber: &Subscriber,
    trigger_event: &str,
    created_at: &str,
    event: &EventPayload,
    content_type: ContentType,
) -> Result<String, WebhookError> {
    match ProviderBehavior::resolve(subscriber) {
        ProviderBehavior::RawPassthrough => Ok(serde_json::to_string(event)?),
        ProviderBehavior::Templated => {
            let template = subscriber.template().unwrap_or_default();
            let data = serde_json::to_value(event)?;
            let rendered = render_template(template, &data)?;
            match content_type {
                ContentType::Json => match serde_json::from_str::<Value>(&rendered) {
                    Ok(value) => Ok(serde_json::to_string(&value)?),
                    Err(_) => {
                        // Substitution can turn a template that was valid JSON
                        // into output that no longer parses. Subscribers have
                        // always received the serialized `false` those
                        // deliveries produce, so the shape is kept.
                        warn!("rendered payload template is not valid JSON, sending degraded body");
                        Ok(serde_json::to_string(&false)?)
                    }
                },
                ContentType::FormUrlencoded => Ok(rendered),
            }
        }
        ProviderBehavior::DefaultEnvelope => Ok(serde_json::to_string(&Envelope {
            trigger_event,
            created_at,
            payload: event,
        })?),
    }
}

/// Deliver a calendar event to one subscriber.
///
/// The payload is augmented with the translated trigger name and the
/// organizer-local adjusted times, shaped according to the subscriber's
/// provider behavior, signed, and POSTed exactly once.
pub async fn dispatch_calendar_event(
    secret_key: Option<&str>,
    trigger_event: &str,
    created_at: &str,
    subscriber: &Subscriber,
    mut event: EventPayload,
) -> Result<DeliveryResult, WebhookError> {
    let content_type = ContentType::for_template(subscriber.template());

    augment_event(trigger_event, &mut event);

    let body = build_body(subscriber, trigger_event, created_at, &event, content_type)?;

    deliver(secret_key, &subscriber.subscriber_url, body, content_type).await
}

/// Deliver a free-form JSON payload to one subscriber.
///
/// No augmentation and no template: the payload is serialized as-is with a
/// JSON content type.
pub async fn dispatch_generic_payload(
    secret_key: Option<&str>,
    trigger_event: &str,
    created_at: &str,
    subscriber: &Subscriber,
    payload: &Value,
) -> Result<DeliveryResult, WebhookError> {
    debug!(
        "generic dispatch for '{}' at {} to {}",
        trigger_event, created_at, subscriber.subscriber_url
    );
    let body = serde_json::to_string(payload)?;
    deliver(secret_key, &subscriber.subscriber_url, body, ContentType::Json).await
}

/// Delivery primitive shared by both dispatch operations: sign, POST once,
/// normalize the outcome. Fire-once, no retry.
async fn deliver(
    secret_key: Option<&str>,
    subscriber_url: &str,
    body: String,
    content_type: ContentType,
) -> Result<DeliveryResult, WebhookError> {
    if subscriber_url.is_empty() || body.is_empty() {
        return Err(WebhookError::InvalidRequest);
    }

    let signature = match secret_key {
        Some(key) if !key.is_empty() => sign_body(key, body.as_bytes()),
        _ => UNSIGNED_SENTINEL.to_string(),
    };

    info!(
        "delivering {} bytes ({}) to {}",
        body.len(),
        content_type.as_str(),
        subscriber_url
    );

    let response = HTTP_CLIENT
        .post(subscriber_url)
        .header(CONTENT_TYPE, content_type.as_str())
        .header(SIGNATURE_HEADER, signature)
        .body(body)
        .send()
        .await?;

    let status = response.status();
    let message = response.text().await?;

    Ok(DeliveryResult {
        ok: status.is_success(),
        status: status.as_u16(),
        message,
    })
}

/// Per-subscriber outcome of a fan-out: either a normalized delivery result
/// or the dispatch error rendered as text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FanOutOutcome {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Dispatch one domain event to many subscribers concurrently.
///
/// Every target gets its own independently computed body and signature; no
/// state is shared between deliveries and no ordering between them is
/// guaranteed. One failed delivery never aborts the batch.
pub async fn fan_out(
    trigger_event: &str,
    created_at: &str,
    targets: Vec<WebhookTarget>,
    event: &EventPayload,
) -> Vec<FanOutOutcome> {
    let mut tasks = JoinSet::new();

    for target in targets {
        let trigger_event = trigger_event.to_string();
        let created_at = created_at.to_string();
        let event = event.clone();
        tasks.spawn(async move {
            let subscriber = Subscriber::from(&target);
            let result = dispatch_calendar_event(
                target.secret.as_deref(),
                &trigger_event,
                &created_at,
                &subscriber,
                event,
            )
            .await;
            (target.url, result)
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((url, Ok(delivery))) => outcomes.push(FanOutOutcome {
                url,
                delivery: Some(delivery),
                error: None,
            }),
            Ok((url, Err(err))) => {
                warn!("webhook delivery to {} failed: {}", url, err);
                outcomes.push(FanOutOutcome {
                    url,
                    delivery: None,
                    error: Some(err.to_string()),
                });
            }
            Err(join_err) => error!("webhook delivery task failed: {}", join_err),
        }
    }
    outcomes
}
