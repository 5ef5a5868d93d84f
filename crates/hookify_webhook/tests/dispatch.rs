// Integration tests for the webhook dispatcher, against a local mock server.

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hookify_webhook::error::WebhookError;
use hookify_webhook::event::{EventPayload, Organizer};
use hookify_webhook::logic::{
    dispatch_calendar_event, dispatch_generic_payload, sign_body, Subscriber,
    RAW_PASSTHROUGH_PROVIDER, SIGNATURE_HEADER, UNSIGNED_SENTINEL,
};

fn sample_event() -> EventPayload {
    EventPayload {
        event_type: "intro-call".to_string(),
        title: "Intro call".to_string(),
        uid: "evt_123".to_string(),
        start_time: Utc.with_ymd_and_hms(2026, 3, 4, 19, 30, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2026, 3, 4, 20, 0, 0).unwrap(),
        organizer: Organizer {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            time_zone: "America/New_York".to_string(),
            locale: "en".to_string(),
        },
        attendees: Vec::new(),
        location: None,
        description: None,
        additional_notes: None,
        metadata: HashMap::new(),
        reschedule_uid: None,
        booking_id: Some(42),
        trigger_event: None,
        adjusted_start_time: None,
        adjusted_end_time: None,
    }
}

fn subscriber(url: String) -> Subscriber {
    Subscriber {
        subscriber_url: url,
        provider_id: None,
        payload_template: None,
    }
}

#[tokio::test]
async fn default_envelope_is_delivered_as_signed_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("delivered"))
        .expect(1)
        .mount(&server)
        .await;

    let result = dispatch_calendar_event(
        Some("secret"),
        "BOOKING_CREATED",
        "2026-03-04T19:30:00Z",
        &subscriber(format!("{}/hook", server.uri())),
        sample_event(),
    )
    .await
    .unwrap();

    assert!(result.ok);
    assert_eq!(result.status, 200);
    assert_eq!(result.message, "delivered");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["triggerEvent"], "BOOKING_CREATED");
    assert_eq!(body["createdAt"], "2026-03-04T19:30:00Z");
    assert_eq!(body["payload"]["uid"], "evt_123");
    assert_eq!(body["payload"]["triggerEvent"], "New booking");
    assert_eq!(body["payload"]["adjustedStartTime"], "Mar 4, 2026 2:30 PM");
    assert_eq!(body["payload"]["adjustedEndTime"], "Mar 4, 2026 3:00 PM");

    // The signature header covers the exact body bytes
    let signature = requests[0]
        .headers
        .get(SIGNATURE_HEADER)
        .expect("signature header missing")
        .to_str()
        .unwrap();
    assert_eq!(signature, sign_body("secret", &requests[0].body));
}

#[tokio::test]
async fn missing_secret_sends_the_unsigned_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header(SIGNATURE_HEADER, UNSIGNED_SENTINEL))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let result = dispatch_calendar_event(
        None,
        "BOOKING_CREATED",
        "2026-03-04T19:30:00Z",
        &subscriber(format!("{}/hook", server.uri())),
        sample_event(),
    )
    .await
    .unwrap();

    assert!(result.ok);
}

#[tokio::test]
async fn generic_payload_is_signed_over_its_exact_serialization() {
    let payload = json!({ "a": 1, "nested": { "b": "two" } });
    let expected_body = serde_json::to_string(&payload).unwrap();
    let expected_signature = sign_body("s3cret", expected_body.as_bytes());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header(SIGNATURE_HEADER, expected_signature.as_str()))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let result = dispatch_generic_payload(
        Some("s3cret"),
        "FORM_SUBMITTED",
        "2026-03-04T19:30:00Z",
        &subscriber(format!("{}/hook", server.uri())),
        &payload,
    )
    .await
    .unwrap();

    assert!(result.ok);
}

#[tokio::test]
async fn generic_dispatch_ignores_the_payload_template() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let target = Subscriber {
        subscriber_url: format!("{}/hook", server.uri()),
        provider_id: None,
        payload_template: Some("ignored={{a}}".to_string()),
    };
    let payload = json!({ "a": "value" });

    dispatch_generic_payload(None, "FORM_SUBMITTED", "2026-03-04T19:30:00Z", &target, &payload)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, payload);
}

#[tokio::test]
async fn raw_passthrough_provider_sends_the_bare_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let target = Subscriber {
        subscriber_url: format!("{}/hook", server.uri()),
        provider_id: Some(RAW_PASSTHROUGH_PROVIDER.to_string()),
        payload_template: Some(r#"{"x": "{{title}}"}"#.to_string()),
    };

    dispatch_calendar_event(
        None,
        "BOOKING_CREATED",
        "2026-03-04T19:30:00Z",
        &target,
        sample_event(),
    )
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    // No envelope and no template: the augmented event itself is the body
    assert!(body.get("payload").is_none());
    assert_eq!(body["uid"], "evt_123");
    assert_eq!(body["triggerEvent"], "New booking");
}

#[tokio::test]
async fn form_template_is_delivered_urlencoded_and_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let target = Subscriber {
        subscriber_url: format!("{}/hook", server.uri()),
        provider_id: None,
        payload_template: Some("title={{title}}&uid={{uid}}".to_string()),
    };

    dispatch_calendar_event(
        None,
        "BOOKING_CREATED",
        "2026-03-04T19:30:00Z",
        &target,
        sample_event(),
    )
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        String::from_utf8_lossy(&requests[0].body),
        "title=Intro call&uid=evt_123"
    );
}

#[tokio::test]
async fn a_500_response_is_reported_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(500).set_body_string("subscriber exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let result = dispatch_calendar_event(
        Some("secret"),
        "BOOKING_CANCELLED",
        "2026-03-04T19:30:00Z",
        &subscriber(format!("{}/hook", server.uri())),
        sample_event(),
    )
    .await
    .unwrap();

    assert!(!result.ok);
    assert_eq!(result.status, 500);
    assert_eq!(result.message, "subscriber exploded");
}

#[tokio::test]
async fn unreachable_subscribers_surface_as_transport_errors() {
    // Nothing listens on the discard port
    let result = dispatch_calendar_event(
        Some("secret"),
        "BOOKING_CREATED",
        "2026-03-04T19:30:00Z",
        &subscriber("http://127.0.0.1:9/hook".to_string()),
        sample_event(),
    )
    .await;

    assert!(matches!(result, Err(WebhookError::Transport(_))));
}
