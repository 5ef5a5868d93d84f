// --- File: crates/hookify_webhook/src/doc.rs ---
#![allow(dead_code)]
use utoipa::OpenApi;

use crate::event::{Attendee, EventPayload, Organizer};
use crate::handlers::{DispatchRequest, DispatchResponse, TestDispatchRequest};
use crate::logic::{DeliveryResult, FanOutOutcome};
use hookify_common::services::WebhookTarget;

/// Documentation for the dispatch endpoint: fans one domain event out to the
/// subscriber registrations carried in the request and reports per-subscriber
/// outcomes.
#[utoipa::path(
    post,
    path = "/webhooks/dispatch", // Path relative to /api
    request_body = DispatchRequest,
    responses(
        (status = 200, description = "Per-subscriber delivery outcomes", body = DispatchResponse),
        (status = 401, description = "Missing or invalid internal auth secret"),
        (status = 404, description = "Webhook dispatch not enabled"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Webhooks"
)]
fn doc_dispatch_handler() {}

/// Documentation for the test endpoint: sends a sample signed ping to one
/// subscriber URL so an operator can verify the endpoint end to end.
#[utoipa::path(
    post,
    path = "/webhooks/test", // Path relative to /api
    request_body = TestDispatchRequest,
    responses(
        (status = 200, description = "Normalized delivery result from the test ping", body = DeliveryResult),
        (status = 401, description = "Missing or invalid internal auth secret"),
        (status = 404, description = "Webhook dispatch not enabled"),
        (status = 502, description = "Delivery failed in transit")
    ),
    tag = "Webhooks"
)]
fn doc_test_dispatch_handler() {}

/// OpenAPI documentation for the webhook dispatch API
#[derive(OpenApi)]
#[openapi(
    paths(doc_dispatch_handler, doc_test_dispatch_handler),
    components(schemas(
        DispatchRequest,
        DispatchResponse,
        TestDispatchRequest,
        DeliveryResult,
        FanOutOutcome,
        EventPayload,
        Organizer,
        Attendee,
        WebhookTarget
    )),
    tags(
        (name = "Webhooks", description = "Internal API for dispatching signed webhook notifications")
    )
)]
pub struct WebhookApiDoc;
