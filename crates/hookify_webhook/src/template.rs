// --- File: crates/hookify_webhook/src/template.rs ---

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::WebhookError;

/// Render a subscriber payload template against the event payload.
///
/// Logic-less substitution: fields are looked up by dotted path into the
/// payload's JSON value and written out literally, with no escaping and no
/// code execution. Paths that resolve to nothing render as the empty string.
pub fn render_template(template: &str, data: &Value) -> Result<String, WebhookError> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .render_template(template, data)
        .map_err(|err| WebhookError::Template(err.to_string()))
}
