// --- File: crates/hookify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Webhook Config ---
// Holds non-secret webhook delivery settings. Per-subscriber signing secrets
// come from the subscriber registry; the values below may carry the
// "secret_from_env" marker and are then filled from env vars at load time
// (WEBHOOK_SHARED_SECRET, WEBHOOK_DEFAULT_SECRET).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct WebhookConfig {
    /// Shared secret expected in the internal-auth header of dispatch requests.
    pub shared_secret: Option<String>,
    /// Fallback signing secret for subscribers registered without one.
    pub default_secret: Option<String>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_webhooks: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub webhook: Option<WebhookConfig>,
}
