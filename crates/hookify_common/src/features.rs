//! Feature flag handling for the Hookify application.
//!
//! Feature flags are used in two ways in the Hookify application:
//!
//! 1. Compile-time feature flags using `#[cfg(feature = "...")]`
//! 2. Runtime feature flags using configuration values
//!
//! This module provides helper functions for checking if features are enabled
//! at runtime based on configuration values.

use hookify_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
///
/// A feature counts as enabled when its runtime flag is set AND its
/// configuration section is present.
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if webhook dispatch is enabled at runtime.
pub fn is_webhooks_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_webhooks, config.webhook.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookify_config::{ServerConfig, WebhookConfig};

    fn config(use_webhooks: bool, webhook: Option<WebhookConfig>) -> Arc<AppConfig> {
        Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            use_webhooks,
            webhook,
        })
    }

    #[test]
    fn flag_and_section_must_both_be_present() {
        assert!(is_webhooks_enabled(&config(
            true,
            Some(WebhookConfig::default())
        )));
        assert!(!is_webhooks_enabled(&config(true, None)));
        assert!(!is_webhooks_enabled(&config(
            false,
            Some(WebhookConfig::default())
        )));
    }
}
