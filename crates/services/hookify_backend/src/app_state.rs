// --- File: crates/services/hookify_backend/src/app_state.rs ---
use hookify_common::services::ServiceFactory;
use hookify_config::AppConfig;
use std::sync::Arc;

use crate::service_factory::HookifyServiceFactory;

/// Application state that is shared across all routes.
///
/// Keeps the loaded configuration and the service factory in one place so
/// handlers and future services resolve their dependencies through a single
/// interface instead of constructing them ad hoc.
#[derive(Clone)]
pub struct AppState {
    /// The application configuration loaded at startup.
    #[allow(dead_code)]
    pub config: Arc<AppConfig>,

    /// Service factory for accessing external services.
    pub service_factory: Arc<dyn ServiceFactory>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let service_factory = Arc::new(HookifyServiceFactory::new(config.clone()));
        Self {
            config,
            service_factory,
        }
    }
}
