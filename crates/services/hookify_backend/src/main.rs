// File: services/hookify_backend/src/main.rs
use axum::{extract::State, routing::get, Json, Router};
use hookify_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[cfg(feature = "webhook")]
use hookify_webhook::routes as webhook_routes;

mod app_state;
mod service_factory;

use app_state::AppState;

#[axum::debug_handler]
async fn service_status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "webhooks": state.service_factory.webhook_service().is_some(),
    }))
}

#[tokio::main]
async fn main() {
    hookify_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));
    let state = AppState::new(config.clone());

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Hookify API!" }))
        .route("/status", get(service_status))
        .with_state(state);

    #[cfg(feature = "webhook")]
    let webhook_router = webhook_routes(config.clone());

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router;
        #[cfg(feature = "webhook")]
        {
            router = router.merge(webhook_router);
        }
        router
    });

    #[allow(unused_mut)] // mutated when the openapi feature is enabled
    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "webhook")]
        use hookify_webhook::doc::WebhookApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the Merged OpenAPI Documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Hookify API",
                version = "0.1.0",
                description = "Hookify Service API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Hookify", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        // Create the merged OpenAPI document
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "webhook")]
        openapi_doc.merge(WebhookApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        // Create the Swagger UI route, referencing the merged doc
        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        // Merge the Swagger UI into the main app router
        app = app.merge(swagger_ui);
    }

    // Request tracing for everything the service serves
    let app = app.layer(TraceLayer::new_for_http());

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
