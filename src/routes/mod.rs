pub mod api_routes;

use std::path::Path;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::routes::api_routes::{chat_handler, health_handler};
use crate::service::chat_service::ChatService;

/// Builds the relay router. When `static_dir` is given, unmatched paths are
/// served from it so one process can host both the API and the built client.
pub fn create_router(svc: ChatService, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/health", get(health_handler));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(svc)
}
