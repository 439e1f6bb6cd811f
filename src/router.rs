use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>, frontend_dir: &str) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthcheck))
        // Vendor routes
        .route("/api/vendors", get(handlers::vendors::list_vendors))
        .route("/api/vendor-config", get(handlers::vendors::get_vendor_config))
        // Generator routes (forwarded upstream)
        .route("/api/generate", post(handlers::generator::generate))
        .route("/api/download", post(handlers::generator::download))
        // Static files (frontend)
        .fallback_service(
            ServeDir::new(frontend_dir)
                .fallback(ServeFile::new(format!("{}/index.html", frontend_dir))),
        )
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
