//! Route configuration.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers;

/// Build the application router: the three protocol endpoints, a health
/// check, and a static-file fallback for the web frontend.
pub fn create_router(static_dir: &str) -> Router {
    Router::new()
        .route("/api/phase1/chsh", post(handlers::chsh_handler))
        .route("/api/phase2/keygen", post(handlers::keygen_handler))
        .route("/api/phase3/attack", post(handlers::attack_handler))
        .route("/health", get(handlers::health_handler))
        .fallback_service(ServeDir::new(static_dir))
}
