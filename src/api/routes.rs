//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{health, servers, services_page, services_with_extension, AppState};

/// Create the status router.
///
/// Static paths take precedence over `/:page`, so `/services` always gets
/// the HTML page and `/:page` only sees suffixed forms like `/services.json`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(health))
        // Status pages
        .route("/services", get(services_page))
        .route("/servers", get(servers))
        .route("/:page", get(services_with_extension))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
