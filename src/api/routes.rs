//! Public API route configuration.

use crate::api::handlers::{health_handler, redirect_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes reachable without a session.
///
/// # Endpoints
///
/// - `GET /health` - Service health with a database probe
/// - `GET /{id}`   - Short link redirect
///
/// Static routes registered elsewhere take precedence over `/{id}`.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{id}", get(redirect_handler))
}
