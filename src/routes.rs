//! Top-level router configuration combining page and API routes.
//!
//! # Route Structure
//!
//! - `GET  /`                  - Home page (session aware)
//! - `GET|POST /register`      - Registration
//! - `GET|POST /login`         - Login
//! - `GET  /logout`            - Logout
//! - `POST /shorten`           - Create a short link (session required)
//! - `GET  /health`            - Health check (public)
//! - `GET  /{id}`              - Short link redirect (public)
//! - `/static/*`               - Static assets
//!
//! # Middleware
//!
//! - **Sessions** - In-memory cookie sessions
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing;
use crate::config::Config;
use crate::state::AppState;
use crate::web;
use crate::web::middleware::session;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;
use tower_sessions::{MemoryStore, SessionManagerLayer};

/// Builds the routed application without path normalization.
///
/// Integration tests drive this directly with their own session layer.
pub fn router(
    state: AppState,
    sessions: SessionManagerLayer<MemoryStore>,
    static_dir: &str,
) -> Router {
    Router::new()
        .merge(web::routes::routes())
        .merge(api::routes::public_routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(sessions)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Session cookie flags, idle expiry and the static directory come from `config`.
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    let sessions = session::layer(config.session_secure_cookie, config.session_idle_minutes);

    let router = router(state, sessions, &config.static_dir);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
