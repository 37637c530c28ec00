//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    home_handler, login_handler, login_page_handler, logout_handler, register_handler,
    register_page_handler, shorten_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Page routes. All of them need the session layer; none require a login
/// up front, since each handler decides what an anonymous caller gets.
///
/// # Endpoints
///
/// - `GET  /`          - Home page with the caller's links
/// - `GET  /register`  - Registration form
/// - `POST /register`  - Create an account
/// - `GET  /login`     - Login form
/// - `POST /login`     - Start a session
/// - `GET  /logout`    - End the session
/// - `POST /shorten`   - Shorten a URL (session required)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route(
            "/register",
            get(register_page_handler).post(register_handler),
        )
        .route("/login", get(login_page_handler).post(login_handler))
        .route("/logout", get(logout_handler))
        .route("/shorten", post(shorten_handler))
}
