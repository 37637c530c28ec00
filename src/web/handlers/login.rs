//! Login page and form handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use tower_sessions::Session;

use crate::domain::entities::Credentials;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::session;

/// Template for the login page.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {}

/// Renders the login form.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_page_handler() -> impl IntoResponse {
    LoginTemplate {}
}

/// Verifies credentials, stores the username in the session and goes home.
///
/// # Endpoint
///
/// `POST /login` (form fields `username`, `password`)
///
/// # Errors
///
/// Returns 401 `Invalid credentials` for an unknown user or wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Form(credentials): Form<Credentials>,
) -> Result<Redirect, AppError> {
    let user = state.auth_service.login(credentials).await?;

    session::store(&session, &user).await?;

    Ok(Redirect::to("/"))
}
