//! Registration page and form handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};

use crate::domain::entities::Credentials;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
struct RegisterTemplate {}

/// Renders the registration form.
///
/// # Endpoint
///
/// `GET /register`
pub async fn register_page_handler() -> impl IntoResponse {
    RegisterTemplate {}
}

/// Creates an account and sends the user to the login page.
///
/// Registering does not log the user in.
///
/// # Endpoint
///
/// `POST /register` (form fields `username`, `password`)
///
/// # Errors
///
/// - 400 `Username and Password are required` when either field is empty
/// - 409 `Username already exists` for a taken username
/// - 500 on storage failure
pub async fn register_handler(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Result<Redirect, AppError> {
    state.auth_service.register(credentials).await?;

    Ok(Redirect::to("/login"))
}
