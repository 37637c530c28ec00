//! Logout handler.

use axum::{extract::State, response::Redirect};
use tower_sessions::Session;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::session;

/// Destroys the caller's session and goes home. Works without a session too.
///
/// # Endpoint
///
/// `GET /logout`
pub async fn logout_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AppError> {
    let mut user = session::load(&session).await?;
    state.auth_service.logout(&mut user);

    session::destroy(&session).await?;

    Ok(Redirect::to("/"))
}
