//! Shorten form handler.

use axum::{
    Form,
    extract::State,
    http::{HeaderMap, Uri},
};
use tower_sessions::Session;

use super::home::{IndexTemplate, render_index};
use crate::domain::entities::ShortenRequest;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base_url::resolve_base_url;
use crate::web::middleware::session;

/// Creates a short link for the logged-in user and shows it on the home page.
///
/// # Endpoint
///
/// `POST /shorten` (form field `url`)
///
/// # Errors
///
/// - 400 `URL is required` when `url` is empty, even without a session
/// - 400 `URL contains invalid characters` for control characters
/// - 401 `You must be logged in to shorten a URL` without a session
/// - 500 on storage failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    session: Session,
    Form(request): Form<ShortenRequest>,
) -> Result<IndexTemplate, AppError> {
    let user = session::load(&session).await?;
    let base = resolve_base_url(state.base_url.as_deref(), &headers, &uri);

    let link = state.link_service.shorten(&user, &request.url).await?;
    let short_url = state.link_service.short_url(&base, &link.short_id);

    render_index(&state, &base, &user, Some(short_url)).await
}
