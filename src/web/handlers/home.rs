//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::{HeaderMap, Uri},
};
use tower_sessions::Session;

use crate::domain::entities::UserSession;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base_url::resolve_base_url;
use crate::web::middleware::session;

/// Template for the home page.
///
/// Renders `templates/index.html`. Anonymous visitors get login and register
/// links; a logged-in user gets the shorten form and their links. `short_url`
/// is set right after a successful shorten.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub user: Option<String>,
    pub links: Vec<LinkView>,
    pub short_url: Option<String>,
}

/// One row of the caller's link list.
#[derive(Debug, Clone)]
pub struct LinkView {
    pub short_id: String,
    pub short_url: String,
    pub original_url: String,
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /`
///
/// # Errors
///
/// Returns 500 if the caller's links cannot be loaded.
pub async fn home_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    session: Session,
) -> Result<IndexTemplate, AppError> {
    let user = session::load(&session).await?;
    let base = resolve_base_url(state.base_url.as_deref(), &headers, &uri);

    render_index(&state, &base, &user, None).await
}

/// Builds the home page for `user`, optionally highlighting a new short URL.
///
/// `base` is the already resolved short link base.
pub(super) async fn render_index(
    state: &AppState,
    base: &str,
    user: &UserSession,
    short_url: Option<String>,
) -> Result<IndexTemplate, AppError> {
    let Some(username) = user.username() else {
        return Ok(IndexTemplate {
            user: None,
            links: Vec::new(),
            short_url,
        });
    };

    let links = state
        .link_service
        .list_for_user(username)
        .await?
        .into_iter()
        .map(|link| LinkView {
            short_url: state.link_service.short_url(base, &link.short_id),
            short_id: link.short_id,
            original_url: link.original_url,
        })
        .collect();

    Ok(IndexTemplate {
        user: Some(username.to_string()),
        links,
        short_url,
    })
}
