//! Cookie session layer and conversion to [`UserSession`].
//!
//! Sessions live in an in-memory store, so they end with the process. The cookie
//! carries only an opaque session id; the username stays server-side under
//! [`SESSION_USER_KEY`].

use serde_json::json;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::domain::entities::UserSession;
use crate::error::AppError;

/// Session attribute holding the logged-in username.
pub const SESSION_USER_KEY: &str = "user";

/// Builds the session manager layer.
///
/// # Arguments
///
/// - `secure` - set the `Secure` cookie attribute (enable behind HTTPS)
/// - `idle_minutes` - expire sessions after this much inactivity; `None` keeps
///   them until logout or restart
pub fn layer(secure: bool, idle_minutes: Option<i64>) -> SessionManagerLayer<MemoryStore> {
    let layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure)
        .with_same_site(SameSite::Lax);

    match idle_minutes {
        Some(minutes) => layer.with_expiry(Expiry::OnInactivity(time::Duration::minutes(minutes))),
        None => layer,
    }
}

/// Reads the caller's session. A missing cookie yields an anonymous session.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the session store fails.
pub async fn load(session: &Session) -> Result<UserSession, AppError> {
    let user = session
        .get::<String>(SESSION_USER_KEY)
        .await
        .map_err(session_error)?;

    Ok(user.map(UserSession::for_user).unwrap_or_default())
}

/// Persists a session after login. The session id is rotated first.
///
/// An anonymous `user` flushes the session instead.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the session store fails.
pub async fn store(session: &Session, user: &UserSession) -> Result<(), AppError> {
    let Some(username) = user.username() else {
        return destroy(session).await;
    };

    session.cycle_id().await.map_err(session_error)?;
    session
        .insert(SESSION_USER_KEY, username)
        .await
        .map_err(session_error)
}

/// Deletes the session from the store and expires the cookie.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the session store fails.
pub async fn destroy(session: &Session) -> Result<(), AppError> {
    session.flush().await.map_err(session_error)
}

fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::internal("Session error", json!({ "reason": e.to_string() }))
}
