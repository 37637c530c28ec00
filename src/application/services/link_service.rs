//! Link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, ShortenRequest, UserSession};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_short_id;
use serde_json::json;
use validator::Validate;

/// Attempts at inserting a freshly generated id before giving up.
pub const MAX_SHORTEN_ATTEMPTS: usize = 5;

/// Service for creating, resolving and listing shortened links.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Shortens `original_url` on behalf of the session's user.
    ///
    /// The URL is stored exactly as given, apart from refusing control
    /// characters, which could never be sent back in a `Location` header. A random 8-character id is generated
    /// and inserted; if the insert hits the `short_id` unique constraint a new id
    /// is drawn, up to [`MAX_SHORTEN_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty (checked first) or
    /// contains a control character.
    /// Returns [`AppError::Unauthorized`] if the session has no user.
    /// Returns [`AppError::Internal`] if every attempt collided or on database errors.
    pub async fn shorten(
        &self,
        session: &UserSession,
        original_url: &str,
    ) -> Result<Link, AppError> {
        ShortenRequest {
            url: original_url.to_string(),
        }
        .validate()?;

        if original_url.chars().any(char::is_control) {
            return Err(AppError::bad_request(
                "URL contains invalid characters",
                json!({ "field": "url" }),
            ));
        }

        let username = session.username().ok_or_else(|| {
            AppError::unauthorized("You must be logged in to shorten a URL", json!({}))
        })?;

        for attempt in 1..=MAX_SHORTEN_ATTEMPTS {
            let new_link = NewLink {
                short_id: generate_short_id(),
                original_url: original_url.to_string(),
                username: username.to_string(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    tracing::info!(
                        short_id = %link.short_id,
                        %username,
                        "Link created"
                    );
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    tracing::warn!(attempt, "Short id collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Could not shorten URL",
            json!({ "reason": "Too many short id collisions", "attempts": MAX_SHORTEN_ATTEMPTS }),
        ))
    }

    /// Resolves a short id to the stored original URL.
    ///
    /// The target is returned as stored, without any safety check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, short_id: &str) -> Result<String, AppError> {
        self.link_repository
            .find_by_short_id(short_id)
            .await?
            .map(|link| link.original_url)
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "short_id": short_id })))
    }

    /// Lists every link owned by `username`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_for_user(&self, username: &str) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_by_username(username).await
    }

    /// Counts all stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn link_count(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Joins a base URL and a short id.
    pub fn short_url(&self, base_url: &str, short_id: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), short_id)
    }
}
