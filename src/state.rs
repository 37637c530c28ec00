//! Shared application state injected into every handler.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::infrastructure::persistence::{SqliteLinkRepository, SqliteUserRepository};

/// Services and handles shared across requests.
///
/// Cloned into every request; the services sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<SqliteUserRepository>>,
    pub link_service: Arc<LinkService<SqliteLinkRepository>>,
    /// Configured public base for short links; `None` derives it from the request.
    pub base_url: Option<String>,
}

impl AppState {
    /// Wires repositories and services on top of one connection pool.
    pub fn new(pool: Arc<SqlitePool>, base_url: Option<String>) -> Self {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let link_repository = Arc::new(SqliteLinkRepository::new(pool));

        Self {
            auth_service: Arc::new(AuthService::new(user_repository)),
            link_service: Arc::new(LinkService::new(link_repository)),
            base_url,
        }
    }
}
