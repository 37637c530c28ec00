//! # minishort
//!
//! A minimal URL shortener with user accounts, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities and repository traits
//! - **Application Layer** ([`application`]) - Registration, login and link services
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool, schema and repositories
//! - **API Layer** ([`api`]) - Redirect and health endpoints
//! - **Web Layer** ([`web`]) - HTML pages, forms and cookie sessions
//!
//! ## Features
//!
//! - Registration and login with Argon2id password hashes
//! - Per-user link lists on the home page
//! - 8-character short ids with retry on collision
//! - Admin CLI for users, links and database checks
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: defaults to sqlite://data.db
//! export DATABASE_URL="sqlite://data.db"
//!
//! # Start the service (migrations run automatically)
//! cargo run
//!
//! # Create a user without the web form
//! cargo run --bin admin -- user create --username alice
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, LinkService};
    pub use crate::domain::entities::{Credentials, Link, NewLink, User, UserSession};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
