//! Browser-facing pages.
//!
//! Server-rendered Askama templates backed by a cookie session.
//!
//! # Modules
//!
//! - [`handlers`] - Page and form handlers
//! - [`middleware`] - Session layer and `UserSession` conversion
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
