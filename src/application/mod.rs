//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations HTTP handlers
//! and the admin CLI call. The caller's session is always passed in explicitly.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login and logout
//! - [`services::link_service::LinkService`] - Shortening, resolution and listing

pub mod services;
