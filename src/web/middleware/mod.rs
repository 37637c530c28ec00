//! Web-specific middleware.
//!
//! - [`session`] - Cookie session layer and the `UserSession` bridge

pub mod session;
