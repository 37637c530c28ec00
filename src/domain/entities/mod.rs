//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account
//! - [`Link`] - A shortened URL owned by a user
//! - [`UserSession`] - The caller identity passed into services
//!
//! Insert-only structs (`NewUser`, `NewLink`) are kept separate from the stored
//! entities, and form inputs (`Credentials`, `ShortenRequest`) carry their own
//! `validator` rules.

pub mod link;
pub mod session;
pub mod user;

pub use link::{Link, NewLink, ShortenRequest};
pub use session::UserSession;
pub use user::{Credentials, NewUser, User};
