//! SQLite persistence.
//!
//! Concrete implementations of the domain repository traits using SQLx runtime
//! queries, plus pool construction and schema initialization.
//!
//! # Modules
//!
//! - [`schema`] - Pool construction, embedded migrations, startup reset switch
//! - [`SqliteUserRepository`] - Account storage
//! - [`SqliteLinkRepository`] - Short link storage

pub mod schema;
pub mod sqlite_link_repository;
pub mod sqlite_user_repository;

pub use sqlite_link_repository::SqliteLinkRepository;
pub use sqlite_user_repository::SqliteUserRepository;
