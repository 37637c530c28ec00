//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access so services can be tested without a
//! database. Concrete implementations live in `crate::infrastructure::persistence`
//! and mock implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Account storage and lookup
//! - [`LinkRepository`] - Short link storage and lookup
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod link_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
