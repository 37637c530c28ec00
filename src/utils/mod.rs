//! Utility functions shared by services and handlers.
//!
//! - [`code_generator`] - Short id generation
//! - [`password`] - Argon2 hashing and legacy cleartext verification
//! - [`base_url`] - Base URL resolution for rendered short links

pub mod base_url;
pub mod code_generator;
pub mod password;
