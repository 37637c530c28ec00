//! HTTP middleware for observability.

pub mod tracing;
