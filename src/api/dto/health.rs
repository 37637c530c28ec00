//! Response body of `GET /health`.

use serde::Serialize;

/// Overall service status: `healthy`, or `degraded` when the link store
/// cannot be read.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Crate version the binary was built from.
    pub version: &'static str,
    pub checks: HealthChecks,
}

/// Per-component results. The SQLite store is the only dependency.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

/// Result of probing one component.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    /// `ok` or `error`.
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok",
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
