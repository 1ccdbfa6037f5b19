//! Health probe payload.

use serde::Serialize;

/// Body of `GET /-/health`, returned with both 200 and 503.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: CheckStatus,
}

/// Outcome of probing one dependency.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: &'static str,
    pub message: &'static str,
}

impl CheckStatus {
    pub fn from_probe(ok: bool, up: &'static str, down: &'static str) -> Self {
        if ok {
            Self { status: "ok", message: up }
        } else {
            Self { status: "error", message: down }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
