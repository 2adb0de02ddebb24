//! Health check building blocks shared by every service.

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use domain::{STATUS_DEGRADED, STATUS_HEALTHY, STATUS_UNHEALTHY};
use serde::{Deserialize, Serialize};

/// Health of a single dependency (database, cache, downstream service).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentHealth {
    pub fn healthy() -> Self {
        Self {
            status: STATUS_HEALTHY.to_string(),
            error: None,
        }
    }

    pub fn unhealthy(error: impl Display) -> Self {
        Self {
            status: STATUS_UNHEALTHY.to_string(),
            error: Some(error.to_string()),
        }
    }

    /// Map a probe result to a health entry.
    pub fn from_result<E: Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::healthy(),
            Err(e) => Self::unhealthy(e),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == STATUS_HEALTHY
    }
}

/// Dependencies probed by a database-backed service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthChecks {
    pub database: ComponentHealth,
    pub cache: ComponentHealth,
}

/// Body of a service's `/health` response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub checks: HealthChecks,
}

impl HealthResponse {
    /// A broken database is fatal; a broken cache only degrades the service.
    pub fn new(service: &'static str, checks: HealthChecks) -> Self {
        let status = if !checks.database.is_healthy() {
            STATUS_UNHEALTHY
        } else if !checks.cache.is_healthy() {
            STATUS_DEGRADED
        } else {
            STATUS_HEALTHY
        };

        Self {
            status,
            service,
            checks,
        }
    }
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        let code = if self.status == STATUS_UNHEALTHY {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::OK
        };
        (code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        assert!(ComponentHealth::from_result::<String>(Ok(())).is_healthy());

        let failed = ComponentHealth::from_result(Err("timeout"));
        assert!(!failed.is_healthy());
        assert_eq!(failed.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_overall_status() {
        let healthy = HealthResponse::new(
            "product-service",
            HealthChecks {
                database: ComponentHealth::healthy(),
                cache: ComponentHealth::healthy(),
            },
        );
        assert_eq!(healthy.status, STATUS_HEALTHY);

        let degraded = HealthResponse::new(
            "product-service",
            HealthChecks {
                database: ComponentHealth::healthy(),
                cache: ComponentHealth::unhealthy("connection refused"),
            },
        );
        assert_eq!(degraded.status, STATUS_DEGRADED);
        assert_eq!(degraded.into_response().status(), StatusCode::OK);

        let down = HealthResponse::new(
            "product-service",
            HealthChecks {
                database: ComponentHealth::unhealthy("pool timed out"),
                cache: ComponentHealth::healthy(),
            },
        );
        assert_eq!(down.status, STATUS_UNHEALTHY);
        assert_eq!(down.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
