// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    /// Overall health status.
    pub status: String,
    /// Individual health checks and their results.
    pub checks: HealthChecks,
    /// When the environment was loaded.
    pub loaded_at: DateTime<Utc>,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// Deployment mode of the loaded environment (`production` or `development`).
    pub environment: String,
}

/// Simple health check response for liveness checks.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check endpoint handler.
///
/// The environment is validated before the server starts, so a running
/// process is always ready.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = ReadyResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<ReadyResponse> {
    let mode = if state.environment_config().is_production() {
        "production"
    } else {
        "development"
    };

    Json(ReadyResponse {
        status: "ok".to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            environment: mode.to_string(),
        },
        loaded_at: state.loaded_at,
    })
}

/// Liveness check handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
