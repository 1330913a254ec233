// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::State,
    http::header::{HeaderValue, CACHE_CONTROL},
    response::IntoResponse,
    Json,
};

use crate::environment::EnvironmentConfig;
use crate::state::AppState;

/// Front-end runtime environment in the persisted shape.
///
/// Served with `Cache-Control: no-store` so a redeploy with new values is
/// picked up on the next page load.
#[utoipa::path(
    get,
    path = "/environment.json",
    tag = "Environment",
    responses(
        (status = 200, description = "Validated front-end environment", body = EnvironmentConfig)
    )
)]
pub async fn get_environment(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        Json(state.environment_config().clone()),
    )
}
