// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, Uri,
    },
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    environment::{AuthSettings, EnvironmentConfig},
    error::ApiError,
    state::AppState,
};

pub mod environment;
pub mod health;

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.environment_config());

    let routes = Router::new()
        .route("/environment.json", get(environment::get_environment))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .fallback(not_found)
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

/// Only the origin the front-end is served from may read the environment.
fn cors_layer(environment: &EnvironmentConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let origin = environment.auth().callback_origin();
    match HeaderValue::from_str(&origin) {
        Ok(value) => layer.allow_origin(AllowOrigin::list([value])),
        Err(e) => {
            tracing::warn!(%origin, error = %e, "Callback origin is not a valid header value, CORS disabled");
            layer
        }
    }
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        environment::get_environment,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            EnvironmentConfig,
            AuthSettings,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Environment", description = "Front-end runtime configuration"),
        (name = "Health", description = "Liveness and health checks")
    )
)]
struct ApiDoc;
