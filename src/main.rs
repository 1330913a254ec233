// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, process::ExitCode};

use environment_config::{
    api::router,
    config::{bind_address, IS_PRODUCTION_ENV},
    environment::validate,
    state::AppState,
    telemetry::{init_tracing, LogFormat},
    EnvironmentHolder,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    // The subscriber must exist before loading so failures are logged. A
    // malformed flag is reported by the loader itself.
    let is_production =
        validate::flag("isProduction", env::var(IS_PRODUCTION_ENV).ok().as_deref()).unwrap_or(false);
    init_tracing(LogFormat::from_env(is_production));

    let environment = match EnvironmentHolder::load() {
        Ok(environment) => environment,
        Err(e) => {
            tracing::error!(error = %e, "Invalid front-end environment, refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let addr = match bind_address(|name| env::var_os(name)) {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "Invalid bind address, refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let app = router(AppState::new(environment));

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%addr, "Environment server listening (docs at /docs)");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Environment server stopped");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
