// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tracing subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{DEFAULT_LOG_FILTER, LOG_FORMAT_ENV};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Resolve the format from `LOG_FORMAT`, defaulting to JSON in production.
    pub fn resolve(value: Option<&str>, is_production: bool) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => Self::Json,
            Some("pretty") => Self::Pretty,
            _ if is_production => Self::Json,
            _ => Self::Pretty,
        }
    }

    pub fn from_env(is_production: bool) -> Self {
        Self::resolve(std::env::var(LOG_FORMAT_ENV).ok().as_deref(), is_production)
    }
}

/// Install the global subscriber. Filter comes from `RUST_LOG`.
pub fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}
