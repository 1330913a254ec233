// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Process-wide, read-only holder of the front-end environment.
//!
//! The holder is built once in `main` and passed to whoever needs it. There
//! is no global and no write access; clones share one allocation.

use std::ffi::OsString;
use std::sync::Arc;

use crate::environment::source::EnvironmentSource;
use crate::environment::EnvironmentConfig;
use crate::error::ConfigurationError;

#[derive(Debug, Clone)]
pub struct EnvironmentHolder {
    environment: Arc<EnvironmentConfig>,
}

impl EnvironmentHolder {
    pub fn new(environment: EnvironmentConfig) -> Self {
        Self {
            environment: Arc::new(environment),
        }
    }

    /// Load from the process environment, choosing the source once.
    pub fn load() -> Result<Self, ConfigurationError> {
        Self::load_with(|name| std::env::var_os(name))
    }

    pub fn load_with<F, V>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<V>,
        V: Into<OsString>,
    {
        let source = EnvironmentSource::detect(&lookup);
        tracing::info!(%source, "Loading front-end environment");

        let environment = source.load(&lookup)?;
        tracing::info!(
            production = environment.is_production(),
            api_base_url = environment.api_base_url(),
            auth_domain = environment.auth().domain(),
            "Front-end environment loaded"
        );

        Ok(Self::new(environment))
    }

    /// The environment. Every call returns the same value.
    pub fn environment_config(&self) -> &EnvironmentConfig {
        &self.environment
    }

    /// Owned handle for consumers that outlive a borrow.
    pub fn shared(&self) -> Arc<EnvironmentConfig> {
        Arc::clone(&self.environment)
    }
}
