// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use chrono::{DateTime, Utc};

use crate::environment::EnvironmentConfig;
use crate::holder::EnvironmentHolder;

#[derive(Clone)]
pub struct AppState {
    pub environment: EnvironmentHolder,
    /// When the environment was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(environment: EnvironmentHolder) -> Self {
        Self {
            environment,
            loaded_at: Utc::now(),
        }
    }

    pub fn environment_config(&self) -> &EnvironmentConfig {
        self.environment.environment_config()
    }
}
