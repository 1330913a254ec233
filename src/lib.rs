// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Environment Config - validated front-end runtime configuration
//!
//! This crate loads the front-end environment (backend API base URL and
//! identity-provider settings) once at startup, validates it, and hands it
//! out read-only. A missing or malformed value stops the process before it
//! serves anything.
//!
//! ## Modules
//!
//! - `environment` - Data model, validation and sources
//! - `holder` - Immutable, shareable holder
//! - `api` - HTTP endpoints serving the environment (Axum)
//! - `config` - Environment variable names and defaults

pub mod api;
pub mod config;
pub mod environment;
pub mod error;
pub mod holder;
pub mod state;
pub mod telemetry;

pub use environment::{AuthSettings, EnvironmentConfig};
pub use error::ConfigurationError;
pub use holder::EnvironmentHolder;
