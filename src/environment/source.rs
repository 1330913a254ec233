// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Where the environment is read from.
//!
//! Exactly one source is used per process. `ENVIRONMENT_FILE` wins when set;
//! otherwise each field comes from its own variable. Sources are never merged.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use super::{validate, EnvironmentConfig, RawAuth, RawEnvironment};
use crate::config::{
    variable_text, API_BASE_URL_ENV, AUTH_AUDIENCE_ENV, AUTH_CALLBACK_URL_ENV, AUTH_CLIENT_ID_ENV,
    AUTH_DOMAIN_ENV, ENVIRONMENT_FILE_ENV, IS_PRODUCTION_ENV,
};
use crate::error::ConfigurationError;

/// The source selected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentSource {
    /// JSON document in the persisted shape.
    File(PathBuf),
    /// One environment variable per field.
    Variables,
}

impl EnvironmentSource {
    /// Pick the source from the given variable lookup.
    ///
    /// The file path is taken as an OS string, so non-Unicode paths still
    /// select the file.
    pub fn detect<F, V>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<V>,
        V: Into<OsString>,
    {
        let path = lookup(ENVIRONMENT_FILE_ENV)
            .map(|value| -> OsString { value.into() })
            .filter(|p| !p.to_str().is_some_and(|s| s.trim().is_empty()));

        match path {
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::Variables,
        }
    }

    /// Read and validate the environment from this source.
    pub fn load<F, V>(&self, lookup: F) -> Result<EnvironmentConfig, ConfigurationError>
    where
        F: Fn(&str) -> Option<V>,
        V: Into<OsString>,
    {
        match self {
            Self::File(path) => EnvironmentConfig::from_file(path),
            Self::Variables => EnvironmentConfig::from_lookup(lookup),
        }
    }
}

impl fmt::Display for EnvironmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Variables => write!(f, "environment variables"),
        }
    }
}

impl EnvironmentConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Field errors name the variable that fed the field.
    pub fn from_lookup<F, V>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<V>,
        V: Into<OsString>,
    {
        read_variables(&lookup).map_err(ConfigurationError::from_variable)
    }

    /// Build from a JSON document in the persisted shape.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        parse_document(json, "inline JSON")
    }

    /// Build from a JSON file in the persisted shape.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        parse_document(&contents, &path.display().to_string())
    }
}

fn read_variables<F, V>(lookup: &F) -> Result<EnvironmentConfig, ConfigurationError>
where
    F: Fn(&str) -> Option<V>,
    V: Into<OsString>,
{
    let is_production = variable_text(lookup, "isProduction", IS_PRODUCTION_ENV)?;
    let is_production = validate::flag("isProduction", is_production.as_deref())?;

    RawEnvironment {
        is_production: Some(is_production),
        api_base_url: variable_text(lookup, "apiBaseUrl", API_BASE_URL_ENV)?,
        auth: Some(RawAuth {
            domain: variable_text(lookup, "auth.domain", AUTH_DOMAIN_ENV)?,
            audience: variable_text(lookup, "auth.audience", AUTH_AUDIENCE_ENV)?,
            client_id: variable_text(lookup, "auth.clientId", AUTH_CLIENT_ID_ENV)?,
            callback_url: variable_text(lookup, "auth.callbackUrl", AUTH_CALLBACK_URL_ENV)?,
        }),
    }
    .try_into()
}

fn parse_document(json: &str, origin: &str) -> Result<EnvironmentConfig, ConfigurationError> {
    let raw: RawEnvironment =
        serde_json::from_str(json).map_err(|source| ConfigurationError::Parse {
            origin: origin.to_string(),
            source,
        })?;
    raw.try_into()
}
