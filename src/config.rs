// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ENVIRONMENT_FILE` | JSON file holding the whole front-end environment | Optional |
//! | `IS_PRODUCTION` | Deployment mode flag | `false` |
//! | `API_BASE_URL` | Absolute URL of the backend API | Required |
//! | `AUTH_DOMAIN` | Identity-provider domain prefix | Required |
//! | `AUTH_AUDIENCE` | Audience of the protected API | Required |
//! | `AUTH_CLIENT_ID` | Public client id issued by the identity provider | Required |
//! | `AUTH_CALLBACK_URL` | Absolute URL the provider redirects back to | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::ffi::OsString;
use std::net::{IpAddr, SocketAddr};

use crate::error::ConfigurationError;

/// Path to a JSON document in the persisted environment shape.
///
/// When set, the file is the only source; the per-field variables below are
/// ignored.
pub const ENVIRONMENT_FILE_ENV: &str = "ENVIRONMENT_FILE";

pub const IS_PRODUCTION_ENV: &str = "IS_PRODUCTION";
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";
pub const AUTH_DOMAIN_ENV: &str = "AUTH_DOMAIN";
pub const AUTH_AUDIENCE_ENV: &str = "AUTH_AUDIENCE";
pub const AUTH_CLIENT_ID_ENV: &str = "AUTH_CLIENT_ID";
pub const AUTH_CALLBACK_URL_ENV: &str = "AUTH_CALLBACK_URL";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// `json` or `pretty`. Unset means pretty, except in production.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Host suffix the identity-provider domain prefix expands to.
pub const IDENTITY_PROVIDER_SUFFIX: &str = "auth0.com";

/// Resolve the listen address from `HOST` and `PORT`.
///
/// Unparseable values are configuration errors, not silent fallbacks.
pub fn bind_address<F, V>(lookup: F) -> Result<SocketAddr, ConfigurationError>
where
    F: Fn(&str) -> Option<V>,
    V: Into<OsString>,
{
    read_bind_address(&lookup).map_err(ConfigurationError::from_variable)
}

fn read_bind_address<F, V>(lookup: &F) -> Result<SocketAddr, ConfigurationError>
where
    F: Fn(&str) -> Option<V>,
    V: Into<OsString>,
{
    let host = variable_text(lookup, "host", HOST_ENV)?
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let ip: IpAddr = host
        .trim()
        .parse()
        .map_err(|_| ConfigurationError::invalid("host", format!("`{host}` is not an IP address")))?;

    let port = match variable_text(lookup, "port", PORT_ENV)?.filter(|p| !p.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigurationError::invalid("port", format!("`{raw}` is not a port number")))?,
        None => DEFAULT_PORT,
    };

    Ok(SocketAddr::new(ip, port))
}

/// Read one variable as text. Absent is `None`; non-Unicode is invalid.
pub fn variable_text<F, V>(
    lookup: &F,
    field: &'static str,
    name: &str,
) -> Result<Option<String>, ConfigurationError>
where
    F: Fn(&str) -> Option<V>,
    V: Into<OsString>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .into()
            .into_string()
            .map(Some)
            .map_err(|_| ConfigurationError::invalid(field, "value is not valid Unicode")),
    }
}

/// Map a persisted field name to the environment variable that feeds it.
pub fn env_var_for(field: &str) -> Option<&'static str> {
    match field {
        "isProduction" => Some(IS_PRODUCTION_ENV),
        "apiBaseUrl" => Some(API_BASE_URL_ENV),
        "auth.domain" => Some(AUTH_DOMAIN_ENV),
        "auth.audience" => Some(AUTH_AUDIENCE_ENV),
        "auth.clientId" => Some(AUTH_CLIENT_ID_ENV),
        "auth.callbackUrl" => Some(AUTH_CALLBACK_URL_ENV),
        "host" => Some(HOST_ENV),
        "port" => Some(PORT_ENV),
        _ => None,
    }
}
