// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::env_var_for;

/// Raised when the environment cannot be constructed.
///
/// Always fatal: the process logs it and exits before serving anything.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// `variable` is set only when the value was read from the environment.
    #[error("required setting `{field}`{} is missing", var_hint(.variable))]
    Missing {
        field: &'static str,
        variable: Option<&'static str>,
    },

    #[error("setting `{field}`{} is invalid: {reason}", var_hint(.variable))]
    Invalid {
        field: &'static str,
        variable: Option<&'static str>,
        reason: String,
    },

    #[error("failed to read environment file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse environment from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigurationError {
    pub fn missing(field: &'static str) -> Self {
        Self::Missing {
            field,
            variable: None,
        }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            variable: None,
            reason: reason.into(),
        }
    }

    /// Attach the environment variable that fed the failing field.
    pub fn from_variable(self) -> Self {
        match self {
            Self::Missing { field, .. } => Self::Missing {
                field,
                variable: env_var_for(field),
            },
            Self::Invalid { field, reason, .. } => Self::Invalid {
                field,
                variable: env_var_for(field),
                reason,
            },
            other => other,
        }
    }

    /// The persisted field name, when the error is about a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Missing { field, .. } | Self::Invalid { field, .. } => Some(*field),
            Self::Read { .. } | Self::Parse { .. } => None,
        }
    }
}

fn var_hint(variable: &Option<&'static str>) -> String {
    variable.map(|var| format!(" ({var})")).unwrap_or_default()
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
