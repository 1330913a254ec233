// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Field validators.
//!
//! Validators never rewrite their input: a value that passes is stored
//! exactly as supplied.

use url::Url;

use crate::error::ConfigurationError;

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Require a present, non-blank string.
pub fn required(field: &'static str, value: Option<String>) -> Result<String, ConfigurationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigurationError::missing(field)),
    }
}

/// Require an absolute `http`/`https` URL with a host.
pub fn absolute_url(field: &'static str, value: &str) -> Result<Url, ConfigurationError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigurationError::invalid(field, format!("not an absolute URL ({e})")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigurationError::invalid(
            field,
            format!("unsupported scheme `{}` (expected http or https)", url.scheme()),
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigurationError::invalid(field, "URL has no host"));
    }

    Ok(url)
}

/// Require a hostname fragment such as `example.us` or `tenant`.
///
/// Labels are ASCII letters, digits and `-`, 1-63 characters each, and may
/// not start or end with `-`.
pub fn hostname_fragment(field: &'static str, value: &str) -> Result<(), ConfigurationError> {
    if value.len() > MAX_HOSTNAME_LEN {
        return Err(ConfigurationError::invalid(
            field,
            format!("longer than {MAX_HOSTNAME_LEN} characters"),
        ));
    }

    for label in value.split('.') {
        if label.is_empty() {
            return Err(ConfigurationError::invalid(field, "empty label"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(ConfigurationError::invalid(
                field,
                format!("label `{label}` is longer than {MAX_LABEL_LEN} characters"),
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(ConfigurationError::invalid(
                field,
                format!("label `{label}` starts or ends with `-`"),
            ));
        }
        if let Some(c) = label
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
        {
            return Err(ConfigurationError::invalid(
                field,
                format!("character `{c}` is not allowed in a hostname"),
            ));
        }
    }

    Ok(())
}

/// Parse a deployment-mode flag. Absent or blank means `false`.
pub fn flag(field: &'static str, value: Option<&str>) -> Result<bool, ConfigurationError> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(false);
    };

    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigurationError::invalid(
            field,
            format!("`{raw}` is not a boolean (expected true or false)"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_absent_and_blank() {
        assert!(matches!(
            required("auth.clientId", None),
            Err(ConfigurationError::Missing {
                field: "auth.clientId",
                ..
            })
        ));
        assert!(matches!(
            required("auth.clientId", Some("   ".to_string())),
            Err(ConfigurationError::Missing { .. })
        ));
        assert_eq!(
            required("auth.clientId", Some(" padded ".to_string())).unwrap(),
            " padded "
        );
    }

    #[test]
    fn absolute_url_accepts_loopback_with_port() {
        let url = absolute_url("apiBaseUrl", "http://127.0.0.1:5000").unwrap();
        assert_eq!(url.port(), Some(5000));
    }

    #[test]
    fn absolute_url_rejects_garbage() {
        let err = absolute_url("auth.callbackUrl", "not a url").unwrap_err();
        assert_eq!(err.field(), Some("auth.callbackUrl"));
    }

    #[test]
    fn absolute_url_rejects_relative_and_other_schemes() {
        assert!(absolute_url("apiBaseUrl", "/drinks").is_err());
        assert!(absolute_url("apiBaseUrl", "localhost:5000").is_err());
        assert!(absolute_url("apiBaseUrl", "ftp://example.com").is_err());
        assert!(absolute_url("apiBaseUrl", "mailto:ops@example.com").is_err());
        assert!(absolute_url("apiBaseUrl", "https://api.example.com/v1").is_ok());
    }

    #[test]
    fn hostname_fragment_rules() {
        assert!(hostname_fragment("auth.domain", "zyadabanmi.us").is_ok());
        assert!(hostname_fragment("auth.domain", "tenant").is_ok());
        assert!(hostname_fragment("auth.domain", "my-tenant.eu").is_ok());

        for bad in [
            "https://tenant.us",
            "tenant.us:443",
            "tenant.us/path",
            "ten ant",
            "under_score",
            "-tenant",
            "tenant-",
            "tenant..us",
            ".tenant",
        ] {
            assert!(hostname_fragment("auth.domain", bad).is_err(), "{bad} accepted");
        }

        let long_label = "a".repeat(64);
        assert!(hostname_fragment("auth.domain", &long_label).is_err());
        let long_name = vec!["abc"; 64].join(".");
        assert!(hostname_fragment("auth.domain", &long_name).is_err());
    }

    #[test]
    fn flag_parsing() {
        assert!(!flag("isProduction", None).unwrap());
        assert!(!flag("isProduction", Some("")).unwrap());
        assert!(flag("isProduction", Some("true")).unwrap());
        assert!(flag("isProduction", Some(" TRUE ")).unwrap());
        assert!(flag("isProduction", Some("1")).unwrap());
        assert!(flag("isProduction", Some("yes")).unwrap());
        assert!(!flag("isProduction", Some("False")).unwrap());
        assert!(!flag("isProduction", Some("0")).unwrap());
        assert!(!flag("isProduction", Some("no")).unwrap());
        assert!(flag("isProduction", Some("maybe")).is_err());
    }
}
