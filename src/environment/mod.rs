// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Front-end Environment
//!
//! The validated environment handed to the front-end: where the backend API
//! lives and how to reach the identity provider.
//!
//! ## Persisted Shape
//!
//! ```json
//! {
//!   "isProduction": false,
//!   "apiBaseUrl": "http://127.0.0.1:5000",
//!   "auth": {
//!     "domain": "tenant.us",
//!     "audience": "coffee-shop",
//!     "clientId": "abc123",
//!     "callbackUrl": "http://localhost:8100"
//!   }
//! }
//! ```
//!
//! ## Invariants
//!
//! - Every string is non-blank
//! - `apiBaseUrl` and `auth.callbackUrl` are absolute http(s) URLs
//! - `auth.domain` is a hostname fragment
//! - Values are stored exactly as supplied and never change after construction

pub mod source;
pub mod validate;

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::config::IDENTITY_PROVIDER_SUFFIX;
use crate::error::ConfigurationError;

/// Validated front-end environment.
///
/// Only obtainable through a validating constructor, so holding one means
/// every invariant holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    /// Deployment mode flag.
    is_production: bool,
    /// Absolute URL of the backend API.
    #[schema(example = "http://127.0.0.1:5000")]
    api_base_url: String,
    /// Identity-provider settings.
    auth: AuthSettings,
    #[serde(skip)]
    api_base: Url,
}

/// Identity-provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthSettings {
    /// Identity-provider domain prefix.
    #[schema(example = "tenant.us")]
    domain: String,
    /// Identifier of the protected API.
    #[schema(example = "coffee-shop")]
    audience: String,
    /// Public client id issued to this application.
    client_id: String,
    /// Absolute URL the provider redirects back to after login.
    #[schema(example = "http://localhost:8100")]
    callback_url: String,
    #[serde(skip)]
    callback: Url,
}

impl AuthSettings {
    pub fn new(
        domain: impl Into<String>,
        audience: impl Into<String>,
        client_id: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        RawAuth {
            domain: Some(domain.into()),
            audience: Some(audience.into()),
            client_id: Some(client_id.into()),
            callback_url: Some(callback_url.into()),
        }
        .try_into()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Parsed callback URL.
    pub fn callback(&self) -> &Url {
        &self.callback
    }

    /// Origin the front-end is served from, e.g. `http://localhost:8100`.
    pub fn callback_origin(&self) -> String {
        self.callback().origin().ascii_serialization()
    }

    /// Provider host the domain prefix expands to.
    pub fn tenant_host(&self) -> String {
        format!("{}.{IDENTITY_PROVIDER_SUFFIX}", self.domain)
    }

    /// Expected `iss` claim of tokens issued for this tenant.
    pub fn issuer_url(&self) -> String {
        format!("https://{}/", self.tenant_host())
    }

    /// Key set a token-verifying consumer fetches.
    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.tenant_host())
    }
}

impl EnvironmentConfig {
    pub fn new(
        is_production: bool,
        api_base_url: impl Into<String>,
        auth: AuthSettings,
    ) -> Result<Self, ConfigurationError> {
        let api_base_url = validate::required("apiBaseUrl", Some(api_base_url.into()))?;
        let api_base = validate::absolute_url("apiBaseUrl", &api_base_url)?;

        Ok(Self {
            is_production,
            api_base_url,
            auth,
            api_base,
        })
    }

    pub fn is_production(&self) -> bool {
        self.is_production
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn auth(&self) -> &AuthSettings {
        &self.auth
    }

    /// Parsed API base URL.
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Resolve a resource path against the API base URL.
    ///
    /// The base path is kept: `http://h/api` + `drinks` is `http://h/api/drinks`.
    /// The result never leaves the base origin or the base path.
    pub fn api_url(&self, path: &str) -> Result<Url, ResourcePathError> {
        let mut base = self.api_base.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }

        let url = base.join(path.trim_start_matches('/'))?;
        if url.origin() != base.origin() || !url.path().starts_with(base.path()) {
            return Err(ResourcePathError::OutsideBase {
                path: path.to_string(),
            });
        }
        Ok(url)
    }
}

/// A resource path that cannot be resolved under the API base URL.
#[derive(Debug, thiserror::Error)]
pub enum ResourcePathError {
    #[error("invalid resource path: {0}")]
    Parse(#[from] url::ParseError),

    #[error("resource path `{path}` resolves outside the API base URL")]
    OutsideBase { path: String },
}

/// Unvalidated mirror of the persisted shape.
///
/// Every field is optional so a missing key reports as
/// [`ConfigurationError::Missing`] instead of a serde error. Unknown keys
/// are rejected so a misspelled flag cannot silently fall back to its default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawEnvironment {
    #[serde(default)]
    pub is_production: Option<bool>,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub auth: Option<RawAuth>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawAuth {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub callback_url: Option<String>,
}

impl TryFrom<RawAuth> for AuthSettings {
    type Error = ConfigurationError;

    fn try_from(raw: RawAuth) -> Result<Self, Self::Error> {
        let domain = validate::required("auth.domain", raw.domain)?;
        validate::hostname_fragment("auth.domain", &domain)?;
        let audience = validate::required("auth.audience", raw.audience)?;
        let client_id = validate::required("auth.clientId", raw.client_id)?;
        let callback_url = validate::required("auth.callbackUrl", raw.callback_url)?;
        let callback = validate::absolute_url("auth.callbackUrl", &callback_url)?;

        Ok(Self {
            domain,
            audience,
            client_id,
            callback_url,
            callback,
        })
    }
}

impl TryFrom<RawEnvironment> for EnvironmentConfig {
    type Error = ConfigurationError;

    fn try_from(raw: RawEnvironment) -> Result<Self, Self::Error> {
        let is_production = raw.is_production.unwrap_or(false);
        let api_base_url = validate::required("apiBaseUrl", raw.api_base_url)?;
        let api_base = validate::absolute_url("apiBaseUrl", &api_base_url)?;
        let auth = AuthSettings::try_from(raw.auth.unwrap_or_default())?;

        Ok(Self {
            is_production,
            api_base_url,
            auth,
            api_base,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_auth() -> AuthSettings {
        AuthSettings::new(
            "zyadabanmi.us",
            "coffee-shop",
            "2lvouK5ZLZr70EbL32RKPQO6GFyoJbl4",
            "http://localhost:8100",
        )
        .unwrap()
    }

    pub(crate) fn sample() -> EnvironmentConfig {
        EnvironmentConfig::new(false, "http://127.0.0.1:5000", sample_auth()).unwrap()
    }

    #[test]
    fn literal_construction_keeps_values_verbatim() {
        let env = sample();
        assert!(!env.is_production());
        assert_eq!(env.api_base_url(), "http://127.0.0.1:5000");
        assert_eq!(env.auth().domain(), "zyadabanmi.us");
        assert_eq!(env.auth().audience(), "coffee-shop");
        assert_eq!(env.auth().client_id(), "2lvouK5ZLZr70EbL32RKPQO6GFyoJbl4");
        assert_eq!(env.auth().callback_url(), "http://localhost:8100");
    }

    #[test]
    fn production_flag_touches_nothing_else() {
        let prod = EnvironmentConfig::new(true, "http://127.0.0.1:5000", sample_auth()).unwrap();
        let dev = sample();
        assert!(prod.is_production());
        assert_eq!(prod.api_base_url(), dev.api_base_url());
        assert_eq!(prod.auth(), dev.auth());
    }

    #[test]
    fn invalid_callback_is_rejected() {
        let err = AuthSettings::new("tenant.us", "api", "client", "not a url").unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::Invalid {
                field: "auth.callbackUrl",
                ..
            }
        ));
    }

    #[test]
    fn blank_client_id_is_missing() {
        let err = AuthSettings::new("tenant.us", "api", "", "http://localhost:8100").unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::Missing {
                field: "auth.clientId",
                ..
            }
        ));
    }

    #[test]
    fn invalid_api_base_url_is_rejected() {
        let err = EnvironmentConfig::new(false, "127.0.0.1:5000", sample_auth()).unwrap_err();
        assert_eq!(err.field(), Some("apiBaseUrl"));
    }

    #[test]
    fn serializes_to_persisted_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "isProduction": false,
                "apiBaseUrl": "http://127.0.0.1:5000",
                "auth": {
                    "domain": "zyadabanmi.us",
                    "audience": "coffee-shop",
                    "clientId": "2lvouK5ZLZr70EbL32RKPQO6GFyoJbl4",
                    "callbackUrl": "http://localhost:8100"
                }
            })
        );
    }

    #[test]
    fn first_failing_field_is_reported() {
        let raw = RawEnvironment {
            is_production: None,
            api_base_url: None,
            auth: None,
        };
        let err = EnvironmentConfig::try_from(raw).unwrap_err();
        assert_eq!(err.field(), Some("apiBaseUrl"));

        let raw = RawEnvironment {
            api_base_url: Some("http://127.0.0.1:5000".to_string()),
            ..Default::default()
        };
        let err = EnvironmentConfig::try_from(raw).unwrap_err();
        assert_eq!(err.field(), Some("auth.domain"));
    }

    #[test]
    fn api_url_joins_resource_paths() {
        let env = sample();
        assert_eq!(
            env.api_url("drinks").unwrap().as_str(),
            "http://127.0.0.1:5000/drinks"
        );
        assert_eq!(
            env.api_url("/drinks-detail").unwrap().as_str(),
            "http://127.0.0.1:5000/drinks-detail"
        );

        let nested =
            EnvironmentConfig::new(false, "https://shop.example.com/api", sample_auth()).unwrap();
        assert_eq!(
            nested.api_url("drinks/1").unwrap().as_str(),
            "https://shop.example.com/api/drinks/1"
        );
        let trailing =
            EnvironmentConfig::new(false, "https://shop.example.com/api/", sample_auth()).unwrap();
        assert_eq!(
            trailing.api_url("drinks").unwrap().as_str(),
            "https://shop.example.com/api/drinks"
        );
    }

    #[test]
    fn api_url_stays_under_base() {
        let env =
            EnvironmentConfig::new(false, "https://shop.example.com/api", sample_auth()).unwrap();

        for escape in [
            "../admin",
            "drinks/../../admin",
            "https://evil.example/steal",
            "http://shop.example.com/api/drinks",
        ] {
            assert!(
                matches!(
                    env.api_url(escape),
                    Err(ResourcePathError::OutsideBase { .. })
                ),
                "{escape} escaped the base URL"
            );
        }

        assert_eq!(
            env.api_url("drinks/../menu").unwrap().as_str(),
            "https://shop.example.com/api/menu"
        );
    }

    #[test]
    fn derived_provider_urls() {
        let auth = sample_auth();
        assert_eq!(auth.tenant_host(), "zyadabanmi.us.auth0.com");
        assert_eq!(auth.issuer_url(), "https://zyadabanmi.us.auth0.com/");
        assert_eq!(
            auth.jwks_url(),
            "https://zyadabanmi.us.auth0.com/.well-known/jwks.json"
        );
        assert_eq!(auth.callback_origin(), "http://localhost:8100");
    }
}
