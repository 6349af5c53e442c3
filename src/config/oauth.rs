// ABOUTME: OAuth credential configuration for the Smartcar connected-car provider
// ABOUTME: Loads client credentials, operating mode, and endpoint overrides from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

use autologic_core::constants::{env_config, smartcar};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;
use std::fmt;
use tracing::{debug, info, warn};

/// Smartcar operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmartcarMode {
    /// Simulated vehicles for development
    #[default]
    Test,
    /// Real vehicles
    Live,
}

impl SmartcarMode {
    /// Value sent as the `mode` authorization parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Live => "live",
        }
    }

    /// Resolve the mode from `SMARTCAR_MODE`, falling back to the legacy
    /// `SMARTCAR_TEST_MODE` boolean, then to test mode
    fn resolve(mode: Option<&str>, legacy_test_mode: Option<&str>) -> Self {
        match mode.map(|m| m.trim().to_lowercase()).as_deref() {
            Some("live") => return Self::Live,
            Some("test") => return Self::Test,
            _ => {}
        }
        match legacy_test_mode.map(|m| m.trim().to_lowercase()).as_deref() {
            Some("false" | "0") => Self::Live,
            _ => Self::Test,
        }
    }
}

impl fmt::Display for SmartcarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credential Set and endpoints for the Smartcar OAuth application.
///
/// Absent credentials are a degraded, non-fatal state: operations that need
/// them fail individually with a configuration error.
#[derive(Clone, Serialize, Deserialize)]
pub struct SmartcarOAuthConfig {
    /// OAuth client ID
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
    /// OAuth redirect URI
    pub redirect_uri: Option<String>,
    /// Test or live vehicles
    pub mode: SmartcarMode,
    /// Authorization (consent) page URL
    pub auth_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Vehicle API base URL
    pub api_base_url: String,
    /// Capabilities requested for every token, in order
    pub scopes: Vec<String>,
}

impl fmt::Debug for SmartcarOAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartcarOAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.secret_fingerprint())
            .field("redirect_uri", &self.redirect_uri)
            .field("mode", &self.mode)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl Default for SmartcarOAuthConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            mode: SmartcarMode::default(),
            auth_url: smartcar::AUTH_URL.to_owned(),
            token_url: smartcar::TOKEN_URL.to_owned(),
            api_base_url: smartcar::API_BASE_URL.to_owned(),
            scopes: default_scopes(),
        }
    }
}

/// The fixed Scope Set requested for every issued token
#[must_use]
pub fn default_scopes() -> Vec<String> {
    smartcar::SCOPES.iter().map(|s| (*s).to_owned()).collect()
}

impl SmartcarOAuthConfig {
    /// Build a fully populated configuration pointing at the production endpoints
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        mode: SmartcarMode,
    ) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            redirect_uri: Some(redirect_uri.into()),
            mode,
            ..Self::default()
        }
    }

    /// Point all three endpoints at another host (used against sandboxes and mocks)
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.auth_url = format!("{base}/oauth/authorize");
        self.token_url = format!("{base}/oauth/token");
        self.api_base_url = format!("{base}/v2.0");
        self
    }

    /// Load OAuth configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load OAuth configuration from an arbitrary key lookup.
    ///
    /// Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            client_id: non_empty(env_config::SMARTCAR_CLIENT_ID),
            client_secret: non_empty(env_config::SMARTCAR_CLIENT_SECRET),
            redirect_uri: non_empty(env_config::SMARTCAR_REDIRECT_URI),
            mode: SmartcarMode::resolve(
                non_empty(env_config::SMARTCAR_MODE).as_deref(),
                non_empty(env_config::SMARTCAR_TEST_MODE).as_deref(),
            ),
            auth_url: non_empty(env_config::SMARTCAR_AUTH_URL)
                .unwrap_or_else(|| smartcar::AUTH_URL.to_owned()),
            token_url: non_empty(env_config::SMARTCAR_TOKEN_URL)
                .unwrap_or_else(|| smartcar::TOKEN_URL.to_owned()),
            api_base_url: non_empty(env_config::SMARTCAR_API_BASE_URL)
                .unwrap_or_else(|| smartcar::API_BASE_URL.to_owned()),
            scopes: default_scopes(),
        }
    }

    /// Environment variable names of the absent credentials, in declaration order
    #[must_use]
    pub fn missing_fields(&self) -> Vec<String> {
        let is_missing =
            |value: &Option<String>| value.as_deref().is_none_or(|v| v.trim().is_empty());

        [
            (env_config::SMARTCAR_CLIENT_ID, &self.client_id),
            (env_config::SMARTCAR_CLIENT_SECRET, &self.client_secret),
            (env_config::SMARTCAR_REDIRECT_URI, &self.redirect_uri),
        ]
        .into_iter()
        .filter(|(_, value)| is_missing(value))
        .map(|(name, _)| name.to_owned())
        .collect()
    }

    /// Whether every credential field is populated
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Compute SHA256 fingerprint of client secret for debugging (first 8 hex chars)
    /// This allows comparing secrets without logging actual values
    #[must_use]
    pub fn secret_fingerprint(&self) -> Option<String> {
        self.client_secret.as_ref().map(|secret| {
            let mut hasher = Sha256::new();
            hasher.update(secret.as_bytes());
            let result = hasher.finalize();
            format!("{result:x}").chars().take(8).collect()
        })
    }

    /// Validate credentials and log diagnostics.
    ///
    /// Never fails: an incomplete configuration is logged and left degraded.
    pub fn validate_and_log(&self) -> bool {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            warn!(
                provider = smartcar::PROVIDER_NAME,
                missing = ?missing,
                "OAuth credentials incomplete; authorization requests will be rejected"
            );
            return false;
        }

        info!(
            provider = smartcar::PROVIDER_NAME,
            client_id = self.client_id.as_deref().unwrap_or_default(),
            secret_fingerprint = self.secret_fingerprint().as_deref().unwrap_or_default(),
            mode = %self.mode,
            "OAuth credentials loaded"
        );
        debug!(
            auth_url = %self.auth_url,
            token_url = %self.token_url,
            api_base_url = %self.api_base_url,
            scopes = self.scopes.len(),
            "OAuth endpoints"
        );
        true
    }

    /// Report for the configuration status endpoint
    #[must_use]
    pub fn status(&self) -> ConfigurationStatus {
        let missing = self.missing_fields();
        if missing.is_empty() {
            ConfigurationStatus {
                configured: true,
                message: "Smartcar API is configured".into(),
                mode: self.mode,
                redirect_uri: self.redirect_uri.clone(),
                missing: Vec::new(),
            }
        } else {
            ConfigurationStatus {
                configured: false,
                message: "Smartcar API is not configured".into(),
                mode: self.mode,
                redirect_uri: None,
                missing,
            }
        }
    }
}

/// Configuration status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationStatus {
    /// Whether all credentials are present
    pub configured: bool,
    /// Human-readable summary
    pub message: String,
    /// Operating mode
    pub mode: SmartcarMode,
    /// Redirect URI, reported only when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    /// Absent environment variables, reported only when not configured
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub missing: Vec<String>,
}
