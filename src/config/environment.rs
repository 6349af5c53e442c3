// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles listen port, frontend redirect target, unit system, and upstream client timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

//! Environment-based configuration management for production deployment

use super::oauth::SmartcarOAuthConfig;
use anyhow::{Context, Result};
use autologic_core::constants::{defaults, env_config};
use autologic_core::models::UnitSystem;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::info;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Frontend base URL that receives OAuth callback redirects
    pub frontend_url: String,
    /// Unit system requested for telemetry values
    pub unit_system: UnitSystem,
    /// Upstream HTTP client settings
    pub http_client: HttpClientConfig,
    /// Smartcar OAuth application
    pub smartcar: SmartcarOAuthConfig,
}

/// Upstream HTTP client timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::HTTP_CLIENT_TIMEOUT_SECS,
            connect_timeout_secs: defaults::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            frontend_url: defaults::FRONTEND_URL.to_owned(),
            unit_system: UnitSystem::default(),
            http_client: HttpClientConfig::default(),
            smartcar: SmartcarOAuthConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            http_port: parse_or(&lookup, env_config::HTTP_PORT, defaults::HTTP_PORT)?,
            frontend_url: lookup(env_config::FRONTEND_URL)
                .filter(|v| !v.trim().is_empty())
                .map_or_else(
                    || defaults::FRONTEND_URL.to_owned(),
                    |v| v.trim_end_matches('/').to_owned(),
                ),
            unit_system: lookup(env_config::SMARTCAR_UNIT_SYSTEM)
                .map(|v| UnitSystem::from_str_or_default(&v))
                .unwrap_or_default(),
            http_client: HttpClientConfig {
                timeout_secs: parse_or(
                    &lookup,
                    env_config::HTTP_CLIENT_TIMEOUT_SECS,
                    defaults::HTTP_CLIENT_TIMEOUT_SECS,
                )?,
                connect_timeout_secs: parse_or(
                    &lookup,
                    env_config::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
                    defaults::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
                )?,
            },
            smartcar: SmartcarOAuthConfig::from_lookup(&lookup),
        };

        Ok(config)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Autologic Server Configuration:\n\
             - HTTP Port: {}\n\
             - Frontend URL: {}\n\
             - Unit System: {}\n\
             - Smartcar OAuth: {}\n\
             - Smartcar Mode: {}\n\
             - Upstream Timeout: {}s (connect {}s)",
            self.http_port,
            self.frontend_url,
            self.unit_system.as_str(),
            if self.smartcar.is_configured() {
                "Configured"
            } else {
                "Not configured"
            },
            self.smartcar.mode,
            self.http_client.timeout_secs,
            self.http_client.connect_timeout_secs,
        )
    }
}

/// Parse a variable, falling back to `default` when unset or empty
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {value}")),
        None => Ok(default),
    }
}
