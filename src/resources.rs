// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: Holds loaded configuration, the OAuth client, and the pooled upstream HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

use crate::config::ServerConfig;
use crate::oauth2_client::SmartcarOAuthClient;
use crate::providers::VehicleTelemetryClient;
use crate::utils::http_client::shared_client;
use reqwest::Client;

/// Resources shared across request handlers
#[derive(Debug, Clone)]
pub struct ServerResources {
    /// Loaded server configuration
    pub config: ServerConfig,
    /// OAuth client built from the configured credentials
    pub oauth_client: SmartcarOAuthClient,
    http_client: Client,
}

impl ServerResources {
    /// Build resources from configuration
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let oauth_client = SmartcarOAuthClient::new(config.smartcar.clone());
        Self {
            config,
            oauth_client,
            http_client: shared_client().clone(),
        }
    }

    /// Use one HTTP client for both token and vehicle requests
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.oauth_client = self.oauth_client.with_http_client(client.clone());
        self.http_client = client;
        self
    }

    /// Telemetry client for one access token, using the configured API base and units
    #[must_use]
    pub fn telemetry_client(&self, access_token: &str) -> VehicleTelemetryClient {
        VehicleTelemetryClient::new(access_token)
            .with_base_url(self.config.smartcar.api_base_url.as_str())
            .with_unit_system(self.config.unit_system)
            .with_http_client(self.http_client.clone())
    }
}
