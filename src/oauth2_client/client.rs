// ABOUTME: OAuth2 client for the Smartcar authorization-code flow
// ABOUTME: Builds consent URLs, exchanges authorization codes, and rotates refresh tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

use crate::config::SmartcarOAuthConfig;
use crate::utils::http_client::oauth_client;
use autologic_core::constants::{oauth, smartcar};
use autologic_core::errors::{upstream_message, ConnectedCarError, ConnectedCarResult};
use autologic_core::models::TokenPair;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

/// Credentials resolved from a fully populated configuration
struct Credentials<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
}

/// OAuth 2.0 client for the connected-car provider.
///
/// Stateless between calls: no token is stored, and nothing is retried.
#[derive(Debug, Clone)]
pub struct SmartcarOAuthClient {
    config: SmartcarOAuthConfig,
    client: reqwest::Client,
}

impl SmartcarOAuthClient {
    /// Create a new client with the given configuration
    #[must_use]
    pub fn new(config: SmartcarOAuthConfig) -> Self {
        Self {
            config,
            client: oauth_client(),
        }
    }

    /// Use a caller-supplied HTTP client
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Get the OAuth configuration
    #[must_use]
    pub const fn config(&self) -> &SmartcarOAuthConfig {
        &self.config
    }

    fn credentials(&self) -> ConnectedCarResult<Credentials<'_>> {
        match (
            self.config.client_id.as_deref(),
            self.config.client_secret.as_deref(),
            self.config.redirect_uri.as_deref(),
        ) {
            (Some(client_id), Some(client_secret), Some(redirect_uri))
                if self.config.is_configured() =>
            {
                Ok(Credentials {
                    client_id,
                    client_secret,
                    redirect_uri,
                })
            }
            _ => Err(ConnectedCarError::Configuration {
                missing: self.config.missing_fields(),
            }),
        }
    }

    /// Get authorization URL
    ///
    /// Encodes the client ID, redirect URI, full scope set and mode, plus
    /// `state` when supplied.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if credentials are absent or the
    /// authorization URL is malformed
    pub fn get_authorization_url(&self, state: Option<&str>) -> ConnectedCarResult<String> {
        let credentials = self.credentials()?;
        let mut url =
            Url::parse(&self.config.auth_url).map_err(|e| ConnectedCarError::InvalidEndpoint {
                url: self.config.auth_url.clone(),
                reason: e.to_string(),
            })?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("response_type", oauth::RESPONSE_TYPE_CODE)
                .append_pair("client_id", credentials.client_id)
                .append_pair("redirect_uri", credentials.redirect_uri)
                .append_pair("scope", &self.config.scopes.join(" "))
                .append_pair("mode", self.config.mode.as_str());

            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }

        debug!(
            provider = smartcar::PROVIDER_NAME,
            has_state = state.is_some(),
            "Built authorization URL"
        );
        Ok(url.into())
    }

    /// Exchange authorization code for tokens
    ///
    /// # Errors
    ///
    /// Returns a configuration error if credentials are absent, an input error
    /// for an empty code, or an authorization error if upstream rejects it
    pub async fn exchange_code(&self, code: &str) -> ConnectedCarResult<TokenPair> {
        let credentials = self.credentials()?;
        let code = non_empty("code", code)?;

        let params = [
            ("grant_type", oauth::GRANT_AUTHORIZATION_CODE),
            ("code", code),
            ("redirect_uri", credentials.redirect_uri),
        ];

        let pair = self.request_token(&credentials, &params).await?;
        info!(
            provider = smartcar::PROVIDER_NAME,
            expires_in = pair.expires_in,
            "Exchanged authorization code for tokens"
        );
        Ok(pair)
    }

    /// Refresh an expired access token
    ///
    /// Returns whatever refresh token upstream issues, which may be rotated.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if credentials are absent, an input error
    /// for an empty token, or an authorization error if upstream rejects it
    pub async fn refresh_token(&self, refresh_token: &str) -> ConnectedCarResult<TokenPair> {
        let credentials = self.credentials()?;
        let refresh_token = non_empty("refresh_token", refresh_token)?;

        let params = [
            ("grant_type", oauth::GRANT_REFRESH_TOKEN),
            ("refresh_token", refresh_token),
        ];

        let pair = self.request_token(&credentials, &params).await?;
        info!(
            provider = smartcar::PROVIDER_NAME,
            expires_in = pair.expires_in,
            "Refreshed access token"
        );
        Ok(pair)
    }

    async fn request_token(
        &self,
        credentials: &Credentials<'_>,
        params: &[(&str, &str)],
    ) -> ConnectedCarResult<TokenPair> {
        let response = self
            .client
            .post(&self.config.token_url)
            .basic_auth(credentials.client_id, Some(credentials.client_secret))
            .form(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = upstream_message(&body, &status.to_string());
            warn!(
                provider = smartcar::PROVIDER_NAME,
                status = status.as_u16(),
                message = %message,
                "Token request rejected"
            );
            return Err(ConnectedCarError::Authorization {
                status: Some(status.as_u16()),
                message,
            });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| ConnectedCarError::Authorization {
                status: Some(status.as_u16()),
                message: format!("Invalid token response: {e}"),
            })?;

        Ok(Self::token_from_response(token))
    }

    fn token_from_response(response: TokenResponse) -> TokenPair {
        TokenPair::issued_at(
            response.access_token,
            response.refresh_token,
            response.expires_in,
            Utc::now(),
        )
    }
}

fn non_empty<'a>(field: &'static str, value: &'a str) -> ConnectedCarResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConnectedCarError::InvalidInput {
            field,
            reason: "must not be empty".into(),
        });
    }
    Ok(trimmed)
}

/// OAuth 2.0 token response from the provider
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    /// Token lifetime in seconds
    expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SmartcarMode;
    use std::collections::HashMap;

    fn client() -> SmartcarOAuthClient {
        SmartcarOAuthClient::new(SmartcarOAuthConfig::new(
            "client-123",
            "secret-456",
            "http://localhost:8000/api/smartcar/callback",
            SmartcarMode::Test,
        ))
    }

    fn query_of(url: &str) -> HashMap<String, String> {
        Url::parse(url).unwrap().query_pairs().into_owned().collect()
    }

    #[test]
    fn test_authorization_url_parameters() {
        let url = client().get_authorization_url(Some("xyz")).unwrap();
        assert!(url.starts_with(smartcar::AUTH_URL));

        let query = query_of(&url);
        assert_eq!(query["response_type"], "code");
        assert_eq!(query["client_id"], "client-123");
        assert_eq!(
            query["redirect_uri"],
            "http://localhost:8000/api/smartcar/callback"
        );
        assert_eq!(query["mode"], "test");
        assert_eq!(query["state"], "xyz");
        assert_eq!(query["scope"], smartcar::SCOPES.join(" "));
    }

    #[test]
    fn test_authorization_url_without_state() {
        let url = client().get_authorization_url(None).unwrap();
        assert!(!query_of(&url).contains_key("state"));
    }

    #[test]
    fn test_authorization_url_is_deterministic() {
        let client = client();
        assert_eq!(
            client.get_authorization_url(Some("s")).unwrap(),
            client.get_authorization_url(Some("s")).unwrap()
        );
    }

    #[test]
    fn test_authorization_url_requires_credentials() {
        let client = SmartcarOAuthClient::new(SmartcarOAuthConfig::default());
        let error = client.get_authorization_url(None).unwrap_err();
        assert!(matches!(error, ConnectedCarError::Configuration { .. }));
    }

    #[test]
    fn test_invalid_auth_url_is_reported() {
        let mut config = client().config().clone();
        config.auth_url = "not a url".into();
        let error = SmartcarOAuthClient::new(config)
            .get_authorization_url(None)
            .unwrap_err();
        assert!(matches!(error, ConnectedCarError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            non_empty("code", "  "),
            Err(ConnectedCarError::InvalidInput { field: "code", .. })
        ));
        assert_eq!(non_empty("code", " abc ").unwrap(), "abc");
    }
}
