// ABOUTME: Error taxonomy for the OAuth manager and the vehicle telemetry client
// ABOUTME: Covers configuration, authorization, per-facet telemetry, transport and input failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

use crate::models::Facet;
use thiserror::Error;

/// Errors raised while talking to the connected-car provider.
///
/// None of these are retried; a failed upstream call is reported once.
#[derive(Debug, Clone, Error)]
pub enum ConnectedCarError {
    /// Client credentials are absent; the operation was not attempted
    #[error("Smartcar is not configured: missing {}", missing.join(", "))]
    Configuration {
        /// Names of the absent settings
        missing: Vec<String>,
    },

    /// A configured endpoint URL cannot be parsed
    #[error("Invalid Smartcar endpoint URL '{url}': {reason}")]
    InvalidEndpoint {
        /// Offending URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// Upstream rejected a code or refresh-token exchange
    #[error("Authorization failed: {message}")]
    Authorization {
        /// Upstream HTTP status, when a response was received
        status: Option<u16>,
        /// Upstream-provided message
        message: String,
    },

    /// Upstream rejected or could not serve one telemetry facet
    #[error("Failed to fetch {}: {message}", facet.description())]
    Telemetry {
        /// Facet that failed
        facet: Facet,
        /// Upstream HTTP status, when a response was received
        status: Option<u16>,
        /// Upstream-provided message
        message: String,
    },

    /// A request not tied to a facet failed upstream or in transit
    #[error("Smartcar request failed: {message}")]
    Upstream {
        /// Upstream HTTP status; `None` when no response was received
        status: Option<u16>,
        /// Upstream-provided or transport message
        message: String,
    },

    /// Malformed input detected before any upstream call
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending input
        field: &'static str,
        /// Why the input was rejected
        reason: String,
    },
}

impl ConnectedCarError {
    /// Structural error for a rejected vehicle identifier
    pub fn invalid_vehicle_id(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: "vehicle_id",
            reason: reason.into(),
        }
    }

    /// Whether this error was detected locally, before any upstream call
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::Configuration { .. } | Self::InvalidEndpoint { .. }
        )
    }

    /// Facet this error belongs to, if any
    #[must_use]
    pub const fn facet(&self) -> Option<Facet> {
        match self {
            Self::Telemetry { facet, .. } => Some(*facet),
            _ => None,
        }
    }
}

#[cfg(feature = "provider-errors")]
impl From<reqwest::Error> for ConnectedCarError {
    fn from(error: reqwest::Error) -> Self {
        Self::Upstream {
            status: error.status().map(|status| status.as_u16()),
            message: error.to_string(),
        }
    }
}

/// Result type for connected-car operations
pub type ConnectedCarResult<T> = Result<T, ConnectedCarError>;

/// Extract the most useful message from an upstream error response body.
///
/// Smartcar error bodies carry `description`; OAuth errors carry
/// `error_description`/`error`. Falls back to the raw body, then `fallback`.
#[must_use]
pub fn upstream_message(body: &str, fallback: &str) -> String {
    const FIELDS: [&str; 4] = ["description", "message", "error_description", "error"];

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = FIELDS
            .iter()
            .filter_map(|field| map.get(*field).and_then(serde_json::Value::as_str))
            .find(|message| !message.trim().is_empty())
        {
            return message.to_owned();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_owned()
    } else {
        trimmed.to_owned()
    }
}
