// ABOUTME: OAuth token pair model with absolute expiry computed from the issued lifetime
// ABOUTME: Serializes access/refresh tokens, lifetime, and an ISO-8601 expiry timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

use crate::constants::oauth::EXPIRY_MARGIN_SECONDS;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access/refresh token pair returned by a code exchange or a refresh.
///
/// The pair is never persisted or renewed here; callers re-issue before expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Bearer token for vehicle API calls
    pub access_token: String,
    /// Token used to obtain the next pair (may be rotated by upstream)
    pub refresh_token: String,
    /// Lifetime of the access token in seconds
    pub expires_in: u64,
    /// Absolute expiry: issue time + `expires_in`
    pub expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Build a token pair issued at `issued_at`
    #[must_use]
    pub fn issued_at(
        access_token: String,
        refresh_token: String,
        expires_in: u64,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let lifetime = i64::try_from(expires_in).unwrap_or(i64::MAX);
        let expires_at = Duration::try_seconds(lifetime)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            access_token,
            refresh_token,
            expires_in,
            expires_at,
        }
    }

    /// Check if the access token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Check if the access token will expire within five minutes
    #[must_use]
    pub fn will_expire_soon(&self) -> bool {
        self.expires_at <= Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECONDS)
    }
}
