// ABOUTME: Shared HTTP client utilities with connection pooling and timeout configuration
// ABOUTME: Singleton client for vehicle API calls plus a short-timeout client for OAuth exchanges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

use autologic_core::constants::defaults;
use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;

/// Configured timeout values for the shared client
static CLIENT_TIMEOUTS: OnceLock<(u64, u64)> = OnceLock::new();

/// Global shared HTTP client with configured timeouts
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Initialize the shared HTTP client timeout configuration
///
/// Must be called once at server startup before the first upstream request.
/// If not called, defaults are used (30s timeout, 10s connect timeout).
pub fn initialize_shared_client(timeout_secs: u64, connect_timeout_secs: u64) {
    let _ = CLIENT_TIMEOUTS.set((timeout_secs, connect_timeout_secs));
}

/// Get the shared HTTP client for vehicle API calls
///
/// This client uses connection pooling; cloning it is cheap and shares the pool.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let (timeout, connect_timeout) = CLIENT_TIMEOUTS.get().copied().unwrap_or((
            defaults::HTTP_CLIENT_TIMEOUT_SECS,
            defaults::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
        ));
        create_client_with_timeout(timeout, connect_timeout)
    })
}

/// Create a new HTTP client with custom timeout settings
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Create a new HTTP client optimized for OAuth flows
///
/// Token exchanges should be fast, so this client uses shorter timeouts.
#[must_use]
pub fn oauth_client() -> Client {
    create_client_with_timeout(15, 5)
}
