// ABOUTME: Main library entry point for the Autologic connected-car API
// ABOUTME: Provides Smartcar OAuth brokering and fault-tolerant vehicle telemetry aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

#![deny(unsafe_code)]

//! # Autologic Server
//!
//! Backend for connecting vehicles through Smartcar and reading their
//! telemetry.
//!
//! ## Architecture
//!
//! - **`OAuth2` client**: consent URL, authorization-code exchange and
//!   refresh-token rotation against the Smartcar token endpoint
//! - **Providers**: the vehicle telemetry client, one instance per access
//!   token, with single-facet fetches and a complete-status aggregate that
//!   records per-facet failures inline
//! - **Config**: environment-driven server and credential configuration
//! - **Routes**: thin axum handlers over the two clients
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use autologic_server::config::environment::ServerConfig;
//! use autologic_server::providers::VehicleTelemetryClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let client = VehicleTelemetryClient::new("access-token")
//!         .with_base_url(config.smartcar.api_base_url.as_str());
//!
//!     let status = client.complete_status("vehicle-id").await?;
//!     println!("failed facets: {:?}", status.failed_facets());
//!     Ok(())
//! }
//! ```

/// Server and Smartcar credential configuration
pub mod config;

/// Production-ready logging configuration with structured output
pub mod logging;

/// `OAuth2` client for the Smartcar authorization-code flow
pub mod oauth2_client;

/// Connected-car provider integrations
pub mod providers;

/// Shared resources handed to route handlers
pub mod resources;

/// HTTP routes
pub mod routes;

/// Utility functions and helpers
pub mod utils;

pub use autologic_core::{constants, errors, models};
