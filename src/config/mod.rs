// ABOUTME: Configuration management module for centralized server settings and parameters
// ABOUTME: Handles environment configs and Smartcar OAuth application credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

//! Configuration module for the Autologic server
//!
//! - **Environment**: Server configuration from environment variables
//! - **OAuth**: Smartcar client credentials, mode, and endpoint overrides

/// Environment and server configuration
pub mod environment;
/// Smartcar OAuth application configuration
pub mod oauth;

pub use environment::{HttpClientConfig, ServerConfig};
pub use oauth::{default_scopes, ConfigurationStatus, SmartcarMode, SmartcarOAuthConfig};
