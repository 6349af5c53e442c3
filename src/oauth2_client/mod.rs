// ABOUTME: OAuth 2.0 client implementation for connecting to the connected-car provider
// ABOUTME: Provides the authorization-code flow and refresh-token rotation for Smartcar
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

//! # OAuth 2.0 Client Module
//!
//! Autologic acts as an OAuth 2.0 client of Smartcar on behalf of vehicle
//! owners. This module handles:
//! - Building the consent URL with the fixed scope set
//! - Exchanging authorization codes for token pairs
//! - Rotating refresh tokens

/// Core OAuth 2.0 client implementation
pub mod client;

pub use client::SmartcarOAuthClient;
