// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains the shared upstream HTTP client configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

/// HTTP client configuration and helpers
pub mod http_client;
