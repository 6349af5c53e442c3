// ABOUTME: Application constants for upstream endpoints, OAuth scopes, and configuration keys
// ABOUTME: Single source of truth for Smartcar URLs, facet keys, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

//! Constants organized by domain

/// Smartcar connected-car API endpoints and protocol values
pub mod smartcar {
    /// Provider name used in logs and error messages
    pub const PROVIDER_NAME: &str = "smartcar";

    /// OAuth authorization (consent) page
    pub const AUTH_URL: &str = "https://connect.smartcar.com/oauth/authorize";

    /// OAuth token endpoint for code exchange and refresh
    pub const TOKEN_URL: &str = "https://auth.smartcar.com/oauth/token";

    /// Vehicle API base URL
    pub const API_BASE_URL: &str = "https://api.smartcar.com/v2.0";

    /// Response header carrying the age of the returned data
    pub const DATA_AGE_HEADER: &str = "sc-data-age";

    /// Request header selecting metric or imperial units
    pub const UNIT_SYSTEM_HEADER: &str = "sc-unit-system";

    /// Capabilities requested for every issued token, in request order.
    ///
    /// Covers every facet the telemetry client can fetch plus VIN and security.
    pub const SCOPES: &[&str] = &[
        "required:read_vehicle_info",
        "required:read_odometer",
        "read_location",
        "read_tires",
        "read_engine_oil",
        "read_battery",
        "read_charge",
        "read_fuel",
        "read_engine",
        "control_security",
        "read_vin",
    ];
}

/// OAuth grant and parameter names
pub mod oauth {
    /// Grant type for authorization code exchange
    pub const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";

    /// Grant type for refresh token rotation
    pub const GRANT_REFRESH_TOKEN: &str = "refresh_token";

    /// Response type requested on the authorization URL
    pub const RESPONSE_TYPE_CODE: &str = "code";

    /// Tokens expiring within this many seconds count as "expiring soon"
    pub const EXPIRY_MARGIN_SECONDS: i64 = 300;
}

/// Environment variable names
pub mod env_config {
    /// OAuth client identifier
    pub const SMARTCAR_CLIENT_ID: &str = "SMARTCAR_CLIENT_ID";
    /// OAuth client secret
    pub const SMARTCAR_CLIENT_SECRET: &str = "SMARTCAR_CLIENT_SECRET";
    /// OAuth redirect URI registered with the provider
    pub const SMARTCAR_REDIRECT_URI: &str = "SMARTCAR_REDIRECT_URI";
    /// Operating mode (`test` or `live`)
    pub const SMARTCAR_MODE: &str = "SMARTCAR_MODE";
    /// Legacy boolean operating mode flag
    pub const SMARTCAR_TEST_MODE: &str = "SMARTCAR_TEST_MODE";
    /// Authorization URL override
    pub const SMARTCAR_AUTH_URL: &str = "SMARTCAR_AUTH_URL";
    /// Token URL override
    pub const SMARTCAR_TOKEN_URL: &str = "SMARTCAR_TOKEN_URL";
    /// Vehicle API base URL override
    pub const SMARTCAR_API_BASE_URL: &str = "SMARTCAR_API_BASE_URL";
    /// Unit system for telemetry values (`metric` or `imperial`)
    pub const SMARTCAR_UNIT_SYSTEM: &str = "SMARTCAR_UNIT_SYSTEM";
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Frontend base URL used for OAuth callback redirects
    pub const FRONTEND_URL: &str = "FRONTEND_URL";
    /// Upstream request timeout in seconds
    pub const HTTP_CLIENT_TIMEOUT_SECS: &str = "HTTP_CLIENT_TIMEOUT_SECS";
    /// Upstream connect timeout in seconds
    pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: &str = "HTTP_CLIENT_CONNECT_TIMEOUT_SECS";
}

/// Defaults applied when configuration is absent
pub mod defaults {
    /// Default HTTP listen port
    pub const HTTP_PORT: u16 = 8000;
    /// Default frontend URL
    pub const FRONTEND_URL: &str = "http://localhost:3000";
    /// Default upstream request timeout
    pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;
    /// Default upstream connect timeout
    pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Service identification for logs
pub mod service_names {
    /// Name of the HTTP service
    pub const AUTOLOGIC_SERVER: &str = "autologic-server";
}
