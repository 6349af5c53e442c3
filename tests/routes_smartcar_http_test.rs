// ABOUTME: HTTP integration tests for Smartcar OAuth and vehicle telemetry routes
// ABOUTME: Drives the axum router against a simulated Smartcar upstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! HTTP integration tests for the Smartcar routes
//!
//! Every test builds the full router, so request-id and tracing layers are
//! exercised along with the handlers.

mod helpers;

use autologic_server::config::{ServerConfig, SmartcarOAuthConfig};
use autologic_server::models::Facet;
use autologic_server::resources::ServerResources;
use autologic_server::routes;
use helpers::axum_test::AxumTestRequest;
use helpers::smartcar_mock::{self, ACCESS_TOKEN};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_with(smartcar: SmartcarOAuthConfig) -> axum::Router {
    let config = ServerConfig {
        smartcar,
        frontend_url: "http://frontend.test".into(),
        ..ServerConfig::default()
    };
    routes::router(Arc::new(ServerResources::new(config)))
}

fn app(server: &MockServer) -> axum::Router {
    app_with(smartcar_mock::oauth_config(server))
}

async fn mount_token_endpoint(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Health and status
// ============================================================================

#[tokio::test]
async fn test_health_is_served_with_request_id() {
    let server = MockServer::start().await;
    let response = AxumTestRequest::get("/health").send(app(&server)).await;

    assert_eq!(response.status(), 200);
    assert!(response.header("x-request-id").is_some());
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = MockServer::start().await;
    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "req-42")
        .send(app(&server))
        .await;
    assert_eq!(response.header("x-request-id").as_deref(), Some("req-42"));
}

#[tokio::test]
async fn test_status_configured() {
    let server = MockServer::start().await;
    let response = AxumTestRequest::get("/api/smartcar/status")
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["configured"], true);
    assert_eq!(body["mode"], "test");
    assert_eq!(body["redirect_uri"], smartcar_mock::REDIRECT_URI);
    assert!(body.get("missing").is_none());
}

#[tokio::test]
async fn test_status_not_configured() {
    let response = AxumTestRequest::get("/api/smartcar/status")
        .send(app_with(SmartcarOAuthConfig::default()))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["configured"], false);
    assert_eq!(
        body["missing"],
        json!([
            "SMARTCAR_CLIENT_ID",
            "SMARTCAR_CLIENT_SECRET",
            "SMARTCAR_REDIRECT_URI"
        ])
    );
}

// ============================================================================
// Authorization flow
// ============================================================================

#[tokio::test]
async fn test_auth_url_endpoint() {
    let server = MockServer::start().await;
    let response = AxumTestRequest::get("/api/smartcar/auth?state=abc")
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    let auth_url = body["auth_url"].as_str().unwrap();
    assert!(auth_url.contains("client_id=client-123"));
    assert!(auth_url.contains("state=abc"));
}

#[tokio::test]
async fn test_auth_url_without_credentials_is_config_error() {
    let response = AxumTestRequest::get("/api/smartcar/auth")
        .send(app_with(SmartcarOAuthConfig::default()))
        .await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFIG_MISSING");
    assert_eq!(body["error"]["details"]["missing"][0], "SMARTCAR_CLIENT_ID");
}

#[tokio::test]
async fn test_exchange_endpoint_returns_token_pair() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 200, smartcar_mock::token_body("a1", "r1", 3600)).await;

    let response = AxumTestRequest::post("/api/smartcar/exchange?code=abc")
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["access_token"], "a1");
    assert_eq!(body["refresh_token"], "r1");
    assert_eq!(body["expires_in"], 3600);
    let expires_at = body["expires_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(expires_at).is_ok());
}

#[tokio::test]
async fn test_exchange_endpoint_rejection() {
    let server = MockServer::start().await;
    mount_token_endpoint(
        &server,
        400,
        json!({ "error": "invalid_grant", "error_description": "Code expired" }),
    )
    .await;

    let response = AxumTestRequest::post("/api/smartcar/exchange?code=stale")
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "EXTERNAL_AUTH_FAILED");
    assert_eq!(body["error"]["message"], "Authorization failed: Code expired");
}

#[tokio::test]
async fn test_exchange_endpoint_requires_code() {
    let server = MockServer::start().await;
    let response = AxumTestRequest::post("/api/smartcar/exchange")
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_refresh_endpoint() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 200, smartcar_mock::token_body("a2", "r2", 7200)).await;

    let response = AxumTestRequest::post("/api/smartcar/refresh?refresh_token=r1")
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["refresh_token"], "r2");
    assert_eq!(body["expires_in"], 7200);
}

#[tokio::test]
async fn test_callback_success_redirects_to_frontend() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 200, smartcar_mock::token_body("a", "r", 3600)).await;

    let response = AxumTestRequest::get("/api/smartcar/callback?code=abc&state=xyz")
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 303);
    assert_eq!(
        response.header("location").as_deref(),
        Some("http://frontend.test/connected?success=true")
    );
}

#[tokio::test]
async fn test_callback_failure_redirects_with_error() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 400, json!({ "error_description": "Code expired" })).await;

    let response = AxumTestRequest::get("/api/smartcar/callback?code=stale")
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 303);
    let location = response.header("location").unwrap();
    assert!(location.starts_with("http://frontend.test/connected?error="));
    assert!(location.contains("Code+expired"));
}

#[tokio::test]
async fn test_callback_denied_access_skips_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = AxumTestRequest::get(
        "/api/smartcar/callback?error=access_denied&error_description=User%20denied",
    )
    .send(app(&server))
    .await;

    assert_eq!(response.status(), 303);
    assert_eq!(
        response.header("location").as_deref(),
        Some("http://frontend.test/connected?error=User+denied")
    );
}

// ============================================================================
// Vehicle endpoints
// ============================================================================

#[tokio::test]
async fn test_vehicle_endpoints_require_token() {
    let server = MockServer::start().await;
    let response = AxumTestRequest::get("/api/smartcar/vehicles/v1/odometer")
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 400);
    let request_id = response.header("x-request-id").unwrap();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert_eq!(body["error"]["request_id"], request_id.as_str());
}

#[tokio::test]
async fn test_encoded_dot_segment_vehicle_id_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = AxumTestRequest::get("/api/smartcar/vehicles/%2e%2e/all")
        .bearer(ACCESS_TOKEN)
        .header("x-request-id", "req-42")
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["request_id"], "req-42");
}

#[tokio::test]
async fn test_list_vehicles_with_query_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "vehicles": ["v1"] })))
        .expect(1)
        .mount(&server)
        .await;

    let response = AxumTestRequest::get(&format!(
        "/api/smartcar/vehicles?access_token={ACCESS_TOKEN}"
    ))
    .send(app(&server))
    .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!({ "vehicles": ["v1"] }));
}

#[tokio::test]
async fn test_single_facet_endpoint() {
    let server = MockServer::start().await;
    smartcar_mock::mount_facet(&server, "v1", Facet::TirePressure).await;

    let response = AxumTestRequest::get("/api/smartcar/vehicles/v1/tires")
        .bearer(ACCESS_TOKEN)
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["front_left"], 219.3);
    assert_eq!(body["timestamp"], smartcar_mock::DATA_AGE);
}

#[tokio::test]
async fn test_single_facet_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    smartcar_mock::mount_facet_error(
        &server,
        "v1",
        Facet::Battery,
        409,
        smartcar_mock::not_capable_body(),
    )
    .await;

    let response = AxumTestRequest::get("/api/smartcar/vehicles/v1/battery")
        .bearer(ACCESS_TOKEN)
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 502);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_ERROR");
    assert_eq!(body["error"]["details"]["facet"], "battery");
    assert_eq!(body["error"]["details"]["upstream_status"], 409);
}

#[tokio::test]
async fn test_all_endpoint_isolates_failures() {
    let server = MockServer::start().await;
    smartcar_mock::mount_vehicle(&server, "v1", &[Facet::Fuel]).await;

    let response = AxumTestRequest::get("/api/smartcar/vehicles/v1/all")
        .bearer(ACCESS_TOKEN)
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body.as_object().unwrap().len(), 8);
    assert!(body["fuel"]["error"].is_string());
    assert_eq!(body["odometer"]["distance"], 32_418.2);
    assert_eq!(body["info"]["vin"], "5YJ3E1EA7LF000001");
}

#[tokio::test]
async fn test_security_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/vehicles/v1/security"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isLocked": true })))
        .expect(1)
        .mount(&server)
        .await;

    let response = AxumTestRequest::get("/api/smartcar/vehicles/v1/security")
        .bearer(ACCESS_TOKEN)
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["isLocked"], true);
}

#[tokio::test]
async fn test_unknown_vehicle_resource_is_not_found() {
    let server = MockServer::start().await;
    let response = AxumTestRequest::get("/api/smartcar/vehicles/v1/doors")
        .bearer(ACCESS_TOKEN)
        .send(app(&server))
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}
