// ABOUTME: Simulated Smartcar upstream built on wiremock for integration tests
// ABOUTME: Mounts token endpoint and per-facet vehicle API responses, including capability failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

use autologic_server::config::{SmartcarMode, SmartcarOAuthConfig};
use autologic_server::models::Facet;
use autologic_server::providers::VehicleTelemetryClient;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "client-123";
pub const CLIENT_SECRET: &str = "secret-456";
pub const REDIRECT_URI: &str = "http://localhost:8000/api/smartcar/callback";
/// `Basic base64(client-123:secret-456)`
pub const BASIC_AUTH: &str = "Basic Y2xpZW50LTEyMzpzZWNyZXQtNDU2";
pub const ACCESS_TOKEN: &str = "access-token-abc";
pub const DATA_AGE: &str = "2025-03-01T12:00:00.000Z";

/// OAuth configuration pointing every endpoint at the mock server
pub fn oauth_config(server: &MockServer) -> SmartcarOAuthConfig {
    SmartcarOAuthConfig::new(CLIENT_ID, CLIENT_SECRET, REDIRECT_URI, SmartcarMode::Test)
        .with_base_url(&server.uri())
}

/// Vehicle API base URL on the mock server
pub fn api_base(server: &MockServer) -> String {
    format!("{}/v2.0", server.uri())
}

/// Telemetry client authenticated with [`ACCESS_TOKEN`] against the mock server
pub fn telemetry_client(server: &MockServer) -> VehicleTelemetryClient {
    VehicleTelemetryClient::new(ACCESS_TOKEN).with_base_url(api_base(server))
}

/// Upstream path suffix and success body for a facet
pub fn facet_fixture(facet: Facet, vehicle_id: &str) -> (&'static str, Value) {
    match facet {
        Facet::Info => (
            "",
            json!({ "id": vehicle_id, "make": "TESLA", "model": "Model 3", "year": 2020 }),
        ),
        Facet::Odometer => ("/odometer", json!({ "distance": 32_418.2 })),
        Facet::Location => (
            "/location",
            json!({ "latitude": 37.4292, "longitude": -122.1381 }),
        ),
        Facet::Battery => (
            "/battery",
            json!({ "percentRemaining": 0.3, "range": 40.5 }),
        ),
        Facet::Fuel => (
            "/fuel",
            json!({ "percentRemaining": 0.5, "range": 300.0, "amountRemaining": 25.0 }),
        ),
        Facet::TirePressure => (
            "/tires/pressure",
            json!({
                "frontLeft": 219.3,
                "frontRight": 219.4,
                "backLeft": 210.0,
                "backRight": 210.1
            }),
        ),
        Facet::OilStatus => ("/engine/oil", json!({ "lifeRemaining": 0.86 })),
        Facet::EngineStatus => ("/engine", json!({ "running": false })),
    }
}

/// Upstream error body for a capability the vehicle lacks
pub fn not_capable_body() -> Value {
    json!({
        "type": "COMPATIBILITY",
        "code": "VEHICLE_NOT_CAPABLE",
        "description": "The vehicle is incapable of performing your request.",
        "statusCode": 409
    })
}

fn vehicle_path(server_vehicle: &str, suffix: &str) -> String {
    format!("/v2.0/vehicles/{server_vehicle}{suffix}")
}

/// Mount a successful response for one facet
pub async fn mount_facet(server: &MockServer, vehicle_id: &str, facet: Facet) {
    let (suffix, body) = facet_fixture(facet, vehicle_id);
    Mock::given(method("GET"))
        .and(path(vehicle_path(vehicle_id, suffix)))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("sc-data-age", DATA_AGE)
                .set_body_json(body),
        )
        .mount(server)
        .await;
}

/// Mount an upstream failure for one facet
pub async fn mount_facet_error(
    server: &MockServer,
    vehicle_id: &str,
    facet: Facet,
    status: u16,
    body: Value,
) {
    let (suffix, _) = facet_fixture(facet, vehicle_id);
    Mock::given(method("GET"))
        .and(path(vehicle_path(vehicle_id, suffix)))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount the VIN lookup
pub async fn mount_vin(server: &MockServer, vehicle_id: &str, vin: &str) {
    Mock::given(method("GET"))
        .and(path(vehicle_path(vehicle_id, "/vin")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "vin": vin })))
        .mount(server)
        .await;
}

/// Mount every facet (and the VIN) successfully, except `failing`, which
/// answer 409 "not capable"
pub async fn mount_vehicle(server: &MockServer, vehicle_id: &str, failing: &[Facet]) {
    for facet in Facet::ALL {
        if failing.contains(&facet) {
            mount_facet_error(server, vehicle_id, facet, 409, not_capable_body()).await;
        } else {
            mount_facet(server, vehicle_id, facet).await;
        }
    }
    mount_vin(server, vehicle_id, "5YJ3E1EA7LF000001").await;
}

/// Successful token endpoint response
pub fn token_body(access: &str, refresh: &str, expires_in: u64) -> Value {
    json!({
        "access_token": access,
        "token_type": "Bearer",
        "expires_in": expires_in,
        "refresh_token": refresh,
        "refresh_expires_in": 5_184_000
    })
}
