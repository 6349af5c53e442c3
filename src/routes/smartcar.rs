// ABOUTME: Smartcar HTTP routes for OAuth brokering and vehicle telemetry
// ABOUTME: Thin handlers delegating to the OAuth client and the vehicle telemetry client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

//! Smartcar Routes
//!
//! ## Endpoints
//!
//! - `GET /api/smartcar/status` - Credential configuration report
//! - `GET /api/smartcar/auth` - Consent URL
//! - `GET /api/smartcar/callback` - OAuth redirect target; redirects to the frontend
//! - `POST /api/smartcar/exchange` - Exchange an authorization code
//! - `POST /api/smartcar/refresh` - Rotate a refresh token
//! - `GET /api/smartcar/vehicles` - Vehicles visible to the access token
//! - `GET /api/smartcar/vehicles/:vehicle_id/:resource` - One facet, `security`, or `all`
//!
//! Vehicle endpoints take the access token from an `Authorization: Bearer`
//! header or an `access_token` query parameter.

use crate::resources::ServerResources;
use crate::routes::REQUEST_ID_HEADER;
use autologic_core::errors::AppError;
use autologic_core::models::Facet;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Routes for the Smartcar integration
pub struct SmartcarRoutes;

/// Query for the authorization URL endpoint
#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    /// Opaque value echoed back on the callback
    pub state: Option<String>,
}

/// Authorization URL response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUrlResponse {
    /// Consent page URL
    pub auth_url: String,
}

/// Query for the OAuth callback
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code issued by Smartcar
    pub code: Option<String>,
    /// State echoed back by Smartcar
    pub state: Option<String>,
    /// Error reported by Smartcar when the owner denied access
    pub error: Option<String>,
    /// Error description reported by Smartcar
    pub error_description: Option<String>,
}

/// Query for the code exchange endpoint
#[derive(Debug, Default, Deserialize)]
pub struct CodeQuery {
    /// Authorization code
    pub code: Option<String>,
}

/// Query for the refresh endpoint
#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    /// Refresh token to rotate
    pub refresh_token: Option<String>,
}

/// Access token passed as a query parameter
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    /// Bearer token for vehicle endpoints
    pub access_token: Option<String>,
}

/// Vehicle sub-resources served under `/api/smartcar/vehicles/:vehicle_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VehicleResource {
    Facet(Facet),
    Security,
    All,
}

impl VehicleResource {
    fn parse(segment: &str) -> Option<Self> {
        Some(match segment {
            "info" => Self::Facet(Facet::Info),
            "odometer" => Self::Facet(Facet::Odometer),
            "location" => Self::Facet(Facet::Location),
            "battery" => Self::Facet(Facet::Battery),
            "fuel" => Self::Facet(Facet::Fuel),
            "tires" => Self::Facet(Facet::TirePressure),
            "oil" => Self::Facet(Facet::OilStatus),
            "engine" => Self::Facet(Facet::EngineStatus),
            "security" => Self::Security,
            "all" => Self::All,
            _ => return None,
        })
    }
}

impl SmartcarRoutes {
    /// Create all Smartcar routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/smartcar/status", get(Self::handle_status))
            .route("/api/smartcar/auth", get(Self::handle_auth_url))
            .route("/api/smartcar/callback", get(Self::handle_callback))
            .route("/api/smartcar/exchange", post(Self::handle_exchange))
            .route("/api/smartcar/refresh", post(Self::handle_refresh))
            .route("/api/smartcar/vehicles", get(Self::handle_list_vehicles))
            .route(
                "/api/smartcar/vehicles/:vehicle_id/:resource",
                get(Self::handle_vehicle_resource),
            )
            .with_state(resources)
    }

    /// Resolve the access token from the bearer header, then the query string
    fn access_token(headers: &HeaderMap, query: TokenQuery) -> Result<String, AppError> {
        let from_header = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| {
                value
                    .strip_prefix("Bearer ")
                    .or_else(|| value.strip_prefix("bearer "))
            })
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_owned);

        from_header
            .or(query.access_token)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| AppError::missing_field("access_token"))
    }

    /// Frontend redirect target after the OAuth callback
    fn connected_redirect(frontend_url: &str, outcome: Result<(), String>) -> Redirect {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        match &outcome {
            Ok(()) => query.append_pair("success", "true"),
            Err(message) => query.append_pair("error", message),
        };
        Redirect::to(&format!(
            "{}/connected?{}",
            frontend_url.trim_end_matches('/'),
            query.finish()
        ))
    }

    async fn handle_status(State(resources): State<Arc<ServerResources>>) -> Response {
        Json(resources.config.smartcar.status()).into_response()
    }

    async fn handle_auth_url(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<AuthQuery>,
    ) -> Result<Response, AppError> {
        let auth_url = resources
            .oauth_client
            .get_authorization_url(query.state.as_deref())?;
        Ok(Json(AuthUrlResponse { auth_url }).into_response())
    }

    async fn handle_callback(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<CallbackQuery>,
    ) -> Response {
        let frontend_url = resources.config.frontend_url.as_str();

        if let Some(error) = query.error {
            let message = query.error_description.unwrap_or(error);
            warn!(message = %message, "Authorization denied by vehicle owner");
            return Self::connected_redirect(frontend_url, Err(message)).into_response();
        }

        let Some(code) = query.code else {
            return Self::connected_redirect(
                frontend_url,
                Err("Missing required parameter: code".to_owned()),
            )
            .into_response();
        };

        let outcome = match resources.oauth_client.exchange_code(&code).await {
            Ok(_) => {
                info!(has_state = query.state.is_some(), "Vehicle connected");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "OAuth callback exchange failed");
                Err(e.to_string())
            }
        };

        Self::connected_redirect(frontend_url, outcome).into_response()
    }

    async fn handle_exchange(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<CodeQuery>,
    ) -> Result<Response, AppError> {
        let code = query.code.ok_or_else(|| AppError::missing_field("code"))?;
        let tokens = resources.oauth_client.exchange_code(&code).await?;
        Ok(Json(tokens).into_response())
    }

    async fn handle_refresh(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<RefreshQuery>,
    ) -> Result<Response, AppError> {
        let refresh_token = query
            .refresh_token
            .ok_or_else(|| AppError::missing_field("refresh_token"))?;
        let tokens = resources.oauth_client.refresh_token(&refresh_token).await?;
        Ok(Json(tokens).into_response())
    }

    /// Attach the request id assigned by the middleware, when present
    fn tag_request_id(mut error: AppError, headers: &HeaderMap) -> AppError {
        if let Some(request_id) = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            error = error.with_request_id(request_id);
        }
        error
    }

    async fn handle_list_vehicles(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<TokenQuery>,
    ) -> Result<Response, AppError> {
        Self::list_vehicles(&resources, &headers, query)
            .await
            .map_err(|e| Self::tag_request_id(e, &headers))
    }

    async fn list_vehicles(
        resources: &ServerResources,
        headers: &HeaderMap,
        query: TokenQuery,
    ) -> Result<Response, AppError> {
        let access_token = Self::access_token(headers, query)?;
        let vehicles = resources
            .telemetry_client(&access_token)
            .list_vehicles()
            .await?;
        Ok(Json(vehicles).into_response())
    }

    async fn handle_vehicle_resource(
        State(resources): State<Arc<ServerResources>>,
        Path((vehicle_id, resource)): Path<(String, String)>,
        headers: HeaderMap,
        Query(query): Query<TokenQuery>,
    ) -> Result<Response, AppError> {
        Self::vehicle_resource(&resources, &vehicle_id, &resource, &headers, query)
            .await
            .map_err(|e| Self::tag_request_id(e, &headers))
    }

    async fn vehicle_resource(
        resources: &ServerResources,
        vehicle_id: &str,
        resource: &str,
        headers: &HeaderMap,
        query: TokenQuery,
    ) -> Result<Response, AppError> {
        let resource = VehicleResource::parse(resource)
            .ok_or_else(|| AppError::not_found(format!("Vehicle resource '{resource}'")))?;
        let access_token = Self::access_token(headers, query)?;
        let client = resources.telemetry_client(&access_token);

        let response = match resource {
            VehicleResource::Facet(facet) => {
                Json(client.facet(facet, vehicle_id).await?).into_response()
            }
            VehicleResource::Security => {
                Json(client.security_status(vehicle_id).await?).into_response()
            }
            VehicleResource::All => {
                Json(client.complete_status(vehicle_id).await?).into_response()
            }
        };
        Ok(response)
    }
}
