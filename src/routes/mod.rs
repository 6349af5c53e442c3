// ABOUTME: Route module organization for Autologic server HTTP endpoints
// ABOUTME: Assembles domain routers and applies request tracing and request-id middleware
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

//! Route module for the Autologic server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the OAuth and telemetry clients.

/// Health check and system status routes
pub mod health;
/// Smartcar OAuth and vehicle telemetry routes
pub mod smartcar;

pub use health::HealthRoutes;
pub use smartcar::SmartcarRoutes;

use crate::resources::ServerResources;
use axum::http::HeaderName;
use axum::Router;
use std::sync::Arc;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(SmartcarRoutes::routes(resources))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}
