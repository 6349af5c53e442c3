// ABOUTME: Smartcar connected-car provider: vehicle telemetry client and status aggregation
// ABOUTME: Normalizes upstream camelCase payloads into facet records shared across the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

/// Complete status aggregation
pub mod aggregate;
/// Single-facet vehicle API client
pub mod client;

pub use client::{validate_vehicle_id, VehicleTelemetryClient};
