// ABOUTME: Connected-car data provider integrations for external vehicle APIs
// ABOUTME: Hosts the Smartcar telemetry client and its status aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

/// Smartcar vehicle API integration
pub mod smartcar;

pub use smartcar::{validate_vehicle_id, VehicleTelemetryClient};
