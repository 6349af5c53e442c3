// ABOUTME: Value models shared between the OAuth manager, telemetry client, and routes
// ABOUTME: Token pairs, telemetry facet records, and the aggregate vehicle status record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

/// OAuth token pair issued by the upstream token endpoint
pub mod token;
/// Vehicle telemetry facets and the aggregate status record
pub mod vehicle;

pub use token::TokenPair;
pub use vehicle::{
    CompleteVehicleStatus, Facet, FacetRecord, FacetResult, UnitSystem, VehicleBattery,
    VehicleEngineStatus, VehicleFuel, VehicleInfo, VehicleList, VehicleLocation, VehicleOdometer,
    VehicleOilStatus, VehicleTirePressure,
};
