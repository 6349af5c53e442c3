// ABOUTME: Complete vehicle status aggregation across all eight telemetry facets
// ABOUTME: Fans out facet fetches concurrently and records each failure inline instead of aborting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

use super::client::VehicleTelemetryClient;
use autologic_core::errors::ConnectedCarResult;
use autologic_core::models::{CompleteVehicleStatus, FacetResult};
use tracing::{info, warn};

impl VehicleTelemetryClient {
    /// Fetch every facet for one vehicle.
    ///
    /// All eight keys are always present in the result; a facet that fails
    /// holds `{"error": "..."}` while the others keep their data. Facets are
    /// fetched concurrently and none waits on another.
    ///
    /// # Errors
    ///
    /// Returns a structural error (empty token, malformed vehicle id) before
    /// any upstream call. Per-facet failures never fail the aggregate.
    pub async fn complete_status(
        &self,
        vehicle_id: &str,
    ) -> ConnectedCarResult<CompleteVehicleStatus> {
        self.check_request(vehicle_id)?;

        let (info, odometer, location, battery, fuel, tire_pressure, oil_status, engine_status) =
            tokio::join!(
                self.info(vehicle_id),
                self.odometer(vehicle_id),
                self.location(vehicle_id),
                self.battery(vehicle_id),
                self.fuel(vehicle_id),
                self.tire_pressure(vehicle_id),
                self.oil_status(vehicle_id),
                self.engine_status(vehicle_id),
            );

        let status = CompleteVehicleStatus {
            info: FacetResult::from_result(info),
            odometer: FacetResult::from_result(odometer),
            location: FacetResult::from_result(location),
            battery: FacetResult::from_result(battery),
            fuel: FacetResult::from_result(fuel),
            tire_pressure: FacetResult::from_result(tire_pressure),
            oil_status: FacetResult::from_result(oil_status),
            engine_status: FacetResult::from_result(engine_status),
        };

        let failed = status.failed_facets();
        if failed.is_empty() {
            info!(vehicle_id = %vehicle_id.trim(), "Fetched complete vehicle status");
        } else {
            warn!(
                vehicle_id = %vehicle_id.trim(),
                failed = failed.len(),
                facets = ?failed,
                "Fetched partial vehicle status"
            );
        }

        Ok(status)
    }
}
