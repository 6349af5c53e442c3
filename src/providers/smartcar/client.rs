// ABOUTME: Smartcar vehicle API client fetching and normalizing single telemetry facets
// ABOUTME: One bearer token per instance; every call round-trips upstream with no cache or retry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

use crate::utils::http_client::shared_client;
use autologic_core::constants::smartcar;
use autologic_core::errors::{upstream_message, ConnectedCarError, ConnectedCarResult};
use autologic_core::models::{
    Facet, FacetRecord, UnitSystem, VehicleBattery, VehicleEngineStatus, VehicleFuel, VehicleInfo,
    VehicleList, VehicleLocation, VehicleOdometer, VehicleOilStatus, VehicleTirePressure,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

/// Smartcar API response for `GET /vehicles`
#[derive(Debug, Deserialize)]
struct VehiclesResponse {
    vehicles: Vec<String>,
}

/// Smartcar API response for vehicle attributes
#[derive(Debug, Deserialize)]
struct InfoResponse {
    make: String,
    model: String,
    year: i32,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VinResponse {
    vin: String,
}

#[derive(Debug, Deserialize)]
struct OdometerResponse {
    distance: f64,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LocationResponse {
    latitude: f64,
    longitude: f64,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatteryResponse {
    percent_remaining: f64,
    range: Option<f64>,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FuelResponse {
    percent_remaining: f64,
    range: Option<f64>,
    amount_remaining: Option<f64>,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TirePressureResponse {
    front_left: Option<f64>,
    front_right: Option<f64>,
    back_left: Option<f64>,
    back_right: Option<f64>,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OilResponse {
    life_remaining: Option<f64>,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EngineResponse {
    running: bool,
    timestamp: Option<String>,
}

/// Decoded upstream body plus the data-age header
struct Fetched<T> {
    body: T,
    data_age: Option<String>,
}

/// Reject vehicle identifiers that cannot name a single upstream resource.
///
/// Returns the trimmed identifier.
///
/// # Errors
///
/// Returns a structural input error when the identifier is empty, is a dot
/// segment, or contains a path separator, query or fragment marker, percent
/// escape, or whitespace
pub fn validate_vehicle_id(vehicle_id: &str) -> ConnectedCarResult<&str> {
    let trimmed = vehicle_id.trim();
    if trimmed.is_empty() {
        return Err(ConnectedCarError::invalid_vehicle_id("must not be empty"));
    }
    if matches!(trimmed, "." | "..") {
        return Err(ConnectedCarError::invalid_vehicle_id(
            "must not be a relative path segment",
        ));
    }
    // URL parsers treat '\\' as '/' and decode "%2e" into '.'
    if let Some(c) = trimmed
        .chars()
        .find(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace())
    {
        return Err(ConnectedCarError::invalid_vehicle_id(format!(
            "contains forbidden character {c:?}"
        )));
    }
    Ok(trimmed)
}

/// Vehicle telemetry client bound to one access token
#[derive(Debug, Clone)]
pub struct VehicleTelemetryClient {
    access_token: String,
    base_url: String,
    unit_system: UnitSystem,
    client: Client,
}

impl VehicleTelemetryClient {
    /// Create a client for `access_token` against the production API
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: smartcar::API_BASE_URL.to_owned(),
            unit_system: UnitSystem::default(),
            client: shared_client().clone(),
        }
    }

    /// Point the client at another API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Request values in the given unit system
    #[must_use]
    pub const fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    /// Use a caller-supplied HTTP client
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Unit system sent with every request
    #[must_use]
    pub const fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    /// Structural checks shared by every vehicle-scoped operation
    pub(super) fn check_request(&self, vehicle_id: &str) -> ConnectedCarResult<()> {
        self.check_token()?;
        validate_vehicle_id(vehicle_id)?;
        Ok(())
    }

    fn check_token(&self) -> ConnectedCarResult<()> {
        if self.access_token.trim().is_empty() {
            return Err(ConnectedCarError::InvalidInput {
                field: "access_token",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Make an authenticated API request.
    ///
    /// Failures are attributed to `facet` when given, otherwise reported as
    /// generic upstream errors.
    async fn get_json<T>(&self, facet: Option<Facet>, path: &str) -> ConnectedCarResult<Fetched<T>>
    where
        T: DeserializeOwned,
    {
        self.check_token()?;
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(facet = ?facet, path = %path, "Requesting Smartcar resource");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .header(smartcar::UNIT_SYSTEM_HEADER, self.unit_system.as_str())
            .send()
            .await
            .map_err(|e| upstream_error(facet, e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        let data_age = response
            .headers()
            .get(smartcar::DATA_AGE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let text = response
            .text()
            .await
            .map_err(|e| upstream_error(facet, Some(status.as_u16()), e.to_string()))?;

        if !status.is_success() {
            let message = upstream_message(&text, &status.to_string());
            warn!(
                facet = ?facet,
                path = %path,
                status = status.as_u16(),
                message = %message,
                "Smartcar API request failed"
            );
            return Err(upstream_error(facet, Some(status.as_u16()), message));
        }

        let body = serde_json::from_str(&text).map_err(|e| {
            upstream_error(
                facet,
                Some(status.as_u16()),
                format!("Failed to parse Smartcar API response: {e}"),
            )
        })?;

        Ok(Fetched { body, data_age })
    }

    async fn get_facet<T>(
        &self,
        facet: Facet,
        vehicle_id: &str,
        suffix: &str,
    ) -> ConnectedCarResult<Fetched<T>>
    where
        T: DeserializeOwned,
    {
        let vehicle_id = validate_vehicle_id(vehicle_id)?;
        self.get_json(Some(facet), &format!("vehicles/{vehicle_id}{suffix}"))
            .await
    }

    /// List the vehicles this token can access
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the request fails
    pub async fn list_vehicles(&self) -> ConnectedCarResult<VehicleList> {
        let fetched: Fetched<VehiclesResponse> = self.get_json(None, "vehicles").await?;
        Ok(VehicleList {
            vehicles: fetched.body.vehicles,
        })
    }

    /// Fetch make, model and year, plus the VIN when upstream provides it.
    ///
    /// The VIN lookup is best-effort: its failure leaves `vin` unset.
    ///
    /// # Errors
    ///
    /// Returns a telemetry error if the attribute request fails
    pub async fn info(&self, vehicle_id: &str) -> ConnectedCarResult<VehicleInfo> {
        let vehicle_id = validate_vehicle_id(vehicle_id)?;
        let fetched: Fetched<InfoResponse> = self.get_facet(Facet::Info, vehicle_id, "").await?;

        let vin = match self
            .get_facet::<VinResponse>(Facet::Info, vehicle_id, "/vin")
            .await
        {
            Ok(vin) => Some(vin.body.vin),
            Err(e) => {
                debug!(vehicle_id = %vehicle_id, error = %e, "VIN unavailable");
                None
            }
        };

        let Fetched { body, data_age } = fetched;
        Ok(VehicleInfo {
            id: vehicle_id.to_owned(),
            make: body.make,
            model: body.model,
            year: body.year,
            vin,
            timestamp: data_age.or(body.timestamp),
        })
    }

    /// Fetch the odometer reading
    ///
    /// # Errors
    ///
    /// Returns a telemetry error if the request fails
    pub async fn odometer(&self, vehicle_id: &str) -> ConnectedCarResult<VehicleOdometer> {
        let Fetched { body, data_age } = self
            .get_facet::<OdometerResponse>(Facet::Odometer, vehicle_id, "/odometer")
            .await?;
        Ok(VehicleOdometer {
            distance: body.distance,
            timestamp: require_timestamp(Facet::Odometer, data_age, body.timestamp)?,
        })
    }

    /// Fetch the GPS position
    ///
    /// # Errors
    ///
    /// Returns a telemetry error if the request fails
    pub async fn location(&self, vehicle_id: &str) -> ConnectedCarResult<VehicleLocation> {
        let Fetched { body, data_age } = self
            .get_facet::<LocationResponse>(Facet::Location, vehicle_id, "/location")
            .await?;
        Ok(VehicleLocation {
            latitude: body.latitude,
            longitude: body.longitude,
            timestamp: require_timestamp(Facet::Location, data_age, body.timestamp)?,
        })
    }

    /// Fetch the traction battery state (electric vehicles)
    ///
    /// # Errors
    ///
    /// Returns a telemetry error if the request fails, including when the
    /// vehicle has no traction battery
    pub async fn battery(&self, vehicle_id: &str) -> ConnectedCarResult<VehicleBattery> {
        let Fetched { body, data_age } = self
            .get_facet::<BatteryResponse>(Facet::Battery, vehicle_id, "/battery")
            .await?;
        Ok(VehicleBattery {
            percent_remaining: body.percent_remaining,
            range: body.range,
            timestamp: require_timestamp(Facet::Battery, data_age, body.timestamp)?,
        })
    }

    /// Fetch the fuel tank state
    ///
    /// # Errors
    ///
    /// Returns a telemetry error if the request fails, including when the
    /// vehicle has no fuel tank
    pub async fn fuel(&self, vehicle_id: &str) -> ConnectedCarResult<VehicleFuel> {
        let Fetched { body, data_age } = self
            .get_facet::<FuelResponse>(Facet::Fuel, vehicle_id, "/fuel")
            .await?;
        Ok(VehicleFuel {
            percent_remaining: body.percent_remaining,
            range: body.range,
            amount_remaining: body.amount_remaining,
            timestamp: require_timestamp(Facet::Fuel, data_age, body.timestamp)?,
        })
    }

    /// Fetch tire pressures
    ///
    /// # Errors
    ///
    /// Returns a telemetry error if the request fails
    pub async fn tire_pressure(&self, vehicle_id: &str) -> ConnectedCarResult<VehicleTirePressure> {
        let Fetched { body, data_age } = self
            .get_facet::<TirePressureResponse>(Facet::TirePressure, vehicle_id, "/tires/pressure")
            .await?;
        Ok(VehicleTirePressure {
            front_left: body.front_left,
            front_right: body.front_right,
            back_left: body.back_left,
            back_right: body.back_right,
            timestamp: require_timestamp(Facet::TirePressure, data_age, body.timestamp)?,
        })
    }

    /// Fetch remaining engine oil life
    ///
    /// # Errors
    ///
    /// Returns a telemetry error if the request fails
    pub async fn oil_status(&self, vehicle_id: &str) -> ConnectedCarResult<VehicleOilStatus> {
        let Fetched { body, data_age } = self
            .get_facet::<OilResponse>(Facet::OilStatus, vehicle_id, "/engine/oil")
            .await?;
        Ok(VehicleOilStatus {
            life_remaining: body.life_remaining,
            timestamp: require_timestamp(Facet::OilStatus, data_age, body.timestamp)?,
        })
    }

    /// Fetch the engine run-state
    ///
    /// # Errors
    ///
    /// Returns a telemetry error if the request fails
    pub async fn engine_status(&self, vehicle_id: &str) -> ConnectedCarResult<VehicleEngineStatus> {
        let Fetched { body, data_age } = self
            .get_facet::<EngineResponse>(Facet::EngineStatus, vehicle_id, "/engine")
            .await?;
        Ok(VehicleEngineStatus {
            running: body.running,
            timestamp: require_timestamp(Facet::EngineStatus, data_age, body.timestamp)?,
        })
    }

    /// Fetch one facet by kind
    ///
    /// # Errors
    ///
    /// Returns a telemetry error if the request fails
    pub async fn facet(&self, facet: Facet, vehicle_id: &str) -> ConnectedCarResult<FacetRecord> {
        Ok(match facet {
            Facet::Info => FacetRecord::Info(self.info(vehicle_id).await?),
            Facet::Odometer => FacetRecord::Odometer(self.odometer(vehicle_id).await?),
            Facet::Location => FacetRecord::Location(self.location(vehicle_id).await?),
            Facet::Battery => FacetRecord::Battery(self.battery(vehicle_id).await?),
            Facet::Fuel => FacetRecord::Fuel(self.fuel(vehicle_id).await?),
            Facet::TirePressure => FacetRecord::TirePressure(self.tire_pressure(vehicle_id).await?),
            Facet::OilStatus => FacetRecord::OilStatus(self.oil_status(vehicle_id).await?),
            Facet::EngineStatus => FacetRecord::EngineStatus(self.engine_status(vehicle_id).await?),
        })
    }

    /// Fetch lock and door state as returned by upstream.
    ///
    /// Not part of the aggregate status record.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the request fails
    pub async fn security_status(&self, vehicle_id: &str) -> ConnectedCarResult<serde_json::Value> {
        let vehicle_id = validate_vehicle_id(vehicle_id)?;
        let fetched: Fetched<serde_json::Value> = self
            .get_json(None, &format!("vehicles/{vehicle_id}/security"))
            .await?;
        Ok(fetched.body)
    }
}

fn upstream_error(facet: Option<Facet>, status: Option<u16>, message: String) -> ConnectedCarError {
    match facet {
        Some(facet) => ConnectedCarError::Telemetry {
            facet,
            status,
            message,
        },
        None => ConnectedCarError::Upstream { status, message },
    }
}

/// Data-age header first, then the body `timestamp` field
fn require_timestamp(
    facet: Facet,
    data_age: Option<String>,
    body_timestamp: Option<String>,
) -> ConnectedCarResult<String> {
    data_age
        .or(body_timestamp)
        .ok_or_else(|| ConnectedCarError::Telemetry {
            facet,
            status: None,
            message: "response carried no timestamp".into(),
        })
}
