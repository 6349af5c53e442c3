// ABOUTME: Normalized vehicle telemetry facet records and the aggregate status record
// ABOUTME: Each facet is independently fallible; the aggregate holds data or an error per facet
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

use serde::{Deserialize, Serialize};
use std::fmt;

/// One discrete category of vehicle telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    /// Make, model, year and VIN
    Info,
    /// Total distance driven
    Odometer,
    /// GPS position
    Location,
    /// Traction battery state (electric vehicles)
    Battery,
    /// Fuel tank state (combustion vehicles)
    Fuel,
    /// Pressure of each tire
    TirePressure,
    /// Remaining engine oil life
    OilStatus,
    /// Engine run-state
    EngineStatus,
}

impl Facet {
    /// Every facet, in aggregate fetch order
    pub const ALL: [Self; 8] = [
        Self::Info,
        Self::Odometer,
        Self::Location,
        Self::Battery,
        Self::Fuel,
        Self::TirePressure,
        Self::OilStatus,
        Self::EngineStatus,
    ];

    /// Key of this facet in the aggregate status record
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Odometer => "odometer",
            Self::Location => "location",
            Self::Battery => "battery",
            Self::Fuel => "fuel",
            Self::TirePressure => "tire_pressure",
            Self::OilStatus => "oil_status",
            Self::EngineStatus => "engine_status",
        }
    }

    /// Human-readable description used in error messages
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Info => "vehicle info",
            Self::Odometer => "odometer",
            Self::Location => "location",
            Self::Battery => "battery",
            Self::Fuel => "fuel",
            Self::TirePressure => "tire pressure",
            Self::OilStatus => "engine oil status",
            Self::EngineStatus => "engine status",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Unit system requested from the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Kilometers, liters, kilopascals
    #[default]
    Metric,
    /// Miles, gallons, psi
    Imperial,
}

impl UnitSystem {
    /// Parse from string with fallback to metric
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "imperial" => Self::Imperial,
            _ => Self::Metric,
        }
    }

    /// Header value sent upstream
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }
}

/// Vehicle identifiers visible to one access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleList {
    /// Opaque upstream vehicle identifiers
    pub vehicles: Vec<String>,
}

/// Basic vehicle identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInfo {
    /// Upstream vehicle identifier
    pub id: String,
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
    /// Model year
    pub year: i32,
    /// Vehicle identification number, when the best-effort lookup succeeded
    pub vin: Option<String>,
    /// Upstream data timestamp, when supplied
    pub timestamp: Option<String>,
}

/// Odometer reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleOdometer {
    /// Total distance in the requested unit system
    pub distance: f64,
    /// Upstream data timestamp
    pub timestamp: String,
}

/// Vehicle position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleLocation {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Upstream data timestamp
    pub timestamp: String,
}

/// Traction battery state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleBattery {
    /// Remaining charge as a fraction (0.0 to 1.0)
    pub percent_remaining: f64,
    /// Estimated remaining range
    pub range: Option<f64>,
    /// Upstream data timestamp
    pub timestamp: String,
}

/// Fuel tank state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleFuel {
    /// Remaining fuel as a fraction (0.0 to 1.0)
    pub percent_remaining: f64,
    /// Estimated remaining range
    pub range: Option<f64>,
    /// Remaining fuel amount
    pub amount_remaining: Option<f64>,
    /// Upstream data timestamp
    pub timestamp: String,
}

/// Tire pressures; a wheel the vehicle does not report is `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleTirePressure {
    /// Front left tire
    pub front_left: Option<f64>,
    /// Front right tire
    pub front_right: Option<f64>,
    /// Back left tire
    pub back_left: Option<f64>,
    /// Back right tire
    pub back_right: Option<f64>,
    /// Upstream data timestamp
    pub timestamp: String,
}

/// Engine oil state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleOilStatus {
    /// Remaining oil life as a fraction (0.0 to 1.0)
    pub life_remaining: Option<f64>,
    /// Upstream data timestamp
    pub timestamp: String,
}

/// Engine run-state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleEngineStatus {
    /// Whether the engine is running
    pub running: bool,
    /// Upstream data timestamp
    pub timestamp: String,
}

/// A single normalized facet record, tagged by kind only through its shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetRecord {
    /// Vehicle identity
    Info(VehicleInfo),
    /// Odometer reading
    Odometer(VehicleOdometer),
    /// Vehicle position
    Location(VehicleLocation),
    /// Traction battery
    Battery(VehicleBattery),
    /// Fuel tank
    Fuel(VehicleFuel),
    /// Tire pressures
    TirePressure(VehicleTirePressure),
    /// Engine oil
    OilStatus(VehicleOilStatus),
    /// Engine run-state
    EngineStatus(VehicleEngineStatus),
}

impl FacetRecord {
    /// Facet this record belongs to
    #[must_use]
    pub const fn facet(&self) -> Facet {
        match self {
            Self::Info(_) => Facet::Info,
            Self::Odometer(_) => Facet::Odometer,
            Self::Location(_) => Facet::Location,
            Self::Battery(_) => Facet::Battery,
            Self::Fuel(_) => Facet::Fuel,
            Self::TirePressure(_) => Facet::TirePressure,
            Self::OilStatus(_) => Facet::OilStatus,
            Self::EngineStatus(_) => Facet::EngineStatus,
        }
    }
}

/// Outcome of one facet fetch inside the aggregate.
///
/// Serializes as the facet record itself, or as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetResult<T> {
    /// The facet could not be fetched
    Failed {
        /// Upstream or decoding error message
        error: String,
    },
    /// The facet was fetched and normalized
    Data(T),
}

impl<T> FacetResult<T> {
    /// Capture a fallible fetch as a value
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::Data(data),
            Err(e) => Self::Failed {
                error: e.to_string(),
            },
        }
    }

    /// Whether the facet holds data
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// The facet record, if fetched
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Failed { .. } => None,
        }
    }

    /// The error message, if the fetch failed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            Self::Data(_) => None,
        }
    }
}

/// Aggregate status record: every facet key is always present.
///
/// Structural success does not imply data success per facet; check each entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteVehicleStatus {
    /// Vehicle identity
    pub info: FacetResult<VehicleInfo>,
    /// Odometer reading
    pub odometer: FacetResult<VehicleOdometer>,
    /// Vehicle position
    pub location: FacetResult<VehicleLocation>,
    /// Traction battery
    pub battery: FacetResult<VehicleBattery>,
    /// Fuel tank
    pub fuel: FacetResult<VehicleFuel>,
    /// Tire pressures
    pub tire_pressure: FacetResult<VehicleTirePressure>,
    /// Engine oil
    pub oil_status: FacetResult<VehicleOilStatus>,
    /// Engine run-state
    pub engine_status: FacetResult<VehicleEngineStatus>,
}

impl CompleteVehicleStatus {
    /// Error message recorded for `facet`, if it failed
    #[must_use]
    pub fn facet_error(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Info => self.info.error(),
            Facet::Odometer => self.odometer.error(),
            Facet::Location => self.location.error(),
            Facet::Battery => self.battery.error(),
            Facet::Fuel => self.fuel.error(),
            Facet::TirePressure => self.tire_pressure.error(),
            Facet::OilStatus => self.oil_status.error(),
            Facet::EngineStatus => self.engine_status.error(),
        }
    }

    /// Facets that hold an error placeholder, in fetch order
    #[must_use]
    pub fn failed_facets(&self) -> Vec<Facet> {
        Facet::ALL
            .into_iter()
            .filter(|facet| self.facet_error(*facet).is_some())
            .collect()
    }

    /// Whether every facet holds data
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed_facets().is_empty()
    }
}
