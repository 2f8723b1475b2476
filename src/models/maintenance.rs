//! Modelo de Maintenance
//!
//! Mantenimientos programados (`/maintenances/maintenances`), los enums
//! fijos de tipo y piezas, y los cuerpos de creación/actualización.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::vehicle::VehicleSummary;

/// Estado del mantenimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceStatus {
    Pending,
    Processing,
    Success,
    Failed,
    #[serde(other)]
    Unknown,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "pending",
            MaintenanceStatus::Processing => "processing",
            MaintenanceStatus::Success => "success",
            MaintenanceStatus::Failed => "failed",
            MaintenanceStatus::Unknown => "unknown",
        }
    }
}

/// Tipo de mantenimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceType {
    Annual,
    Monthly,
    General,
    Repair,
}

impl MaintenanceType {
    pub const ALL: [MaintenanceType; 4] = [
        MaintenanceType::Annual,
        MaintenanceType::Monthly,
        MaintenanceType::General,
        MaintenanceType::Repair,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceType::Annual => "annual",
            MaintenanceType::Monthly => "monthly",
            MaintenanceType::General => "general",
            MaintenanceType::Repair => "repair",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.as_str()).collect()
    }
}

impl FromStr for MaintenanceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown maintenance type '{}'", s))
    }
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tipo tal como viene en un registro del API. Los valores fuera del enum
/// fijo se conservan en bruto para no perder la lista entera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordedType {
    Known(MaintenanceType),
    Other(String),
}

impl RecordedType {
    pub fn as_str(&self) -> &str {
        match self {
            RecordedType::Known(t) => t.as_str(),
            RecordedType::Other(raw) => raw,
        }
    }

    pub fn known(&self) -> Option<MaintenanceType> {
        match self {
            RecordedType::Known(t) => Some(*t),
            RecordedType::Other(_) => None,
        }
    }
}

impl From<String> for RecordedType {
    fn from(raw: String) -> Self {
        match raw.parse::<MaintenanceType>() {
            Ok(t) => RecordedType::Known(t),
            Err(_) => RecordedType::Other(raw),
        }
    }
}

impl From<RecordedType> for String {
    fn from(recorded: RecordedType) -> Self {
        recorded.as_str().to_string()
    }
}

impl From<MaintenanceType> for RecordedType {
    fn from(t: MaintenanceType) -> Self {
        RecordedType::Known(t)
    }
}

/// Pieza afectada (enum fijo)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehiclePart {
    Engine,
    Transmission,
    Brakes,
    Tires,
    Fuel,
    Maintenance,
    Parts,
}

impl VehiclePart {
    pub const ALL: [VehiclePart; 7] = [
        VehiclePart::Engine,
        VehiclePart::Transmission,
        VehiclePart::Brakes,
        VehiclePart::Tires,
        VehiclePart::Fuel,
        VehiclePart::Maintenance,
        VehiclePart::Parts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehiclePart::Engine => "engine",
            VehiclePart::Transmission => "transmission",
            VehiclePart::Brakes => "brakes",
            VehiclePart::Tires => "tires",
            VehiclePart::Fuel => "fuel",
            VehiclePart::Maintenance => "maintenance",
            VehiclePart::Parts => "parts",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VehiclePart::Engine => "Engine",
            VehiclePart::Transmission => "Transmission",
            VehiclePart::Brakes => "Brakes",
            VehiclePart::Tires => "Tires",
            VehiclePart::Fuel => "Fuel",
            VehiclePart::Maintenance => "Maintenance",
            VehiclePart::Parts => "Parts",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.as_str()).collect()
    }
}

impl FromStr for VehiclePart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown vehicle part '{}'", s))
    }
}

/// Mantenimiento principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub remarks: String,
    pub status: MaintenanceStatus,
    #[serde(rename = "type")]
    pub maintenance_type: RecordedType,
    #[serde(default)]
    pub parts: Vec<String>,
    pub vehicle: VehicleSummary,
    pub due_date: String,
    pub scheduled_date: String,
    #[serde(default)]
    pub completed_date: Option<String>,
    #[serde(default)]
    pub scheduled_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Serializa una fecha como lo hace `Date.toJSON()`: milisegundos y `Z`
pub fn serialize_api_date<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Cuerpo de `POST /maintenances/maintenances`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceSchedule {
    pub vehicle_slug: String,
    pub remarks: String,
    pub parts: Vec<VehiclePart>,
    #[serde(rename = "type")]
    pub maintenance_type: MaintenanceType,
    #[serde(serialize_with = "serialize_api_date")]
    pub due_date: DateTime<Utc>,
    #[serde(serialize_with = "serialize_api_date")]
    pub scheduled_date: DateTime<Utc>,
}

/// Cuerpo de `PATCH /maintenances/maintenances/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceSchedule {
    pub remarks: String,
    pub parts: Vec<VehiclePart>,
    #[serde(rename = "type")]
    pub maintenance_type: MaintenanceType,
    #[serde(serialize_with = "serialize_api_date")]
    pub due_date: DateTime<Utc>,
    #[serde(serialize_with = "serialize_api_date")]
    pub scheduled_date: DateTime<Utc>,
}
