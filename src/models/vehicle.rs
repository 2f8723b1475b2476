//! Modelo de Vehicle
//!
//! Este módulo contiene el resumen de vehículo que embeben los envíos y
//! mantenimientos, su estado de salud por subsistema y la fila derivada
//! que alimenta la tabla de vehículos.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::shipment::Shipment;

/// Nivel cualitativo de salud de un subsistema.
///
/// Los niveles desconocidos se conservan tal cual llegan del servidor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HealthLevel {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
    Other(String),
}

impl HealthLevel {
    pub fn as_str(&self) -> &str {
        match self {
            HealthLevel::Excellent => "Excellent",
            HealthLevel::Good => "Good",
            HealthLevel::Fair => "Fair",
            HealthLevel::Poor => "Poor",
            HealthLevel::Critical => "Critical",
            HealthLevel::Other(raw) => raw,
        }
    }
}

impl From<String> for HealthLevel {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "excellent" => HealthLevel::Excellent,
            "good" => HealthLevel::Good,
            "fair" => HealthLevel::Fair,
            "poor" => HealthLevel::Poor,
            "critical" => HealthLevel::Critical,
            _ => HealthLevel::Other(raw),
        }
    }
}

impl From<HealthLevel> for String {
    fn from(level: HealthLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Salud del vehículo por subsistema.
///
/// `overall` y `total` los calcula el servidor; nunca se recalculan aquí.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleHealth {
    pub overall: Option<HealthLevel>,
    pub engine: Option<HealthLevel>,
    pub transmission: Option<HealthLevel>,
    pub brakes: Option<HealthLevel>,
    pub tires: Option<HealthLevel>,
    pub fuel: Option<HealthLevel>,
    pub maintenance: Option<HealthLevel>,
    pub parts: Option<HealthLevel>,
    pub total: Option<HealthLevel>,
}

/// Tipo de vehículo para la imagen de la tarjeta de detalle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Truck,
    Van,
}

impl VehicleKind {
    /// Todo lo que no sea `truck` se muestra como furgoneta
    pub fn from_type(vehicle_type: Option<&str>) -> Self {
        match vehicle_type {
            Some(t) if t.trim().eq_ignore_ascii_case("truck") => VehicleKind::Truck,
            _ => VehicleKind::Van,
        }
    }
}

/// Referencia de vehículo embebida en envíos y mantenimientos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub vehicle_health: VehicleHealth,
}

/// Fila de la tabla de vehículos, derivada de los envíos en curso
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub slug: String,
    pub name: String,
    pub vehicle_type: Option<String>,
    pub kind: VehicleKind,
    pub health: VehicleHealth,
    pub shipment_slug: String,
    pub driver_name: String,
    pub status: String,
}

impl Vehicle {
    /// Una fila por slug de vehículo distinto, en el orden de los envíos
    pub fn from_shipments(shipments: &[Shipment]) -> Vec<Vehicle> {
        let mut seen = HashSet::new();
        shipments
            .iter()
            .filter(|s| seen.insert(s.vehicle.slug.clone()))
            .map(|s| Vehicle {
                slug: s.vehicle.slug.clone(),
                name: s.vehicle.name.clone(),
                vehicle_type: s
                    .vehicle_type
                    .clone()
                    .or_else(|| s.vehicle.vehicle_type.clone()),
                kind: s.vehicle_kind(),
                health: s.vehicle.vehicle_health.clone(),
                shipment_slug: s.slug.clone(),
                driver_name: s.driver_name.clone(),
                status: s.status.to_string(),
            })
            .collect()
    }
}
