//! Modelo de Shipment
//!
//! Envíos tal como los devuelve `GET /shipments/shipments`. Solo lectura,
//! salvo la cancelación.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::vehicle::{VehicleKind, VehicleSummary};

/// Estado del envío
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShipmentStatus {
    Pending,
    Delivering,
    Delivered,
    Delayed,
    Cancelled,
    Other(String),
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ShipmentStatus::Pending => "pending",
            ShipmentStatus::Delivering => "delivering",
            ShipmentStatus::Delivered => "delivered",
            ShipmentStatus::Delayed => "delayed",
            ShipmentStatus::Cancelled => "cancelled",
            ShipmentStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for ShipmentStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => ShipmentStatus::Pending,
            "delivering" => ShipmentStatus::Delivering,
            "delivered" => ShipmentStatus::Delivered,
            "delayed" => ShipmentStatus::Delayed,
            "cancelled" | "canceled" => ShipmentStatus::Cancelled,
            _ => ShipmentStatus::Other(raw),
        }
    }
}

impl From<ShipmentStatus> for String {
    fn from(status: ShipmentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extremo de una ruta (origen o destino)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub time: Option<String>,
}

/// Ruta del envío
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FromTo {
    #[serde(default)]
    pub from: RouteStop,
    #[serde(default)]
    pub to: RouteStop,
}

/// Envío principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub shipment_id: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub weight_unit: Option<String>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    pub status: ShipmentStatus,
    #[serde(default)]
    pub from_to: FromTo,
    #[serde(default)]
    pub courier_type: Option<String>,
    #[serde(default)]
    pub courier_name: Option<String>,
    #[serde(default)]
    pub eta: Option<String>,
    pub vehicle: VehicleSummary,
}

impl Shipment {
    pub fn vehicle_kind(&self) -> VehicleKind {
        VehicleKind::from_type(
            self.vehicle_type
                .as_deref()
                .or(self.vehicle.vehicle_type.as_deref()),
        )
    }
}
