//! Registro de flota como unión etiquetada
//!
//! Los componentes se pasan registros concretos y hacen `match` en el
//! borde en lugar de inspeccionar la forma del JSON.

use serde::Serialize;

use super::maintenance::Maintenance;
use super::shipment::Shipment;
use super::vehicle::{Vehicle, VehicleSummary};

/// Identificador de registro tal como lo expone el API remoto
pub type RecordId = String;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "lowercase")]
pub enum FleetRecord {
    Shipment(Shipment),
    Vehicle(Vehicle),
    Maintenance(Maintenance),
}

impl FleetRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            FleetRecord::Shipment(_) => "shipment",
            FleetRecord::Vehicle(_) => "vehicle",
            FleetRecord::Maintenance(_) => "maintenance",
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            FleetRecord::Shipment(s) => &s.slug,
            FleetRecord::Vehicle(v) => &v.slug,
            FleetRecord::Maintenance(m) => &m.slug,
        }
    }

    /// Slug del vehículo al que se refiere el registro
    pub fn vehicle_slug(&self) -> &str {
        match self {
            FleetRecord::Shipment(s) => &s.vehicle.slug,
            FleetRecord::Vehicle(v) => &v.slug,
            FleetRecord::Maintenance(m) => &m.vehicle.slug,
        }
    }

    /// Resumen de vehículo embebido; las filas de vehículo no lo llevan
    pub fn vehicle_summary(&self) -> Option<&VehicleSummary> {
        match self {
            FleetRecord::Shipment(s) => Some(&s.vehicle),
            FleetRecord::Maintenance(m) => Some(&m.vehicle),
            FleetRecord::Vehicle(_) => None,
        }
    }
}

/// Acceso uniforme al identificador de fila para las tablas
pub trait TableRecord {
    fn record_id(&self) -> &str;
}

impl TableRecord for Shipment {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl TableRecord for Maintenance {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Los vehículos no tienen id propio en el API; el slug es único
impl TableRecord for Vehicle {
    fn record_id(&self) -> &str {
        &self.slug
    }
}
