//! Modelos del sistema
//!
//! Este módulo contiene los registros que devuelve el API de flota y los
//! cuerpos que el dashboard le envía.

pub mod analytics;
pub mod maintenance;
pub mod record;
pub mod shipment;
pub mod user;
pub mod vehicle;

pub use analytics::{AnalyticsCard, AnalyticsSnapshot};
pub use maintenance::{
    CreateMaintenanceSchedule, Maintenance, MaintenanceStatus, MaintenanceType,
    RecordedType, UpdateMaintenanceSchedule, VehiclePart,
};
pub use record::{FleetRecord, RecordId, TableRecord};
pub use shipment::{FromTo, RouteStop, Shipment, ShipmentStatus};
pub use user::{Session, UserProfile};
pub use vehicle::{HealthLevel, Vehicle, VehicleHealth, VehicleKind, VehicleSummary};
