//! Vistas renderizadas de cada tabla del dashboard
//!
//! Se construyen bajo el lock de lectura y se serializan antes de soltarlo.

use serde::Serialize;

use crate::models::{
    AnalyticsCard, HealthLevel, Maintenance, RouteStop, Shipment, Vehicle, VehicleKind,
};
use crate::services::mutation_gateway::PendingFlags;
use crate::state::{
    DashboardState, MaintenanceBoard, MaintenanceDialogs, ShipmentBoard, ShipmentDialogs,
    VehicleBoard,
};
use crate::table::{FetchStatus, RenderedTable, StoreInfo, TableState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCard {
    pub part: &'static str,
    pub label: &'static str,
    pub level: Option<String>,
}

/// Panel de detalle del envío seleccionado
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDetails {
    pub id: String,
    pub slug: String,
    pub vehicle_name: String,
    pub vehicle_kind: VehicleKind,
    pub status: String,
    pub courier_type: Option<String>,
    pub overall_health: Option<String>,
    pub from: RouteStop,
    pub to: RouteStop,
    pub health: Vec<HealthCard>,
}

fn level(value: &Option<HealthLevel>) -> Option<String> {
    value.as_ref().map(|l| l.as_str().to_string())
}

impl From<&Shipment> for ShipmentDetails {
    fn from(shipment: &Shipment) -> Self {
        let health = &shipment.vehicle.vehicle_health;
        Self {
            id: shipment.id.clone(),
            slug: shipment.slug.clone(),
            vehicle_name: shipment.vehicle.name.clone(),
            vehicle_kind: shipment.vehicle_kind(),
            status: shipment.status.to_string(),
            courier_type: shipment.courier_type.clone(),
            overall_health: level(&health.overall),
            from: shipment.from_to.from.clone(),
            to: shipment.from_to.to.clone(),
            health: vec![
                HealthCard { part: "engine", label: "Engine", level: level(&health.engine) },
                HealthCard {
                    part: "transmission",
                    label: "Transmission",
                    level: level(&health.transmission),
                },
                HealthCard { part: "tires", label: "Tires", level: level(&health.tires) },
                HealthCard { part: "fuel", label: "Fuel", level: level(&health.fuel) },
            ],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentBoardView<'a> {
    pub table: RenderedTable<'a, Shipment>,
    pub store: StoreInfo,
    pub state: &'a TableState,
    pub details: Option<ShipmentDetails>,
    pub dialogs: &'a ShipmentDialogs,
    pub pending: PendingFlags,
}

impl<'a> ShipmentBoardView<'a> {
    pub fn build(board: &'a ShipmentBoard, pending: PendingFlags) -> Self {
        let details = board
            .view
            .selected_id()
            .and_then(|id| board.store.find(id))
            .map(ShipmentDetails::from);
        Self {
            table: board.view.render(board.store.records()),
            store: board.store.info(),
            state: board.view.state(),
            details,
            dialogs: &board.dialogs,
            pending,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceBoardView<'a> {
    pub table: RenderedTable<'a, Maintenance>,
    pub store: StoreInfo,
    pub state: &'a TableState,
    pub dialogs: &'a MaintenanceDialogs,
    pub pending: PendingFlags,
}

impl<'a> MaintenanceBoardView<'a> {
    pub fn build(board: &'a MaintenanceBoard, pending: PendingFlags) -> Self {
        Self {
            table: board.view.render(board.store.records()),
            store: board.store.info(),
            state: board.view.state(),
            dialogs: &board.dialogs,
            pending,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleBoardView<'a> {
    pub table: RenderedTable<'a, Vehicle>,
    pub store: StoreInfo,
    pub state: &'a TableState,
}

impl<'a> VehicleBoardView<'a> {
    pub fn build(board: &'a VehicleBoard) -> Self {
        Self {
            table: board.view.render(board.store.records()),
            store: board.store.info(),
            state: board.view.state(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView<'a> {
    /// `None` hasta el primer fetch correcto de analytics
    pub analytics: Option<Vec<AnalyticsCard>>,
    pub analytics_status: FetchStatus,
    pub shipments: ShipmentBoardView<'a>,
    pub maintenances: MaintenanceBoardView<'a>,
}

impl<'a> DashboardView<'a> {
    pub fn build(dashboard: &'a DashboardState, pending: PendingFlags) -> Self {
        Self {
            analytics: dashboard.analytics.snapshot.map(|s| s.cards()),
            analytics_status: dashboard.analytics.status,
            shipments: ShipmentBoardView::build(&dashboard.shipments, pending),
            maintenances: MaintenanceBoardView::build(&dashboard.maintenances, pending),
        }
    }
}
