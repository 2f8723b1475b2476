//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El estado del dashboard vive detrás de un
//! único `RwLock`, que nunca se mantiene durante una llamada remota.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::clients::FleetApi;
use crate::config::environment::EnvironmentConfig;
use crate::models::{AnalyticsSnapshot, Maintenance, Shipment, Vehicle};
use crate::services::maintenance_form::FormContext;
use crate::services::mutation_gateway::MutationGateway;
use crate::services::notification_service::NotificationCenter;
use crate::services::session_service::SessionManager;
use crate::table::fleet_columns::{maintenance_columns, shipment_columns, vehicle_columns};
use crate::table::{FetchStatus, RecordStore, TableView};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Diálogos de la lista de envíos
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDialogs {
    pub editing: Option<Shipment>,
    pub details_open: bool,
    pub schedule_open: bool,
    pub cancellation_open: bool,
}

/// Diálogos de la lista de mantenimientos
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceDialogs {
    pub editing: Option<Maintenance>,
    pub details_open: bool,
    pub cancellation_open: bool,
}

#[derive(Debug)]
pub struct ShipmentBoard {
    pub store: RecordStore<Shipment>,
    pub view: TableView<Shipment>,
    pub dialogs: ShipmentDialogs,
}

impl ShipmentBoard {
    pub fn new(page_size: usize) -> Self {
        Self {
            store: RecordStore::new(),
            view: TableView::new(shipment_columns(), page_size),
            dialogs: ShipmentDialogs::default(),
        }
    }

    pub fn replace(&mut self, records: Vec<Shipment>) {
        self.store.replace(records);
        self.view.reconcile(self.store.records());
    }

    fn editing(&self, id: &str) -> AppResult<Shipment> {
        self.store
            .find(id)
            .cloned()
            .ok_or_else(|| not_found_error("Shipment", id))
    }

    /// Abre el detalle (diálogo en móvil) y selecciona la fila
    pub fn open_details(&mut self, id: &str) -> AppResult<()> {
        let shipment = self.editing(id)?;
        self.view.select(id, self.store.records())?;
        self.dialogs.editing = Some(shipment);
        self.dialogs.details_open = true;
        Ok(())
    }

    pub fn open_schedule(&mut self, id: &str) -> AppResult<()> {
        self.dialogs.editing = Some(self.editing(id)?);
        self.dialogs.schedule_open = true;
        Ok(())
    }

    pub fn open_cancellation(&mut self, id: &str) -> AppResult<()> {
        self.dialogs.editing = Some(self.editing(id)?);
        self.dialogs.cancellation_open = true;
        Ok(())
    }

    pub fn close_dialogs(&mut self) {
        self.dialogs = ShipmentDialogs::default();
    }

    pub fn close_schedule(&mut self) {
        self.dialogs.schedule_open = false;
    }

    pub fn schedule_context(&self) -> AppResult<FormContext> {
        match (&self.dialogs.editing, self.dialogs.schedule_open) {
            (Some(shipment), true) => Ok(FormContext::Schedule(shipment.clone())),
            _ => Err(AppError::BadRequest("no schedule dialog is open".to_string())),
        }
    }

    pub fn cancellation_target(&self) -> AppResult<String> {
        match (&self.dialogs.editing, self.dialogs.cancellation_open) {
            (Some(shipment), true) => Ok(shipment.id.clone()),
            _ => Err(AppError::BadRequest("no shipment cancellation is pending".to_string())),
        }
    }
}

#[derive(Debug)]
pub struct MaintenanceBoard {
    pub store: RecordStore<Maintenance>,
    pub view: TableView<Maintenance>,
    pub dialogs: MaintenanceDialogs,
}

impl MaintenanceBoard {
    pub fn new(page_size: usize) -> Self {
        Self {
            store: RecordStore::new(),
            view: TableView::new(maintenance_columns(), page_size),
            dialogs: MaintenanceDialogs::default(),
        }
    }

    pub fn replace(&mut self, records: Vec<Maintenance>) {
        self.store.replace(records);
        self.view.reconcile(self.store.records());
    }

    fn editing(&self, id: &str) -> AppResult<Maintenance> {
        self.store
            .find(id)
            .cloned()
            .ok_or_else(|| not_found_error("Maintenance", id))
    }

    /// Abre el diálogo de edición
    pub fn open_details(&mut self, id: &str) -> AppResult<()> {
        self.dialogs.editing = Some(self.editing(id)?);
        self.dialogs.details_open = true;
        Ok(())
    }

    pub fn open_cancellation(&mut self, id: &str) -> AppResult<()> {
        self.dialogs.editing = Some(self.editing(id)?);
        self.dialogs.cancellation_open = true;
        Ok(())
    }

    pub fn close_dialogs(&mut self) {
        self.dialogs = MaintenanceDialogs::default();
    }

    pub fn edit_context(&self) -> AppResult<FormContext> {
        match (&self.dialogs.editing, self.dialogs.details_open) {
            (Some(maintenance), true) => Ok(FormContext::Edit(maintenance.clone())),
            _ => Err(AppError::BadRequest("no maintenance edit dialog is open".to_string())),
        }
    }

    pub fn cancellation_target(&self) -> AppResult<String> {
        match (&self.dialogs.editing, self.dialogs.cancellation_open) {
            (Some(maintenance), true) => Ok(maintenance.id.clone()),
            _ => Err(AppError::BadRequest("no maintenance cancellation is pending".to_string())),
        }
    }
}

/// Tabla de vehículos, derivada de los envíos
#[derive(Debug)]
pub struct VehicleBoard {
    pub store: RecordStore<Vehicle>,
    pub view: TableView<Vehicle>,
}

impl VehicleBoard {
    pub fn new(page_size: usize) -> Self {
        Self {
            store: RecordStore::new(),
            view: TableView::new(vehicle_columns(), page_size),
        }
    }

    pub fn sync_from(&mut self, shipments: &[Shipment]) {
        self.store.replace(Vehicle::from_shipments(shipments));
        self.view.reconcile(self.store.records());
    }
}

/// Última foto de analytics y cómo terminó el último fetch
#[derive(Debug, Default)]
pub struct AnalyticsPanel {
    pub snapshot: Option<AnalyticsSnapshot>,
    pub status: FetchStatus,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl AnalyticsPanel {
    pub fn replace(&mut self, snapshot: AnalyticsSnapshot) {
        self.snapshot = Some(snapshot);
        self.status = FetchStatus::Ready;
        self.fetched_at = Some(Utc::now());
    }

    /// Un fallo conserva la foto anterior
    pub fn mark_failed(&mut self) {
        self.status = FetchStatus::Failed;
    }
}

#[derive(Debug)]
pub struct DashboardState {
    pub analytics: AnalyticsPanel,
    pub shipments: ShipmentBoard,
    pub maintenances: MaintenanceBoard,
    pub vehicles: VehicleBoard,
}

impl DashboardState {
    pub fn new(page_size: usize) -> Self {
        Self {
            analytics: AnalyticsPanel::default(),
            shipments: ShipmentBoard::new(page_size),
            maintenances: MaintenanceBoard::new(page_size),
            vehicles: VehicleBoard::new(page_size),
        }
    }

    pub fn apply_shipments(&mut self, records: Vec<Shipment>) {
        self.shipments.replace(records);
        self.vehicles.sync_from(self.shipments.store.records());
    }

    pub fn apply_maintenances(&mut self, records: Vec<Maintenance>) {
        self.maintenances.replace(records);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub api: Arc<dyn FleetApi>,
    pub session: Arc<SessionManager>,
    pub notifications: Arc<NotificationCenter>,
    pub gateway: Arc<MutationGateway>,
    pub dashboard: Arc<RwLock<DashboardState>>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, api: Arc<dyn FleetApi>, session: Arc<SessionManager>) -> Self {
        let notifications = Arc::new(NotificationCenter::new());
        let gateway = Arc::new(MutationGateway::new(api.clone(), notifications.clone()));
        let dashboard = Arc::new(RwLock::new(DashboardState::new(config.table_page_size)));
        Self {
            config,
            api,
            session,
            notifications,
            gateway,
            dashboard,
        }
    }

    /// Vuelve a pedir los envíos. Un fallo conserva la copia anterior.
    pub async fn refresh_shipments(&self) -> AppResult<usize> {
        self.dashboard.write().await.shipments.store.mark_loading();
        let result = self.api.fetch_shipments().await;

        let mut dashboard = self.dashboard.write().await;
        match result {
            Ok(records) => {
                let count = records.len();
                dashboard.apply_shipments(records);
                info!("🔄 Envíos actualizados ({})", count);
                Ok(count)
            }
            Err(e) => {
                warn!("⚠️ No se pudieron cargar los envíos: {}", e);
                dashboard.shipments.store.mark_failed();
                Err(e)
            }
        }
    }

    /// Vuelve a pedir los mantenimientos. Un fallo conserva la copia anterior.
    pub async fn refresh_maintenances(&self) -> AppResult<usize> {
        self.dashboard.write().await.maintenances.store.mark_loading();
        let result = self.api.fetch_maintenances().await;

        let mut dashboard = self.dashboard.write().await;
        match result {
            Ok(records) => {
                let count = records.len();
                dashboard.apply_maintenances(records);
                info!("🔄 Mantenimientos actualizados ({})", count);
                Ok(count)
            }
            Err(e) => {
                warn!("⚠️ No se pudieron cargar los mantenimientos: {}", e);
                dashboard.maintenances.store.mark_failed();
                Err(e)
            }
        }
    }

    /// Vuelve a pedir analytics. Un fallo deja el panel en `failed`.
    pub async fn refresh_analytics(&self) -> AppResult<AnalyticsSnapshot> {
        self.dashboard.write().await.analytics.status = FetchStatus::Loading;
        let result = self.api.fetch_analytics().await;

        let mut dashboard = self.dashboard.write().await;
        match result {
            Ok(snapshot) => {
                dashboard.analytics.replace(snapshot);
                Ok(snapshot)
            }
            Err(e) => {
                dashboard.analytics.mark_failed();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shipment(id: &str, vehicle: &str) -> Shipment {
        serde_json::from_value(json!({
            "id": id,
            "slug": format!("SHP-{}", id),
            "driverName": "Lena",
            "status": "delivering",
            "fromTo": { "from": { "name": "Madrid" }, "to": { "name": "Lyon" } },
            "vehicle": { "name": "Volvo FH", "slug": vehicle }
        }))
        .unwrap()
    }

    #[test]
    fn test_open_and_close_shipment_dialogs() {
        let mut board = ShipmentBoard::new(10);
        board.replace(vec![shipment("1", "VH-1"), shipment("2", "VH-2")]);

        board.open_details("2").unwrap();
        assert_eq!(board.view.selected_id(), Some("2"));
        assert!(board.dialogs.details_open);

        board.open_cancellation("1").unwrap();
        assert_eq!(board.cancellation_target().unwrap(), "1");

        board.close_dialogs();
        assert_eq!(board.dialogs, ShipmentDialogs::default());
        assert!(board.cancellation_target().is_err());
        assert!(board.open_schedule("missing").is_err());
    }

    #[test]
    fn test_vehicles_follow_shipments() {
        let mut dashboard = DashboardState::new(10);
        dashboard.apply_shipments(vec![
            shipment("1", "VH-1"),
            shipment("2", "VH-1"),
            shipment("3", "VH-2"),
        ]);
        assert_eq!(dashboard.vehicles.store.records().len(), 2);
    }

    #[test]
    fn test_failed_analytics_keeps_previous_snapshot() {
        let mut panel = AnalyticsPanel::default();
        assert_eq!(panel.status, FetchStatus::Idle);

        let snapshot = AnalyticsSnapshot {
            total_vehicles: 12,
            ..Default::default()
        };
        panel.replace(snapshot);
        panel.mark_failed();
        assert_eq!(panel.status, FetchStatus::Failed);
        assert_eq!(panel.snapshot, Some(snapshot));
    }

    #[test]
    fn test_schedule_context_requires_open_dialog() {
        let mut board = ShipmentBoard::new(10);
        board.replace(vec![shipment("1", "VH-1")]);
        assert!(board.schedule_context().is_err());
        board.open_schedule("1").unwrap();
        assert!(matches!(board.schedule_context(), Ok(FormContext::Schedule(_))));
    }
}
