#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use fleet_dashboard::clients::FleetApi;
use fleet_dashboard::config::EnvironmentConfig;
use fleet_dashboard::models::{
    AnalyticsSnapshot, CreateMaintenanceSchedule, Maintenance, Shipment, UpdateMaintenanceSchedule,
};
use fleet_dashboard::services::session_service::{MemoryPersistence, SessionManager};
use fleet_dashboard::utils::errors::{AppError, AppResult};
use fleet_dashboard::{create_router, AppState};

/// Llamada registrada por el API falso; los cuerpos se guardan ya serializados
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    FetchAnalytics,
    FetchShipments,
    CancelShipment(String),
    FetchMaintenances,
    CreateMaintenance(Value),
    UpdateMaintenance(String, Value),
    CancelMaintenance(String),
}

impl ApiCall {
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            ApiCall::FetchAnalytics | ApiCall::FetchShipments | ApiCall::FetchMaintenances
        )
    }
}

/// API de flota en memoria que registra cada llamada
#[derive(Default)]
pub struct RecordingFleetApi {
    calls: Mutex<Vec<ApiCall>>,
    shipments: Mutex<Vec<Shipment>>,
    maintenances: Mutex<Vec<Maintenance>>,
    analytics: Mutex<AnalyticsSnapshot>,
    fail_mutations: AtomicBool,
    fail_reads: AtomicBool,
    /// Mientras esté tomado, las mutaciones quedan bloqueadas
    pub gate: tokio::sync::Mutex<()>,
}

impl RecordingFleetApi {
    pub fn new(shipments: Vec<Shipment>, maintenances: Vec<Maintenance>) -> Self {
        Self {
            shipments: Mutex::new(shipments),
            maintenances: Mutex::new(maintenances),
            analytics: Mutex::new(AnalyticsSnapshot {
                total_vehicles: 12,
                total_maintenance: 3,
                total_shipments: 40,
                total_dead: 1,
            }),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<ApiCall> {
        self.calls().into_iter().filter(ApiCall::is_mutation).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn read_result(&self, endpoint: &str) -> AppResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::ExternalApi {
                status: 500,
                endpoint: endpoint.to_string(),
            });
        }
        Ok(())
    }

    async fn mutation_result(&self, endpoint: &str) -> AppResult<()> {
        let _open = self.gate.lock().await;
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(AppError::ExternalApi {
                status: 500,
                endpoint: endpoint.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FleetApi for RecordingFleetApi {
    async fn fetch_analytics(&self) -> AppResult<AnalyticsSnapshot> {
        self.record(ApiCall::FetchAnalytics);
        self.read_result("/shipments/analytics/")?;
        Ok(*self.analytics.lock().unwrap())
    }

    async fn fetch_shipments(&self) -> AppResult<Vec<Shipment>> {
        self.record(ApiCall::FetchShipments);
        self.read_result("/shipments/shipments")?;
        Ok(self.shipments.lock().unwrap().clone())
    }

    async fn cancel_shipment(&self, id: &str) -> AppResult<()> {
        self.record(ApiCall::CancelShipment(id.to_string()));
        self.mutation_result("/shipments/shipments").await?;
        self.shipments.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    async fn fetch_maintenances(&self) -> AppResult<Vec<Maintenance>> {
        self.record(ApiCall::FetchMaintenances);
        self.read_result("/maintenances/maintenances")?;
        Ok(self.maintenances.lock().unwrap().clone())
    }

    async fn create_maintenance(&self, body: &CreateMaintenanceSchedule) -> AppResult<()> {
        self.record(ApiCall::CreateMaintenance(serde_json::to_value(body).unwrap()));
        self.mutation_result("/maintenances/maintenances").await
    }

    async fn update_maintenance(&self, id: &str, body: &UpdateMaintenanceSchedule) -> AppResult<()> {
        self.record(ApiCall::UpdateMaintenance(
            id.to_string(),
            serde_json::to_value(body).unwrap(),
        ));
        self.mutation_result("/maintenances/maintenances").await
    }

    async fn cancel_maintenance(&self, id: &str) -> AppResult<()> {
        self.record(ApiCall::CancelMaintenance(id.to_string()));
        self.mutation_result("/maintenances/maintenances").await?;
        self.maintenances.lock().unwrap().retain(|m| m.id != id);
        Ok(())
    }
}

pub fn shipment(id: &str, slug: &str, vehicle_slug: &str) -> Shipment {
    serde_json::from_value(json!({
        "id": id,
        "slug": slug,
        "driverName": format!("Driver {}", id),
        "weight": 1200.5,
        "weightUnit": "kg",
        "vehicleType": "truck",
        "status": "delivering",
        "fromTo": {
            "from": { "name": "Madrid", "time": "2024-11-15T08:00:00Z" },
            "to": { "name": "Lyon", "time": "2024-11-16T18:00:00Z" }
        },
        "courierType": "express",
        "eta": "2024-11-16T18:00:00Z",
        "vehicle": {
            "name": format!("Volvo {}", vehicle_slug),
            "slug": vehicle_slug,
            "vehicleType": "truck",
            "vehicleHealth": {
                "overall": "Good",
                "engine": "Excellent",
                "transmission": "Good",
                "tires": "Fair",
                "fuel": "Good"
            }
        }
    }))
    .unwrap()
}

pub fn maintenance(id: &str, slug: &str, due: &str, scheduled: &str) -> Maintenance {
    serde_json::from_value(json!({
        "id": id,
        "slug": slug,
        "remarks": format!("remarks {}", id),
        "status": "pending",
        "type": "annual",
        "parts": ["engine"],
        "vehicle": { "name": "Volvo FH", "slug": format!("VH-{}", id) },
        "dueDate": due,
        "scheduledDate": scheduled
    }))
    .unwrap()
}

pub fn default_shipments() -> Vec<Shipment> {
    vec![
        shipment("s-1", "SHP-001", "VH-1"),
        shipment("s-2", "SHP-002", "VH-2"),
        shipment("s-3", "SHP-003", "VH-1"),
    ]
}

pub fn default_maintenances() -> Vec<Maintenance> {
    vec![
        maintenance("m-1", "MNT-001", "2024-11-20", "2024-11-10"),
        maintenance("m-2", "MNT-002", "2024-11-15", "2024-11-12"),
    ]
}

pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig::from_lookup(|key| match key {
        "FLEET_API_URL" => Some("http://fleet.test".to_string()),
        "ENVIRONMENT" => Some("test".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn test_state(api: Arc<RecordingFleetApi>) -> AppState {
    let session = Arc::new(SessionManager::new(Box::new(MemoryPersistence::default())));
    AppState::new(test_config(), api, session)
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub api: Arc<RecordingFleetApi>,
}

impl TestApp {
    pub fn new(api: RecordingFleetApi) -> Self {
        let api = Arc::new(api);
        let state = test_state(api.clone());
        Self {
            router: create_router(state.clone()),
            state,
            api,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(RecordingFleetApi::new(default_shipments(), default_maintenances()))
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::POST, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Carga el dashboard completo y olvida las llamadas de lectura
    pub async fn loaded(self) -> Self {
        let (status, _) = self.get("/api/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        self.api.clear_calls();
        self
    }
}

/// Slugs de las filas de una tabla renderizada, en orden
pub fn row_slugs(board: &Value) -> Vec<String> {
    board["table"]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["record"]["slug"].as_str().unwrap().to_string())
        .collect()
}
