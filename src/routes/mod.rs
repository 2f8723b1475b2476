pub mod dashboard_routes;
pub mod maintenance_routes;
pub mod session_routes;
pub mod shipment_routes;
pub mod vehicle_routes;

use axum::Router;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::dto::table_dto::TableIntent;
use crate::services::maintenance_form::MaintenanceFormInput;
use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router completo del dashboard con trazas, compresión y CORS
pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .merge(dashboard_routes::create_dashboard_router())
        .nest("/api/shipments", shipment_routes::create_shipment_router())
        .nest("/api/maintenances", maintenance_routes::create_maintenance_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/session", session_routes::create_session_router())
        .nest("/api/notifications", session_routes::create_notification_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

/// Las acciones de tabla mal formadas son un 400, no un 422
pub(crate) fn parse_intent(body: Value) -> Result<TableIntent, AppError> {
    serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("invalid table intent: {}", e)))
}

/// Un formulario con tipos equivocados también es un 400 con el cuerpo de error común
pub(crate) fn parse_form(body: Value) -> Result<MaintenanceFormInput, AppError> {
    serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("invalid maintenance form: {}", e)))
}
