use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::controllers::dashboard_controller::DashboardController;
use crate::models::AnalyticsCard;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/dashboard", get(load_dashboard))
        .route("/api/analytics", get(get_analytics))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet_dashboard",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn load_dashboard(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = DashboardController::new(state);
    Ok(Json(controller.load().await?))
}

async fn get_analytics(State(state): State<AppState>) -> Result<Json<Vec<AnalyticsCard>>, AppError> {
    let controller = DashboardController::new(state);
    Ok(Json(controller.analytics().await?))
}
