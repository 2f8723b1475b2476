use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use crate::controllers::vehicle_controller::VehicleController;
use crate::routes::parse_intent;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/intent", post(apply_intent))
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = VehicleController::new(state);
    Ok(Json(controller.render().await?))
}

async fn apply_intent(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let controller = VehicleController::new(state);
    Ok(Json(controller.apply_intent(parse_intent(body)?).await?))
}
