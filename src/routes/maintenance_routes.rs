use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::form_dto::MaintenanceFormView;
use crate::routes::{parse_form, parse_intent};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_maintenances))
        .route("/refresh", post(refresh_maintenances))
        .route("/intent", post(apply_intent))
        .route("/dialogs/close", post(close_dialogs))
        .route("/cancellation/confirm", post(confirm_cancellation))
        .route("/edit/form", get(edit_form))
        .route("/update", post(submit_update))
        .route("/:id/details", post(open_details))
        .route("/:id/cancel", post(open_cancellation))
}

async fn get_maintenances(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = MaintenanceController::new(state);
    Ok(Json(controller.render().await?))
}

async fn refresh_maintenances(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = MaintenanceController::new(state);
    Ok(Json(controller.refresh().await?))
}

async fn apply_intent(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let controller = MaintenanceController::new(state);
    Ok(Json(controller.apply_intent(parse_intent(body)?).await?))
}

async fn open_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let controller = MaintenanceController::new(state);
    Ok(Json(controller.open_details(&id).await?))
}

async fn open_cancellation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let controller = MaintenanceController::new(state);
    Ok(Json(controller.open_cancellation(&id).await?))
}

async fn close_dialogs(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = MaintenanceController::new(state);
    Ok(Json(controller.close_dialogs().await?))
}

async fn confirm_cancellation(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = MaintenanceController::new(state);
    Ok(Json(controller.confirm_cancellation().await?))
}

async fn edit_form(State(state): State<AppState>) -> Result<Json<MaintenanceFormView>, AppError> {
    let controller = MaintenanceController::new(state);
    Ok(Json(controller.edit_form().await?))
}

async fn submit_update(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = body?;
    let input = parse_form(body)?;
    let controller = MaintenanceController::new(state);
    Ok(Json(controller.submit_update(input).await?))
}
