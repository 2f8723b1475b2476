use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::session_controller::{NotificationController, SessionController};
use crate::dto::response_dto::ApiResponse;
use crate::dto::session_dto::{LoginRequest, SessionResponse};
use crate::services::notification_service::Notification;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_session_router() -> Router<AppState> {
    Router::new()
        .route("/", get(current_session))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub fn create_notification_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/:id", delete(dismiss_notification))
}

async fn current_session(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let controller = SessionController::new(state.session.clone());
    Ok(Json(controller.current()?))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    let controller = SessionController::new(state.session.clone());
    let response = controller.login(request)?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Session started".to_string(),
    )))
}

async fn logout(State(state): State<AppState>) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = SessionController::new(state.session.clone());
    controller.logout()?;
    Ok(Json(ApiResponse::message("Session closed".to_string())))
}

async fn list_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    let controller = NotificationController::new(state.notifications.clone());
    Json(controller.list().await)
}

async fn dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = NotificationController::new(state.notifications.clone());
    controller.dismiss(id).await?;
    Ok(Json(ApiResponse::message("Notification dismissed".to_string())))
}
