use std::sync::Arc;
use uuid::Uuid;

use crate::dto::session_dto::{LoginRequest, SessionResponse};
use crate::services::notification_service::{Notification, NotificationCenter};
use crate::services::session_service::SessionManager;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct SessionController {
    session: Arc<SessionManager>,
}

impl SessionController {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }

    pub fn current(&self) -> AppResult<SessionResponse> {
        self.session
            .current()
            .map(SessionResponse::from)
            .ok_or_else(|| AppError::Unauthorized("no active session".to_string()))
    }

    pub fn login(&self, request: LoginRequest) -> AppResult<SessionResponse> {
        let session = self.session.login(request.user, request.access_token)?;
        Ok(SessionResponse::from(session))
    }

    pub fn logout(&self) -> AppResult<()> {
        self.session.logout()
    }
}

pub struct NotificationController {
    notifications: Arc<NotificationCenter>,
}

impl NotificationController {
    pub fn new(notifications: Arc<NotificationCenter>) -> Self {
        Self { notifications }
    }

    pub async fn list(&self) -> Vec<Notification> {
        self.notifications.list().await
    }

    pub async fn dismiss(&self, id: Uuid) -> AppResult<()> {
        if !self.notifications.dismiss(id).await {
            return Err(not_found_error("Notification", &id.to_string()));
        }
        Ok(())
    }
}
