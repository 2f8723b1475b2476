//! Notificaciones transitorias ("toasts")
//!
//! Cola acotada de avisos de éxito y error que la interfaz pinta y descarta.
//! Nunca contiene el payload de un error remoto, solo textos genéricos.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const MAX_NOTIFICATIONS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct NotificationCenter {
    queue: RwLock<VecDeque<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    async fn push(&self, level: NotificationLevel, title: &str, description: Option<&str>) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4(),
            level,
            title: title.to_string(),
            description: description.map(str::to_string),
            created_at: Utc::now(),
        };
        let mut queue = self.queue.write().await;
        if queue.len() >= MAX_NOTIFICATIONS {
            queue.pop_front();
        }
        queue.push_back(notification.clone());
        notification
    }

    pub async fn success(&self, title: &str, description: Option<&str>) -> Notification {
        self.push(NotificationLevel::Success, title, description).await
    }

    pub async fn error(&self, title: &str, description: Option<&str>) -> Notification {
        self.push(NotificationLevel::Error, title, description).await
    }

    pub async fn list(&self) -> Vec<Notification> {
        self.queue.read().await.iter().cloned().collect()
    }

    /// Devuelve `false` si el aviso ya no existía
    pub async fn dismiss(&self, id: Uuid) -> bool {
        let mut queue = self.queue.write().await;
        let before = queue.len();
        queue.retain(|n| n.id != id);
        queue.len() != before
    }
}
