//! Pasarela de mutaciones
//!
//! Ejecuta las llamadas de escritura contra el API de flota y publica el
//! aviso correspondiente. Nunca modifica el estado local: cerrar diálogos y
//! refrescar listas es cosa del controlador, después de que esto termine.
//! Solo puede haber una mutación en vuelo por tipo.

use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::FleetApi;
use crate::models::{CreateMaintenanceSchedule, UpdateMaintenanceSchedule};
use crate::services::notification_service::NotificationCenter;
use crate::utils::errors::{AppError, AppResult};

const REVERT_HINT: &str = "If you wish to revert this, please contact support";
const RETRY_HINT: &str = "Please try again later";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MutationKind {
    CancelShipment,
    CreateMaintenance,
    UpdateMaintenance,
    CancelMaintenance,
}

struct MutationMessages {
    success_title: &'static str,
    success_description: Option<&'static str>,
    failure_title: &'static str,
    failure_description: Option<&'static str>,
}

impl MutationKind {
    fn slot(self) -> usize {
        match self {
            MutationKind::CancelShipment => 0,
            MutationKind::CreateMaintenance => 1,
            MutationKind::UpdateMaintenance => 2,
            MutationKind::CancelMaintenance => 3,
        }
    }

    fn messages(self) -> MutationMessages {
        match self {
            MutationKind::CancelShipment => MutationMessages {
                success_title: "Shipment cancelled successfully",
                success_description: Some(REVERT_HINT),
                failure_title: "Failed to cancel shipment",
                failure_description: Some(RETRY_HINT),
            },
            MutationKind::CancelMaintenance => MutationMessages {
                success_title: "Maintenance cancelled successfully",
                success_description: Some(REVERT_HINT),
                failure_title: "Failed to cancel maintenance",
                failure_description: Some(RETRY_HINT),
            },
            MutationKind::CreateMaintenance | MutationKind::UpdateMaintenance => MutationMessages {
                success_title: "Maintenance scheduled successfully",
                success_description: None,
                failure_title: "Failed to schedule maintenance",
                failure_description: None,
            },
        }
    }
}

/// Banderas de "en curso" para que la interfaz deshabilite sus botones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingFlags {
    pub cancel_shipment: bool,
    pub create_maintenance: bool,
    pub update_maintenance: bool,
    pub cancel_maintenance: bool,
}

/// Libera la bandera al terminar, incluso si la llamada falla
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct MutationGateway {
    api: Arc<dyn FleetApi>,
    notifications: Arc<NotificationCenter>,
    pending: [AtomicBool; 4],
}

impl MutationGateway {
    pub fn new(api: Arc<dyn FleetApi>, notifications: Arc<NotificationCenter>) -> Self {
        Self {
            api,
            notifications,
            pending: Default::default(),
        }
    }

    pub fn is_pending(&self, kind: MutationKind) -> bool {
        self.pending[kind.slot()].load(Ordering::Acquire)
    }

    pub fn pending_flags(&self) -> PendingFlags {
        PendingFlags {
            cancel_shipment: self.is_pending(MutationKind::CancelShipment),
            create_maintenance: self.is_pending(MutationKind::CreateMaintenance),
            update_maintenance: self.is_pending(MutationKind::UpdateMaintenance),
            cancel_maintenance: self.is_pending(MutationKind::CancelMaintenance),
        }
    }

    fn begin(&self, kind: MutationKind) -> AppResult<PendingGuard<'_>> {
        let flag = &self.pending[kind.slot()];
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                warn!("⏳ {:?} ya está en curso", kind);
                AppError::Conflict("mutation already in progress".to_string())
            })?;
        Ok(PendingGuard(flag))
    }

    async fn run<F>(&self, kind: MutationKind, call: F) -> AppResult<()>
    where
        F: Future<Output = AppResult<()>>,
    {
        let _guard = self.begin(kind)?;
        let messages = kind.messages();

        match call.await {
            Ok(()) => {
                info!("✅ {:?} completada", kind);
                self.notifications
                    .success(messages.success_title, messages.success_description)
                    .await;
                Ok(())
            }
            Err(e) => {
                error!("❌ {:?} falló: {}", kind, e);
                self.notifications
                    .error(messages.failure_title, messages.failure_description)
                    .await;
                Err(e)
            }
        }
    }

    pub async fn cancel_shipment(&self, id: &str) -> AppResult<()> {
        self.run(MutationKind::CancelShipment, self.api.cancel_shipment(id))
            .await
    }

    pub async fn create_maintenance(&self, body: &CreateMaintenanceSchedule) -> AppResult<()> {
        self.run(MutationKind::CreateMaintenance, self.api.create_maintenance(body))
            .await
    }

    pub async fn update_maintenance(&self, id: &str, body: &UpdateMaintenanceSchedule) -> AppResult<()> {
        self.run(MutationKind::UpdateMaintenance, self.api.update_maintenance(id, body))
            .await
    }

    pub async fn cancel_maintenance(&self, id: &str) -> AppResult<()> {
        self.run(MutationKind::CancelMaintenance, self.api.cancel_maintenance(id))
            .await
    }
}
