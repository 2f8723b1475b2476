use serde_json::Value;
use tracing::{info, warn};

use crate::dto::board_dto::DashboardView;
use crate::models::AnalyticsCard;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct DashboardController {
    state: AppState,
}

impl DashboardController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Carga analytics, envíos y mantenimientos en paralelo.
    ///
    /// Una lista que falla queda marcada como `failed` con su copia anterior;
    /// el resto del dashboard se pinta igual.
    pub async fn load(&self) -> AppResult<Value> {
        let (analytics, shipments, maintenances) = futures::join!(
            self.state.refresh_analytics(),
            self.state.refresh_shipments(),
            self.state.refresh_maintenances()
        );

        if let Err(e) = analytics {
            warn!("⚠️ Analytics no disponibles: {}", e);
        }
        if shipments.is_ok() && maintenances.is_ok() {
            info!("📊 Dashboard cargado");
        }

        let dashboard = self.state.dashboard.read().await;
        let view = DashboardView::build(&dashboard, self.state.gateway.pending_flags());
        Ok(serde_json::to_value(&view)?)
    }

    pub async fn analytics(&self) -> AppResult<Vec<AnalyticsCard>> {
        Ok(self.state.refresh_analytics().await?.cards())
    }
}
