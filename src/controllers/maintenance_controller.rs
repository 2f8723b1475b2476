use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::dto::board_dto::MaintenanceBoardView;
use crate::dto::form_dto::MaintenanceFormView;
use crate::dto::table_dto::TableIntent;
use crate::services::maintenance_form::MaintenanceFormInput;
use crate::state::{AppState, MaintenanceBoard};
use crate::utils::errors::AppResult;

pub struct MaintenanceController {
    state: AppState,
}

impl MaintenanceController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn render(&self) -> AppResult<Value> {
        let dashboard = self.state.dashboard.read().await;
        let view =
            MaintenanceBoardView::build(&dashboard.maintenances, self.state.gateway.pending_flags());
        Ok(serde_json::to_value(&view)?)
    }

    pub async fn refresh(&self) -> AppResult<Value> {
        self.state.refresh_maintenances().await?;
        self.render().await
    }

    pub async fn apply_intent(&self, intent: TableIntent) -> AppResult<Value> {
        {
            let mut dashboard = self.state.dashboard.write().await;
            let board = &mut dashboard.maintenances;
            intent.apply(&mut board.view, board.store.records())?;
        }
        self.render().await
    }

    async fn with_board<F>(&self, change: F) -> AppResult<Value>
    where
        F: FnOnce(&mut MaintenanceBoard) -> AppResult<()>,
    {
        {
            let mut dashboard = self.state.dashboard.write().await;
            change(&mut dashboard.maintenances)?;
        }
        self.render().await
    }

    pub async fn open_details(&self, id: &str) -> AppResult<Value> {
        self.with_board(|board| board.open_details(id)).await
    }

    pub async fn open_cancellation(&self, id: &str) -> AppResult<Value> {
        self.with_board(|board| board.open_cancellation(id)).await
    }

    pub async fn close_dialogs(&self) -> AppResult<Value> {
        self.with_board(|board| {
            board.close_dialogs();
            Ok(())
        })
        .await
    }

    /// Cancela el mantenimiento, cierra confirmación y edición, y refresca
    pub async fn confirm_cancellation(&self) -> AppResult<Value> {
        let id = self.state.dashboard.read().await.maintenances.cancellation_target()?;

        self.state.gateway.cancel_maintenance(&id).await?;
        info!("🗑️ Mantenimiento {} cancelado", id);

        self.state.dashboard.write().await.maintenances.close_dialogs();
        if let Err(e) = self.state.refresh_maintenances().await {
            warn!("⚠️ Lista de mantenimientos no refrescada tras cancelar: {}", e);
        }
        self.render().await
    }

    pub async fn edit_form(&self) -> AppResult<MaintenanceFormView> {
        let context = self.state.dashboard.read().await.maintenances.edit_context()?;
        Ok(MaintenanceFormView::build(&context, Utc::now().date_naive()))
    }

    pub async fn submit_update(&self, input: MaintenanceFormInput) -> AppResult<Value> {
        let context = self.state.dashboard.read().await.maintenances.edit_context()?;

        context.submit(input, &self.state.gateway).await?;

        self.state.dashboard.write().await.maintenances.close_dialogs();
        self.render().await
    }
}
