use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::dto::board_dto::ShipmentBoardView;
use crate::dto::form_dto::MaintenanceFormView;
use crate::dto::table_dto::TableIntent;
use crate::services::maintenance_form::MaintenanceFormInput;
use crate::state::{AppState, ShipmentBoard};
use crate::utils::errors::AppResult;

pub struct ShipmentController {
    state: AppState,
}

impl ShipmentController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn render(&self) -> AppResult<Value> {
        let dashboard = self.state.dashboard.read().await;
        let view = ShipmentBoardView::build(&dashboard.shipments, self.state.gateway.pending_flags());
        Ok(serde_json::to_value(&view)?)
    }

    pub async fn refresh(&self) -> AppResult<Value> {
        self.state.refresh_shipments().await?;
        self.render().await
    }

    pub async fn apply_intent(&self, intent: TableIntent) -> AppResult<Value> {
        {
            let mut dashboard = self.state.dashboard.write().await;
            let board = &mut dashboard.shipments;
            intent.apply(&mut board.view, board.store.records())?;
        }
        self.render().await
    }

    async fn with_board<F>(&self, change: F) -> AppResult<Value>
    where
        F: FnOnce(&mut ShipmentBoard) -> AppResult<()>,
    {
        {
            let mut dashboard = self.state.dashboard.write().await;
            change(&mut dashboard.shipments)?;
        }
        self.render().await
    }

    pub async fn open_details(&self, id: &str) -> AppResult<Value> {
        self.with_board(|board| board.open_details(id)).await
    }

    pub async fn open_schedule(&self, id: &str) -> AppResult<Value> {
        self.with_board(|board| board.open_schedule(id)).await
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

    /// Cancela el envío del diálogo de confirmación y vuelve a pedir la lista
    pub async fn confirm_cancellation(&self) -> AppResult<Value> {
        let id = self.state.dashboard.read().await.shipments.cancellation_target()?;

        self.state.gateway.cancel_shipment(&id).await?;
        info!("🗑️ Envío {} cancelado", id);

        self.state.dashboard.write().await.shipments.close_dialogs();
        if let Err(e) = self.state.refresh_shipments().await {
            warn!("⚠️ Lista de envíos no refrescada tras cancelar: {}", e);
        }
        self.render().await
    }

    pub async fn schedule_form(&self) -> AppResult<MaintenanceFormView> {
        let context = self.state.dashboard.read().await.shipments.schedule_context()?;
        Ok(MaintenanceFormView::build(&context, Utc::now().date_naive()))
    }

    /// Programa un mantenimiento para el vehículo del envío. No refresca listas.
    pub async fn submit_schedule(&self, input: MaintenanceFormInput) -> AppResult<Value> {
        let context = self.state.dashboard.read().await.shipments.schedule_context()?;

        context.submit(input, &self.state.gateway).await?;

        self.state.dashboard.write().await.shipments.close_dialogs();
        self.render().await
    }
}
