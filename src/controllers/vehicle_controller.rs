use serde_json::Value;

use crate::dto::board_dto::VehicleBoardView;
use crate::dto::table_dto::TableIntent;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct VehicleController {
    state: AppState,
}

impl VehicleController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn render(&self) -> AppResult<Value> {
        let dashboard = self.state.dashboard.read().await;
        Ok(serde_json::to_value(&VehicleBoardView::build(&dashboard.vehicles))?)
    }

    pub async fn apply_intent(&self, intent: TableIntent) -> AppResult<Value> {
        {
            let mut dashboard = self.state.dashboard.write().await;
            let board = &mut dashboard.vehicles;
            intent.apply(&mut board.view, board.store.records())?;
        }
        self.render().await
    }
}
