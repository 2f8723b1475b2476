use serde::Deserialize;

use crate::models::TableRecord;
use crate::table::{SortKey, TableView};
use crate::utils::errors::AppResult;

/// Acción del usuario sobre una tabla, etiquetada por `action`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum TableIntent {
    Sort {
        sorting: Vec<SortKey>,
    },
    ToggleSort {
        column: String,
        #[serde(default)]
        multi: bool,
    },
    Filter {
        column: String,
        #[serde(default)]
        value: String,
    },
    Visibility {
        column: String,
        visible: bool,
    },
    NextPage,
    PreviousPage,
    GoToPage {
        #[serde(rename = "pageIndex")]
        page_index: usize,
    },
    PageSize {
        #[serde(rename = "pageSize")]
        page_size: usize,
    },
    Select {
        id: String,
    },
    ClearSelection,
}

impl TableIntent {
    /// Aplica la acción. Siguiente/anterior deshabilitados no son un error.
    pub fn apply<T: TableRecord>(self, view: &mut TableView<T>, records: &[T]) -> AppResult<()> {
        match self {
            TableIntent::Sort { sorting } => view.set_sorting(sorting),
            TableIntent::ToggleSort { column, multi } => view.toggle_sort(&column, multi),
            TableIntent::Filter { column, value } => view.set_filter(&column, &value),
            TableIntent::Visibility { column, visible } => view.set_column_visibility(&column, visible),
            TableIntent::NextPage => {
                view.next_page(records);
                Ok(())
            }
            TableIntent::PreviousPage => {
                view.previous_page();
                Ok(())
            }
            TableIntent::GoToPage { page_index } => view.go_to_page(page_index, records),
            TableIntent::PageSize { page_size } => view.set_page_size(page_size),
            TableIntent::Select { id } => view.toggle_selection(&id, records),
            TableIntent::ClearSelection => {
                view.clear_selection();
                Ok(())
            }
        }
    }
}
