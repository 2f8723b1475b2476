//! Modelo de vista tabular
//!
//! Orden multi-clave estable, filtros por columna, visibilidad, paginación
//! en cliente y selección única sobre un conjunto de registros en memoria.

pub mod column;
pub mod fleet_columns;
pub mod store;
pub mod view;

pub use column::{CellValue, ColumnDef, ColumnKind};
pub use store::{FetchStatus, RecordStore, StoreInfo};
pub use view::{Projection, RenderedTable, SortDirection, SortKey, TableState, TableView, NO_RESULTS};
