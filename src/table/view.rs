//! Vista de tabla: orden, filtros, visibilidad, paginación y selección
//!
//! `TableView` solo guarda el estado de la vista. Los registros viven en el
//! `RecordStore` y se pasan en cada proyección, de modo que la proyección es
//! una función pura de (registros, estado).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::column::{compare_cells, CellValue, ColumnDef, ColumnKind};
use crate::models::{RecordId, TableRecord};
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

pub const NO_RESULTS: &str = "No results.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Estado de la vista de una tabla
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    pub sorting: Vec<SortKey>,
    pub filters: BTreeMap<String, String>,
    pub hidden_columns: BTreeSet<String>,
    pub page_index: usize,
    pub page_size: usize,
    pub selected: Option<RecordId>,
}

pub struct TableView<T> {
    columns: Vec<ColumnDef<T>>,
    state: TableState,
}

impl<T> Clone for TableView<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T> std::fmt::Debug for TableView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableView")
            .field("columns", &self.columns)
            .field("state", &self.state)
            .finish()
    }
}

/// Resultado de proyectar los registros con el estado actual
#[derive(Debug)]
pub struct Projection<'a, T> {
    pub rows: Vec<&'a T>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub selected: Option<&'a T>,
    /// La fila seleccionada sobrevive a los filtros actuales
    pub selected_visible: bool,
}

impl<'a, T> Projection<'a, T> {
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }
}

impl<T: TableRecord> TableView<T> {
    pub fn new(columns: Vec<ColumnDef<T>>, page_size: usize) -> Self {
        Self {
            columns,
            state: TableState {
                sorting: Vec::new(),
                filters: BTreeMap::new(),
                hidden_columns: BTreeSet::new(),
                page_index: 0,
                page_size: page_size.max(1),
                selected: None,
            },
        }
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&ColumnDef<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    fn require_column(&self, key: &str) -> AppResult<&ColumnDef<T>> {
        self.column(key)
            .ok_or_else(|| AppError::BadRequest(format!("unknown column '{}'", key)))
    }

    // ----- Orden -----

    /// Reemplaza el orden completo; la primera aparición de una columna gana
    pub fn set_sorting(&mut self, sorting: Vec<SortKey>) -> AppResult<()> {
        let mut seen = BTreeSet::new();
        let mut validated = Vec::with_capacity(sorting.len());
        for key in sorting {
            let column = self.require_column(&key.column)?;
            if !column.sortable {
                return Err(AppError::BadRequest(format!(
                    "column '{}' is not sortable",
                    key.column
                )));
            }
            if seen.insert(key.column.clone()) {
                validated.push(key);
            }
        }
        self.state.sorting = validated;
        Ok(())
    }

    /// Ciclo asc → desc → sin orden. Sin `multi`, las demás claves se descartan.
    pub fn toggle_sort(&mut self, column: &str, multi: bool) -> AppResult<()> {
        let def = self.require_column(column)?;
        if !def.sortable {
            return Err(AppError::BadRequest(format!("column '{}' is not sortable", column)));
        }

        let current = self
            .state
            .sorting
            .iter()
            .find(|k| k.column == column)
            .map(|k| k.direction);
        let next = match current {
            None => Some(SortDirection::Asc),
            Some(SortDirection::Asc) => Some(SortDirection::Desc),
            Some(SortDirection::Desc) => None,
        };

        if !multi {
            self.state.sorting.retain(|k| k.column == column);
        }
        match next {
            Some(direction) => {
                if let Some(key) = self.state.sorting.iter_mut().find(|k| k.column == column) {
                    key.direction = direction;
                } else {
                    self.state.sorting.push(SortKey {
                        column: column.to_string(),
                        direction,
                    });
                }
            }
            None => self.state.sorting.retain(|k| k.column != column),
        }
        Ok(())
    }

    pub fn sort_direction(&self, column: &str) -> Option<SortDirection> {
        self.state
            .sorting
            .iter()
            .find(|k| k.column == column)
            .map(|k| k.direction)
    }

    // ----- Filtros -----

    /// Un valor vacío elimina el filtro. Siempre vuelve a la primera página.
    pub fn set_filter(&mut self, column: &str, value: &str) -> AppResult<()> {
        let def = self.require_column(column)?;
        if !def.filterable {
            return Err(AppError::BadRequest(format!("column '{}' is not filterable", column)));
        }
        let value = value.trim();
        if value.is_empty() {
            self.state.filters.remove(column);
        } else {
            self.state.filters.insert(column.to_string(), value.to_string());
        }
        self.state.page_index = 0;
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.state.page_index = 0;
    }

    // ----- Visibilidad -----

    pub fn set_column_visibility(&mut self, column: &str, visible: bool) -> AppResult<()> {
        let def = self.require_column(column)?;
        if !def.hideable {
            return Err(AppError::BadRequest(format!("column '{}' cannot be hidden", column)));
        }
        if visible {
            self.state.hidden_columns.remove(column);
        } else {
            self.state.hidden_columns.insert(column.to_string());
        }
        Ok(())
    }

    pub fn is_visible(&self, column: &str) -> bool {
        !self.state.hidden_columns.contains(column)
    }

    // ----- Paginación -----

    pub fn set_page_size(&mut self, page_size: usize) -> AppResult<()> {
        if page_size == 0 {
            return Err(bad_request_error("page size must be greater than zero"));
        }
        self.state.page_size = page_size;
        self.state.page_index = 0;
        Ok(())
    }

    /// Devuelve `false` si "siguiente" está deshabilitado
    pub fn next_page(&mut self, records: &[T]) -> bool {
        let filtered = self.filtered_count(records);
        if (self.state.page_index + 1) * self.state.page_size >= filtered {
            return false;
        }
        self.state.page_index += 1;
        true
    }

    /// Devuelve `false` si "anterior" está deshabilitado
    pub fn previous_page(&mut self) -> bool {
        if self.state.page_index == 0 {
            return false;
        }
        self.state.page_index -= 1;
        true
    }

    pub fn go_to_page(&mut self, page_index: usize, records: &[T]) -> AppResult<()> {
        let page_count = page_count(self.filtered_count(records), self.state.page_size);
        if page_index >= page_count {
            return Err(AppError::BadRequest(format!(
                "page {} out of range (0..{})",
                page_index, page_count
            )));
        }
        self.state.page_index = page_index;
        Ok(())
    }

    // ----- Selección -----

    /// Selecciona `id`; cualquier otra fila deja de estar seleccionada
    pub fn select(&mut self, id: &str, records: &[T]) -> AppResult<()> {
        if !records.iter().any(|r| r.record_id() == id) {
            return Err(not_found_error("Row", id));
        }
        self.state.selected = Some(id.to_string());
        Ok(())
    }

    /// Clic sobre una fila: selecciona, o deselecciona si ya lo estaba
    pub fn toggle_selection(&mut self, id: &str, records: &[T]) -> AppResult<()> {
        if self.state.selected.as_deref() == Some(id) {
            self.state.selected = None;
            return Ok(());
        }
        self.select(id, records)
    }

    pub fn clear_selection(&mut self) {
        self.state.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.state.selected.as_deref()
    }

    /// Ajusta el estado tras reemplazar los registros
    pub fn reconcile(&mut self, records: &[T]) {
        if let Some(id) = self.state.selected.as_deref() {
            if !records.iter().any(|r| r.record_id() == id) {
                self.state.selected = None;
            }
        }
        let pages = page_count(self.filtered_count(records), self.state.page_size);
        if self.state.page_index >= pages {
            self.state.page_index = pages - 1;
        }
    }

    // ----- Proyección -----

    fn passes_filters(&self, record: &T, needles: &[(&ColumnDef<T>, String)]) -> bool {
        needles
            .iter()
            .all(|(column, needle)| column.value(record).matches(needle))
    }

    fn active_filters(&self) -> Vec<(&ColumnDef<T>, String)> {
        self.state
            .filters
            .iter()
            .filter_map(|(key, value)| self.column(key).map(|c| (c, value.to_lowercase())))
            .collect()
    }

    pub fn filtered_count(&self, records: &[T]) -> usize {
        let needles = self.active_filters();
        records
            .iter()
            .filter(|r| self.passes_filters(r, &needles))
            .count()
    }

    fn compare_rows(&self, a: &T, b: &T) -> Ordering {
        for key in &self.state.sorting {
            let Some(column) = self.column(&key.column) else {
                continue;
            };

            let ordering = match column.comparator {
                Some(comparator) => apply_direction(comparator(a, b), key.direction),
                None => {
                    let (va, vb) = (column.value(a), column.value(b));
                    match (va.is_empty(), vb.is_empty()) {
                        (true, true) => Ordering::Equal,
                        // Vacíos al final en ambas direcciones
                        (true, false) => Ordering::Greater,
                        (false, true) => Ordering::Less,
                        (false, false) => apply_direction(compare_cells(&va, &vb), key.direction),
                    }
                }
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Registros filtrados y ordenados (orden estable), sin paginar
    pub fn filtered_sorted<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        let needles = self.active_filters();
        let mut rows: Vec<&T> = records
            .iter()
            .filter(|r| self.passes_filters(r, &needles))
            .collect();
        if !self.state.sorting.is_empty() {
            rows.sort_by(|a, b| self.compare_rows(a, b));
        }
        rows
    }

    pub fn project<'a>(&self, records: &'a [T]) -> Projection<'a, T> {
        let filtered = self.filtered_sorted(records);
        let filtered_count = filtered.len();
        let page_size = self.state.page_size;
        let page_index = self.state.page_index;
        let start = page_index.saturating_mul(page_size).min(filtered_count);
        let end = (start + page_size).min(filtered_count);

        let selected = self
            .state
            .selected
            .as_deref()
            .and_then(|id| records.iter().find(|r| r.record_id() == id));
        let selected_visible = selected
            .map(|s| filtered.iter().any(|r| r.record_id() == s.record_id()))
            .unwrap_or(false);

        Projection {
            rows: filtered[start..end].to_vec(),
            total_count: records.len(),
            filtered_count,
            page_index,
            page_size,
            page_count: page_count(filtered_count, page_size),
            can_previous: page_index > 0,
            can_next: (page_index + 1) * page_size < filtered_count,
            selected,
            selected_visible,
        }
    }

    pub fn render<'a>(&self, records: &'a [T]) -> RenderedTable<'a, T> {
        let projection = self.project(records);
        let visible: Vec<&ColumnDef<T>> = self
            .columns
            .iter()
            .filter(|c| self.is_visible(c.key))
            .collect();

        let columns = self
            .columns
            .iter()
            .map(|c| RenderedColumn {
                key: c.key,
                header: c.header,
                kind: c.kind,
                visible: self.is_visible(c.key),
                sortable: c.sortable,
                filterable: c.filterable,
                hideable: c.hideable,
                sort: self.sort_direction(c.key),
                filter: self.state.filters.get(c.key).cloned(),
            })
            .collect();

        let selected_id = projection.selected.map(|s| s.record_id().to_string());
        let rows = projection
            .rows
            .iter()
            .map(|record| RenderedRow {
                id: record.record_id().to_string(),
                selected: selected_id.as_deref() == Some(record.record_id()),
                cells: visible
                    .iter()
                    .map(|c| RenderedCell {
                        column: c.key,
                        value: c.value(record),
                    })
                    .collect(),
                record: *record,
            })
            .collect();

        let selected_count = usize::from(projection.selected_visible);
        RenderedTable {
            columns,
            rows,
            pagination: PaginationInfo {
                page_index: projection.page_index,
                page_size: projection.page_size,
                page_count: projection.page_count,
                total_count: projection.total_count,
                filtered_count: projection.filtered_count,
                can_previous: projection.can_previous,
                can_next: projection.can_next,
            },
            selection: SelectionInfo {
                selected_id,
                selected_count,
                footer: format!(
                    "{} of {} row(s) selected.",
                    selected_count, projection.filtered_count
                ),
            },
            empty_state: projection.is_empty().then_some(NO_RESULTS),
        }
    }
}

fn apply_direction(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Al menos una página, aunque no haya filas
fn page_count(filtered: usize, page_size: usize) -> usize {
    filtered.div_ceil(page_size.max(1)).max(1)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedColumn {
    pub key: &'static str,
    pub header: &'static str,
    pub kind: ColumnKind,
    pub visible: bool,
    pub sortable: bool,
    pub filterable: bool,
    pub hideable: bool,
    pub sort: Option<SortDirection>,
    pub filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderedCell {
    pub column: &'static str,
    pub value: CellValue,
}

#[derive(Debug, Serialize)]
pub struct RenderedRow<'a, T> {
    pub id: String,
    pub selected: bool,
    pub cells: Vec<RenderedCell>,
    pub record: &'a T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total_count: usize,
    pub filtered_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionInfo {
    pub selected_id: Option<String>,
    pub selected_count: usize,
    pub footer: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedTable<'a, T> {
    pub columns: Vec<RenderedColumn>,
    pub rows: Vec<RenderedRow<'a, T>>,
    pub pagination: PaginationInfo,
    pub selection: SelectionInfo,
    pub empty_state: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Row {
        id: String,
        name: String,
        due: Option<String>,
        weight: Option<f64>,
    }

    impl TableRecord for Row {
        fn record_id(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, name: &str, due: Option<&str>, weight: Option<f64>) -> Row {
        Row {
            id: id.to_string(),
            name: name.to_string(),
            due: due.map(str::to_string),
            weight,
        }
    }

    fn columns() -> Vec<ColumnDef<Row>> {
        vec![
            ColumnDef::text("id", "Id", |r: &Row| CellValue::text(&r.id)).not_hideable(),
            ColumnDef::text("name", "Name", |r: &Row| CellValue::text(&r.name)),
            ColumnDef::date("due", "Due", |r: &Row| CellValue::date(r.due.as_deref())),
            ColumnDef::number("weight", "Weight", |r: &Row| CellValue::number(r.weight))
                .not_filterable(),
        ]
    }

    fn nine_rows() -> Vec<Row> {
        (0..9)
            .map(|i| row(&format!("r{}", i), &format!("name-{}", i), None, Some(i as f64)))
            .collect()
    }

    fn ids<T: TableRecord>(rows: &[&T]) -> Vec<String> {
        rows.iter().map(|r| r.record_id().to_string()).collect()
    }

    #[test]
    fn test_toggle_sort_cycles() {
        let mut view = TableView::new(columns(), 10);
        view.toggle_sort("name", false).unwrap();
        assert_eq!(view.sort_direction("name"), Some(SortDirection::Asc));
        view.toggle_sort("name", false).unwrap();
        assert_eq!(view.sort_direction("name"), Some(SortDirection::Desc));
        view.toggle_sort("name", false).unwrap();
        assert_eq!(view.sort_direction("name"), None);
    }

    #[test]
    fn test_toggle_sort_single_replaces_other_keys() {
        let mut view = TableView::new(columns(), 10);
        view.toggle_sort("name", false).unwrap();
        view.toggle_sort("weight", true).unwrap();
        assert_eq!(view.state().sorting.len(), 2);
        view.toggle_sort("due", false).unwrap();
        assert_eq!(view.state().sorting, vec![SortKey::asc("due")]);
    }

    #[test]
    fn test_set_sorting_rejects_unknown_column() {
        let mut view = TableView::new(columns(), 10);
        assert!(view.set_sorting(vec![SortKey::asc("nope")]).is_err());
    }

    #[test]
    fn test_empty_values_sort_last_both_directions() {
        let records = vec![
            row("a", "a", None, Some(2.0)),
            row("b", "b", None, None),
            row("c", "c", None, Some(1.0)),
        ];
        let mut view = TableView::new(columns(), 10);
        view.set_sorting(vec![SortKey::asc("weight")]).unwrap();
        assert_eq!(ids(&view.filtered_sorted(&records)), vec!["c", "a", "b"]);
        view.set_sorting(vec![SortKey::desc("weight")]).unwrap();
        assert_eq!(ids(&view.filtered_sorted(&records)), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_custom_comparator_is_used() {
        let by_name_len = ColumnDef::text("name", "Name", |r: &Row| CellValue::text(&r.name))
            .with_comparator(|a: &Row, b: &Row| a.name.len().cmp(&b.name.len()));
        let mut view = TableView::new(vec![by_name_len], 10);
        let records = vec![row("1", "ccc", None, None), row("2", "a", None, None)];
        view.set_sorting(vec![SortKey::asc("name")]).unwrap();
        assert_eq!(ids(&view.filtered_sorted(&records)), vec!["2", "1"]);
    }

    #[test]
    fn test_filter_resets_page_and_empty_value_removes() {
        let records = nine_rows();
        let mut view = TableView::new(columns(), 5);
        assert!(view.next_page(&records));
        view.set_filter("name", "NAME-1").unwrap();
        assert_eq!(view.state().page_index, 0);
        assert_eq!(view.filtered_count(&records), 1);
        view.set_filter("name", "  ").unwrap();
        assert!(view.state().filters.is_empty());
    }

    #[test]
    fn test_non_filterable_column_rejected() {
        let mut view = TableView::new(columns(), 5);
        assert!(view.set_filter("weight", "1").is_err());
    }

    #[test]
    fn test_hidden_columns_are_not_rendered() {
        let records = nine_rows();
        let mut view = TableView::new(columns(), 5);
        view.set_column_visibility("name", false).unwrap();
        assert!(view.set_column_visibility("id", false).is_err());
        let rendered = view.render(&records);
        assert!(rendered.rows[0].cells.iter().all(|c| c.column != "name"));
        assert!(!rendered.columns[1].visible);
    }

    #[test]
    fn test_reconcile_drops_stale_selection_and_clamps_page() {
        let mut records = nine_rows();
        let mut view = TableView::new(columns(), 5);
        view.select("r8", &records).unwrap();
        assert!(view.next_page(&records));
        records.truncate(3);
        view.reconcile(&records);
        assert_eq!(view.selected_id(), None);
        assert_eq!(view.state().page_index, 0);
    }

    #[test]
    fn test_select_unknown_row_is_not_found() {
        let records = nine_rows();
        let mut view = TableView::new(columns(), 5);
        assert!(matches!(view.select("zz", &records), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_render_empty_state_and_footer() {
        let records = nine_rows();
        let mut view = TableView::new(columns(), 5);
        view.select("r1", &records).unwrap();
        let rendered = view.render(&records);
        assert_eq!(rendered.selection.footer, "1 of 9 row(s) selected.");
        assert!(rendered.empty_state.is_none());

        view.set_filter("name", "does-not-exist").unwrap();
        let rendered = view.render(&records);
        assert_eq!(rendered.empty_state, Some(NO_RESULTS));
        assert!(rendered.rows.is_empty());
        assert_eq!(rendered.selection.footer, "0 of 0 row(s) selected.");
    }

    #[test]
    fn test_go_to_page_out_of_range() {
        let records = nine_rows();
        let mut view = TableView::new(columns(), 5);
        assert!(view.go_to_page(1, &records).is_ok());
        assert!(view.go_to_page(2, &records).is_err());
        assert!(view.set_page_size(0).is_err());
    }
}
