//! Columnas de tabla y valores de celda
//!
//! Una columna sabe extraer un `CellValue` de un registro y, opcionalmente,
//! trae su propio comparador. Las columnas de fecha comparan por instante,
//! nunca por texto.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::utils::validation::parse_iso_date;

/// Tipo de dato de la columna; decide comparador y filtro por defecto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Number,
    Date,
    List,
}

/// Valor de una celda ya extraído del registro
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
    List(Vec<String>),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn opt_text(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => CellValue::Text(v.to_string()),
            _ => CellValue::Empty,
        }
    }

    pub fn number(value: Option<f64>) -> Self {
        match value {
            Some(v) if !v.is_nan() => CellValue::Number(v),
            _ => CellValue::Empty,
        }
    }

    /// Fecha ISO; las que no se pueden interpretar quedan vacías
    pub fn date(value: Option<&str>) -> Self {
        value
            .and_then(parse_iso_date)
            .map(CellValue::Date)
            .unwrap_or(CellValue::Empty)
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CellValue::List(values.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(t) => t.is_empty(),
            CellValue::List(items) => items.is_empty(),
            CellValue::Number(_) | CellValue::Date(_) => false,
        }
    }

    /// Coincidencia por subcadena sin distinguir mayúsculas.
    /// `needle` debe venir ya en minúsculas.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        match self {
            CellValue::Empty => false,
            CellValue::Text(t) => t.to_lowercase().contains(needle),
            CellValue::Number(n) => n.to_string().contains(needle),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string().contains(needle),
            CellValue::List(items) => items.iter().any(|i| i.to_lowercase().contains(needle)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(t) => f.write_str(t),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Comparador ascendente por defecto entre dos celdas no vacías
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Date(x), CellValue::Date(y)) => {
            x.timestamp_millis().cmp(&y.timestamp_millis())
        }
        (CellValue::Text(x), CellValue::Text(y)) => compare_text(x, y),
        (CellValue::List(x), CellValue::List(y)) => compare_text(&x.join(","), &y.join(",")),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn kind_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Number(_) => 0,
        CellValue::Date(_) => 1,
        CellValue::Text(_) => 2,
        CellValue::List(_) => 3,
        CellValue::Empty => 4,
    }
}

pub type Accessor<T> = fn(&T) -> CellValue;
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Definición de una columna
pub struct ColumnDef<T> {
    pub key: &'static str,
    pub header: &'static str,
    pub kind: ColumnKind,
    pub accessor: Accessor<T>,
    pub sortable: bool,
    pub filterable: bool,
    pub hideable: bool,
    pub comparator: Option<Comparator<T>>,
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            header: self.header,
            kind: self.kind,
            accessor: self.accessor,
            sortable: self.sortable,
            filterable: self.filterable,
            hideable: self.hideable,
            comparator: self.comparator,
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("hideable", &self.hideable)
            .field("custom_comparator", &self.comparator.is_some())
            .finish()
    }
}

impl<T> ColumnDef<T> {
    pub fn new(key: &'static str, header: &'static str, kind: ColumnKind, accessor: Accessor<T>) -> Self {
        Self {
            key,
            header,
            kind,
            accessor,
            sortable: true,
            filterable: true,
            hideable: true,
            comparator: None,
        }
    }

    pub fn text(key: &'static str, header: &'static str, accessor: Accessor<T>) -> Self {
        Self::new(key, header, ColumnKind::Text, accessor)
    }

    pub fn number(key: &'static str, header: &'static str, accessor: Accessor<T>) -> Self {
        Self::new(key, header, ColumnKind::Number, accessor)
    }

    pub fn date(key: &'static str, header: &'static str, accessor: Accessor<T>) -> Self {
        Self::new(key, header, ColumnKind::Date, accessor)
    }

    pub fn list(key: &'static str, header: &'static str, accessor: Accessor<T>) -> Self {
        Self::new(key, header, ColumnKind::List, accessor)
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub fn not_hideable(mut self) -> Self {
        self.hideable = false;
        self
    }

    pub fn with_comparator(mut self, comparator: Comparator<T>) -> Self {
        self.comparator = Some(comparator);
        self
    }

    pub fn value(&self, record: &T) -> CellValue {
        (self.accessor)(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_cells_compare_by_instant() {
        let a = CellValue::date(Some("2024-11-20"));
        let b = CellValue::date(Some("2024-11-15T23:00:00.000Z"));
        assert_eq!(compare_cells(&a, &b), Ordering::Greater);

        // Misma fecha con representaciones distintas
        let c = CellValue::date(Some("2024-11-15"));
        let d = CellValue::date(Some("2024-11-15T00:00:00.000Z"));
        assert_eq!(compare_cells(&c, &d), Ordering::Equal);
    }

    #[test]
    fn test_unparseable_date_is_empty() {
        assert!(CellValue::date(Some("soon")).is_empty());
        assert!(CellValue::date(None).is_empty());
    }

    #[test]
    fn test_text_compare_ignores_case_first() {
        let a = CellValue::text("alpha");
        let b = CellValue::text("Beta");
        assert_eq!(compare_cells(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let a = CellValue::number(Some(9.0));
        let b = CellValue::number(Some(100.0));
        assert_eq!(compare_cells(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        assert!(CellValue::text("SYP-763561").matches("syp"));
        assert!(CellValue::list(["engine", "Brakes"]).matches("brak"));
        assert!(!CellValue::Empty.matches("x"));
        assert!(CellValue::Empty.matches(""));
    }
}
