//! Almacén de registros de una lista
//!
//! Copia transitoria de lo que devolvió el API remoto. Se reemplaza entera
//! en cada fetch; un fetch fallido conserva la copia anterior.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::TableRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub status: FetchStatus,
    pub fetched_at: Option<DateTime<Utc>>,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
    status: FetchStatus,
    fetched_at: Option<DateTime<Utc>>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            status: FetchStatus::Idle,
            fetched_at: None,
        }
    }
}

impl<T> RecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn info(&self) -> StoreInfo {
        StoreInfo {
            status: self.status,
            fetched_at: self.fetched_at,
            count: self.records.len(),
        }
    }

    pub fn mark_loading(&mut self) {
        self.status = FetchStatus::Loading;
    }

    pub fn mark_failed(&mut self) {
        self.status = FetchStatus::Failed;
    }

    pub fn replace(&mut self, records: Vec<T>) {
        self.records = records;
        self.status = FetchStatus::Ready;
        self.fetched_at = Some(Utc::now());
    }
}

impl<T: TableRecord> RecordStore<T> {
    pub fn find(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.record_id() == id)
    }
}
