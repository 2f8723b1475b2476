//! Columnas de las tablas del dashboard

use super::column::{CellValue, ColumnDef};
use crate::models::{Maintenance, Shipment, Vehicle};

fn health_cell(level: Option<&crate::models::HealthLevel>) -> CellValue {
    CellValue::opt_text(level.map(|l| l.as_str()))
}

pub fn shipment_columns() -> Vec<ColumnDef<Shipment>> {
    vec![
        ColumnDef::text("slug", "Shipment ID", |s: &Shipment| CellValue::text(&s.slug)).not_hideable(),
        ColumnDef::text("vehicleType", "Vehicle Type", |s: &Shipment| {
            CellValue::opt_text(s.vehicle_type.as_deref())
        }),
        ColumnDef::text("status", "Status", |s: &Shipment| CellValue::text(s.status.as_str())),
        ColumnDef::text("fromTo.from.name", "From", |s: &Shipment| {
            CellValue::opt_text(Some(s.from_to.from.name.as_str()))
        }),
        ColumnDef::text("fromTo.to.name", "To", |s: &Shipment| {
            CellValue::opt_text(Some(s.from_to.to.name.as_str()))
        }),
        ColumnDef::text("courierType", "Courier Type", |s: &Shipment| {
            CellValue::opt_text(s.courier_type.as_deref())
        }),
        ColumnDef::date("eta", "ETA", |s: &Shipment| CellValue::date(s.eta.as_deref())),
        ColumnDef::text("vehicleHealth.overall", "Overall Health", |s: &Shipment| {
            health_cell(s.vehicle.vehicle_health.overall.as_ref())
        }),
        ColumnDef::text("driverName", "Driver Name", |s: &Shipment| {
            CellValue::opt_text(Some(s.driver_name.as_str()))
        }),
        ColumnDef::number("weight", "Weight", |s: &Shipment| CellValue::number(s.weight)),
        ColumnDef::text("weightUnit", "Weight Unit", |s: &Shipment| {
            CellValue::opt_text(s.weight_unit.as_deref())
        }),
    ]
}

pub fn maintenance_columns() -> Vec<ColumnDef<Maintenance>> {
    vec![
        ColumnDef::text("slug", "Slug", |m: &Maintenance| CellValue::text(&m.slug)).not_hideable(),
        ColumnDef::text("status", "Status", |m: &Maintenance| CellValue::text(m.status.as_str())),
        ColumnDef::text("vehicle", "Vehicle", |m: &Maintenance| CellValue::text(&m.vehicle.slug)),
        ColumnDef::text("type", "Type", |m: &Maintenance| {
            CellValue::text(m.maintenance_type.as_str())
        }),
        ColumnDef::list("parts", "Parts", |m: &Maintenance| CellValue::list(m.parts.iter().cloned()))
            .not_sortable(),
        ColumnDef::date("scheduledDate", "Scheduled Date", |m: &Maintenance| {
            CellValue::date(Some(m.scheduled_date.as_str()))
        }),
        ColumnDef::date("dueDate", "Due Date", |m: &Maintenance| {
            CellValue::date(Some(m.due_date.as_str()))
        }),
    ]
}

pub fn vehicle_columns() -> Vec<ColumnDef<Vehicle>> {
    vec![
        ColumnDef::text("slug", "Vehicle ID", |v: &Vehicle| CellValue::text(&v.slug)).not_hideable(),
        ColumnDef::text("name", "Name", |v: &Vehicle| CellValue::text(&v.name)),
        ColumnDef::text("vehicleType", "Vehicle Type", |v: &Vehicle| {
            CellValue::opt_text(v.vehicle_type.as_deref())
        }),
        ColumnDef::text("status", "Status", |v: &Vehicle| CellValue::text(&v.status)),
        ColumnDef::text("shipmentSlug", "Shipment ID", |v: &Vehicle| {
            CellValue::text(&v.shipment_slug)
        }),
        ColumnDef::text("vehicleHealth.overall", "Overall Health", |v: &Vehicle| {
            health_cell(v.health.overall.as_ref())
        }),
        ColumnDef::text("driverName", "Driver Name", |v: &Vehicle| {
            CellValue::opt_text(Some(v.driver_name.as_str()))
        }),
    ]
}
