use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{MaintenanceType, VehicleKind, VehiclePart};
use crate::services::maintenance_form::{FormContext, FormMode, MaintenanceFormInput};

#[derive(Debug, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub parts: Vec<SelectOption>,
    pub types: Vec<&'static str>,
}

impl FormOptions {
    pub fn fixed() -> Self {
        Self {
            parts: VehiclePart::ALL
                .iter()
                .map(|p| SelectOption {
                    value: p.as_str(),
                    label: p.label(),
                })
                .collect(),
            types: MaintenanceType::names(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormVehicle {
    pub slug: String,
    pub name: String,
    pub kind: VehicleKind,
}

/// Formulario listo para pintar: modo, vehículo, valores iniciales y opciones
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceFormView {
    pub mode: FormMode,
    pub vehicle: FormVehicle,
    pub values: MaintenanceFormInput,
    pub options: FormOptions,
}

impl MaintenanceFormView {
    pub fn build(context: &FormContext, today: NaiveDate) -> Self {
        let vehicle = context.vehicle();
        Self {
            mode: context.mode(),
            vehicle: FormVehicle {
                slug: vehicle.slug.clone(),
                name: vehicle.name.clone(),
                kind: context.vehicle_kind(),
            },
            values: context.defaults(today),
            options: FormOptions::fixed(),
        }
    }
}
