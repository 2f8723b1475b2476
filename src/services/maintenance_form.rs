//! Formulario de mantenimiento
//!
//! Un mismo formulario sirve para programar (desde un envío) y para editar
//! (desde un mantenimiento). El modo lo decide el registro de contexto; las
//! filas de vehículo no son un contexto válido.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::{Validate, ValidationError};

use crate::models::{
    CreateMaintenanceSchedule, FleetRecord, Maintenance, MaintenanceType, Shipment,
    UpdateMaintenanceSchedule, VehicleKind, VehiclePart, VehicleSummary,
};
use crate::services::mutation_gateway::MutationGateway;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{parse_iso_date, validate_date, validate_enum, validate_not_empty};

fn validate_maintenance_type(value: &str) -> Result<(), ValidationError> {
    validate_enum(value, &MaintenanceType::names())
}

fn validate_parts(parts: &[String]) -> Result<(), ValidationError> {
    let allowed = VehiclePart::names();
    for part in parts {
        validate_enum(part, &allowed)?;
    }
    Ok(())
}

/// Valores tal como llegan del formulario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceFormInput {
    #[serde(default)]
    #[validate(custom = "validate_not_empty")]
    pub remarks: String,

    #[serde(default)]
    #[validate(custom = "validate_parts")]
    pub parts: Vec<String>,

    #[serde(rename = "type", default)]
    #[validate(required, custom = "validate_maintenance_type")]
    pub maintenance_type: Option<String>,

    #[serde(rename = "dueDate", default)]
    #[validate(required, custom = "validate_date")]
    pub due_date: Option<String>,

    #[serde(rename = "scheduledDate", default)]
    #[validate(required, custom = "validate_date")]
    pub scheduled_date: Option<String>,
}

/// Valores ya validados y tipados
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceFormValues {
    pub remarks: String,
    pub parts: Vec<VehiclePart>,
    pub maintenance_type: MaintenanceType,
    pub due_date: DateTime<Utc>,
    pub scheduled_date: DateTime<Utc>,
}

impl MaintenanceFormInput {
    /// Valida y convierte. Un fallo devuelve los errores por campo (422).
    pub fn into_values(self) -> AppResult<MaintenanceFormValues> {
        self.validate()?;

        let parts = self
            .parts
            .iter()
            .map(|p| p.parse::<VehiclePart>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::BadRequest)?;
        let maintenance_type = self
            .maintenance_type
            .as_deref()
            .unwrap_or_default()
            .parse::<MaintenanceType>()
            .map_err(AppError::BadRequest)?;

        Ok(MaintenanceFormValues {
            remarks: self.remarks,
            parts,
            maintenance_type,
            due_date: required_date(self.due_date.as_deref(), "dueDate")?,
            scheduled_date: required_date(self.scheduled_date.as_deref(), "scheduledDate")?,
        })
    }
}

fn required_date(value: Option<&str>, field: &str) -> AppResult<DateTime<Utc>> {
    value
        .and_then(parse_iso_date)
        .ok_or_else(|| AppError::BadRequest(format!("{} is not a valid date", field)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Update,
}

/// Registro desde el que se abre el formulario
#[derive(Debug, Clone, PartialEq)]
pub enum FormContext {
    Schedule(Shipment),
    Edit(Maintenance),
}

impl TryFrom<FleetRecord> for FormContext {
    type Error = AppError;

    fn try_from(record: FleetRecord) -> Result<Self, Self::Error> {
        match record {
            FleetRecord::Shipment(s) => Ok(FormContext::Schedule(s)),
            FleetRecord::Maintenance(m) => Ok(FormContext::Edit(m)),
            FleetRecord::Vehicle(v) => Err(AppError::BadRequest(format!(
                "vehicle '{}' cannot be used as a maintenance form context",
                v.slug
            ))),
        }
    }
}

/// Petición que se enviará al API según el modo
#[derive(Debug, Clone, PartialEq)]
pub enum MaintenanceRequest {
    Create(CreateMaintenanceSchedule),
    Update {
        id: String,
        body: UpdateMaintenanceSchedule,
    },
}

impl FormContext {
    pub fn mode(&self) -> FormMode {
        match self {
            FormContext::Schedule(_) => FormMode::Create,
            FormContext::Edit(_) => FormMode::Update,
        }
    }

    pub fn vehicle(&self) -> &VehicleSummary {
        match self {
            FormContext::Schedule(s) => &s.vehicle,
            FormContext::Edit(m) => &m.vehicle,
        }
    }

    pub fn vehicle_kind(&self) -> VehicleKind {
        match self {
            FormContext::Schedule(s) => s.vehicle_kind(),
            FormContext::Edit(m) => VehicleKind::from_type(m.vehicle.vehicle_type.as_deref()),
        }
    }

    /// Valores iniciales: hoy en ambas fechas al crear, el registro al editar
    pub fn defaults(&self, today: NaiveDate) -> MaintenanceFormInput {
        match self {
            FormContext::Schedule(_) => {
                let today = today.format("%Y-%m-%d").to_string();
                MaintenanceFormInput {
                    remarks: String::new(),
                    parts: Vec::new(),
                    maintenance_type: None,
                    due_date: Some(today.clone()),
                    scheduled_date: Some(today),
                }
            }
            FormContext::Edit(m) => MaintenanceFormInput {
                remarks: m.remarks.clone(),
                parts: m.parts.clone(),
                maintenance_type: Some(m.maintenance_type.as_str().to_string()),
                due_date: Some(m.due_date.clone()),
                scheduled_date: Some(m.scheduled_date.clone()),
            },
        }
    }

    pub fn build_request(&self, values: MaintenanceFormValues) -> MaintenanceRequest {
        match self {
            FormContext::Schedule(shipment) => MaintenanceRequest::Create(CreateMaintenanceSchedule {
                vehicle_slug: shipment.vehicle.slug.clone(),
                remarks: values.remarks,
                parts: values.parts,
                maintenance_type: values.maintenance_type,
                due_date: values.due_date,
                scheduled_date: values.scheduled_date,
            }),
            FormContext::Edit(maintenance) => MaintenanceRequest::Update {
                id: maintenance.id.clone(),
                body: UpdateMaintenanceSchedule {
                    remarks: values.remarks,
                    parts: values.parts,
                    maintenance_type: values.maintenance_type,
                    due_date: values.due_date,
                    scheduled_date: values.scheduled_date,
                },
            },
        }
    }

    /// Valida, envía y publica el aviso. No toca diálogos ni listas.
    pub async fn submit(&self, input: MaintenanceFormInput, gateway: &MutationGateway) -> AppResult<()> {
        let values = input.into_values()?;
        match self.build_request(values) {
            MaintenanceRequest::Create(body) => {
                debug!("📝 Programando mantenimiento para {}", body.vehicle_slug);
                gateway.create_maintenance(&body).await
            }
            MaintenanceRequest::Update { id, body } => {
                debug!("📝 Actualizando mantenimiento {}", id);
                gateway.update_maintenance(&id, &body).await
            }
        }
    }
}
