// src/models/asignacion.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "estado_asignacion", rename_all = "PascalCase")]
pub enum EstadoAsignacion {
    Programado,
    Completado,
}

// Un turno: un guardia, una instalación, una fecha y una ventana horaria.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Asignacion {
    pub id: Uuid,
    pub guardia_id: Uuid,
    pub instalacion_id: Uuid,
    pub fecha: NaiveDate,
    pub turno: String,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub estado: EstadoAsignacion,
    pub observacion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Fila del listado, con los resúmenes de guardia e instalación resueltos.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AsignacionDetalle {
    pub id: Uuid,
    pub guardia_id: Uuid,
    pub guardia_nombre: String,
    pub guardia_apellido: String,
    pub guardia_rut: String,
    pub instalacion_id: Uuid,
    pub instalacion_nombre: String,
    pub fecha: NaiveDate,
    pub turno: String,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub estado: EstadoAsignacion,
    pub observacion: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CrearAsignacionPayload {
    pub guardia_id: Uuid,
    pub instalacion_id: Uuid,
    pub fecha: NaiveDate,
    #[validate(length(min = 1, message = "El turno es obligatorio."))]
    pub turno: String,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub observacion: Option<String>,
}

// En la actualización todos los campos son opcionales; la validación de
// superposición solo corre si cambian guardia, fecha u horario.
#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarAsignacionPayload {
    pub guardia_id: Option<Uuid>,
    pub instalacion_id: Option<Uuid>,
    pub fecha: Option<NaiveDate>,
    pub turno: Option<String>,
    pub hora_inicio: Option<NaiveTime>,
    pub hora_fin: Option<NaiveTime>,
    pub estado: Option<EstadoAsignacion>,
    pub observacion: Option<String>,
}

impl ActualizarAsignacionPayload {
    /// ¿El payload toca alguno de los campos que definen el intervalo?
    pub fn afecta_horario(&self) -> bool {
        self.guardia_id.is_some()
            || self.fecha.is_some()
            || self.hora_inicio.is_some()
            || self.hora_fin.is_some()
    }
}

// Filtros del listado de asignaciones.
#[derive(Debug, Deserialize)]
pub struct FiltroAsignaciones {
    pub guardia_id: Option<Uuid>,
    pub instalacion_id: Option<Uuid>,
    pub fecha: Option<NaiveDate>,
}
