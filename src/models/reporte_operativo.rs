// src/models/reporte_operativo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// Reporte de incidente. La autoría es excluyente: lo firma un guardia
// (app) o una cuenta administrativa (web), nunca ambos.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReporteOperativo {
    pub id: Uuid,
    pub guardia_id: Option<Uuid>,
    pub usuario_id: Option<Uuid>,
    pub tipo_incidente: String,
    pub gravedad: String,
    pub fecha_hora: DateTime<Utc>,
    pub instalacion_id: Option<Uuid>,
    pub lugar: Option<String>,
    pub descripcion: String,
    pub escalado: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CrearReporteOperativoPayload {
    #[validate(length(min = 1, message = "El tipo de incidente es obligatorio."))]
    pub tipo_incidente: String,
    #[validate(length(min = 1, message = "La gravedad es obligatoria."))]
    pub gravedad: String,
    pub fecha_hora: DateTime<Utc>,
    pub instalacion_id: Option<Uuid>,
    pub lugar: Option<String>,
    #[validate(length(min = 1, message = "La descripción es obligatoria."))]
    pub descripcion: String,
    #[serde(default)]
    pub escalado: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarReporteOperativoPayload {
    pub tipo_incidente: Option<String>,
    pub gravedad: Option<String>,
    pub fecha_hora: Option<DateTime<Utc>>,
    pub instalacion_id: Option<Uuid>,
    pub lugar: Option<String>,
    pub descripcion: Option<String>,
    pub escalado: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct FiltroReportesOperativos {
    pub gravedad: Option<String>,
    pub tipo_incidente: Option<String>,
}
