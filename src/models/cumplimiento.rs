// src/models/cumplimiento.rs
//
// Lista negra, bitácora y auditoría: los tres registros de cumplimiento.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// --- Lista negra ---
//
// `agregado_por` es una instantánea del nombre del administrador que
// creó la entrada; sobrevive al borrado del usuario aunque
// `agregado_por_id` quede en NULL.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EntradaListaNegra {
    pub id: Uuid,
    pub nombre: String,
    pub rut: String,
    pub recintos: Option<String>,
    pub fecha_bloqueo: NaiveDate,
    pub motivo: String,
    pub agregado_por: String,
    pub agregado_por_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CrearEntradaListaNegraPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[validate(length(min = 1, message = "El RUT es obligatorio."))]
    pub rut: String,
    pub recintos: Option<String>,
    pub fecha_bloqueo: NaiveDate,
    #[validate(length(min = 1, message = "El motivo es obligatorio."))]
    pub motivo: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarEntradaListaNegraPayload {
    pub nombre: Option<String>,
    pub recintos: Option<String>,
    pub fecha_bloqueo: Option<NaiveDate>,
    pub motivo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FiltroListaNegra {
    pub search: Option<String>, // nombre o RUT
}

// --- Bitácora ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "nivel_bitacora", rename_all = "PascalCase")]
pub enum NivelBitacora {
    Info,
    Advertencia,
    Error,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EntradaBitacora {
    pub id: Uuid,
    pub mensaje: String,
    pub nivel: NivelBitacora,
    pub autor: String,
    pub ip_origen: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CrearEntradaBitacoraPayload {
    #[validate(length(min = 1, message = "El mensaje es obligatorio."))]
    pub mensaje: String,
    pub nivel: NivelBitacora,
    pub ip_origen: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FiltroBitacora {
    pub search: Option<String>, // subcadena dentro del mensaje
    pub nivel: Option<NivelBitacora>,
}

// --- Auditoría ---
//
// Registro estructurado, solo-inserción; la aplicación jamás lo
// actualiza ni lo borra.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RegistroAuditoria {
    pub id: Uuid,
    pub usuario_id: Option<Uuid>,
    pub entidad_id: Option<Uuid>,
    pub accion: String,
    pub detalle: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct FiltroAuditoria {
    pub accion: Option<String>,
    pub usuario_id: Option<Uuid>,
}
