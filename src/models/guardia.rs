// src/models/guardia.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// Ficha completa del guardia. Las referencias a tablas de apoyo
// (AFP, salud, estado civil, comuna) son anulables: borrar el
// catálogo nunca arrastra al guardia.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Guardia {
    pub id: Uuid,
    pub rut: String,
    pub nombre: String,
    pub apellido: String,
    pub email: Option<String>,
    pub telefono: Option<String>,

    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    pub app_habilitado: bool,
    pub ultimo_acceso: Option<DateTime<Utc>>,

    // Metadatos de empleo
    pub tipo_contrato: Option<String>,
    pub talla_ropa: Option<String>,
    pub talla_calzado: Option<String>,
    pub banco: Option<String>,
    pub numero_cuenta: Option<String>,

    pub afp_id: Option<Uuid>,
    pub salud_id: Option<Uuid>,
    pub estado_civil_id: Option<Uuid>,
    pub comuna_id: Option<Uuid>,

    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CrearGuardiaPayload {
    #[validate(length(min = 1, message = "El RUT es obligatorio."))]
    pub rut: String,
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[validate(length(min = 1, message = "El apellido es obligatorio."))]
    pub apellido: String,
    #[validate(email(message = "El e-mail ingresado es inválido."))]
    pub email: Option<String>,
    pub telefono: Option<String>,

    // Credencial de la app de terreno; opcional hasta habilitar el acceso.
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: Option<String>,
    #[serde(default)]
    pub app_habilitado: bool,

    pub tipo_contrato: Option<String>,
    pub talla_ropa: Option<String>,
    pub talla_calzado: Option<String>,
    pub banco: Option<String>,
    pub numero_cuenta: Option<String>,

    pub afp_id: Option<Uuid>,
    pub salud_id: Option<Uuid>,
    pub estado_civil_id: Option<Uuid>,
    pub comuna_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarGuardiaPayload {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    #[validate(email(message = "El e-mail ingresado es inválido."))]
    pub email: Option<String>,
    pub telefono: Option<String>,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: Option<String>,
    pub app_habilitado: Option<bool>,
    pub tipo_contrato: Option<String>,
    pub talla_ropa: Option<String>,
    pub talla_calzado: Option<String>,
    pub banco: Option<String>,
    pub numero_cuenta: Option<String>,
    pub afp_id: Option<Uuid>,
    pub salud_id: Option<Uuid>,
    pub estado_civil_id: Option<Uuid>,
    pub comuna_id: Option<Uuid>,
    pub activo: Option<bool>,
}

// Filtros del listado de guardias.
#[derive(Debug, Deserialize)]
pub struct FiltroGuardias {
    pub search: Option<String>, // nombre, apellido o RUT
    pub activo: Option<bool>,
}
