// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Cuenta administrativa, tal como viene de la base de datos.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Usuario {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE: el hash jamás sale en el JSON
    pub password_hash: String,

    pub rol_id: Uuid,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Detalle de usuario con sus vínculos muchos-a-muchos resueltos.
#[derive(Debug, Serialize)]
pub struct UsuarioDetalle {
    #[serde(flatten)]
    pub usuario: Usuario,
    pub permisos: Vec<String>,
    pub regiones: Vec<Uuid>,
}

// Credenciales del login administrativo (web).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginWebPayload {
    #[validate(email(message = "El e-mail ingresado es inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,
}

// Credenciales del login de terreno (app de guardias).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginAppPayload {
    #[validate(length(min = 1, message = "El RUT es obligatorio."))]
    pub rut: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,
}

// Respuesta de autenticación con el token.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

/// Clase de portador del token: cuenta administrativa o guardia de terreno.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoPortador {
    Web,
    App,
}

// Estructura de datos ("claims") dentro del JWT.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,          // ID del portador
    pub tipo: TipoPortador, // web (usuario) | app (guardia)
    pub rol: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CrearUsuarioPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[validate(email(message = "El e-mail ingresado es inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,
    pub rol_id: Uuid,
    #[serde(default)]
    pub permisos: Vec<String>, // slugs
    #[serde(default)]
    pub regiones: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarUsuarioPayload {
    pub nombre: Option<String>,
    #[validate(email(message = "El e-mail ingresado es inválido."))]
    pub email: Option<String>,
    pub rol_id: Option<Uuid>,
    pub activo: Option<bool>,
    // Si vienen presentes, reemplazan los vínculos completos.
    pub permisos: Option<Vec<String>>,
    pub regiones: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CambiarPasswordPayload {
    #[validate(length(min = 1, message = "La contraseña actual es obligatoria."))]
    pub password_actual: String,
    #[validate(length(min = 6, message = "La nueva contraseña debe tener al menos 6 caracteres."))]
    pub password_nueva: String,
}

// Filtros del listado de usuarios.
#[derive(Debug, Deserialize)]
pub struct FiltroUsuarios {
    pub search: Option<String>,
}
