use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nuestro tipo de error, con `thiserror` para mejor ergonomía.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    // Regla de negocio violada (stock insuficiente, superposición de turnos, etc.)
    #[error("{0}")]
    ReglaDeNegocio(String),

    #[error("Credenciales inválidas")]
    CredencialesInvalidas,

    #[error("Token inválido")]
    TokenInvalido,

    #[error("Permiso denegado: {0}")]
    PermisoDenegado(String),

    #[error("{0} no encontrado")]
    NoEncontrado(String),

    // Variante para errores de base de datos (sqlx)
    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para cualquier otro error inesperado.
    // `anyhow::Error` es ideal para capturar el contexto del error.
    #[error("Error interno del servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Error de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Error de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devolvemos todos los detalles de la validación, campo por campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::ReglaDeNegocio(msg) => {
                return (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response();
            }
            AppError::CredencialesInvalidas => {
                (StatusCode::UNAUTHORIZED, "Credenciales inválidas.".to_string())
            }
            AppError::TokenInvalido => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticación inválido o ausente.".to_string(),
            ),
            AppError::PermisoDenegado(slug) => (
                StatusCode::FORBIDDEN,
                format!("Necesita el permiso '{}' para realizar esta acción.", slug),
            ),
            AppError::NoEncontrado(entidad) => {
                (StatusCode::NOT_FOUND, format!("{} no encontrado.", entidad))
            }

            // Todo lo demás (DatabaseError, InternalServerError, etc.) es un 500.
            // El detalle va al log vía `tracing`; al cliente solo le llega un
            // mensaje genérico, nunca el error crudo.
            ref e => {
                tracing::error!("Error interno del servidor: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocurrió un error inesperado.".to_string(),
                )
            }
        };

        // Respuesta estándar para errores simples que solo llevan un mensaje.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl AppError {
    /// Convierte una violación de UNIQUE en un error de regla de negocio (400).
    /// Cualquier otro error de sqlx pasa intacto como error de base de datos.
    pub fn desde_unique(e: sqlx::Error, mensaje: &str) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::ReglaDeNegocio(mensaje.to_string());
            }
        }
        AppError::DatabaseError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regla_de_negocio_es_400() {
        let resp = AppError::ReglaDeNegocio("Stock insuficiente".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn credenciales_invalidas_es_401() {
        let resp = AppError::CredencialesInvalidas.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn permiso_denegado_es_403() {
        let resp = AppError::PermisoDenegado("AJUSTAR_STOCK".into()).into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn no_encontrado_es_404() {
        let resp = AppError::NoEncontrado("Guardia".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_de_bd_es_500() {
        let resp = AppError::DatabaseError(sqlx::Error::PoolClosed).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
