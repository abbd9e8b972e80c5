// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{auth::{TipoPortador, Usuario}, guardia::Guardia},
};

/// Quién porta el token: una cuenta administrativa o un guardia de
/// terreno. Viaja en las extensions de la petición.
#[derive(Clone)]
pub enum Identidad {
    Usuario(Usuario),
    Guardia(Guardia),
}

// El middleware en sí: valida el bearer y resuelve al portador.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();
    let auth_header = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let claims = app_state.auth_service.validar_token(token)?;

            let identidad = match claims.tipo {
                TipoPortador::Web => {
                    Identidad::Usuario(app_state.auth_service.resolver_usuario(&claims).await?)
                }
                TipoPortador::App => {
                    Identidad::Guardia(app_state.auth_service.resolver_guardia(&claims).await?)
                }
            };

            request.extensions_mut().insert(identidad);
            return Ok(next.run(request).await);
        }
    }

    Err(AppError::TokenInvalido)
}

/// Extractor para handlers exclusivos de cuentas administrativas.
/// Un guardia autenticado recibe 403, no 401.
pub struct AuthenticatedUser(pub Usuario);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identidad>() {
            Some(Identidad::Usuario(u)) => Ok(AuthenticatedUser(u.clone())),
            Some(Identidad::Guardia(_)) => {
                Err(AppError::PermisoDenegado("acceso administrativo".into()))
            }
            None => Err(AppError::TokenInvalido),
        }
    }
}

/// Extractor para handlers abiertos a ambas clases de portador
/// (reportes operativos).
pub struct Portador(pub Identidad);

impl<S> FromRequestParts<S> for Portador
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identidad>()
            .cloned()
            .map(Portador)
            .ok_or(AppError::TokenInvalido)
    }
}
