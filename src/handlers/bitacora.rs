// src/handlers/bitacora.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{error::AppError, paginacion::ParamsPaginacion},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::cumplimiento::{CrearEntradaBitacoraPayload, FiltroBitacora},
};

// POST /api/bitacora
//
// El autor sale del token, nunca del payload.
pub async fn crear(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(payload): Json<CrearEntradaBitacoraPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let entrada = app_state
        .cumplimiento_repo
        .insertar_bitacora(
            &payload.mensaje,
            payload.nivel,
            &actor.nombre,
            payload.ip_origen.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entrada)))
}

// GET /api/bitacora
pub async fn listar(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
    Query(pag): Query<ParamsPaginacion>,
    Query(filtro): Query<FiltroBitacora>,
) -> Result<impl IntoResponse, AppError> {
    let pag = pag.normalizar();
    let (total, filas) = app_state
        .cumplimiento_repo
        .listar_bitacora(filtro.search.as_deref(), filtro.nivel, &pag)
        .await?;

    Ok(Json(pag.envolver("entradas", total, filas)))
}
