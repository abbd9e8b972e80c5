// src/handlers/guardias.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, paginacion::ParamsPaginacion},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermGestionarGuardias, RequirePermiso},
    },
    models::guardia::{ActualizarGuardiaPayload, CrearGuardiaPayload, FiltroGuardias},
};

// POST /api/guardias
pub async fn crear(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermGestionarGuardias>,
    Json(payload): Json<CrearGuardiaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let guardia = app_state.personal_service.crear_guardia(&payload).await?;

    app_state
        .auditoria_service
        .registrar(
            Some(actor.id),
            Some(guardia.id),
            "GUARDIA_CREADO",
            json!({ "rut": guardia.rut }),
        )
        .await;

    Ok((StatusCode::CREATED, Json(guardia)))
}

// GET /api/guardias
pub async fn listar(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermGestionarGuardias>,
    Query(pag): Query<ParamsPaginacion>,
    Query(filtro): Query<FiltroGuardias>,
) -> Result<impl IntoResponse, AppError> {
    let pag = pag.normalizar();
    let (total, filas) = app_state
        .guardia_repo
        .listar(filtro.search.as_deref(), filtro.activo, &pag)
        .await?;

    Ok(Json(pag.envolver("guardias", total, filas)))
}

// GET /api/guardias/{id}
pub async fn obtener(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermGestionarGuardias>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let guardia = app_state
        .guardia_repo
        .buscar_por_id(id)
        .await?
        .ok_or_else(|| AppError::NoEncontrado("Guardia".into()))?;

    Ok(Json(guardia))
}

// PUT /api/guardias/{id}
pub async fn actualizar(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermGestionarGuardias>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarGuardiaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let guardia = app_state
        .personal_service
        .actualizar_guardia(id, &payload)
        .await?;

    app_state
        .auditoria_service
        .registrar(
            Some(actor.id),
            Some(id),
            "GUARDIA_ACTUALIZADO",
            json!({ "rut": guardia.rut }),
        )
        .await;

    Ok(Json(guardia))
}

// DELETE /api/guardias/{id}
pub async fn eliminar(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermGestionarGuardias>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.guardia_repo.eliminar(id).await? {
        return Err(AppError::NoEncontrado("Guardia".into()));
    }

    app_state
        .auditoria_service
        .registrar(Some(actor.id), Some(id), "GUARDIA_ELIMINADO", json!({}))
        .await;

    Ok(StatusCode::NO_CONTENT)
}
