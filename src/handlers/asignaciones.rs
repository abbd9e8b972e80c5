// src/handlers/asignaciones.rs

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
    models::asignacion::{ActualizarAsignacionPayload, CrearAsignacionPayload, FiltroAsignaciones},
};

// POST /api/asignaciones
pub async fn crear(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermGestionarGuardias>,
    Json(payload): Json<CrearAsignacionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let asignacion = app_state.asignacion_service.crear(&payload).await?;

    app_state
        .auditoria_service
        .registrar(
            Some(actor.id),
            Some(asignacion.id),
            "ASIGNACION_CREADA",
            json!({ "guardia_id": asignacion.guardia_id, "fecha": asignacion.fecha }),
        )
        .await;

    Ok((StatusCode::CREATED, Json(asignacion)))
}

// GET /api/asignaciones
pub async fn listar(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermGestionarGuardias>,
    Query(pag): Query<ParamsPaginacion>,
    Query(filtro): Query<FiltroAsignaciones>,
) -> Result<impl IntoResponse, AppError> {
    let pag = pag.normalizar();
    let (total, filas) = app_state
        .asignacion_repo
        .listar(filtro.guardia_id, filtro.instalacion_id, filtro.fecha, &pag)
        .await?;

    Ok(Json(pag.envolver("asignaciones", total, filas)))
}

// GET /api/asignaciones/{id}
pub async fn obtener(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermGestionarGuardias>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalle = app_state
        .asignacion_repo
        .obtener_detalle(id)
        .await?
        .ok_or_else(|| AppError::NoEncontrado("Asignación".into()))?;

    Ok(Json(detalle))
}

// PUT /api/asignaciones/{id}
pub async fn actualizar(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermGestionarGuardias>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarAsignacionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let asignacion = app_state.asignacion_service.actualizar(id, &payload).await?;

    app_state
        .auditoria_service
        .registrar(
            Some(actor.id),
            Some(id),
            "ASIGNACION_ACTUALIZADA",
            json!({ "estado": asignacion.estado }),
        )
        .await;

    Ok(Json(asignacion))
}

// DELETE /api/asignaciones/{id}
pub async fn eliminar(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermGestionarGuardias>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.asignacion_repo.eliminar(id).await? {
        return Err(AppError::NoEncontrado("Asignación".into()));
    }

    app_state
        .auditoria_service
        .registrar(Some(actor.id), Some(id), "ASIGNACION_ELIMINADA", json!({}))
        .await;

    Ok(StatusCode::NO_CONTENT)
}
