// src/handlers/entregas.rs

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
        rbac::{PermAjustarStock, PermVerInventario, RequirePermiso},
    },
    models::entrega::{CrearEntregaPayload, FiltroEntregas, FirmarEntregaPayload},
};

// POST /api/entrega-epp
pub async fn crear(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermAjustarStock>,
    Json(payload): Json<CrearEntregaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let detalle = app_state.entrega_service.crear(actor.id, &payload).await?;

    app_state
        .auditoria_service
        .registrar(
            Some(actor.id),
            Some(detalle.entrega.id),
            "ENTREGA_CREADA",
            json!({
                "receptor_rut": detalle.entrega.receptor_rut,
                "items": detalle.items.len(),
            }),
        )
        .await;

    Ok((StatusCode::CREATED, Json(detalle)))
}

// GET /api/entrega-epp
pub async fn listar(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermVerInventario>,
    Query(pag): Query<ParamsPaginacion>,
    Query(filtro): Query<FiltroEntregas>,
) -> Result<impl IntoResponse, AppError> {
    let pag = pag.normalizar();
    let (total, filas) = app_state
        .entrega_repo
        .listar(filtro.guardia_id, filtro.estado, &pag)
        .await?;

    Ok(Json(pag.envolver("entregas", total, filas)))
}

// GET /api/entrega-epp/{id}
pub async fn obtener(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermVerInventario>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalle = app_state.entrega_service.obtener_detalle(id).await?;
    Ok(Json(detalle))
}

// PUT /api/entrega-epp/{id}/firmar
pub async fn firmar(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermAjustarStock>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FirmarEntregaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let entrega = app_state.entrega_service.firmar(id, &payload.firma).await?;

    app_state
        .auditoria_service
        .registrar(Some(actor.id), Some(id), "ENTREGA_FIRMADA", json!({}))
        .await;

    Ok(Json(entrega))
}
