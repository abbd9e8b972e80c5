// src/handlers/blacklist.rs
//
// Lista negra de personas vetadas. El campo agregado_por guarda el
// nombre del actor como texto: la entrada sobrevive aunque el usuario
// se elimine después.

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
        rbac::{PermGestionarBlacklist, RequirePermiso},
    },
    models::cumplimiento::{
        ActualizarEntradaListaNegraPayload, CrearEntradaListaNegraPayload, FiltroListaNegra,
    },
};

// POST /api/blacklist
pub async fn crear(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermGestionarBlacklist>,
    Json(payload): Json<CrearEntradaListaNegraPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let entrada = app_state
        .cumplimiento_repo
        .crear_entrada_lista_negra(
            &payload.nombre,
            &payload.rut,
            payload.recintos.as_deref(),
            payload.fecha_bloqueo,
            &payload.motivo,
            &actor.nombre,
            Some(actor.id),
        )
        .await?;

    app_state
        .auditoria_service
        .registrar(
            Some(actor.id),
            Some(entrada.id),
            "BLACKLIST_ENTRADA_CREADA",
            json!({ "rut": entrada.rut }),
        )
        .await;

    Ok((StatusCode::CREATED, Json(entrada)))
}

// GET /api/blacklist
pub async fn listar(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermGestionarBlacklist>,
    Query(pag): Query<ParamsPaginacion>,
    Query(filtro): Query<FiltroListaNegra>,
) -> Result<impl IntoResponse, AppError> {
    let pag = pag.normalizar();
    let (total, filas) = app_state
        .cumplimiento_repo
        .listar_lista_negra(filtro.search.as_deref(), &pag)
        .await?;

    Ok(Json(pag.envolver("entradas", total, filas)))
}

// GET /api/blacklist/verificar/{rut}
pub async fn verificar(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermGestionarBlacklist>,
    Path(rut): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bloqueado = app_state.cumplimiento_repo.existe_rut_bloqueado(&rut).await?;
    Ok(Json(json!({ "rut": rut, "bloqueado": bloqueado })))
}

// PUT /api/blacklist/{id}
pub async fn actualizar(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermGestionarBlacklist>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarEntradaListaNegraPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let entrada = app_state
        .cumplimiento_repo
        .actualizar_entrada_lista_negra(id, &payload)
        .await?;

    app_state
        .auditoria_service
        .registrar(
            Some(actor.id),
            Some(id),
            "BLACKLIST_ENTRADA_ACTUALIZADA",
            json!({ "rut": entrada.rut }),
        )
        .await;

    Ok(Json(entrada))
}

// DELETE /api/blacklist/{id}
pub async fn eliminar(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermGestionarBlacklist>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state
        .cumplimiento_repo
        .eliminar_entrada_lista_negra(id)
        .await?
    {
        return Err(AppError::NoEncontrado("Entrada de lista negra".into()));
    }

    app_state
        .auditoria_service
        .registrar(Some(actor.id), Some(id), "BLACKLIST_ENTRADA_ELIMINADA", json!({}))
        .await;

    Ok(StatusCode::NO_CONTENT)
}
