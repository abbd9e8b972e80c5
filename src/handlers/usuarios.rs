// src/handlers/usuarios.rs

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
        rbac::{PermGestionarUsuarios, RequirePermiso},
    },
    models::auth::{
        ActualizarUsuarioPayload, CambiarPasswordPayload, CrearUsuarioPayload, FiltroUsuarios,
        UsuarioDetalle,
    },
};

// POST /api/usuarios
pub async fn crear(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermGestionarUsuarios>,
    Json(payload): Json<CrearUsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let detalle = app_state.personal_service.crear_usuario(&payload).await?;

    app_state
        .auditoria_service
        .registrar(
            Some(actor.id),
            Some(detalle.usuario.id),
            "USUARIO_CREADO",
            json!({ "email": detalle.usuario.email }),
        )
        .await;

    Ok((StatusCode::CREATED, Json(detalle)))
}

// GET /api/usuarios
pub async fn listar(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermGestionarUsuarios>,
    Query(pag): Query<ParamsPaginacion>,
    Query(filtro): Query<FiltroUsuarios>,
) -> Result<impl IntoResponse, AppError> {
    let pag = pag.normalizar();
    let (total, filas) = app_state
        .usuario_repo
        .listar(filtro.search.as_deref(), &pag)
        .await?;

    Ok(Json(pag.envolver("usuarios", total, filas)))
}

// GET /api/usuarios/{id}
pub async fn obtener(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermGestionarUsuarios>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = app_state
        .usuario_repo
        .buscar_por_id(id)
        .await?
        .ok_or_else(|| AppError::NoEncontrado("Usuario".into()))?;

    let permisos = app_state.usuario_repo.permisos_de(id).await?;
    let regiones = app_state.usuario_repo.regiones_de(id).await?;

    Ok(Json(UsuarioDetalle {
        usuario,
        permisos,
        regiones,
    }))
}

// PUT /api/usuarios/{id}
pub async fn actualizar(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermGestionarUsuarios>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarUsuarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let detalle = app_state
        .personal_service
        .actualizar_usuario(id, &payload)
        .await?;

    app_state
        .auditoria_service
        .registrar(
            Some(actor.id),
            Some(id),
            "USUARIO_ACTUALIZADO",
            json!({ "email": detalle.usuario.email }),
        )
        .await;

    Ok(Json(detalle))
}

// DELETE /api/usuarios/{id}
pub async fn eliminar(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermGestionarUsuarios>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.usuario_repo.eliminar(id).await? {
        return Err(AppError::NoEncontrado("Usuario".into()));
    }

    app_state
        .auditoria_service
        .registrar(Some(actor.id), Some(id), "USUARIO_ELIMINADO", json!({}))
        .await;

    Ok(StatusCode::NO_CONTENT)
}

// PUT /api/usuarios/me/password — autoservicio, sin permiso especial
pub async fn cambiar_password(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<CambiarPasswordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    app_state
        .personal_service
        .cambiar_password(&usuario, &payload)
        .await?;

    app_state
        .auditoria_service
        .registrar(
            Some(usuario.id),
            Some(usuario.id),
            "PASSWORD_CAMBIADA",
            json!({}),
        )
        .await;

    Ok(StatusCode::NO_CONTENT)
}
